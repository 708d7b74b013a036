//! SQLite persistence layer.
//!
//! RULE: Only store/ talks to the database.
//! The engine hands whole operations to `update_state`; it never
//! executes SQL directly and never writes a partial state.

mod event_log;
mod records;

use crate::{
    config::GameConfig,
    error::GameResult,
    event::GameEvent,
    state::{RecordKind, SaveState},
    types::Timestamp,
};
use rusqlite::{params, Connection, OptionalExtension};

pub struct GardenStore {
    conn: Connection,
}

impl GardenStore {
    pub fn open(path: &str) -> GameResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (shared-memory and :memory: ignore it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> GameResult<Self> {
        let conn = Connection::open(":memory:")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> GameResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_save_records.sql"))?;
        self.conn
            .execute_batch(include_str!("../../../migrations/002_event_log.sql"))?;
        Ok(())
    }

    // ── Profile ────────────────────────────────────────────────

    pub fn profile_exists(&self, profile_id: &str) -> GameResult<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM profile WHERE profile_id = ?1",
                params![profile_id],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// Create a profile with its initial records and creation event.
    /// Returns false, touching nothing, if the profile already exists.
    pub fn init_profile(
        &self,
        profile_id: &str,
        state: &SaveState,
        event: &GameEvent,
        version: &str,
    ) -> GameResult<bool> {
        let tx = self.conn.unchecked_transaction()?;
        let inserted = tx.execute(
            "INSERT OR IGNORE INTO profile (profile_id, created_at, version) VALUES (?1, ?2, ?3)",
            params![profile_id, state.player.created_at, version],
        )?;
        if inserted == 0 {
            return Ok(false);
        }
        records::write_state(&tx, profile_id, state, state.player.created_at)?;
        event_log::append(&tx, profile_id, event)?;
        tx.commit()?;
        Ok(true)
    }

    // ── Records ────────────────────────────────────────────────

    /// Read one logical record as stored. `None` if it was never written.
    pub fn get_record<T: serde::de::DeserializeOwned>(
        &self,
        profile_id: &str,
        kind: RecordKind,
    ) -> GameResult<Option<T>> {
        records::read(&self.conn, profile_id, kind)
    }

    /// Load and validate all three records of a profile.
    pub fn load_state(&self, profile_id: &str, config: &GameConfig) -> GameResult<SaveState> {
        records::load_state(&self.conn, profile_id, config)
    }

    /// Atomic read-modify-write of a whole profile.
    ///
    /// `mutate` runs against a freshly loaded copy inside an IMMEDIATE
    /// transaction. On Ok, every record and every returned event is
    /// written and committed together; on Err nothing is written.
    pub fn update_state<T, F>(
        &self,
        profile_id: &str,
        config: &GameConfig,
        now: Timestamp,
        mutate: F,
    ) -> GameResult<T>
    where
        F: FnOnce(&mut SaveState) -> GameResult<(T, Vec<GameEvent>)>,
    {
        let tx = rusqlite::Transaction::new_unchecked(
            &self.conn,
            rusqlite::TransactionBehavior::Immediate,
        )?;
        let mut state = records::load_state(&tx, profile_id, config)?;

        // Dropping `tx` on the error path rolls back.
        let (result, events) = mutate(&mut state)?;

        records::write_state(&tx, profile_id, &state, now)?;
        for event in &events {
            event_log::append(&tx, profile_id, event)?;
        }
        tx.commit()?;
        Ok(result)
    }
}
