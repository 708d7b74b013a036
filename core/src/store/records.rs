//! Save-record documents: (profile_id, kind) → JSON payload.

use crate::{
    config::GameConfig,
    error::{GameError, GameResult},
    state::{Garden, Inventory, Player, RecordKind, SaveState},
    types::Timestamp,
};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{de::DeserializeOwned, Serialize};

pub(super) fn read<T: DeserializeOwned>(
    conn: &Connection,
    profile_id: &str,
    kind: RecordKind,
) -> GameResult<Option<T>> {
    let payload: Option<String> = conn
        .query_row(
            "SELECT payload FROM save_record WHERE profile_id = ?1 AND kind = ?2",
            params![profile_id, kind.name()],
            |row| row.get(0),
        )
        .optional()?;

    payload
        .map(|json| {
            serde_json::from_str(&json).map_err(|e| GameError::CorruptRecord {
                kind:   kind.name().to_string(),
                reason: e.to_string(),
            })
        })
        .transpose()
}

fn write<T: Serialize>(
    conn: &Connection,
    profile_id: &str,
    kind: RecordKind,
    value: &T,
    now: Timestamp,
) -> GameResult<()> {
    let payload = serde_json::to_string(value)?;
    conn.execute(
        "INSERT INTO save_record (profile_id, kind, payload, updated_at)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT (profile_id, kind) DO UPDATE
         SET payload = excluded.payload, updated_at = excluded.updated_at",
        params![profile_id, kind.name(), payload, now],
    )?;
    Ok(())
}

fn require<T: DeserializeOwned>(
    conn: &Connection,
    profile_id: &str,
    kind: RecordKind,
) -> GameResult<T> {
    read(conn, profile_id, kind)?.ok_or_else(|| GameError::ProfileNotFound {
        profile_id: profile_id.to_string(),
    })
}

pub(super) fn load_state(
    conn: &Connection,
    profile_id: &str,
    config: &GameConfig,
) -> GameResult<SaveState> {
    let state = SaveState {
        player:    require::<Player>(conn, profile_id, RecordKind::Player)?,
        inventory: require::<Inventory>(conn, profile_id, RecordKind::Inventory)?,
        garden:    require::<Garden>(conn, profile_id, RecordKind::Garden)?,
    };
    state.validate(config)?;
    Ok(state)
}

pub(super) fn write_state(
    conn: &Connection,
    profile_id: &str,
    state: &SaveState,
    now: Timestamp,
) -> GameResult<()> {
    write(conn, profile_id, RecordKind::Player, &state.player, now)?;
    write(conn, profile_id, RecordKind::Inventory, &state.inventory, now)?;
    write(conn, profile_id, RecordKind::Garden, &state.garden, now)?;
    Ok(())
}
