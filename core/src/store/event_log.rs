use super::GardenStore;
use crate::{
    error::GameResult,
    event::{EventLogEntry, GameEvent},
};
use rusqlite::{params, Connection};

pub(super) fn append(conn: &Connection, profile_id: &str, event: &GameEvent) -> GameResult<()> {
    conn.execute(
        "INSERT INTO event_log (profile_id, at, event_type, payload)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            profile_id,
            event.at(),
            event.type_name(),
            serde_json::to_string(event)?,
        ],
    )?;
    Ok(())
}

impl GardenStore {
    // ── Event log ──────────────────────────────────────────────

    pub fn events_for_profile(&self, profile_id: &str) -> GameResult<Vec<EventLogEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, profile_id, at, event_type, payload
             FROM event_log WHERE profile_id = ?1
             ORDER BY id ASC",
        )?;
        let entries = stmt
            .query_map(params![profile_id], |row| {
                Ok(EventLogEntry {
                    id:         Some(row.get(0)?),
                    profile_id: row.get(1)?,
                    at:         row.get(2)?,
                    event_type: row.get(3)?,
                    payload:    row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    /// Number of events of one type logged for a profile.
    pub fn event_count(&self, profile_id: &str, event_type: &str) -> GameResult<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM event_log WHERE profile_id = ?1 AND event_type = ?2",
            params![profile_id, event_type],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
