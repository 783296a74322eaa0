use crate::Database;
use crate::models::{ANON_ID_KEY, PreferenceRow, ROOM_KEY};
use anyhow::Result;
use rand::Rng;
use rusqlite::Connection;
use shadowtalk_identity::{generate_anon_id, is_valid_anon_id};
use shadowtalk_types::{BoardEvent, Emotion};
use tracing::{debug, info, warn};

impl Database {
    // -- Raw preferences --

    pub fn get_preference(&self, key: &str) -> Result<Option<PreferenceRow>> {
        self.with_conn(|conn| query_preference(conn, key))
    }

    pub fn set_preference(&self, key: &str, value: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO preferences (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = datetime('now')",
                rusqlite::params![key, value],
            )?;
            Ok(())
        })
    }

    pub fn delete_preference(&self, key: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM preferences WHERE key = ?1", [key])?;
            Ok(())
        })
    }

    // -- Anonymous id --

    pub fn get_anon_id(&self) -> Result<Option<String>> {
        Ok(self.get_preference(ANON_ID_KEY)?.map(|row| row.value))
    }

    pub fn set_anon_id(&self, id: &str) -> Result<()> {
        self.set_preference(ANON_ID_KEY, id)
    }

    /// Return the stored anonymous id, generating and storing one on first run.
    /// A stored value that is not a well-formed id is replaced.
    pub fn load_or_create_anon_id<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String> {
        if let Some(existing) = self.get_anon_id()? {
            if is_valid_anon_id(&existing) {
                return Ok(existing);
            }
            warn!("Stored anonymous id '{}' is malformed, replacing it", existing);
        }

        let id = generate_anon_id(rng);
        self.set_anon_id(&id)?;
        info!("Generated anonymous id {}", id);
        Ok(id)
    }

    // -- Room membership --

    /// The persisted room, unparsed. The board decides whether it is usable.
    pub fn get_room(&self) -> Result<Option<String>> {
        Ok(self.get_preference(ROOM_KEY)?.map(|row| row.value))
    }

    pub fn set_room(&self, emotion: Emotion) -> Result<()> {
        self.set_preference(ROOM_KEY, emotion.id())
    }

    pub fn clear_room(&self) -> Result<()> {
        self.delete_preference(ROOM_KEY)
    }

    /// Persist whatever part of a committed board transition needs to survive
    /// a restart. Only membership changes are stored.
    pub fn apply_event(&self, event: &BoardEvent) -> Result<()> {
        match event.membership_change() {
            Some(Some(emotion)) => {
                debug!("Persisting room {}", emotion);
                self.set_room(emotion)
            }
            Some(None) => {
                debug!("Clearing persisted room");
                self.clear_room()
            }
            None => Ok(()),
        }
    }
}

fn query_preference(conn: &Connection, key: &str) -> Result<Option<PreferenceRow>> {
    let mut stmt = conn.prepare("SELECT key, value, updated_at FROM preferences WHERE key = ?1")?;

    let row = stmt
        .query_row([key], |row| {
            Ok(PreferenceRow {
                key: row.get(0)?,
                value: row.get(1)?,
                updated_at: row.get(2)?,
            })
        })
        .optional()?;

    Ok(row)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
