/// Preference keys. Kept identical to the names the web client used in
/// local storage so exported values stay recognisable.
pub const ANON_ID_KEY: &str = "shadowtalk-anon-id";
pub const ROOM_KEY: &str = "shadowtalk-emotion-room";

/// One row of the `preferences` table.
pub struct PreferenceRow {
    pub key: String,
    pub value: String,
    pub updated_at: String,
}
