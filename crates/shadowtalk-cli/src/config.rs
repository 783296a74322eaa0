use std::path::PathBuf;

use anyhow::{Result, bail};
use shadowtalk_identity::is_valid_anon_id;

/// Path value that selects a throwaway in-memory store.
pub const IN_MEMORY: &str = ":memory:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub anon_id: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path: PathBuf = lookup("SHADOWTALK_DB_PATH")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "shadowtalk.db".into())
            .into();

        let anon_id = lookup("SHADOWTALK_ANON_ID").filter(|v| !v.is_empty());
        if let Some(id) = &anon_id {
            if !is_valid_anon_id(id) {
                bail!("SHADOWTALK_ANON_ID '{}' is not a valid anonymous id (expected shadow-xxxxxx)", id);
            }
        }

        Ok(Self { db_path, anon_id })
    }

    pub fn is_in_memory(&self) -> bool {
        self.db_path.as_os_str() == IN_MEMORY
    }
}
