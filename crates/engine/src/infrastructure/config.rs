//! Process configuration from the environment.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
pub const DEFAULT_SERVER_PORT: u16 = 3000;
pub const DEFAULT_GAME_LOG_DB: &str = "game_log.db";
pub const DEFAULT_KG_BASE_URL: &str = "https://kgsearch.googleapis.com/v1/entities:search";
pub const DEFAULT_KG_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_SOUND_BASE_URL: &str = "https://storage.googleapis.com/mystery-animal-sounds/";

/// Everything the binary needs to wire the engine together.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub server_host: String,
    pub server_port: u16,
    /// Directory holding the JSON corpora
    pub data_dir: PathBuf,
    pub game_log_db: String,
    /// Knowledge lookups are disabled without a key
    pub kg_api_key: Option<String>,
    pub kg_base_url: String,
    pub kg_timeout: Duration,
    pub sound_base_url: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            data_dir: default_data_dir(),
            game_log_db: DEFAULT_GAME_LOG_DB.to_string(),
            kg_api_key: None,
            kg_base_url: DEFAULT_KG_BASE_URL.to_string(),
            kg_timeout: Duration::from_secs(DEFAULT_KG_TIMEOUT_SECS),
            sound_base_url: DEFAULT_SOUND_BASE_URL.to_string(),
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        Self {
            server_host: get("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: get("SERVER_PORT")
                .or_else(|| get("PORT"))
                .and_then(|port| port.parse().ok())
                .unwrap_or(defaults.server_port),
            data_dir: get("MYSTERY_ANIMAL_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            game_log_db: get("GAME_LOG_DB").unwrap_or(defaults.game_log_db),
            kg_api_key: get("KG_API_KEY"),
            kg_base_url: get("KG_BASE_URL").unwrap_or(defaults.kg_base_url),
            kg_timeout: get("KG_TIMEOUT_SECS")
                .and_then(|secs| secs.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.kg_timeout),
            sound_base_url: get("SOUND_BASE_URL").unwrap_or(defaults.sound_base_url),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}
