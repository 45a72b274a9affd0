use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Capacity of the fired-job channel between the engine and the dispatcher.
pub const FIRED_CHANNEL_CAPACITY: usize = 256;
/// Maximum number of events rendered by /events.
pub const EVENTS_SHOWN_MAX: usize = 5;

/// Top-level config (beacon.toml + BEACON_* env overrides).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeaconConfig {
    pub telegram: TelegramConfig,
    /// IANA zone name, e.g. "Asia/Kolkata". Applied uniformly to reminder
    /// resolution and to user-visible timestamps.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub club: ClubConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    pub bot_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Directory holding events.json / resources.json / tips.json / facts.json.
    #[serde(default = "default_content_dir")]
    pub dir: String,
    /// Club logo sent with /start and /about. Optional; text-only when unset
    /// or the file is missing.
    pub logo: Option<String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: default_content_dir(),
            logo: None,
        }
    }
}

/// Branding strings interpolated into reply templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClubConfig {
    #[serde(default = "default_club_name")]
    pub name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub organization: String,
    /// Rendered by /links in file order.
    #[serde(default)]
    pub links: Vec<LinkEntry>,
}

impl Default for ClubConfig {
    fn default() -> Self {
        Self {
            name: default_club_name(),
            tagline: String::new(),
            organization: String::new(),
            links: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkEntry {
    pub label: String,
    pub url: String,
}

fn default_timezone() -> String {
    "UTC".to_string()
}
fn default_db_path() -> String {
    "beacon.db".to_string()
}
fn default_content_dir() -> String {
    "data".to_string()
}
fn default_club_name() -> String {
    "Beacon".to_string()
}

impl BeaconConfig {
    /// Load config from a TOML file with BEACON_* env var overrides.
    ///
    /// Nested keys use a double underscore in the environment, e.g.
    /// `BEACON_TELEGRAM__BOT_TOKEN` → `telegram.bot_token`.
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path.unwrap_or("beacon.toml");

        let config: BeaconConfig = Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed("BEACON_").split("__"))
            .extract()
            .map_err(|e| crate::error::BeaconError::Config(e.to_string()))?;

        Ok(config)
    }
}
