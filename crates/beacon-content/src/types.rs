use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A club event from `events.json`. Fields the file omits render as "TBD"
/// downstream, so everything defaults to empty rather than failing the
/// whole file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub title: String,
    /// ISO date, `YYYY-MM-DD`.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub description: String,
}

impl Event {
    /// Parsed event date; `None` for missing or malformed dates, which
    /// excludes the event from the upcoming listing.
    pub fn date_parsed(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

/// A learning resource from `resources.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
}
