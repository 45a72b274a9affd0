use std::path::PathBuf;

use chrono::NaiveDate;
use rand::seq::IndexedRandom;
use serde::de::DeserializeOwned;
use tracing::warn;

use beacon_core::config::EVENTS_SHOWN_MAX;

use crate::types::{Event, Resource};

/// Read-only view over the JSON content files in one directory.
///
/// Files are re-read on every query; content is edited out-of-band and the
/// volumes are tiny, so freshness beats caching here.
pub struct ContentStore {
    dir: PathBuf,
}

impl ContentStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Events on or after `today`, ascending by date, capped at
    /// [`EVENTS_SHOWN_MAX`]. Events with unparseable dates are skipped.
    pub fn upcoming_events(&self, today: NaiveDate) -> Vec<Event> {
        let mut events: Vec<Event> = self.load("events.json");
        events.retain(|e| e.date_parsed().is_some_and(|d| d >= today));
        events.sort_by(|a, b| a.date.cmp(&b.date));
        events.truncate(EVENTS_SHOWN_MAX);
        events
    }

    /// All resources in file order.
    pub fn resources(&self) -> Vec<Resource> {
        self.load("resources.json")
    }

    /// A uniformly random tip, or `None` when the collection is empty.
    pub fn random_tip(&self) -> Option<String> {
        pick(self.load("tips.json"))
    }

    /// A uniformly random fact, or `None` when the collection is empty.
    pub fn random_fact(&self) -> Option<String> {
        pick(self.load("facts.json"))
    }

    /// Load one JSON file, degrading to `T::default()` on any failure.
    fn load<T: DeserializeOwned + Default>(&self, file: &str) -> T {
        let path = self.dir.join(file);
        let raw = match std::fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) => {
                warn!(path = %path.display(), "content file unreadable: {e}");
                return T::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(v) => v,
            Err(e) => {
                warn!(path = %path.display(), "content file is not valid JSON: {e}");
                T::default()
            }
        }
    }
}

fn pick(items: Vec<String>) -> Option<String> {
    items.choose(&mut rand::rng()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_store(files: &[(&str, &str)]) -> ContentStore {
        let dir = std::env::temp_dir().join(format!("beacon-content-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        for (name, body) in files {
            fs::write(dir.join(name), body).unwrap();
        }
        ContentStore::new(dir)
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn missing_files_yield_empty_collections() {
        let store = temp_store(&[]);
        assert!(store.upcoming_events(day("2024-01-01")).is_empty());
        assert!(store.resources().is_empty());
        assert_eq!(store.random_tip(), None);
        assert_eq!(store.random_fact(), None);
    }

    #[test]
    fn corrupt_json_degrades_to_empty() {
        let store = temp_store(&[("tips.json", "{not json"), ("events.json", "[1,2,")]);
        assert_eq!(store.random_tip(), None);
        assert!(store.upcoming_events(day("2024-01-01")).is_empty());
    }

    #[test]
    fn events_are_filtered_sorted_and_capped() {
        let events = r#"[
            {"title": "G", "date": "2024-05-01"},
            {"title": "Past", "date": "2023-12-31"},
            {"title": "A", "date": "2024-01-01"},
            {"title": "BadDate", "date": "soon"},
            {"title": "C", "date": "2024-02-01"},
            {"title": "B", "date": "2024-01-15"},
            {"title": "E", "date": "2024-03-01"},
            {"title": "D", "date": "2024-02-20"},
            {"title": "F", "date": "2024-04-01"}
        ]"#;
        let store = temp_store(&[("events.json", events)]);

        let upcoming = store.upcoming_events(day("2024-01-01"));
        let titles: Vec<&str> = upcoming.iter().map(|e| e.title.as_str()).collect();
        // Today's event is included, past and unparseable ones are not,
        // result is ascending and capped at 5.
        assert_eq!(titles, ["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn random_tip_comes_from_the_file() {
        let store = temp_store(&[("tips.json", r#"["only tip"]"#)]);
        assert_eq!(store.random_tip().as_deref(), Some("only tip"));
    }

    #[test]
    fn resources_preserve_file_order() {
        let store = temp_store(&[(
            "resources.json",
            r#"[{"title":"one","url":"u1"},{"title":"two","url":"u2"}]"#,
        )]);
        let resources = store.resources();
        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].title, "one");
        assert_eq!(resources[1].title, "two");
    }
}
