//! JSON snapshot of the event collection on top of a key-value store.

use tracing::debug;

use super::{COLLECTION_KEY, KeyValueStore, Persistence};
use crate::error::{CalError, CalResult};
use crate::event::Event;

pub struct JsonPersistence<K> {
    kv: K,
    key: String,
}

impl<K: KeyValueStore> JsonPersistence<K> {
    /// Persist under the default collection key.
    pub fn new(kv: K) -> Self {
        Self::with_key(kv, COLLECTION_KEY)
    }

    pub fn with_key(kv: K, key: &str) -> Self {
        JsonPersistence {
            kv,
            key: key.to_string(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl<K: KeyValueStore> Persistence for JsonPersistence<K> {
    fn load(&self) -> CalResult<Vec<Event>> {
        let Some(raw) = self.kv.get(&self.key)? else {
            debug!(key = %self.key, "no stored events");
            return Ok(Vec::new());
        };

        let events: Vec<Event> = serde_json::from_str(&raw)
            .map_err(|e| CalError::CorruptData(format!("'{}': {}", self.key, e)))?;

        debug!(key = %self.key, count = events.len(), "loaded events");
        Ok(events)
    }

    fn save(&mut self, events: &[Event]) -> CalResult<()> {
        let raw = serde_json::to_string_pretty(events)
            .map_err(|e| CalError::CorruptData(format!("could not serialize events: {}", e)))?;

        self.kv.set(&self.key, &raw)?;

        debug!(key = %self.key, count = events.len(), "saved events");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventColor, EventDraft, Recurrence, RecurrenceKind};
    use crate::storage::{FileStore, MemoryStore};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_events() -> Vec<Event> {
        let mut standup = EventDraft::new("Standup", date(2024, 3, 4));
        standup.time = Some("09:00".to_string());

        let mut review = EventDraft::new("Quarterly review", date(2024, 3, 29));
        review.description = Some("Bring numbers".to_string());
        review.color = EventColor::Orange;
        review.recurrence = Some(Recurrence {
            kind: RecurrenceKind::Custom,
            interval: Some(3),
            days_of_week: Some(vec![5]),
            end_date: Some(date(2025, 3, 28)),
        });

        vec![
            Event::from_draft("a".to_string(), standup),
            Event::from_draft("b".to_string(), review),
        ]
    }

    #[test]
    fn absent_snapshot_loads_empty() {
        let persistence = JsonPersistence::new(MemoryStore::new());
        assert!(persistence.load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_returns_same_events() {
        let mut persistence = JsonPersistence::new(MemoryStore::new());
        let events = sample_events();

        persistence.save(&events).unwrap();
        assert_eq!(persistence.load().unwrap(), events);
    }

    #[test]
    fn save_then_load_through_files() {
        let dir = tempfile::tempdir().unwrap();
        let events = sample_events();

        JsonPersistence::new(FileStore::new(dir.path()))
            .save(&events)
            .unwrap();

        let reopened = JsonPersistence::new(FileStore::new(dir.path()));
        assert_eq!(reopened.load().unwrap(), events);
        assert!(dir.path().join("calendar-events.json").exists());
    }

    #[test]
    fn save_replaces_prior_snapshot() {
        let mut persistence = JsonPersistence::new(MemoryStore::new());
        persistence.save(&sample_events()).unwrap();
        persistence.save(&[]).unwrap();
        assert!(persistence.load().unwrap().is_empty());
    }

    #[test]
    fn corrupt_snapshot_is_reported() {
        let kv = MemoryStore::new();
        kv.insert_raw(COLLECTION_KEY, "{not json");
        let persistence = JsonPersistence::new(kv);

        assert!(matches!(persistence.load(), Err(CalError::CorruptData(_))));
    }

    #[test]
    fn unavailable_backend_is_reported() {
        let kv = MemoryStore::new();
        kv.set_unavailable(true);
        let mut persistence = JsonPersistence::new(kv);

        assert!(matches!(
            persistence.load(),
            Err(CalError::StorageUnavailable(_))
        ));
        assert!(matches!(
            persistence.save(&[]),
            Err(CalError::StorageUnavailable(_))
        ));
    }

    #[test]
    fn custom_key_is_used() {
        let kv = MemoryStore::new();
        let mut persistence = JsonPersistence::with_key(kv.clone(), "other");
        persistence.save(&sample_events()).unwrap();

        assert_eq!(persistence.key(), "other");
        assert!(kv.raw("other").is_some());
        assert!(kv.raw(COLLECTION_KEY).is_none());
    }
}
