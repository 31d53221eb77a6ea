//! The owned, in-memory event collection.
//!
//! Every mutation writes the full collection through the injected
//! `Persistence` and then notifies observers. Operations on unknown ids are
//! silent no-ops.

use chrono::NaiveDate;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::error::{CalError, CalResult};
use crate::event::{Event, EventDraft};
use crate::storage::Persistence;

type Observer = Box<dyn Fn(&[Event])>;

pub struct EventStore<P> {
    events: Vec<Event>,
    persistence: P,
    /// Event picked up by `begin_relocate`, waiting for a drop target.
    held: Option<String>,
    observers: Vec<Observer>,
}

impl<P: Persistence> EventStore<P> {
    /// Load the collection once. Unreadable or corrupt snapshots start the
    /// store empty rather than failing.
    pub fn open(persistence: P) -> Self {
        let events = match persistence.load() {
            Ok(events) => events,
            Err(CalError::CorruptData(msg)) => {
                warn!(%msg, "stored events are corrupt, starting with an empty calendar");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "could not load stored events, starting with an empty calendar");
                Vec::new()
            }
        };

        EventStore {
            events,
            persistence,
            held: None,
            observers: Vec::new(),
        }
    }

    // READS:

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Events on the given calendar day, in collection order.
    pub fn events_on(&self, date: NaiveDate) -> Vec<&Event> {
        self.events.iter().filter(|e| e.is_on(date)).collect()
    }

    // MUTATIONS:

    /// Add a new event and return its freshly assigned id.
    pub fn create(&mut self, draft: EventDraft) -> CalResult<String> {
        self.held = None;

        let id = self.unused_id();
        debug!(%id, date = %draft.date, "creating event");
        self.events.push(Event::from_draft(id.clone(), draft));

        self.commit()?;
        Ok(id)
    }

    /// Overwrite every field of the event with `id`, keeping its id and position.
    pub fn update(&mut self, id: &str, draft: EventDraft) -> CalResult<()> {
        self.held = None;

        let Some(slot) = self.events.iter_mut().find(|e| e.id == id) else {
            debug!(%id, "update skipped, no such event");
            return Ok(());
        };

        *slot = Event::from_draft(id.to_string(), draft);
        debug!(%id, "updated event");
        self.commit()
    }

    pub fn delete(&mut self, id: &str) -> CalResult<()> {
        self.held = None;

        let before = self.events.len();
        self.events.retain(|e| e.id != id);
        if self.events.len() == before {
            debug!(%id, "delete skipped, no such event");
            return Ok(());
        }

        debug!(%id, "deleted event");
        self.commit()
    }

    /// Move an event to another day. Only `date` changes.
    pub fn relocate(&mut self, id: &str, new_date: NaiveDate) -> CalResult<()> {
        self.held = None;

        let Some(event) = self.events.iter_mut().find(|e| e.id == id) else {
            debug!(%id, "relocate skipped, no such event");
            return Ok(());
        };

        debug!(%id, from = %event.date, to = %new_date, "relocating event");
        event.date = new_date;
        self.commit()
    }

    // TWO-STEP RELOCATION:

    /// Pick up an event to be dropped on another day.
    /// Returns false (and holds nothing) if the id is unknown.
    pub fn begin_relocate(&mut self, id: &str) -> bool {
        if self.get(id).is_some() {
            self.held = Some(id.to_string());
            true
        } else {
            self.held = None;
            false
        }
    }

    /// The event currently picked up, if any.
    pub fn held(&self) -> Option<&Event> {
        self.held.as_deref().and_then(|id| self.get(id))
    }

    /// Drop the held event on `date`. Returns the id that moved, or `None`
    /// when nothing was held. The hold is cleared either way.
    pub fn complete_relocate(&mut self, date: NaiveDate) -> CalResult<Option<String>> {
        let Some(id) = self.held.take() else {
            return Ok(None);
        };

        self.relocate(&id, date)?;
        Ok(Some(id))
    }

    pub fn cancel_relocate(&mut self) {
        self.held = None;
    }

    // OBSERVERS:

    /// Register a callback run with the full collection after every mutation.
    pub fn subscribe(&mut self, observer: impl Fn(&[Event]) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Persist the collection and notify observers. A failed save leaves the
    /// in-memory change in place and is returned to the caller.
    fn commit(&mut self) -> CalResult<()> {
        let saved = self.persistence.save(&self.events);
        if let Err(e) = &saved {
            error!(error = %e, "failed to save events");
        }

        for observer in &self.observers {
            observer(&self.events);
        }

        saved
    }

    fn unused_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}
