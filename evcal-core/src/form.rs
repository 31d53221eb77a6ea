//! Event form state and validation.
//!
//! Holds raw user input for one event the way an edit dialog does, and turns
//! it into an `EventDraft` on submit. A rejected submit produces no draft.

use chrono::NaiveDate;
use thiserror::Error;

use crate::event::{DATE_FORMAT, Event, EventColor, EventDraft, Recurrence, RecurrenceKind};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("Title is required")]
    EmptyTitle,

    #[error("Date is required")]
    MissingDate,

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Raw form fields. Text fields hold exactly what was typed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventForm {
    pub title: String,
    /// `YYYY-MM-DD`, empty when no day was picked.
    pub date: String,
    pub time: String,
    pub description: String,
    pub color: EventColor,
    pub recurrence: Option<RecurrenceKind>,
    /// Recurrence of the event being edited, reused while its kind is kept.
    existing_recurrence: Option<Recurrence>,
}

impl EventForm {
    /// An empty form, with the date pre-filled from the clicked day if any.
    pub fn blank(selected: Option<NaiveDate>) -> Self {
        EventForm {
            date: selected
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            ..Default::default()
        }
    }

    /// A form pre-filled from an existing event, for editing.
    pub fn from_event(event: &Event) -> Self {
        EventForm {
            title: event.title.clone(),
            date: event.date.format(DATE_FORMAT).to_string(),
            time: event.time.clone().unwrap_or_default(),
            description: event.description.clone().unwrap_or_default(),
            color: event.color,
            recurrence: event.recurrence.as_ref().map(|r| r.kind),
            existing_recurrence: event.recurrence.clone(),
        }
    }

    /// Validate the form and build a draft.
    ///
    /// The title is trimmed; empty time/description become `None`. An edited
    /// event keeps its interval, weekdays and end date unless the recurrence
    /// type changes, in which case only the new type is set.
    pub fn submit(&self) -> Result<EventDraft, FormError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(FormError::EmptyTitle);
        }

        let raw_date = self.date.trim();
        if raw_date.is_empty() {
            return Err(FormError::MissingDate);
        }
        let date = NaiveDate::parse_from_str(raw_date, DATE_FORMAT)
            .map_err(|_| FormError::InvalidDate(raw_date.to_string()))?;

        Ok(EventDraft {
            title: title.to_string(),
            date,
            time: non_empty(&self.time),
            description: non_empty(&self.description),
            color: self.color,
            recurrence: self.submitted_recurrence(),
        })
    }

    fn submitted_recurrence(&self) -> Option<Recurrence> {
        let kind = self.recurrence?;
        match &self.existing_recurrence {
            Some(existing) if existing.kind == kind => Some(existing.clone()),
            _ => Some(Recurrence::new(kind)),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
