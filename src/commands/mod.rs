pub mod add;
pub mod config;
pub mod day;
pub mod delete;
pub mod edit;
pub mod month;
pub mod relocate;

use anyhow::Result;
use evcal_core::event::{DATE_FORMAT, RecurrenceKind};
use evcal_core::form::EventForm;
use evcal_core::EventColor;

use crate::dates;

/// Event fields as given on the command line. `None` means "not given".
pub struct FormFields {
    pub title: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub description: Option<String>,
    pub color: Option<EventColor>,
    pub repeat: Option<String>,
}

impl FormFields {
    /// Copy every given field into the form, leaving the others untouched.
    pub fn apply_to(&self, form: &mut EventForm) -> Result<()> {
        if let Some(title) = &self.title {
            form.title = title.clone();
        }
        if let Some(date) = &self.date {
            form.date = dates::parse_date(date)?.format(DATE_FORMAT).to_string();
        }
        if let Some(time) = &self.time {
            form.time = time.clone();
        }
        if let Some(description) = &self.description {
            form.description = description.clone();
        }
        if let Some(color) = self.color {
            form.color = color;
        }
        if let Some(repeat) = &self.repeat {
            form.recurrence = parse_repeat(repeat)?;
        }
        Ok(())
    }
}

/// "none" clears the recurrence; anything else must name a recurrence type.
pub fn parse_repeat(input: &str) -> Result<Option<RecurrenceKind>> {
    if input.trim().eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    input
        .parse::<RecurrenceKind>()
        .map(Some)
        .map_err(|e| anyhow::anyhow!(e))
}
