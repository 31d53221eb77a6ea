//! Event types.
//!
//! `Event` is the persisted record; `EventDraft` is the same set of fields
//! without an id, as produced by the form and consumed by the store.
//! Field names serialize in camelCase so snapshots keep the layout the
//! browser widget used (`daysOfWeek`, `endDate`, `type`).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};

/// Storage format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A user-scheduled calendar item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(with = "date_serde")]
    pub date: NaiveDate,
    /// Free-form time of day, e.g. "09:00". Not checked against `date`.
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub time: Option<String>,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(default)]
    pub color: EventColor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Recurrence>,
}

/// Everything about an event except its id.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    pub title: String,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub description: Option<String>,
    pub color: EventColor,
    pub recurrence: Option<Recurrence>,
}

impl EventDraft {
    /// A draft with only the required fields set; color defaults to blue.
    pub fn new(title: impl Into<String>, date: NaiveDate) -> Self {
        EventDraft {
            title: title.into(),
            date,
            time: None,
            description: None,
            color: EventColor::default(),
            recurrence: None,
        }
    }
}

impl Event {
    pub fn from_draft(id: String, draft: EventDraft) -> Self {
        Event {
            id,
            title: draft.title,
            date: draft.date,
            time: draft.time,
            description: draft.description,
            color: draft.color,
            recurrence: draft.recurrence,
        }
    }

    /// The editable fields of this event, e.g. to pre-fill the form.
    pub fn to_draft(&self) -> EventDraft {
        EventDraft {
            title: self.title.clone(),
            date: self.date,
            time: self.time.clone(),
            description: self.description.clone(),
            color: self.color,
            recurrence: self.recurrence.clone(),
        }
    }

    pub fn is_on(&self, date: NaiveDate) -> bool {
        self.date == date
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Display color of an event chip.
///
/// Deserializes from any string; unknown or missing values fall back to blue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "Option<String>")]
pub enum EventColor {
    #[default]
    Blue,
    Purple,
    Pink,
    Green,
    Orange,
    Red,
}

impl EventColor {
    pub const ALL: [EventColor; 6] = [
        EventColor::Blue,
        EventColor::Purple,
        EventColor::Pink,
        EventColor::Green,
        EventColor::Orange,
        EventColor::Red,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventColor::Blue => "blue",
            EventColor::Purple => "purple",
            EventColor::Pink => "pink",
            EventColor::Green => "green",
            EventColor::Orange => "orange",
            EventColor::Red => "red",
        }
    }
}

impl FromStr for EventColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        EventColor::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| format!("Unknown color '{}'", s))
    }
}

impl From<Option<String>> for EventColor {
    fn from(value: Option<String>) -> Self {
        value.and_then(|s| s.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for EventColor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored repetition metadata. Never expanded into extra occurrences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recurrence {
    #[serde(rename = "type")]
    pub kind: RecurrenceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<u32>,
    /// 0 = Sunday .. 6 = Saturday
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_of_week: Option<Vec<u8>>,
    #[serde(
        default,
        with = "date_serde::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<NaiveDate>,
}

impl Recurrence {
    pub fn new(kind: RecurrenceKind) -> Self {
        Recurrence {
            kind,
            interval: None,
            days_of_week: None,
            end_date: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceKind {
    Daily,
    Weekly,
    Monthly,
    Custom,
}

impl RecurrenceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecurrenceKind::Daily => "daily",
            RecurrenceKind::Weekly => "weekly",
            RecurrenceKind::Monthly => "monthly",
            RecurrenceKind::Custom => "custom",
        }
    }
}

impl FromStr for RecurrenceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(RecurrenceKind::Daily),
            "weekly" => Ok(RecurrenceKind::Weekly),
            "monthly" => Ok(RecurrenceKind::Monthly),
            "custom" => Ok(RecurrenceKind::Custom),
            other => Err(format!(
                "Unknown recurrence '{}'. Expected daily, weekly, monthly or custom",
                other
            )),
        }
    }
}

impl fmt::Display for RecurrenceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Best-effort parse of a stored date string.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and naive date-times. A
/// timestamp at exactly UTC midnight keeps its UTC day; any other timestamp
/// is read on the local calendar day it falls on.
pub fn parse_stored_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        if dt.offset().local_minus_utc() == 0 && dt.time() == NaiveTime::MIN {
            return Some(dt.date_naive());
        }
        return Some(dt.with_timezone(&Local).date_naive());
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
}

/// Treat `""` (what the browser form stored for untouched fields) as absent.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

mod date_serde {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{DATE_FORMAT, parse_stored_date};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_stored_date(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date '{}'", raw)))
    }

    pub mod option {
        use chrono::NaiveDate;
        use serde::{Deserialize, Deserializer, Serializer};

        use super::super::parse_stored_date;

        pub fn serialize<S: Serializer>(
            date: &Option<NaiveDate>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(d) => super::serialize(d, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDate>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) => parse_stored_date(&raw)
                    .map(Some)
                    .ok_or_else(|| serde::de::Error::custom(format!("invalid date '{}'", raw))),
                None => Ok(None),
            }
        }
    }
}
