use chrono::{DateTime, NaiveDate};
use fake::Dummy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Wire format for entry dates.
///
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Entry dates are written as `YYYY-MM-DD`. Stores seeded with full RFC 3339
/// timestamps are read too, keeping the date as written.
mod wire_date {
    use super::*;

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date '{}'", raw)))
    }

    pub fn parse(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
    }
}

/// Server-assigned entry identifier.
///
/// The store may hand out numeric or textual ids; whichever it uses is kept
/// as-is and echoed back in the same JSON type.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryId {
    Number(u64),
    Text(String),
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryId::Number(n) => write!(f, "{}", n),
            EntryId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Progress status of a task entry.
///
#[derive(Clone, Copy, Debug, Default, Dummy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Completed,
    #[serde(rename = "In Progress")]
    InProgress,
    Blocked,
    #[serde(rename = "Needs Review")]
    NeedsReview,
}

impl Status {
    /// Every status in selection order.
    ///
    pub const ALL: [Status; 4] = [
        Status::Completed,
        Status::InProgress,
        Status::Blocked,
        Status::NeedsReview,
    ];

    /// Returns the label used both on the wire and on screen.
    ///
    pub fn label(&self) -> &'static str {
        match self {
            Status::Completed => "Completed",
            Status::InProgress => "In Progress",
            Status::Blocked => "Blocked",
            Status::NeedsReview => "Needs Review",
        }
    }

    /// Returns the status after this one, wrapping around.
    ///
    pub fn next(self) -> Status {
        let index = Status::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Status::ALL[(index + 1) % Status::ALL.len()]
    }

    /// Returns the status before this one, wrapping around.
    ///
    pub fn previous(self) -> Status {
        let index = Status::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Status::ALL[(index + Status::ALL.len() - 1) % Status::ALL.len()]
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Defines a task entry as stored by the server.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: EntryId,
    pub employee_name: String,
    #[serde(with = "wire_date")]
    pub date: NaiveDate,
    pub task_description: String,
    pub status: Status,
}

impl Entry {
    /// Returns the entry's fields without its id.
    ///
    pub fn draft(&self) -> EntryDraft {
        EntryDraft {
            employee_name: self.employee_name.to_owned(),
            date: self.date,
            task_description: self.task_description.to_owned(),
            status: self.status,
        }
    }
}

/// Defines a task entry that has not been assigned an id yet.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDraft {
    pub employee_name: String,
    #[serde(with = "wire_date")]
    pub date: NaiveDate,
    pub task_description: String,
    pub status: Status,
}

impl EntryDraft {
    /// Attach an id, producing a full record for replacement.
    ///
    pub fn with_id(self, id: EntryId) -> Entry {
        Entry {
            id,
            employee_name: self.employee_name,
            date: self.date,
            task_description: self.task_description,
            status: self.status,
        }
    }
}
