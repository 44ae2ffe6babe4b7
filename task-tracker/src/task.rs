use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display, Formatter};

/// Textual timestamp format shared by the task file and console output.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single unit of tracked work.
#[derive(Debug, Eq, PartialEq, Serialize, Deserialize, Clone)]
pub struct Task {
    id: u32,
    description: String,
    status: Status,
    #[serde(rename = "createdAt", with = "timestamp")]
    created_at: NaiveDateTime,
    #[serde(rename = "updatedAt", with = "timestamp")]
    updated_at: NaiveDateTime,
}

/// The three states a task moves through.
#[derive(Debug, Default, Eq, PartialEq, Clone, Copy, clap::ValueEnum)]
pub enum Status {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl Task {
    /// Creates a task with the given id, status `todo`, and
    /// `created_at == updated_at` set to the current time.
    ///
    /// Ids are assigned by the store; nothing else picks one.
    pub fn new(id: u32, description: impl Into<String>) -> Self {
        let now = now();
        Self {
            id,
            description: description.into(),
            status: Status::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn updated_at(&self) -> NaiveDateTime {
        self.updated_at
    }

    /// Replaces the description. Does not refresh `updated_at`; callers
    /// follow up with [`Task::touch`].
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Replaces the status. Does not refresh `updated_at`; callers follow up
    /// with [`Task::touch`].
    pub fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    /// Refreshes `updated_at` to the current time. `created_at` is never
    /// modified after creation.
    pub fn touch(&mut self) {
        self.updated_at = now();
    }
}

impl Display for Task {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} - Status: {} (Created: {}, Updated: {})",
            self.id,
            self.description,
            self.status,
            self.created_at.format(TIMESTAMP_FORMAT),
            self.updated_at.format(TIMESTAMP_FORMAT)
        )
    }
}

impl Status {
    const ALL: [Status; 3] = [Status::Todo, Status::InProgress, Status::Done];

    /// Looks up a status by its canonical name, case-insensitively.
    /// Unrecognized names fall back to `Todo`.
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(name))
            .unwrap_or_default()
    }

    /// Canonical name, as stored in the task file and accepted on the
    /// command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::InProgress => "in-progress",
            Status::Done => "done",
        }
    }

    /// Human-readable name used in list headers.
    pub fn display_name(self) -> &'static str {
        match self {
            Status::Todo => "Todo",
            Status::InProgress => "In Progress",
            Status::Done => "Done",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Status {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(Status::from_name(&name))
    }
}

// Whole seconds only; the stored format has no sub-second precision, and a
// task must compare equal to its persisted round-trip.
fn now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

mod timestamp {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(de::Error::custom)
    }
}
