use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Statuses after which a run no longer changes.
pub const TERMINAL_STATUSES: &[&str] = &["SUCCEEDED", "FAILED", "TIMED-OUT", "ABORTED"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    #[error("run descriptor is not a JSON object")]
    NotAnObject,
    #[error("run descriptor field `{0}` is missing or not a non-empty string")]
    MissingField(&'static str),
}

/// A run record as returned by the service.
///
/// The record is kept whole so it serializes back exactly as received; only
/// `id` and `defaultDatasetId` are required, everything else is read on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct RunDescriptor {
    record: Map<String, Value>,
}

impl RunDescriptor {
    pub fn id(&self) -> &str {
        self.str_field("id").unwrap_or_default()
    }

    pub fn default_dataset_id(&self) -> &str {
        self.str_field("defaultDatasetId").unwrap_or_default()
    }

    pub fn act_id(&self) -> Option<&str> {
        self.str_field("actId")
    }

    pub fn status(&self) -> Option<&str> {
        self.str_field("status")
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.time_field("startedAt")
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.time_field("finishedAt")
    }

    pub fn is_terminal(&self) -> bool {
        self.status()
            .is_some_and(|s| TERMINAL_STATUSES.contains(&s))
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.record.get(key).and_then(Value::as_str)
    }

    fn time_field(&self, key: &str) -> Option<DateTime<Utc>> {
        self.str_field(key)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|t| t.with_timezone(&Utc))
    }
}

impl TryFrom<Value> for RunDescriptor {
    type Error = DescriptorError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Object(record) = value else {
            return Err(DescriptorError::NotAnObject);
        };
        for field in ["id", "defaultDatasetId"] {
            match record.get(field).and_then(Value::as_str) {
                Some(s) if !s.is_empty() => {}
                _ => return Err(DescriptorError::MissingField(field)),
            }
        }
        Ok(Self { record })
    }
}

impl From<RunDescriptor> for Value {
    fn from(run: RunDescriptor) -> Self {
        Value::Object(run.record)
    }
}

/// The most recently appended run.
pub fn latest_run(runs: &[RunDescriptor]) -> Option<&RunDescriptor> {
    runs.last()
}

/// The latest entry with `run_id`; a run can be logged more than once.
pub fn find_run<'a>(runs: &'a [RunDescriptor], run_id: &str) -> Option<&'a RunDescriptor> {
    runs.iter().rev().find(|run| run.id() == run_id)
}
