use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TevaError};
use crate::identity::EventId;

/// Version tag written into every persisted bundle. Bump on any change to
/// the bundle layout; `read_bundle` rejects versions it does not know.
pub const BUNDLE_SCHEMA_VERSION: u32 = 1;

/// A maximal contiguous interval where the condition channel stayed in range.
///
/// `start` and `end` are index values (timestamps or sample ordinals) of the
/// recording the event was cut from. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    start: f64,
    end: f64,
    file: String,
}

impl Event {
    pub fn new(start: f64, end: f64, file: impl Into<String>) -> Result<Self> {
        if start > end {
            return Err(TevaError::InvalidParameter(format!(
                "event start {} is after end {}",
                start, end
            )));
        }
        Ok(Self {
            start,
            end,
            file: file.into(),
        })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn file(&self) -> &str {
        &self.file
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "event [{}, {}] on file {}",
            self.start, self.end, self.file
        )
    }
}

/// Summary statistics for one channel over one event window.
///
/// `NaN` means undefined (empty window, all values missing, or `n < 2` for
/// the standard deviation). JSON cannot carry `NaN`, so non-finite values
/// are written as `null` and read back as `NaN`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelStats {
    #[serde(with = "nan_as_null")]
    pub min: f64,
    #[serde(with = "nan_as_null")]
    pub max: f64,
    #[serde(with = "nan_as_null")]
    pub mean: f64,
    #[serde(with = "nan_as_null")]
    pub std: f64,
}

/// Calculator output for one event: channel name -> summary statistics,
/// restricted to the caller's wanted channels.
pub type CalculationResult = BTreeMap<String, ChannelStats>;

/// Explicit per-event calculation outcome. Failures carry a reason and are
/// dropped during aggregation; no error crosses that boundary.
#[derive(Debug, Clone)]
pub enum EventOutcome {
    Computed(CalculationResult),
    Failed { reason: String },
}

/// Per-file output: every detected event, plus statistics for the events
/// whose calculation succeeded, keyed by [`EventId`].
///
/// Every `calculations` key corresponds to exactly one entry in `events`;
/// the converse does not hold (a failed calculation leaves no entry).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsBundle {
    pub schema_version: u32,
    pub id: String,
    pub file: String,
    pub created_at: String,
    pub events: Vec<Event>,
    pub calculations: BTreeMap<EventId, CalculationResult>,
}

impl ResultsBundle {
    pub fn new(
        file: impl Into<String>,
        events: Vec<Event>,
        calculations: BTreeMap<EventId, CalculationResult>,
    ) -> Self {
        Self {
            schema_version: BUNDLE_SCHEMA_VERSION,
            id: uuid::Uuid::new_v4().to_string(),
            file: file.into(),
            created_at: chrono::Utc::now().to_rfc3339(),
            events,
            calculations,
        }
    }
}

pub(crate) mod nan_as_null {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }
}
