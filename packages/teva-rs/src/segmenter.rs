use serde::{Deserialize, Serialize};

use crate::recording::Recording;
use crate::types::Event;

/// The driving condition: one channel and a closed value interval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeCondition {
    pub channel: String,
    pub low: f64,
    pub high: f64,
}

impl RangeCondition {
    pub fn new(channel: impl Into<String>, low: f64, high: f64) -> Self {
        Self {
            channel: channel.into(),
            low,
            high,
        }
    }

    /// In-range means inside the closed interval `[low, high]`.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }
}

/// Scan the recording once and cut out every maximal run of in-range rows
/// on the condition channel.
///
/// Rows with a missing condition value are dropped before scanning, so the
/// surviving index may be non-contiguous; events are bounded by index
/// values, and any gap stays a gap. An event opens on the first in-range
/// row and closes on the first out-of-range row, whose index becomes the
/// event end (the disqualifying row bounds the event, so qualifying samples
/// are half-open on the right). A series that ends while still in range
/// closes at the index of the last surviving row itself.
///
/// A recording without the condition channel yields no events.
pub fn segment_events(recording: &Recording, condition: &RangeCondition, file: &str) -> Vec<Event> {
    let Some(values) = recording.channel(&condition.channel) else {
        log::debug!(
            "Condition channel '{}' not found in {}; no events",
            condition.channel,
            file
        );
        return Vec::new();
    };

    let mut events = Vec::new();
    let mut pending: Option<f64> = None;
    let mut last_surviving: Option<f64> = None;

    for (&t, &v) in recording.index().iter().zip(values) {
        if v.is_nan() {
            continue;
        }
        last_surviving = Some(t);

        if condition.contains(v) {
            if pending.is_none() {
                pending = Some(t);
            }
        } else if let Some(start) = pending.take() {
            push_event(&mut events, start, t, file);
        }
    }

    if let (Some(start), Some(end)) = (pending, last_surviving) {
        push_event(&mut events, start, end, file);
    }

    events
}

fn push_event(events: &mut Vec<Event>, start: f64, end: f64, file: &str) {
    match Event::new(start, end, file) {
        Ok(event) => events.push(event),
        // Only reachable when the capture index is not monotonic.
        Err(e) => log::warn!("Dropping malformed event from {}: {}", file, e),
    }
}
