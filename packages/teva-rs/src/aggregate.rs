use std::collections::BTreeMap;

use crate::identity::EventId;
use crate::types::{Event, EventOutcome, ResultsBundle};

/// Combine the event sequence with the per-event outcomes into one bundle.
///
/// Pure construction: computed outcomes are keyed by [`EventId`], failed
/// outcomes leave their event without a `calculations` entry (the pipeline
/// has already logged the reason). `events` and `outcomes` are positionally
/// paired and must have the same length.
pub fn build_bundle(file: &str, events: Vec<Event>, outcomes: Vec<EventOutcome>) -> ResultsBundle {
    debug_assert_eq!(events.len(), outcomes.len());

    let mut calculations = BTreeMap::new();
    for (event, outcome) in events.iter().zip(outcomes) {
        if let EventOutcome::Computed(result) = outcome {
            calculations.insert(EventId::of(event), result);
        }
    }

    ResultsBundle::new(file, events, calculations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CalculationResult, ChannelStats};

    fn stats(value: f64) -> CalculationResult {
        let mut result = CalculationResult::new();
        result.insert(
            "RPM".to_string(),
            ChannelStats {
                min: value,
                max: value,
                mean: value,
                std: f64::NAN,
            },
        );
        result
    }

    #[test]
    fn test_every_calculation_key_maps_to_an_event() {
        let events = vec![
            Event::new(0.0, 2.0, "car1.ext").unwrap(),
            Event::new(3.0, 4.0, "car1.ext").unwrap(),
        ];
        let outcomes = vec![
            EventOutcome::Computed(stats(1100.0)),
            EventOutcome::Computed(stats(1400.0)),
        ];

        let bundle = build_bundle("car1.ext", events.clone(), outcomes);
        assert_eq!(bundle.events.len(), 2);
        assert_eq!(bundle.calculations.len(), 2);
        for event in &events {
            assert!(bundle.calculations.contains_key(&EventId::of(event)));
        }
    }

    #[test]
    fn test_failed_outcome_leaves_no_entry() {
        let events = vec![
            Event::new(0.0, 2.0, "car1.ext").unwrap(),
            Event::new(3.0, 4.0, "car1.ext").unwrap(),
        ];
        let outcomes = vec![
            EventOutcome::Computed(stats(1100.0)),
            EventOutcome::Failed {
                reason: "channel 'GEAR' missing".to_string(),
            },
        ];

        let bundle = build_bundle("car1.ext", events.clone(), outcomes);
        // The failed event stays in `events` but gets no calculations entry.
        assert_eq!(bundle.events.len(), 2);
        assert_eq!(bundle.calculations.len(), 1);
        assert!(bundle.calculations.contains_key(&EventId::of(&events[0])));
        assert!(!bundle.calculations.contains_key(&EventId::of(&events[1])));
    }

    #[test]
    fn test_empty_inputs() {
        let bundle = build_bundle("car1.ext", Vec::new(), Vec::new());
        assert!(bundle.events.is_empty());
        assert!(bundle.calculations.is_empty());
        assert_eq!(bundle.file, "car1.ext");
    }
}
