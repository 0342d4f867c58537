use std::path::PathBuf;

use rayon::prelude::*;
use serde::Serialize;

use crate::aggregate::build_bundle;
use crate::calculator::{Calculator, SummaryCalculator};
use crate::error::Result;
use crate::recording::Recording;
use crate::segmenter::{segment_events, RangeCondition};
use crate::sink;
use crate::types::{EventOutcome, ResultsBundle};

/// Per-run configuration, built once and threaded through every call.
///
/// `wanted_channels: None` means "every channel the recording exposes",
/// which is the only request that can never hit a channel-availability
/// error.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub condition: RangeCondition,
    pub wanted_channels: Option<Vec<String>>,
    pub output_dir: PathBuf,
}

/// Outcome of one successfully processed file.
#[derive(Debug, Clone, Serialize)]
pub struct FileSummary {
    pub file: String,
    pub output_path: String,
    pub events: usize,
    pub computed: usize,
    pub skipped: usize,
}

/// Counters for one batch run over already-validated files.
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
}

/// Segment one recording and run the calculator over every event.
///
/// Calculation failures are isolated per event: the reason is logged with
/// the file and event bounds, the event stays in the bundle, and the loop
/// carries on.
pub fn compute_bundle(
    recording: &Recording,
    condition: &RangeCondition,
    wanted_channels: Option<&[String]>,
    calculator: &dyn Calculator,
    file: &str,
) -> ResultsBundle {
    let events = segment_events(recording, condition, file);
    log::info!("Detected {} event(s) in {}", events.len(), file);

    let wanted: Vec<String> = match wanted_channels {
        Some(channels) => channels.to_vec(),
        None => recording.channel_names().to_vec(),
    };

    let mut outcomes = Vec::with_capacity(events.len());
    for event in &events {
        match calculator.calculate(recording, event, &wanted) {
            Ok(result) => outcomes.push(EventOutcome::Computed(result)),
            Err(e) => {
                log::warn!("Could not calculate for {}: {}", event, e);
                outcomes.push(EventOutcome::Failed {
                    reason: e.to_string(),
                });
            }
        }
    }

    build_bundle(file, events, outcomes)
}

/// Full pipeline for one file: decode, segment, calculate, persist.
///
/// A persistence failure is fatal for the file and propagates; the target
/// artifact is never left partially written.
pub fn process_file(ctx: &RunContext, path: &str) -> Result<FileSummary> {
    let recording = Recording::from_csv_path(path)?;
    let bundle = compute_bundle(
        &recording,
        &ctx.condition,
        ctx.wanted_channels.as_deref(),
        &SummaryCalculator,
        path,
    );

    let output_path = sink::bundle_output_path(&ctx.output_dir, path);
    sink::write_bundle(&bundle, &output_path)?;

    Ok(FileSummary {
        file: path.to_string(),
        output_path: output_path.display().to_string(),
        events: bundle.events.len(),
        computed: bundle.calculations.len(),
        skipped: bundle.events.len() - bundle.calculations.len(),
    })
}

/// Process a batch of validated files, in parallel across files.
///
/// Files share no mutable state, so rayon fans them out freely; within one
/// file everything stays sequential and deterministic. One file's failure
/// never aborts the rest.
pub fn process_batch(ctx: &RunContext, paths: &[String]) -> BatchSummary {
    let succeeded = paths
        .par_iter()
        .map(|path| match process_file(ctx, path) {
            Ok(summary) => {
                log::info!(
                    "{}: {} event(s), {} computed, {} skipped -> {}",
                    summary.file,
                    summary.events,
                    summary.computed,
                    summary.skipped,
                    summary.output_path
                );
                true
            }
            Err(e) => {
                log::error!("Processing failed for {}: {}", path, e);
                false
            }
        })
        .filter(|&ok| ok)
        .count();

    BatchSummary {
        succeeded,
        failed: paths.len() - succeeded,
    }
}
