use crate::error::{Result, TevaError};
use crate::recording::Recording;
use crate::types::{CalculationResult, ChannelStats, Event};

/// Windowed statistic aggregation over one event.
///
/// Implementations compute per-channel aggregates over the rows whose index
/// lies strictly between the event bounds. Alternative statistic families
/// plug in here; segmentation and aggregation never see the concrete type.
pub trait Calculator {
    fn calculate(
        &self,
        recording: &Recording,
        event: &Event,
        wanted_channels: &[String],
    ) -> Result<CalculationResult>;
}

/// Default calculator: min, max, arithmetic mean, and sample standard
/// deviation (denominator `n - 1`) per channel, each ignoring missing
/// values independently.
pub struct SummaryCalculator;

impl Calculator for SummaryCalculator {
    fn calculate(
        &self,
        recording: &Recording,
        event: &Event,
        wanted_channels: &[String],
    ) -> Result<CalculationResult> {
        // Both bounds are excluded so that the sample a closing row shares
        // with the next event's opening row is never counted twice.
        let window: Vec<usize> = recording
            .index()
            .iter()
            .enumerate()
            .filter(|(_, &t)| t > event.start() && t < event.end())
            .map(|(i, _)| i)
            .collect();

        let mut result = CalculationResult::new();
        for channel in wanted_channels {
            let values = recording.channel(channel).ok_or_else(|| {
                TevaError::ChannelUnavailable {
                    channel: channel.clone(),
                    available: recording.channel_names().to_vec(),
                }
            })?;
            result.insert(channel.clone(), summarize(values, &window));
        }

        Ok(result)
    }
}

/// Fold one channel's window into summary statistics. An empty window, or a
/// window where every value is missing, is undefined rather than an error:
/// all statistics come back `NaN`. One surviving sample leaves `std`
/// undefined (`n - 1` denominator).
fn summarize(values: &[f64], window: &[usize]) -> ChannelStats {
    let mut n = 0usize;
    let mut sum = 0.0;
    let mut min = f64::NAN;
    let mut max = f64::NAN;

    for &i in window {
        let v = values[i];
        if v.is_nan() {
            continue;
        }
        n += 1;
        sum += v;
        if min.is_nan() || v < min {
            min = v;
        }
        if max.is_nan() || v > max {
            max = v;
        }
    }

    if n == 0 {
        return ChannelStats {
            min: f64::NAN,
            max: f64::NAN,
            mean: f64::NAN,
            std: f64::NAN,
        };
    }

    let mean = sum / n as f64;
    let std = if n < 2 {
        f64::NAN
    } else {
        let sum_sq: f64 = window
            .iter()
            .map(|&i| values[i])
            .filter(|v| !v.is_nan())
            .map(|v| (v - mean) * (v - mean))
            .sum();
        (sum_sq / (n as f64 - 1.0)).sqrt()
    };

    ChannelStats {
        min,
        max,
        mean,
        std,
    }
}
