use std::fmt::Display;

use ndarray::{Array1, Array2, Axis};

use crate::error::AggregateError;
use crate::types::{AggregatedCurve, Run, RunSet};

/// Combines several runs into one mean ± std curve over `sample_count` evenly
/// spaced steps.
///
/// The axis starts at the earliest first step. It ends at `max_step` when
/// given, otherwise at the earliest *last* step, so every run has real data
/// across the whole axis and nothing is extrapolated.
///
/// Empty runs are ignored. Returns `Ok(None)` when there is nothing to plot.
pub fn aggregate<K: Display>(
    runs: &RunSet<K>,
    sample_count: usize,
    max_step: Option<f64>,
) -> Result<Option<AggregatedCurve>, AggregateError> {
    if sample_count < 2 {
        return Err(AggregateError::SampleCount(sample_count));
    }

    let mut contributing: Vec<&Run> = Vec::with_capacity(runs.len());
    for (id, run) in runs {
        if run.is_empty() {
            continue;
        }
        if let Some(index) = run.first_malformed() {
            return Err(AggregateError::MalformedRun {
                run: id.to_string(),
                index,
            });
        }
        contributing.push(run);
    }

    let Some(min_step) = contributing
        .iter()
        .filter_map(|run| run.first_step())
        .reduce(f64::min)
    else {
        return Ok(None);
    };

    let max_step = match max_step {
        Some(max_step) if !max_step.is_finite() || max_step < min_step => {
            return Err(AggregateError::StepRange { min_step, max_step });
        }
        Some(max_step) => max_step,
        None => contributing
            .iter()
            .filter_map(|run| run.last_step())
            .fold(f64::INFINITY, f64::min),
    };

    let steps = Array1::linspace(min_step, max_step, sample_count);
    let samples = Array2::from_shape_fn((contributing.len(), sample_count), |(row, col)| {
        contributing[row]
            .interpolate(steps[col])
            .unwrap_or(f64::NAN)
    });

    let Some(mean) = samples.mean_axis(Axis(0)) else {
        return Ok(None);
    };
    let std = samples.std_axis(Axis(0), 0.0);

    Ok(Some(AggregatedCurve::new(steps, mean, std)))
}
