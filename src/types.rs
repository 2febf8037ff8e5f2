use std::collections::BTreeMap;

use ndarray::Array1;

/// One seed's recorded metric as (step, value) pairs, steps non-decreasing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Run {
    points: Vec<(f64, f64)>,
}

/// Runs keyed by an opaque identifier, usually the seed.
pub type RunSet<K> = BTreeMap<K, Run>;

impl Run {
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// Pairs two columns index by index, dropping the tail of the longer one.
    pub fn from_columns(steps: &[f64], values: &[f64]) -> Self {
        Self {
            points: steps.iter().copied().zip(values.iter().copied()).collect(),
        }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn steps(&self) -> impl Iterator<Item = f64> + Clone + '_ {
        self.points.iter().map(|(step, _)| *step)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + Clone + '_ {
        self.points.iter().map(|(_, value)| *value)
    }

    pub fn first_step(&self) -> Option<f64> {
        self.points.first().map(|(step, _)| *step)
    }

    pub fn last_step(&self) -> Option<f64> {
        self.points.last().map(|(step, _)| *step)
    }

    /// Index of the first point that breaks the non-decreasing step order or
    /// carries a non-finite number.
    pub fn first_malformed(&self) -> Option<usize> {
        let mut prev = f64::NEG_INFINITY;
        for (index, (step, value)) in self.points.iter().enumerate() {
            if !step.is_finite() || !value.is_finite() || *step < prev {
                return Some(index);
            }
            prev = *step;
        }
        None
    }

    /// Piecewise-linear value at `step`, clamped to the end values outside the
    /// recorded range. `None` for an empty run.
    pub fn interpolate(&self, step: f64) -> Option<f64> {
        let (first, last) = (self.points.first()?, self.points.last()?);
        if step <= first.0 {
            return Some(first.1);
        }
        if step >= last.0 {
            return Some(last.1);
        }

        // first point strictly past `step`; both neighbours exist because of the clamps above
        let upper = self.points.partition_point(|(s, _)| *s <= step);
        let (x0, y0) = self.points[upper - 1];
        let (x1, y1) = self.points[upper];
        Some(y0 + (y1 - y0) * (step - x0) / (x1 - x0))
    }
}

impl FromIterator<(f64, f64)> for Run {
    fn from_iter<T: IntoIterator<Item = (f64, f64)>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Mean and population standard deviation of several runs on a shared step axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedCurve {
    steps: Array1<f64>,
    mean: Array1<f64>,
    std: Array1<f64>,
}

impl AggregatedCurve {
    pub(crate) fn new(steps: Array1<f64>, mean: Array1<f64>, std: Array1<f64>) -> Self {
        debug_assert!(steps.len() == mean.len() && mean.len() == std.len());
        Self { steps, mean, std }
    }

    pub fn steps(&self) -> &[f64] {
        self.steps.as_slice().unwrap_or_default()
    }

    pub fn mean(&self) -> &[f64] {
        self.mean.as_slice().unwrap_or_default()
    }

    pub fn std(&self) -> &[f64] {
        self.std.as_slice().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// (step, mean - std, mean + std) for every sample.
    pub fn band(&self) -> impl Iterator<Item = (f64, f64, f64)> + Clone + '_ {
        self.steps()
            .iter()
            .zip(self.mean().iter().zip(self.std()))
            .map(|(step, (mean, std))| (*step, mean - std, mean + std))
    }

    /// Mean and std at the last sampled step.
    pub fn last(&self) -> Option<(f64, f64)> {
        Some((*self.mean().last()?, *self.std().last()?))
    }
}
