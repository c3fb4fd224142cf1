//! Labeled simulation output
//!
//! A [`Trajectory`] is a time × unit table: one row per grid time, one
//! column per unit, with columns labeled "Neuron 0" .. "Neuron N-1".

use ndarray::{Array1, Array2, ArrayView1};

/// Labeled time series produced by a simulation
///
/// Row k of `states` is the network state at `times[k]`; column i holds
/// unit i, labeled `labels[i]`.
#[derive(Debug, Clone)]
pub struct Trajectory {
    times: Array1<f64>,
    states: Array2<f64>,
    labels: Vec<String>,
}

impl Trajectory {
    pub(crate) fn new(times: Array1<f64>, states: Array2<f64>, labels: Vec<String>) -> Self {
        debug_assert_eq!(times.len(), states.nrows());
        debug_assert_eq!(labels.len(), states.ncols());
        Self { times, states, labels }
    }

    /// Number of recorded time points
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// True if no time point was recorded
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Number of units (columns)
    pub fn n_units(&self) -> usize {
        self.states.ncols()
    }

    /// Time grid
    pub fn times(&self) -> &Array1<f64> {
        &self.times
    }

    /// All states, one row per time point
    pub fn states(&self) -> &Array2<f64> {
        &self.states
    }

    /// Unit labels in column order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// State at row `index`
    pub fn state(&self, index: usize) -> Option<ArrayView1<f64>> {
        (index < self.len()).then(|| self.states.row(index))
    }

    /// First recorded state
    pub fn initial_state(&self) -> Option<ArrayView1<f64>> {
        self.state(0)
    }

    /// Last recorded state
    pub fn final_state(&self) -> Option<ArrayView1<f64>> {
        self.len().checked_sub(1).and_then(|i| self.state(i))
    }

    /// State at the grid point nearest to `time`
    ///
    /// Returns `None` when `time` is more than half a step away from every
    /// grid point.
    pub fn state_at(&self, time: f64) -> Option<ArrayView1<f64>> {
        let (index, distance) = self.times
            .iter()
            .enumerate()
            .map(|(i, &t)| (i, (t - time).abs()))
            .min_by(|a, b| a.1.total_cmp(&b.1))?;

        let half_step = if self.len() > 1 {
            (self.times[1] - self.times[0]) / 2.0
        } else {
            0.0
        };
        if distance <= half_step || distance == 0.0 {
            self.state(index)
        } else {
            None
        }
    }

    /// Time series of a single unit
    pub fn unit(&self, unit: usize) -> Option<ArrayView1<f64>> {
        (unit < self.n_units()).then(|| self.states.column(unit))
    }

    /// Time series of the unit with the given label
    pub fn unit_by_label(&self, label: &str) -> Option<ArrayView1<f64>> {
        let unit = self.labels.iter().position(|l| l == label)?;
        self.unit(unit)
    }

    /// Population-mean activity at each time point
    pub fn mean_activity(&self) -> Array1<f64> {
        self.states
            .mean_axis(ndarray::Axis(1))
            .unwrap_or_else(|| Array1::zeros(self.len()))
    }
}
