// Chart domain model and render sink
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisKind {
    Time,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOptions {
    pub kind: ChartKind,
    pub x_axis: AxisKind,
    pub y_begin_at_zero: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            kind: ChartKind::Line,
            x_axis: AxisKind::Time,
            y_begin_at_zero: true,
        }
    }
}

/// Render target for a series poller.
pub trait ChartSink: Send + Sync {
    /// Install new label and data sequences, dropping whatever was there.
    fn replace_data(&mut self, labels: Vec<f64>, data: Vec<f64>);

    fn redraw(&mut self);
}

/// In-memory line chart with a single dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartModel {
    pub id: String,
    pub label: String,
    pub color: String,
    pub options: ChartOptions,
    pub labels: Vec<f64>,
    pub data: Vec<f64>,
    /// Number of redraws so far.
    pub revision: u64,
}

impl ChartModel {
    pub fn new(id: String, label: String, color: String) -> Self {
        Self {
            id,
            label,
            color,
            options: ChartOptions::default(),
            labels: Vec::new(),
            data: Vec::new(),
            revision: 0,
        }
    }

    /// Largest y value, floored at zero when the axis begins at zero.
    pub fn y_max(&self) -> f64 {
        let max = self.data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if self.options.y_begin_at_zero {
            max.max(0.0)
        } else {
            max
        }
    }

    pub fn y_min(&self) -> f64 {
        let min = self.data.iter().copied().fold(f64::INFINITY, f64::min);
        if self.options.y_begin_at_zero {
            min.min(0.0)
        } else {
            min
        }
    }
}

impl ChartSink for ChartModel {
    fn replace_data(&mut self, labels: Vec<f64>, data: Vec<f64>) {
        self.labels = labels;
        self.data = data;
    }

    fn redraw(&mut self) {
        self.revision += 1;
    }
}
