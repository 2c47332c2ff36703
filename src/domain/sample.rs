// Series sample domain model
use serde::Deserialize;

/// One `[x, y]` point as produced by the upstream series endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "(f64, f64)")]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

impl Sample {
    #[cfg(test)]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Sample {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// The entire dataset to display for one source. Never a delta.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesSnapshot {
    pub samples: Vec<Sample>,
}

impl SeriesSnapshot {
    #[cfg(test)]
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    /// Decode a JSON array of `[number, number]` pairs.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        let samples: Vec<Sample> = serde_json::from_str(body)?;
        Ok(Self { samples })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Split into parallel label (x) and data (y) sequences.
    pub fn split(&self) -> (Vec<f64>, Vec<f64>) {
        self.samples.iter().map(|s| (s.x, s.y)).unzip()
    }
}
