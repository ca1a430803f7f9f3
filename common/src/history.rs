//! Bounded metric history for charting
//!
//! Each series keeps the most recent `HISTORY_CAPACITY` samples, oldest first.
//! The history is written by a single poll cycle and read through clones, so
//! there is no locking here.

use std::collections::{BTreeMap, VecDeque};

use serde::Serialize;

/// Samples kept per series: ten minutes at the default ten second refresh, plus one
pub const HISTORY_CAPACITY: usize = 61;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeriesKey {
    ReadLatency,
    WriteLatency,
    Exceptions,
    HeapUsage,
    PercentUpNormal,
}

impl SeriesKey {
    pub const ALL: [SeriesKey; 5] = [
        SeriesKey::ReadLatency,
        SeriesKey::WriteLatency,
        SeriesKey::Exceptions,
        SeriesKey::HeapUsage,
        SeriesKey::PercentUpNormal,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SeriesKey::ReadLatency => "Read Latency",
            SeriesKey::WriteLatency => "Write Latency",
            SeriesKey::Exceptions => "Exceptions",
            SeriesKey::HeapUsage => "Heap Used",
            SeriesKey::PercentUpNormal => "Num UN Nodes",
        }
    }
}

/// Fixed-capacity FIFO of samples
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundedSeries {
    samples: VecDeque<f64>,
    #[serde(skip)]
    capacity: usize,
}

impl BoundedSeries {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append, evicting the oldest sample once full
    pub fn push(&mut self, value: f64) {
        self.samples.push_back(value);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    pub fn latest(&self) -> Option<f64> {
        self.samples.back().copied()
    }

    /// Oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }
}

/// Named series fed once per poll cycle
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricsHistory {
    series: BTreeMap<SeriesKey, BoundedSeries>,
}

impl MetricsHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, key: SeriesKey, value: f64) {
        self.series
            .entry(key)
            .or_insert_with(|| BoundedSeries::with_capacity(HISTORY_CAPACITY))
            .push(value);
    }

    /// Samples for `key`, oldest first; empty until the first append
    pub fn series(&self, key: SeriesKey) -> Vec<f64> {
        self.series.get(&key).map(|s| s.iter().collect()).unwrap_or_default()
    }

    pub fn latest(&self, key: SeriesKey) -> Option<f64> {
        self.series.get(&key)?.latest()
    }
}
