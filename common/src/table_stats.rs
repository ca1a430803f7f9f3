//! Per-keyspace read/write statistics from `nodetool cfstats`

use serde::Serialize;
use tracing::trace;

use crate::pattern::{classify, LineShape};
use crate::reading::{float_or_zero, int_or_zero};

const TABLE_STATS_SHAPES: [LineShape; 6] = [
    LineShape::KeyspaceHeader,
    LineShape::ReadCount,
    LineShape::ReadLatency,
    LineShape::WriteCount,
    LineShape::WriteLatency,
    LineShape::PendingFlushes,
];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Keyspace {
    pub name: String,
    pub read_count: u64,
    /// May be NaN when the keyspace has served no reads
    pub read_latency_ms: f64,
    pub write_count: u64,
    /// May be NaN when the keyspace has taken no writes
    pub write_latency_ms: f64,
    pub pending_flushes: u64,
}

impl Keyspace {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }
}

/// Result of `nodetool cfstats`, keyspaces in order of appearance
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableStatsSnapshot {
    pub keyspaces: Vec<Keyspace>,
}

impl TableStatsSnapshot {
    /// Parse raw `nodetool cfstats` output
    ///
    /// Only keyspace-level fields are read. The per-table blocks beneath each
    /// keyspace match no shape and are skipped line by line.
    pub fn parse(text: &str) -> Self {
        let mut keyspaces: Vec<Keyspace> = Vec::new();
        let mut current: Option<usize> = None;

        for line in text.lines() {
            let Some((shape, caps)) = classify(line, &TABLE_STATS_SHAPES) else {
                continue;
            };

            if shape == LineShape::KeyspaceHeader {
                keyspaces.push(Keyspace::named(caps[0].trim()));
                current = Some(keyspaces.len() - 1);
                continue;
            }

            let Some(index) = current else {
                trace!(line, "Keyspace field before any keyspace header, skipped");
                continue;
            };
            let keyspace = &mut keyspaces[index];
            let token = caps[0];

            match shape {
                LineShape::ReadCount => keyspace.read_count = int_or_zero("read_count", token),
                LineShape::ReadLatency => {
                    keyspace.read_latency_ms = float_or_zero("read_latency", token)
                }
                LineShape::WriteCount => keyspace.write_count = int_or_zero("write_count", token),
                LineShape::WriteLatency => {
                    keyspace.write_latency_ms = float_or_zero("write_latency", token)
                }
                LineShape::PendingFlushes => {
                    keyspace.pending_flushes = int_or_zero("pending_flushes", token)
                }
                _ => {}
            }
        }

        Self { keyspaces }
    }

    /// Mean read latency over all keyspaces; NaN if any keyspace reports NaN
    pub fn avg_read_latency(&self) -> f64 {
        mean(self.keyspaces.iter().map(|ks| ks.read_latency_ms))
    }

    /// Mean write latency over all keyspaces; NaN if any keyspace reports NaN
    pub fn avg_write_latency(&self) -> f64 {
        mean(self.keyspaces.iter().map(|ks| ks.write_latency_ms))
    }

    pub fn total_pending_flushes(&self) -> u64 {
        self.keyspaces.iter().map(|ks| ks.pending_flushes).sum()
    }
}

// No filtering: NaN members make the mean NaN, and an empty set is 0/0.
fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    sum / count as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_attach_to_latest_keyspace() {
        let text = "Keyspace: a\n    Read Count: 1\nKeyspace: b\n    Read Count: 2\n";
        let stats = TableStatsSnapshot::parse(text);
        assert_eq!(stats.keyspaces.len(), 2);
        assert_eq!(stats.keyspaces[0].read_count, 1);
        assert_eq!(stats.keyspaces[1].read_count, 2);
    }

    #[test]
    fn test_field_before_keyspace_is_dropped() {
        let text = "    Read Count: 99\nKeyspace: a\n    Write Count: 3\n";
        let stats = TableStatsSnapshot::parse(text);
        assert_eq!(stats.keyspaces.len(), 1);
        assert_eq!(stats.keyspaces[0].read_count, 0);
        assert_eq!(stats.keyspaces[0].write_count, 3);
    }

    #[test]
    fn test_mean_propagates_nan() {
        let text = "Keyspace: a\n    Read Latency: NaN ms.\nKeyspace: b\n    Read Latency: 2.0 ms.\n";
        let stats = TableStatsSnapshot::parse(text);
        assert!(stats.keyspaces[0].read_latency_ms.is_nan());
        assert!(stats.avg_read_latency().is_nan());
    }

    #[test]
    fn test_mean_of_finite_latencies() {
        let text = "Keyspace: a\n    Write Latency: 1.0 ms.\nKeyspace: b\n    Write Latency: 3.0 ms.\n";
        let stats = TableStatsSnapshot::parse(text);
        assert_eq!(stats.avg_write_latency(), 2.0);
    }

    #[test]
    fn test_mean_of_no_keyspaces_is_nan() {
        assert!(TableStatsSnapshot::default().avg_read_latency().is_nan());
    }

    #[test]
    fn test_absent_fields_stay_zero() {
        let stats = TableStatsSnapshot::parse("Keyspace: lonely\n");
        assert_eq!(stats.keyspaces[0], Keyspace::named("lonely"));
        assert_eq!(stats.total_pending_flushes(), 0);
    }
}
