//! Line shapes recognised in nodetool reports
//!
//! Each shape is an independent, fully anchored pattern. Leading whitespace
//! is ignored and trailing whitespace is trimmed before matching, so an
//! indented sub-field can never be mistaken for a top-level field that only
//! shares a suffix with it.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

/// Magnitude plus unit as printed by nodetool, e.g. `35.32 GB`, `1.2 GiB`, `0 bytes`
const MAGNITUDE: &str = r"[0-9.]+ (?:[KMGTP]i?B|B|bytes)";

/// Body shared by the three cache lines of `nodetool info`
const CACHE_BODY: &str = concat!(
    r"entries ([0-9]+), size ([0-9.]+ .+?), capacity ([0-9.]+ .+?), ",
    r"([0-9]+) hits, ([0-9]+) requests, ([0-9.]+|NaN) recent hit rate, ",
    r"([0-9]+) save period in seconds"
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineShape {
    // nodetool status
    DatacenterHeader,
    NodeRow,

    // nodetool cfstats
    KeyspaceHeader,
    ReadCount,
    ReadLatency,
    WriteCount,
    WriteLatency,
    PendingFlushes,

    // nodetool info
    Id,
    GossipActive,
    ThriftActive,
    NativeTransportActive,
    Load,
    GenerationNumber,
    Uptime,
    HeapMemory,
    DataCenter,
    Rack,
    Exceptions,
    KeyCache,
    RowCache,
    CounterCache,
}

impl LineShape {
    pub const ALL: [LineShape; 22] = [
        LineShape::DatacenterHeader,
        LineShape::NodeRow,
        LineShape::KeyspaceHeader,
        LineShape::ReadCount,
        LineShape::ReadLatency,
        LineShape::WriteCount,
        LineShape::WriteLatency,
        LineShape::PendingFlushes,
        LineShape::Id,
        LineShape::GossipActive,
        LineShape::ThriftActive,
        LineShape::NativeTransportActive,
        LineShape::Load,
        LineShape::GenerationNumber,
        LineShape::Uptime,
        LineShape::HeapMemory,
        LineShape::DataCenter,
        LineShape::Rack,
        LineShape::Exceptions,
        LineShape::KeyCache,
        LineShape::RowCache,
        LineShape::CounterCache,
    ];

    /// Pattern body, without the leading-whitespace prefix and end anchor
    fn body(self) -> String {
        match self {
            LineShape::DatacenterHeader => r"Datacenter: (.+)".to_string(),
            LineShape::NodeRow => format!(
                r"([UD][NLJM])\s+([0-9]+\.[0-9]+\.[0-9]+\.[0-9]+)\s+({MAGNITUDE}|\?)\s+([0-9]+)\s+([0-9?.%]+)\s+([a-zA-Z0-9-]+)\s+(.+)"
            ),
            LineShape::KeyspaceHeader => r"Keyspace\s*: (.+)".to_string(),
            LineShape::ReadCount => r"Read Count: ([0-9]+)".to_string(),
            LineShape::ReadLatency => r"Read Latency: ([0-9.]+|NaN) ms\.?".to_string(),
            LineShape::WriteCount => r"Write Count: ([0-9]+)".to_string(),
            LineShape::WriteLatency => r"Write Latency: ([0-9.]+|NaN) ms\.?".to_string(),
            LineShape::PendingFlushes => r"Pending Flushes: ([0-9]+)".to_string(),
            LineShape::Id => r"ID\s*: ([a-zA-Z0-9-]+)".to_string(),
            LineShape::GossipActive => r"Gossip active\s*: (true|false)".to_string(),
            LineShape::ThriftActive => r"Thrift active\s*: (true|false)".to_string(),
            LineShape::NativeTransportActive => {
                r"Native Transport active\s*: (true|false)".to_string()
            }
            LineShape::Load => format!(r"Load\s*: ({MAGNITUDE})"),
            LineShape::GenerationNumber => r"Generation No\s*: ([0-9]+)".to_string(),
            LineShape::Uptime => r"Uptime \(seconds\)\s*: ([0-9]+)".to_string(),
            LineShape::HeapMemory => r"Heap Memory \(MB\)\s*: ([0-9.]+) / ([0-9.]+)".to_string(),
            LineShape::DataCenter => r"Data Center\s*: (.+)".to_string(),
            LineShape::Rack => r"Rack\s*: (.+)".to_string(),
            LineShape::Exceptions => r"Exceptions\s*: (.+)".to_string(),
            LineShape::KeyCache => format!(r"Key Cache\s*: {CACHE_BODY}"),
            LineShape::RowCache => format!(r"Row Cache\s*: {CACHE_BODY}"),
            LineShape::CounterCache => format!(r"Counter Cache\s*: {CACHE_BODY}"),
        }
    }

    /// Ordered captures if the whole line has this shape
    ///
    /// A capture group that did not participate is reported as no match
    /// rather than as an error.
    pub fn captures(self, line: &str) -> Option<Vec<&str>> {
        let regex = PATTERNS.get(&self)?;
        let caps = regex.captures(line.trim_end())?;
        caps.iter().skip(1).map(|group| group.map(|m| m.as_str())).collect()
    }
}

/// First shape in `shapes` that matches `line`, with its captures
pub fn classify<'a>(line: &'a str, shapes: &[LineShape]) -> Option<(LineShape, Vec<&'a str>)> {
    shapes.iter().find_map(|shape| shape.captures(line).map(|caps| (*shape, caps)))
}

static PATTERNS: LazyLock<HashMap<LineShape, Regex>> = LazyLock::new(|| {
    // Every pattern is a compile-time constant; a failure here is a programmer error.
    LineShape::ALL
        .iter()
        .map(|shape| {
            let pattern = format!(r"^\s*{}$", shape.body());
            (*shape, Regex::new(&pattern).expect("static regex must compile"))
        })
        .collect()
});
