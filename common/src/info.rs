//! Process and cache health from `nodetool info`

use serde::Serialize;

use crate::pattern::{classify, LineShape};
use crate::reading::{float_or_zero, int_or_zero};

const INFO_SHAPES: [LineShape; 14] = [
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

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CacheKind {
    Key,
    Row,
    Counter,
}

impl CacheKind {
    pub const ALL: [CacheKind; 3] = [CacheKind::Key, CacheKind::Row, CacheKind::Counter];

    pub fn label(&self) -> &'static str {
        match self {
            CacheKind::Key => "Key Cache",
            CacheKind::Row => "Row Cache",
            CacheKind::Counter => "Counter Cache",
        }
    }
}

/// One cache line of `nodetool info`
///
/// A cache missing from the report keeps these all-zero defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    pub entries: u64,
    pub size: String,
    pub capacity: String,
    pub hits: u64,
    pub requests: u64,
    /// NaN until the cache has served a request
    pub recent_hit_rate: f64,
    pub save_period_secs: u64,
}

impl CacheStats {
    fn from_captures(caps: &[&str]) -> Self {
        let [entries, size, capacity, hits, requests, hit_rate, save_period] = caps else {
            return Self::default();
        };
        Self {
            entries: int_or_zero("cache_entries", entries),
            size: size.to_string(),
            capacity: capacity.to_string(),
            hits: int_or_zero("cache_hits", hits),
            requests: int_or_zero("cache_requests", requests),
            recent_hit_rate: float_or_zero("cache_hit_rate", hit_rate),
            save_period_secs: int_or_zero("cache_save_period", save_period),
        }
    }
}

/// Result of `nodetool info`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InfoSnapshot {
    pub id: String,
    pub gossip_active: bool,
    pub thrift_active: bool,
    pub native_transport_active: bool,
    pub load: String,
    pub generation_number: u64,
    pub uptime_secs: u64,
    pub heap_used_mb: f64,
    pub heap_capacity_mb: f64,
    /// `heap_used_mb / heap_capacity_mb * 100`, 0 when the heap line is absent
    pub heap_usage_percent: f64,
    pub data_center: String,
    pub rack: String,
    pub exception_count: u64,
    pub key_cache: CacheStats,
    pub row_cache: CacheStats,
    pub counter_cache: CacheStats,
}

impl InfoSnapshot {
    /// Parse raw `nodetool info` output
    pub fn parse(text: &str) -> Self {
        let mut info = Self::default();

        for line in text.lines() {
            let Some((shape, caps)) = classify(line, &INFO_SHAPES) else {
                continue;
            };

            match shape {
                LineShape::Id => info.id = caps[0].to_string(),
                LineShape::GossipActive => info.gossip_active = caps[0] == "true",
                LineShape::ThriftActive => info.thrift_active = caps[0] == "true",
                LineShape::NativeTransportActive => {
                    info.native_transport_active = caps[0] == "true"
                }
                LineShape::Load => info.load = caps[0].to_string(),
                LineShape::GenerationNumber => {
                    info.generation_number = int_or_zero("generation_number", caps[0])
                }
                LineShape::Uptime => info.uptime_secs = int_or_zero("uptime", caps[0]),
                LineShape::HeapMemory => {
                    info.heap_used_mb = float_or_zero("heap_used", caps[0]);
                    info.heap_capacity_mb = float_or_zero("heap_capacity", caps[1]);
                    info.heap_usage_percent = info.heap_used_mb / info.heap_capacity_mb * 100.0;
                }
                LineShape::DataCenter => info.data_center = caps[0].trim().to_string(),
                LineShape::Rack => info.rack = caps[0].trim().to_string(),
                LineShape::Exceptions => {
                    info.exception_count = int_or_zero("exceptions", caps[0])
                }
                LineShape::KeyCache => info.key_cache = CacheStats::from_captures(&caps),
                LineShape::RowCache => info.row_cache = CacheStats::from_captures(&caps),
                LineShape::CounterCache => info.counter_cache = CacheStats::from_captures(&caps),
                _ => {}
            }
        }

        info
    }

    pub fn cache(&self, kind: CacheKind) -> &CacheStats {
        match kind {
            CacheKind::Key => &self.key_cache,
            CacheKind::Row => &self.row_cache,
            CacheKind::Counter => &self.counter_cache,
        }
    }
}
