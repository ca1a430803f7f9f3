//! Cluster topology from `nodetool status`

use std::fmt;

use serde::{Serialize, Serializer};
use tracing::trace;

use crate::pattern::{classify, LineShape};
use crate::reading::int_or_zero;

const STATUS_SHAPES: [LineShape; 2] = [LineShape::DatacenterHeader, LineShape::NodeRow];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Availability {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mode {
    Normal,
    Leaving,
    Joining,
    Moving,
}

/// Two-letter node state such as `UN` (Up/Normal) or `DJ` (Down/Joining)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeState {
    pub availability: Availability,
    pub mode: Mode,
}

impl NodeState {
    pub const UP_NORMAL: NodeState = NodeState {
        availability: Availability::Up,
        mode: Mode::Normal,
    };

    pub fn from_code(code: &str) -> Option<Self> {
        let mut chars = code.chars();
        let availability = match chars.next()? {
            'U' => Availability::Up,
            'D' => Availability::Down,
            _ => return None,
        };
        let mode = match chars.next()? {
            'N' => Mode::Normal,
            'L' => Mode::Leaving,
            'J' => Mode::Joining,
            'M' => Mode::Moving,
            _ => return None,
        };
        if chars.next().is_some() {
            return None;
        }
        Some(Self { availability, mode })
    }

    pub fn code(&self) -> &'static str {
        match (self.availability, self.mode) {
            (Availability::Up, Mode::Normal) => "UN",
            (Availability::Up, Mode::Leaving) => "UL",
            (Availability::Up, Mode::Joining) => "UJ",
            (Availability::Up, Mode::Moving) => "UM",
            (Availability::Down, Mode::Normal) => "DN",
            (Availability::Down, Mode::Leaving) => "DL",
            (Availability::Down, Mode::Joining) => "DJ",
            (Availability::Down, Mode::Moving) => "DM",
        }
    }

    pub fn is_up(&self) -> bool {
        self.availability == Availability::Up
    }
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for NodeState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// Effective ownership; nodetool prints `?` when it cannot be computed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ownership {
    Share(String),
    Unknown,
}

impl Ownership {
    fn from_token(token: &str) -> Self {
        if token == "?" {
            Ownership::Unknown
        } else {
            Ownership::Share(token.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Ownership::Share(share) => share,
            Ownership::Unknown => "?",
        }
    }
}

impl fmt::Display for Ownership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Ownership {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Ownership::Share(share) => serializer.serialize_some(share),
            Ownership::Unknown => serializer.serialize_none(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub state: NodeState,
    pub address: String,
    /// Magnitude and unit as printed, or `?` for a node nodetool cannot reach
    pub load: String,
    pub token_count: u32,
    pub ownership: Ownership,
    pub host_id: String,
    pub rack: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Datacenter {
    pub name: String,
    pub nodes: Vec<Node>,
}

/// Result of `nodetool status`, datacenters in order of appearance
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClusterStatus {
    pub datacenters: Vec<Datacenter>,
}

impl ClusterStatus {
    /// Parse raw `nodetool status` output
    ///
    /// Node rows seen before the first datacenter header are dropped; that
    /// covers the legend and column titles as well as any stray row.
    pub fn parse(text: &str) -> Self {
        let mut datacenters: Vec<Datacenter> = Vec::new();
        let mut current: Option<usize> = None;

        for line in text.lines() {
            let Some((shape, caps)) = classify(line, &STATUS_SHAPES) else {
                continue;
            };

            match shape {
                LineShape::DatacenterHeader => {
                    let name = caps[0].trim();
                    if name.is_empty() {
                        continue;
                    }
                    datacenters.push(Datacenter {
                        name: name.to_string(),
                        nodes: Vec::new(),
                    });
                    current = Some(datacenters.len() - 1);
                }
                LineShape::NodeRow => {
                    let Some(index) = current else {
                        trace!(line, "Node row before any datacenter, skipped");
                        continue;
                    };
                    let Some(node) = Self::node_from_captures(&caps) else {
                        continue;
                    };
                    datacenters[index].nodes.push(node);
                }
                _ => {}
            }
        }

        Self { datacenters }
    }

    fn node_from_captures(caps: &[&str]) -> Option<Node> {
        let [state, address, load, tokens, owns, host_id, rack] = caps else {
            return None;
        };
        Some(Node {
            state: NodeState::from_code(state)?,
            address: address.to_string(),
            load: load.to_string(),
            token_count: int_or_zero("tokens", tokens),
            ownership: Ownership::from_token(owns),
            host_id: host_id.to_string(),
            rack: rack.trim().to_string(),
        })
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.datacenters.iter().flat_map(|dc| dc.nodes.iter())
    }

    pub fn node_count(&self) -> usize {
        self.datacenters.iter().map(|dc| dc.nodes.len()).sum()
    }

    pub fn up_normal_count(&self) -> usize {
        self.nodes().filter(|node| node.state == NodeState::UP_NORMAL).count()
    }

    /// Share of nodes that are Up/Normal, rounded to a whole percent
    ///
    /// An empty cluster reports 0.
    pub fn percent_up_normal(&self) -> u8 {
        let total = self.node_count();
        if total == 0 {
            return 0;
        }
        (100.0 * self.up_normal_count() as f64 / total as f64).round() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_state_codes() {
        for code in ["UN", "UL", "UJ", "UM", "DN", "DL", "DJ", "DM"] {
            assert_eq!(NodeState::from_code(code).unwrap().code(), code);
        }
        assert!(NodeState::from_code("XN").is_none());
        assert!(NodeState::from_code("U").is_none());
        assert!(NodeState::from_code("UNX").is_none());
    }

    #[test]
    fn test_orphan_node_row_is_dropped() {
        let text = "UN  10.0.0.1  47.25 GB  256  ?  db28e0b4  5AB\n\
                    Datacenter: DC1\n\
                    UN  10.0.0.2  50.15 GB  256  ?  2dcabd19  5AB\n";
        let status = ClusterStatus::parse(text);
        assert_eq!(status.datacenters.len(), 1);
        assert_eq!(status.datacenters[0].nodes.len(), 1);
        assert_eq!(status.datacenters[0].nodes[0].address, "10.0.0.2");
    }

    #[test]
    fn test_repeated_datacenter_name_is_not_merged() {
        let text = "Datacenter: DC1\nUN  10.0.0.1  1 GB  1  ?  a  r1\nDatacenter: DC1\n";
        let status = ClusterStatus::parse(text);
        assert_eq!(status.datacenters.len(), 2);
        assert_eq!(status.datacenters[0].nodes.len(), 1);
        assert!(status.datacenters[1].nodes.is_empty());
    }

    #[test]
    fn test_percent_up_normal_rounds() {
        let text = "Datacenter: DC1\n\
                    UN  10.0.0.1  1 GB  1  ?  a  r1\n\
                    UN  10.0.0.2  1 GB  1  ?  b  r1\n\
                    DN  10.0.0.3  1 GB  1  ?  c  r1\n";
        let status = ClusterStatus::parse(text);
        assert_eq!(status.node_count(), 3);
        assert_eq!(status.up_normal_count(), 2);
        assert_eq!(status.percent_up_normal(), 67);
    }

    #[test]
    fn test_percent_up_normal_empty_cluster_is_zero() {
        assert_eq!(ClusterStatus::default().percent_up_normal(), 0);
        let status = ClusterStatus::parse("Datacenter: DC1\n");
        assert_eq!(status.percent_up_normal(), 0);
    }

    #[test]
    fn test_unreachable_down_node_is_counted() {
        let text = "Datacenter: DC1\n\
                    UN  10.0.0.1  1 GB  256  ?  a1  r1\n\
                    DN  10.0.0.2  ?  256  ?  a2  r1\n";
        let status = ClusterStatus::parse(text);
        assert_eq!(status.node_count(), 2);
        assert_eq!(status.datacenters[0].nodes[1].load, "?");
        assert_eq!(status.percent_up_normal(), 50);
    }

    #[test]
    fn test_up_but_joining_is_not_normal() {
        let text = "Datacenter: DC1\nUJ  10.0.0.1  1 GB  1  ?  a  r1\n";
        let status = ClusterStatus::parse(text);
        assert!(status.datacenters[0].nodes[0].state.is_up());
        assert_eq!(status.percent_up_normal(), 0);
    }

    #[test]
    fn test_ownership_serialises_unknown_as_null() {
        let json = serde_json::to_string(&Ownership::Unknown).unwrap();
        assert_eq!(json, "null");
        let json = serde_json::to_string(&Ownership::Share("50%".into())).unwrap();
        assert_eq!(json, "\"50%\"");
    }
}
