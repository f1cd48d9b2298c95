//! JSON wire format exchanged with the game frontend.
//!
//! Nodes and lines are objects keyed by id. The cost of an islanded grid
//! is written as the string `"Infinity"` since JSON has no infinite
//! number; `null` means the network has not been solved yet.

use std::collections::{BTreeMap, HashSet};

use gs_core::{LineId, NodeId, Real};
use serde::{Deserialize, Serialize};

use crate::error::{NetworkError, NetworkResult};
use crate::network::{Cost, DEFAULT_LIMIT, Line, Network, Node, SHADOW_SUFFIX};
use crate::validate;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeRecord {
    pub id: String,
    #[serde(default)]
    pub x: Real,
    #[serde(default)]
    pub y: Real,
    #[serde(default)]
    pub injection: Real,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow_of: Option<String>,
}

fn default_limit() -> Real {
    DEFAULT_LIMIT
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineRecord {
    pub id: String,
    pub from_node: String,
    pub to_node: String,
    #[serde(default)]
    pub flow: Real,
    #[serde(default = "default_limit")]
    pub limit: Real,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkSnapshot {
    pub nodes: BTreeMap<String, NodeRecord>,
    pub lines: BTreeMap<String, LineRecord>,
    #[serde(default, with = "cost_repr")]
    pub cost: Option<Real>,
    #[serde(default)]
    pub level: Option<u32>,
    #[serde(default)]
    pub tutorial: bool,
}

mod cost_repr {
    use serde::{Deserialize, Deserializer, Serializer};

    pub const INFINITY_LITERAL: &str = "Infinity";

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(cost: &Option<f64>, s: S) -> Result<S::Ok, S::Error> {
        match cost {
            None => s.serialize_none(),
            Some(c) if c.is_infinite() => s.serialize_str(INFINITY_LITERAL),
            Some(c) => s.serialize_f64(*c),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        match Option::<Repr>::deserialize(d)? {
            None => Ok(None),
            Some(Repr::Number(v)) => Ok(Some(v)),
            Some(Repr::Text(text)) => match text.trim().to_ascii_lowercase().as_str() {
                "infinity" | "+infinity" | "inf" | "+inf" => Ok(Some(f64::INFINITY)),
                other => Err(serde::de::Error::custom(format!(
                    "invalid cost {other:?}, expected a number or \"{INFINITY_LITERAL}\""
                ))),
            },
        }
    }
}

impl From<&Network> for NetworkSnapshot {
    fn from(network: &Network) -> Self {
        let nodes = network
            .nodes()
            .values()
            .map(|n| {
                (
                    n.id.to_string(),
                    NodeRecord {
                        id: n.id.to_string(),
                        x: n.x,
                        y: n.y,
                        injection: n.injection,
                        shadow_of: n.shadow_of.as_ref().map(NodeId::to_string),
                    },
                )
            })
            .collect();
        let lines = network
            .lines()
            .values()
            .map(|l| {
                (
                    l.id.to_string(),
                    LineRecord {
                        id: l.id.to_string(),
                        from_node: l.from_node.to_string(),
                        to_node: l.to_node.to_string(),
                        flow: l.flow,
                        limit: l.limit,
                    },
                )
            })
            .collect();

        Self {
            nodes,
            lines,
            cost: network.cost.map(Cost::value),
            level: network.level,
            tutorial: network.tutorial,
        }
    }
}

impl TryFrom<NetworkSnapshot> for Network {
    type Error = NetworkError;

    fn try_from(snapshot: NetworkSnapshot) -> NetworkResult<Self> {
        let legacy_shadows = infer_legacy_shadows(&snapshot);
        let mut network = Network::new();

        for (key, record) in snapshot.nodes {
            if key != record.id {
                return Err(NetworkError::KeyMismatch { key, id: record.id });
            }
            let shadow_of = match record.shadow_of {
                Some(base) => Some(NodeId::new(base)),
                None => legacy_shadows
                    .contains(record.id.as_str())
                    .then(|| NodeId::new(strip_suffix(&record.id))),
            };
            network.insert_node(Node {
                id: NodeId::new(record.id),
                x: record.x,
                y: record.y,
                injection: record.injection,
                shadow_of,
            })?;
        }

        for (key, record) in snapshot.lines {
            if key != record.id {
                return Err(NetworkError::KeyMismatch { key, id: record.id });
            }
            let mut line = Line::new(
                LineId::new(record.id),
                NodeId::new(record.from_node),
                NodeId::new(record.to_node),
                record.limit,
            );
            line.flow = record.flow;
            network.insert_line(line)?;
        }

        network.cost = match snapshot.cost {
            Some(c) if c.is_nan() => {
                return Err(NetworkError::NonFinite {
                    owner: "network".to_string(),
                    what: "cost",
                    value: c,
                });
            }
            Some(c) => Some(Cost::from_value(c)),
            None => None,
        };
        network.level = snapshot.level;
        network.tutorial = snapshot.tutorial;

        validate::validate_network(&network)?;
        Ok(network)
    }
}

fn strip_suffix(id: &str) -> &str {
    id.strip_suffix(SHADOW_SUFFIX).unwrap_or(id)
}

/// Ids of nodes written before shadow twins were tagged explicitly.
///
/// A node counts as a legacy shadow when its id is `<base>b` for an
/// existing `<base>`, it has no injection, a line ends on it, no line joins
/// it to its base, and its base is not itself such a candidate.
fn infer_legacy_shadows(snapshot: &NetworkSnapshot) -> HashSet<String> {
    let has_line = |id: &str| {
        snapshot
            .lines
            .values()
            .any(|l| l.from_node == id || l.to_node == id)
    };
    let joined = |a: &str, b: &str| {
        snapshot.lines.values().any(|l| {
            (l.from_node == a && l.to_node == b) || (l.from_node == b && l.to_node == a)
        })
    };

    let candidates: HashSet<&str> = snapshot
        .nodes
        .values()
        .filter(|n| n.shadow_of.is_none() && n.injection == 0.0)
        .filter_map(|n| {
            let base = n.id.strip_suffix(SHADOW_SUFFIX)?;
            let base_record = snapshot.nodes.get(base)?;
            (base_record.shadow_of.is_none() && has_line(&n.id) && !joined(&n.id, base))
                .then_some(n.id.as_str())
        })
        .collect();

    candidates
        .iter()
        .filter(|id| !candidates.contains(strip_suffix(id)))
        .map(|id| id.to_string())
        .collect()
}

/// Parse a network from its JSON snapshot.
pub fn from_json_str(json: &str) -> NetworkResult<Network> {
    let snapshot: NetworkSnapshot = serde_json::from_str(json)?;
    Network::try_from(snapshot)
}

/// Render a network as a pretty-printed JSON snapshot.
pub fn to_json_string(network: &Network) -> NetworkResult<String> {
    Ok(serde_json::to_string_pretty(&NetworkSnapshot::from(network))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_BUS: &str = r#"{
        "nodes": {
            "0": {"id": "0", "x": 1.0, "y": 2.0, "injection": 5.0},
            "1": {"id": "1", "injection": -5.0}
        },
        "lines": {
            "L0-1": {"id": "L0-1", "from_node": "0", "to_node": "1", "flow": 0.0, "limit": 2.0}
        },
        "cost": null,
        "level": 4,
        "tutorial": false
    }"#;

    #[test]
    fn parse_basic_snapshot() {
        let net = from_json_str(TWO_BUS).unwrap();
        assert_eq!(net.nodes().len(), 2);
        assert_eq!(net.node("0").unwrap().x, 1.0);
        assert_eq!(net.node("1").unwrap().y, 0.0);
        assert_eq!(net.line("L0-1").unwrap().limit, 2.0);
        assert_eq!(net.level, Some(4));
        assert!(net.cost.is_none());
    }

    #[test]
    fn missing_limit_defaults() {
        let json = r#"{
            "nodes": {"a": {"id": "a"}, "b": {"id": "b"}},
            "lines": {"x": {"id": "x", "from_node": "a", "to_node": "b"}}
        }"#;
        let net = from_json_str(json).unwrap();
        assert_eq!(net.line("x").unwrap().limit, DEFAULT_LIMIT);
        assert!(!net.tutorial);
        assert_eq!(net.level, None);
    }

    #[test]
    fn infinite_cost_is_written_as_text() {
        let mut net = from_json_str(TWO_BUS).unwrap();
        net.cost = Some(Cost::Infeasible);
        let json = to_json_string(&net).unwrap();
        assert!(json.contains("\"cost\": \"Infinity\""));

        let back = from_json_str(&json).unwrap();
        assert_eq!(back.cost, Some(Cost::Infeasible));
    }

    #[test]
    fn finite_cost_survives() {
        let mut net = from_json_str(TWO_BUS).unwrap();
        net.cost = Some(Cost::Overload(3.0));
        let back = from_json_str(&to_json_string(&net).unwrap()).unwrap();
        assert_eq!(back.cost, Some(Cost::Overload(3.0)));
    }

    #[test]
    fn bad_cost_text_rejected() {
        let json = TWO_BUS.replace("\"cost\": null", "\"cost\": \"lots\"");
        assert!(matches!(
            from_json_str(&json),
            Err(NetworkError::Snapshot { .. })
        ));
    }

    #[test]
    fn key_mismatch_rejected() {
        let json = TWO_BUS.replace("\"1\": {\"id\": \"1\"", "\"1\": {\"id\": \"9\"");
        assert!(matches!(
            from_json_str(&json),
            Err(NetworkError::KeyMismatch { .. })
        ));
    }

    #[test]
    fn legacy_shadow_inferred() {
        let json = r#"{
            "nodes": {
                "0": {"id": "0", "injection": 5.0},
                "1": {"id": "1", "injection": -5.0},
                "1b": {"id": "1b", "injection": 0.0}
            },
            "lines": {
                "L0-1": {"id": "L0-1", "from_node": "0", "to_node": "1b"},
                "L1-0": {"id": "L1-0", "from_node": "1", "to_node": "0"}
            }
        }"#;
        let net = from_json_str(json).unwrap();
        assert_eq!(
            net.node("1b").unwrap().shadow_of,
            Some(NodeId::from("1"))
        );
        assert!(!net.node("1").unwrap().is_shadow());
    }

    #[test]
    fn bus_wired_to_its_base_is_not_a_shadow() {
        // "1b" is a plain bus: line x joins it straight to "1"
        let json = r#"{
            "nodes": {
                "0": {"id": "0", "injection": 5.0},
                "1": {"id": "1", "injection": -5.0},
                "1b": {"id": "1b", "injection": 0.0}
            },
            "lines": {
                "x": {"id": "x", "from_node": "1", "to_node": "1b"},
                "y": {"id": "y", "from_node": "1b", "to_node": "0"}
            }
        }"#;
        let net = from_json_str(json).unwrap();
        assert!(!net.node("1b").unwrap().is_shadow());
        assert!(net.shadow_nodes().next().is_none());
    }

    #[test]
    fn explicit_shadow_survives_round_trip() {
        let json = r#"{
            "nodes": {
                "a": {"id": "a", "injection": 1.0},
                "c": {"id": "c", "injection": -1.0},
                "ab": {"id": "ab", "shadow_of": "a"}
            },
            "lines": {
                "x": {"id": "x", "from_node": "ab", "to_node": "c"},
                "y": {"id": "y", "from_node": "a", "to_node": "c"}
            }
        }"#;
        let net = from_json_str(json).unwrap();
        let back = from_json_str(&to_json_string(&net).unwrap()).unwrap();
        assert_eq!(net, back);
        assert!(back.node("ab").unwrap().is_shadow());
    }
}
