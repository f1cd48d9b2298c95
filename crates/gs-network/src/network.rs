//! Core network data structures.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use gs_core::{LineId, NodeId, Real};

use crate::error::{NetworkError, NetworkResult};

/// Suffix appended to a base node id to form the id of its shadow twin.
pub const SHADOW_SUFFIX: &str = "b";

/// Id of the shadow twin of `base`.
pub fn shadow_id(base: &NodeId) -> NodeId {
    NodeId::new(format!("{}{}", base.as_str(), SHADOW_SUFFIX))
}

/// Default thermal limit for lines that don't specify one.
pub const DEFAULT_LIMIT: Real = 100.0;

/// A bus in the grid.
///
/// Positive injection is production, negative is consumption, zero is a
/// pure bus. Position is layout data only and never enters the physics.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub x: Real,
    pub y: Real,
    pub injection: Real,
    /// Set when this node is the open-switch twin of another node.
    pub shadow_of: Option<NodeId>,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, injection: Real) -> Self {
        Self {
            id: id.into(),
            x: 0.0,
            y: 0.0,
            injection,
            shadow_of: None,
        }
    }

    /// Same node placed at `(x, y)`.
    pub fn at(mut self, x: Real, y: Real) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Zero-injection twin of `base`, sharing its position.
    pub fn shadow_of(base: &Node) -> Self {
        Self {
            id: shadow_id(&base.id),
            x: base.x,
            y: base.y,
            injection: 0.0,
            shadow_of: Some(base.id.clone()),
        }
    }

    pub fn is_shadow(&self) -> bool {
        self.shadow_of.is_some()
    }

    /// The node a switch on this node belongs to: the base for a shadow, itself otherwise.
    pub fn base_id(&self) -> &NodeId {
        self.shadow_of.as_ref().unwrap_or(&self.id)
    }
}

/// One end of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LineEnd {
    From,
    To,
}

impl LineEnd {
    pub const ALL: [LineEnd; 2] = [LineEnd::From, LineEnd::To];

    pub fn as_str(self) -> &'static str {
        match self {
            LineEnd::From => "from",
            LineEnd::To => "to",
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            LineEnd::From => LineEnd::To,
            LineEnd::To => LineEnd::From,
        }
    }
}

impl fmt::Display for LineEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LineEnd {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "from" => Ok(LineEnd::From),
            "to" => Ok(LineEnd::To),
            other => Err(format!("expected \"from\" or \"to\", got {other:?}")),
        }
    }
}

/// A transmission line between two nodes.
///
/// `flow` is computed by the solver and is positive when power moves from
/// `from_node` to `to_node`.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub id: LineId,
    pub from_node: NodeId,
    pub to_node: NodeId,
    pub flow: Real,
    pub limit: Real,
}

impl Line {
    pub fn new(
        id: impl Into<LineId>,
        from_node: impl Into<NodeId>,
        to_node: impl Into<NodeId>,
        limit: Real,
    ) -> Self {
        Self {
            id: id.into(),
            from_node: from_node.into(),
            to_node: to_node.into(),
            flow: 0.0,
            limit,
        }
    }

    pub fn endpoint(&self, end: LineEnd) -> &NodeId {
        match end {
            LineEnd::From => &self.from_node,
            LineEnd::To => &self.to_node,
        }
    }

    /// Move one end of the line. The flow is stale afterwards and is reset.
    pub fn set_endpoint(&mut self, end: LineEnd, node: NodeId) {
        match end {
            LineEnd::From => self.from_node = node,
            LineEnd::To => self.to_node = node,
        }
        self.flow = 0.0;
    }

    pub fn terminates_at(&self, node: &str) -> bool {
        self.from_node.as_str() == node || self.to_node.as_str() == node
    }

    /// Display label encoding the current endpoints, e.g. `L3-7b`.
    pub fn endpoint_label(&self) -> String {
        format!("L{}-{}", self.from_node, self.to_node)
    }

    /// Flow in excess of the limit, zero when within it.
    pub fn overload(&self) -> Real {
        gs_core::overload(self.flow, self.limit)
    }

    /// `|flow| / limit`, or `None` for a zero limit.
    pub fn loading(&self) -> Option<Real> {
        (self.limit > 0.0).then(|| self.flow.abs() / self.limit)
    }
}

/// Aggregate overload cost of a solved network.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cost {
    /// Sum of line overloads; zero when every line is within its limit.
    Overload(Real),
    /// The reduced system was singular: the grid is split into islands.
    Infeasible,
}

impl Cost {
    /// Scalar form used on the wire; infeasible maps to `+inf`.
    pub fn value(self) -> Real {
        match self {
            Cost::Overload(c) => c,
            Cost::Infeasible => Real::INFINITY,
        }
    }

    pub fn from_value(value: Real) -> Self {
        if value.is_infinite() {
            Cost::Infeasible
        } else {
            Cost::Overload(value)
        }
    }

    pub fn is_infeasible(self) -> bool {
        matches!(self, Cost::Infeasible)
    }

    /// Feasible and below `eps`.
    pub fn is_zero(self, eps: Real) -> bool {
        match self {
            Cost::Overload(c) => gs_core::is_zero(c, eps),
            Cost::Infeasible => false,
        }
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cost::Overload(c) => write!(f, "{c:.3}"),
            Cost::Infeasible => f.write_str("infeasible"),
        }
    }
}

/// The grid: nodes and lines keyed by id, plus the last solve's cost.
///
/// Maps are ordered so that iteration, and therefore solver indexing, is
/// deterministic. `level` and `tutorial` belong to the caller and are
/// carried through untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Network {
    pub(crate) nodes: BTreeMap<NodeId, Node>,
    pub(crate) lines: BTreeMap<LineId, Line>,
    pub cost: Option<Cost>,
    pub level: Option<u32>,
    pub tutorial: bool,
}

impl Network {
    /// Create an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &BTreeMap<NodeId, Node> {
        &self.nodes
    }

    pub fn lines(&self) -> &BTreeMap<LineId, Line> {
        &self.lines
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn line(&self, id: &str) -> Option<&Line> {
        self.lines.get(id)
    }

    pub fn line_mut(&mut self, id: &str) -> Option<&mut Line> {
        self.lines.get_mut(id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.lines.is_empty()
    }

    /// Insert a node; fails if the id is taken.
    pub fn insert_node(&mut self, node: Node) -> NetworkResult<()> {
        if self.nodes.contains_key(&node.id) {
            return Err(NetworkError::DuplicateNode(node.id));
        }
        self.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    /// Remove a node that no line terminates on.
    pub fn remove_node(&mut self, id: &str) -> NetworkResult<Node> {
        let degree = self.degree(id);
        if degree > 0 {
            return Err(NetworkError::NodeInUse {
                node: NodeId::from(id),
                degree,
            });
        }
        self.nodes
            .remove(id)
            .ok_or_else(|| NetworkError::NodeNotFound(NodeId::from(id)))
    }

    /// Insert a line; both endpoints must already exist.
    pub fn insert_line(&mut self, line: Line) -> NetworkResult<()> {
        if self.lines.contains_key(&line.id) {
            return Err(NetworkError::DuplicateLine(line.id));
        }
        for node in [&line.from_node, &line.to_node] {
            if !self.nodes.contains_key(node) {
                return Err(NetworkError::MissingEndpoint {
                    line: line.id.clone(),
                    node: node.clone(),
                });
            }
        }
        self.lines.insert(line.id.clone(), line);
        Ok(())
    }

    /// Lines with at least one end on `node`.
    pub fn lines_at<'a>(&'a self, node: &'a str) -> impl Iterator<Item = &'a Line> + 'a {
        self.lines.values().filter(move |l| l.terminates_at(node))
    }

    /// Number of line ends on `node` (a self-loop counts twice).
    pub fn degree(&self, node: &str) -> usize {
        self.lines
            .values()
            .map(|l| {
                usize::from(l.from_node.as_str() == node) + usize::from(l.to_node.as_str() == node)
            })
            .sum()
    }

    pub fn shadow_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values().filter(|n| n.is_shadow())
    }

    /// Sum of all injections; near zero for a balanced grid.
    pub fn total_injection(&self) -> Real {
        self.nodes.values().map(|n| n.injection).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> Network {
        let mut net = Network::new();
        net.insert_node(Node::new("A", 5.0)).unwrap();
        net.insert_node(Node::new("B", -5.0)).unwrap();
        net.insert_line(Line::new("AB", "A", "B", 2.0)).unwrap();
        net
    }

    #[test]
    fn line_end_parse_and_display() {
        assert_eq!("from".parse::<LineEnd>().unwrap(), LineEnd::From);
        assert_eq!("to".parse::<LineEnd>().unwrap(), LineEnd::To);
        assert!("To".parse::<LineEnd>().is_err());
        assert_eq!(LineEnd::From.opposite().to_string(), "to");
    }

    #[test]
    fn shadow_node_copies_position() {
        let base = Node::new("7", 12.0).at(3.0, 4.0);
        let twin = Node::shadow_of(&base);
        assert_eq!(twin.id.as_str(), "7b");
        assert_eq!((twin.x, twin.y), (3.0, 4.0));
        assert_eq!(twin.injection, 0.0);
        assert_eq!(twin.base_id(), &base.id);
        assert_eq!(base.base_id(), &base.id);
    }

    #[test]
    fn insert_line_requires_endpoints() {
        let mut net = pair();
        let err = net.insert_line(Line::new("AC", "A", "C", 1.0)).unwrap_err();
        assert!(matches!(err, NetworkError::MissingEndpoint { .. }));
    }

    #[test]
    fn remove_node_in_use_fails() {
        let mut net = pair();
        assert!(matches!(
            net.remove_node("A"),
            Err(NetworkError::NodeInUse { degree: 1, .. })
        ));
        net.insert_node(Node::new("C", 0.0)).unwrap();
        assert!(net.remove_node("C").is_ok());
        assert!(!net.contains_node("C"));
    }

    #[test]
    fn set_endpoint_resets_flow() {
        let mut line = Line::new("L", "A", "B", 1.0);
        line.flow = 4.0;
        line.set_endpoint(LineEnd::To, NodeId::from("Bb"));
        assert_eq!(line.to_node.as_str(), "Bb");
        assert_eq!(line.flow, 0.0);
        assert_eq!(line.endpoint_label(), "LA-Bb");
    }

    #[test]
    fn cost_value_round_trip() {
        assert_eq!(Cost::from_value(f64::INFINITY), Cost::Infeasible);
        assert_eq!(Cost::Infeasible.value(), f64::INFINITY);
        assert!(Cost::Overload(1e-12).is_zero(1e-9));
        assert!(!Cost::Infeasible.is_zero(1e-9));
    }

    #[test]
    fn degree_and_balance() {
        let net = pair();
        assert_eq!(net.degree("A"), 1);
        assert_eq!(net.lines_at("B").count(), 1);
        assert_eq!(net.total_injection(), 0.0);
    }
}
