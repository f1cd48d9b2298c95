//! Incremental network builder.

use gs_core::{LineId, NodeId, Real};

use crate::error::{NetworkError, NetworkResult};
use crate::network::{Line, Network, Node};
use crate::validate;

/// Builder for constructing a network incrementally.
///
/// Use `add_node` and `add_line` to build up the network,
/// then call `build()` to validate it.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    nodes: Vec<Node>,
    lines: Vec<Line>,
    level: Option<u32>,
    tutorial: bool,
}

impl NetworkBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node at the origin and return its ID.
    pub fn add_node(&mut self, id: impl Into<NodeId>, injection: Real) -> NodeId {
        self.push_node(Node::new(id, injection))
    }

    /// Add a node with a layout position.
    pub fn add_node_at(
        &mut self,
        id: impl Into<NodeId>,
        injection: Real,
        x: Real,
        y: Real,
    ) -> NodeId {
        self.push_node(Node::new(id, injection).at(x, y))
    }

    /// Add a fully specified node, including shadow twins.
    pub fn push_node(&mut self, node: Node) -> NodeId {
        let id = node.id.clone();
        self.nodes.push(node);
        id
    }

    /// Add a line between two nodes and return its ID.
    pub fn add_line(
        &mut self,
        id: impl Into<LineId>,
        from_node: impl Into<NodeId>,
        to_node: impl Into<NodeId>,
        limit: Real,
    ) -> LineId {
        let line = Line::new(id, from_node, to_node, limit);
        let id = line.id.clone();
        self.lines.push(line);
        id
    }

    pub fn level(&mut self, level: u32) -> &mut Self {
        self.level = Some(level);
        self
    }

    pub fn tutorial(&mut self, tutorial: bool) -> &mut Self {
        self.tutorial = tutorial;
        self
    }

    /// Build and validate the network.
    pub fn build(self) -> NetworkResult<Network> {
        let mut network = Network {
            level: self.level,
            tutorial: self.tutorial,
            ..Network::default()
        };

        for node in self.nodes {
            network.insert_node(node)?;
        }

        // Insert lines after every node exists so declaration order doesn't matter
        for line in self.lines {
            if network.lines.contains_key(&line.id) {
                return Err(NetworkError::DuplicateLine(line.id));
            }
            network.lines.insert(line.id.clone(), line);
        }

        validate::validate_network(&network)?;
        Ok(network)
    }
}
