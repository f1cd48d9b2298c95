//! Stable indexing for solver integration.
//!
//! Provides bidirectional mappings between domain IDs (NodeId, LineId)
//! and contiguous solver indices (0..N).

use std::collections::HashMap;

use gs_core::{LineId, NodeId};

use crate::error::{NetworkError, NetworkResult};
use crate::network::Network;

/// Index map providing stable, contiguous indices for network objects.
///
/// Nodes are numbered in id order, except that an explicitly chosen
/// reference node is moved to index 0. Lines are numbered in id order.
#[derive(Debug, Clone)]
pub struct IndexMap {
    /// Contiguous list of node IDs (index -> NodeId).
    node_ids: Vec<NodeId>,

    /// Contiguous list of line IDs (index -> LineId).
    line_ids: Vec<LineId>,

    node_to_idx: HashMap<NodeId, usize>,
    line_to_idx: HashMap<LineId, usize>,
}

impl IndexMap {
    /// Build an index map from a network; the first node in id order is index 0.
    pub fn from_network(network: &Network) -> Self {
        let node_ids = network.nodes.keys().cloned().collect();
        Self::from_ids(node_ids, network)
    }

    /// Build an index map with `reference` placed at index 0.
    pub fn with_reference(network: &Network, reference: &NodeId) -> NetworkResult<Self> {
        if !network.contains_node(reference.as_str()) {
            return Err(NetworkError::NodeNotFound(reference.clone()));
        }
        let node_ids = std::iter::once(reference.clone())
            .chain(network.nodes.keys().filter(|id| *id != reference).cloned())
            .collect();
        Ok(Self::from_ids(node_ids, network))
    }

    fn from_ids(node_ids: Vec<NodeId>, network: &Network) -> Self {
        let line_ids: Vec<LineId> = network.lines.keys().cloned().collect();

        let node_to_idx = node_ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();
        let line_to_idx = line_ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();

        Self {
            node_ids,
            line_ids,
            node_to_idx,
            line_to_idx,
        }
    }

    /// Number of nodes in the index.
    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    /// Number of lines in the index.
    pub fn line_count(&self) -> usize {
        self.line_ids.len()
    }

    /// Get the contiguous index for a node ID.
    pub fn node_idx(&self, id: &NodeId) -> NetworkResult<usize> {
        self.node_to_idx
            .get(id)
            .copied()
            .ok_or_else(|| NetworkError::NodeNotFound(id.clone()))
    }

    /// Get the contiguous index for a line ID.
    pub fn line_idx(&self, id: &LineId) -> NetworkResult<usize> {
        self.line_to_idx
            .get(id)
            .copied()
            .ok_or_else(|| NetworkError::LineNotFound(id.clone()))
    }

    /// Get the node ID for a contiguous index (panics if out of bounds).
    pub fn node_id(&self, i: usize) -> &NodeId {
        &self.node_ids[i]
    }

    /// Get the line ID for a contiguous index (panics if out of bounds).
    pub fn line_id(&self, i: usize) -> &LineId {
        &self.line_ids[i]
    }

    /// The reference node, if the network has any nodes.
    pub fn reference(&self) -> Option<&NodeId> {
        self.node_ids.first()
    }

    /// All node IDs in index order.
    pub fn node_ids(&self) -> &[NodeId] {
        &self.node_ids
    }

    /// All line IDs in index order.
    pub fn line_ids(&self) -> &[LineId] {
        &self.line_ids
    }

    /// `(from_idx, to_idx)` for every line, in line index order.
    pub fn line_endpoints(&self, network: &Network) -> NetworkResult<Vec<(usize, usize)>> {
        self.line_ids
            .iter()
            .map(|id| {
                let line = network
                    .line(id.as_str())
                    .ok_or_else(|| NetworkError::LineNotFound(id.clone()))?;
                let endpoint = |node: &NodeId| {
                    self.node_idx(node)
                        .map_err(|_| NetworkError::MissingEndpoint {
                            line: line.id.clone(),
                            node: node.clone(),
                        })
                };
                Ok((endpoint(&line.from_node)?, endpoint(&line.to_node)?))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::NetworkBuilder;

    fn chain() -> Network {
        let mut builder = NetworkBuilder::new();
        builder.add_node("n1", 1.0);
        builder.add_node("n2", 0.0);
        builder.add_node("n3", -1.0);
        builder.add_line("c1", "n1", "n2", 10.0);
        builder.add_line("c2", "n2", "n3", 10.0);
        builder.build().unwrap()
    }

    #[test]
    fn index_map_basic() {
        let net = chain();
        let idx_map = IndexMap::from_network(&net);

        assert_eq!(idx_map.node_count(), 3);
        assert_eq!(idx_map.line_count(), 2);

        let n2 = NodeId::from("n2");
        let i2 = idx_map.node_idx(&n2).unwrap();
        assert_eq!(idx_map.node_id(i2), &n2);

        let c1 = LineId::from("c1");
        let ic = idx_map.line_idx(&c1).unwrap();
        assert_eq!(idx_map.line_id(ic), &c1);
    }

    #[test]
    fn index_map_invalid_id() {
        let idx_map = IndexMap::from_network(&chain());
        assert!(idx_map.node_idx(&NodeId::from("nope")).is_err());
        assert!(idx_map.line_idx(&LineId::from("nope")).is_err());
    }

    #[test]
    fn index_map_reference_first() {
        let net = chain();
        let idx_map = IndexMap::with_reference(&net, &NodeId::from("n3")).unwrap();
        assert_eq!(idx_map.reference().unwrap().as_str(), "n3");
        assert_eq!(idx_map.node_id(1).as_str(), "n1");
        assert_eq!(idx_map.node_id(2).as_str(), "n2");

        assert!(IndexMap::with_reference(&net, &NodeId::from("zz")).is_err());
    }

    #[test]
    fn line_endpoints_follow_index() {
        let net = chain();
        let idx_map = IndexMap::from_network(&net);
        assert_eq!(idx_map.line_endpoints(&net).unwrap(), vec![(0, 1), (1, 2)]);
    }
}
