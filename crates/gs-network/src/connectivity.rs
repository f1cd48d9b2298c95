//! Island detection.
//!
//! A network whose nodes don't all belong to one connected component has a
//! singular reduced Laplacian, whatever the injections are.

use std::collections::HashMap;

use gs_core::NodeId;
use petgraph::unionfind::UnionFind;

use crate::error::NetworkResult;
use crate::indexing::IndexMap;
use crate::network::Network;

/// Connected components of the network, each sorted by node id, ordered by
/// their smallest id.
pub fn islands(network: &Network) -> NetworkResult<Vec<Vec<NodeId>>> {
    let index = IndexMap::from_network(network);
    let mut sets = UnionFind::<usize>::new(index.node_count());
    for (i, j) in index.line_endpoints(network)? {
        sets.union(i, j);
    }

    let mut slot_of_root: HashMap<usize, usize> = HashMap::new();
    let mut islands: Vec<Vec<NodeId>> = Vec::new();
    for (i, id) in index.node_ids().iter().enumerate() {
        let root = sets.find(i);
        let slot = *slot_of_root.entry(root).or_insert_with(|| {
            islands.push(Vec::new());
            islands.len() - 1
        });
        islands[slot].push(id.clone());
    }

    Ok(islands)
}

/// Number of connected components (zero for an empty network).
pub fn island_count(network: &Network) -> NetworkResult<usize> {
    Ok(islands(network)?.len())
}

/// True when every node can reach every other node. An empty network is
/// trivially connected.
pub fn is_connected(network: &Network) -> NetworkResult<bool> {
    Ok(island_count(network)? <= 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::NetworkBuilder;

    #[test]
    fn single_island() {
        let mut b = NetworkBuilder::new();
        b.add_node("A", 1.0);
        b.add_node("B", 0.0);
        b.add_node("C", -1.0);
        b.add_line("AB", "A", "B", 1.0);
        b.add_line("BC", "B", "C", 1.0);
        let net = b.build().unwrap();

        assert!(is_connected(&net).unwrap());
        assert_eq!(islands(&net).unwrap().len(), 1);
    }

    #[test]
    fn two_islands_sorted() {
        let mut b = NetworkBuilder::new();
        for id in ["A", "B", "C", "D"] {
            b.add_node(id, 0.0);
        }
        b.add_line("AD", "A", "D", 1.0);
        b.add_line("BC", "B", "C", 1.0);
        let net = b.build().unwrap();

        let found = islands(&net).unwrap();
        assert_eq!(
            found,
            vec![
                vec![NodeId::from("A"), NodeId::from("D")],
                vec![NodeId::from("B"), NodeId::from("C")],
            ]
        );
        assert!(!is_connected(&net).unwrap());
    }

    #[test]
    fn isolated_node_is_its_own_island() {
        let mut b = NetworkBuilder::new();
        b.add_node("A", 0.0);
        b.add_node("B", 0.0);
        b.add_node("C", 0.0);
        b.add_line("AB", "A", "B", 1.0);
        let net = b.build().unwrap();
        assert_eq!(island_count(&net).unwrap(), 2);
    }

    #[test]
    fn empty_network_has_no_islands() {
        assert_eq!(island_count(&Network::new()).unwrap(), 0);
        assert!(is_connected(&Network::new()).unwrap());
    }
}
