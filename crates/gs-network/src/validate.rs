//! Network validation logic.

use gs_core::Real;

use crate::error::{NetworkError, NetworkResult};
use crate::network::{Line, Network, Node};

/// Validate the whole network: references exist, numbers are sane, shadow
/// twins are consistent.
pub fn validate_network(network: &Network) -> NetworkResult<()> {
    for node in network.nodes.values() {
        validate_node(node)?;
    }

    for line in network.lines.values() {
        validate_line(network, line)?;
    }

    for node in network.shadow_nodes() {
        validate_shadow(network, node)?;
    }

    Ok(())
}

fn finite(owner: &str, what: &'static str, value: Real) -> NetworkResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(NetworkError::NonFinite {
            owner: owner.to_string(),
            what,
            value,
        })
    }
}

pub(crate) fn validate_node(node: &Node) -> NetworkResult<()> {
    let owner = format!("node {}", node.id);
    finite(&owner, "injection", node.injection)?;
    finite(&owner, "x", node.x)?;
    finite(&owner, "y", node.y)?;
    Ok(())
}

pub(crate) fn validate_line(network: &Network, line: &Line) -> NetworkResult<()> {
    for node in [&line.from_node, &line.to_node] {
        if !network.nodes.contains_key(node) {
            return Err(NetworkError::MissingEndpoint {
                line: line.id.clone(),
                node: node.clone(),
            });
        }
    }

    let owner = format!("line {}", line.id);
    finite(&owner, "limit", line.limit)?;
    finite(&owner, "flow", line.flow)?;
    if line.limit < 0.0 {
        return Err(NetworkError::NegativeLimit {
            line: line.id.clone(),
            limit: line.limit,
        });
    }

    Ok(())
}

fn validate_shadow(network: &Network, node: &Node) -> NetworkResult<()> {
    let invalid = |reason| NetworkError::InvalidShadow {
        node: node.id.clone(),
        reason,
    };

    let Some(base_id) = node.shadow_of.as_ref() else {
        return Ok(());
    };
    let base = network
        .nodes
        .get(base_id)
        .ok_or_else(|| invalid("base node does not exist"))?;
    if base.is_shadow() {
        return Err(invalid("base node is itself a shadow"));
    }
    if node.injection != 0.0 {
        return Err(invalid("shadow nodes carry no injection"));
    }
    if network.degree(node.id.as_str()) == 0 {
        return Err(invalid("no line terminates on it"));
    }

    Ok(())
}
