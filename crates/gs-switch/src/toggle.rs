//! Opening and closing a single switch.
//!
//! A switch is closed while its line end sits on a regular node. Opening it
//! moves that end onto the node's shadow twin, creating the twin on first
//! use. Closing moves the end back to the base and drops the twin once no
//! line is left on it. The shadow carries no injection, so a line whose only
//! remaining contact is a shadow carries no power.

use std::fmt;

use gs_core::NodeId;
use gs_network::{Network, NetworkError, Node, shadow_id};
use tracing::debug;

use crate::error::{SwitchError, SwitchResult};
use crate::switch_ref::SwitchRef;

/// What a toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Opened,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchState {
    Open,
    Closed,
}

impl fmt::Display for SwitchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwitchState::Open => f.write_str("open"),
            SwitchState::Closed => f.write_str("closed"),
        }
    }
}

/// Flip the switch at one end of a line, mutating `network` in place.
///
/// The line keeps its id; only the endpoint moves. The moved line's flow is
/// reset and the network cost is cleared until the next solve. Toggling
/// twice restores the original node and line sets.
pub fn toggle_switch(network: &mut Network, switch: &SwitchRef) -> SwitchResult<Toggle> {
    let node_id = endpoint_of(network, switch)?;
    let node = network
        .node(node_id.as_str())
        .ok_or_else(|| NetworkError::MissingEndpoint {
            line: switch.line.clone(),
            node: node_id.clone(),
        })?;

    let toggle = match node.shadow_of.clone() {
        Some(base) => {
            close(network, switch, &node_id, base)?;
            Toggle::Closed
        }
        None => {
            open(network, switch, &node_id)?;
            Toggle::Opened
        }
    };
    network.cost = None;

    debug!(switch = %switch, ?toggle, "switch toggled");
    Ok(toggle)
}

/// Whether the switch at `switch` is currently open.
pub fn switch_state(network: &Network, switch: &SwitchRef) -> SwitchResult<SwitchState> {
    let node_id = endpoint_of(network, switch)?;
    let node = network
        .node(node_id.as_str())
        .ok_or_else(|| NetworkError::MissingEndpoint {
            line: switch.line.clone(),
            node: node_id.clone(),
        })?;
    Ok(if node.is_shadow() {
        SwitchState::Open
    } else {
        SwitchState::Closed
    })
}

fn endpoint_of(network: &Network, switch: &SwitchRef) -> SwitchResult<NodeId> {
    network
        .line(switch.line.as_str())
        .map(|l| l.endpoint(switch.end).clone())
        .ok_or_else(|| SwitchError::LineNotFound(switch.line.clone()))
}

fn open(network: &mut Network, switch: &SwitchRef, base_id: &NodeId) -> SwitchResult<()> {
    let twin_id = shadow_id(base_id);
    match network.node(twin_id.as_str()) {
        Some(existing) if existing.shadow_of.as_ref() == Some(base_id) => {}
        Some(_) => return Err(SwitchError::ShadowIdCollision { node: twin_id }),
        None => {
            let base = network
                .node(base_id.as_str())
                .ok_or_else(|| SwitchError::NodeNotFound(base_id.clone()))?;
            let twin = Node::shadow_of(base);
            network.insert_node(twin)?;
            debug!(node = %twin_id, base = %base_id, "shadow node created");
        }
    }

    retarget(network, switch, twin_id)
}

fn close(
    network: &mut Network,
    switch: &SwitchRef,
    twin_id: &NodeId,
    base_id: NodeId,
) -> SwitchResult<()> {
    if !network.contains_node(base_id.as_str()) {
        return Err(SwitchError::NodeNotFound(base_id));
    }
    retarget(network, switch, base_id)?;

    if network.degree(twin_id.as_str()) == 0 {
        network.remove_node(twin_id.as_str())?;
        debug!(node = %twin_id, "shadow node removed");
    }
    Ok(())
}

fn retarget(network: &mut Network, switch: &SwitchRef, node: NodeId) -> SwitchResult<()> {
    let line = network
        .line_mut(switch.line.as_str())
        .ok_or_else(|| SwitchError::LineNotFound(switch.line.clone()))?;
    line.set_endpoint(switch.end, node);
    Ok(())
}
