//! Bulk switch queries and resets.

use gs_core::NodeId;
use gs_network::{LineEnd, Network};
use tracing::debug;

use crate::error::{SwitchError, SwitchResult};
use crate::switch_ref::SwitchRef;
use crate::toggle::toggle_switch;

/// Every open switch, in line id order.
pub fn open_switches(network: &Network) -> Vec<SwitchRef> {
    network
        .lines()
        .values()
        .flat_map(|line| {
            LineEnd::ALL.into_iter().filter_map(move |end| {
                let on_shadow = network
                    .node(line.endpoint(end).as_str())
                    .is_some_and(|n| n.is_shadow());
                on_shadow.then(|| SwitchRef::new(line.id.clone(), end))
            })
        })
        .collect()
}

/// Close every open switch belonging to `node`.
///
/// `node` may name the base node or its shadow. Returns the switches that
/// were closed; an empty list if none were open.
pub fn reset_switches(network: &mut Network, node: &NodeId) -> SwitchResult<Vec<SwitchRef>> {
    let base = network
        .node(node.as_str())
        .map(|n| n.base_id().clone())
        .ok_or_else(|| SwitchError::NodeNotFound(node.clone()))?;

    let to_close: Vec<SwitchRef> = open_switches(network)
        .into_iter()
        .filter(|s| {
            network
                .line(s.line.as_str())
                .and_then(|l| network.node(l.endpoint(s.end).as_str()))
                .is_some_and(|n| n.shadow_of.as_ref() == Some(&base))
        })
        .collect();

    for switch in &to_close {
        toggle_switch(network, switch)?;
    }

    debug!(node = %base, closed = to_close.len(), "switches reset");
    Ok(to_close)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gs_network::NetworkBuilder;

    fn star() -> Network {
        let mut b = NetworkBuilder::new();
        b.add_node("hub", 3.0);
        b.add_node("a", -1.0);
        b.add_node("b", -1.0);
        b.add_node("c", -1.0);
        b.add_line("La", "hub", "a", 10.0);
        b.add_line("Lb", "hub", "b", 10.0);
        b.add_line("Lc", "c", "hub", 10.0);
        b.build().unwrap()
    }

    #[test]
    fn open_switches_lists_shadow_ends() {
        let mut net = star();
        assert!(open_switches(&net).is_empty());

        toggle_switch(&mut net, &SwitchRef::new("Lc", LineEnd::To)).unwrap();
        toggle_switch(&mut net, &SwitchRef::new("La", LineEnd::To)).unwrap();

        assert_eq!(
            open_switches(&net),
            vec![
                SwitchRef::new("La", LineEnd::To),
                SwitchRef::new("Lc", LineEnd::To),
            ]
        );
    }

    #[test]
    fn reset_by_base_or_shadow() {
        for target in ["hub", "hubb"] {
            let mut net = star();
            toggle_switch(&mut net, &SwitchRef::new("La", LineEnd::From)).unwrap();
            toggle_switch(&mut net, &SwitchRef::new("Lc", LineEnd::To)).unwrap();
            toggle_switch(&mut net, &SwitchRef::new("Lb", LineEnd::To)).unwrap();

            let closed = reset_switches(&mut net, &NodeId::from(target)).unwrap();
            assert_eq!(closed.len(), 2, "reset via {target}");
            assert!(net.node("hubb").is_none());
            assert_eq!(net.degree("hub"), 3);
            // Unrelated switch stays open
            assert_eq!(open_switches(&net), vec![SwitchRef::new("Lb", LineEnd::To)]);
        }
    }

    #[test]
    fn reset_without_open_switches_is_noop() {
        let mut net = star();
        let before = net.clone();
        let closed = reset_switches(&mut net, &NodeId::from("a")).unwrap();
        assert!(closed.is_empty());
        assert_eq!(net, before);
    }

    #[test]
    fn reset_unknown_node_is_error() {
        let mut net = star();
        assert_eq!(
            reset_switches(&mut net, &NodeId::from("zz")),
            Err(SwitchError::NodeNotFound("zz".into()))
        );
    }
}
