//! Attachment hierarchy: nesting sensors, actions and parameters inside hosts
//!
//! Children live in the graph arena like every other node. A host records the
//! occupant of each slot and the child records a [`ParentLink`] back to the
//! host. Both sides are always updated together, and every attach walks the
//! host's ancestors so the relation stays a forest.

use std::collections::HashSet;

use egui::{Pos2, Vec2};
use log::debug;

use super::factory::NodeMode;
use super::graph::NodeGraph;
use super::node::{AttachmentSlot, ChildSizes, NodeId, ParentLink};
use crate::constants::layout;

impl NodeGraph {
    pub fn parent_of(&self, id: NodeId) -> Option<ParentLink> {
        self.nodes.get(&id).and_then(|node| node.parent())
    }

    /// Topmost node of the hierarchy containing `id`
    pub fn root_of(&self, id: NodeId) -> NodeId {
        let mut current = id;
        let mut seen = HashSet::new();
        while let Some(link) = self.parent_of(current) {
            if !seen.insert(current) {
                break;
            }
            current = link.host;
        }
        current
    }

    /// Whether `ancestor` is `node` or sits above it in the attachment forest
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = node;
        let mut seen = HashSet::new();
        loop {
            if current == ancestor {
                return true;
            }
            if !seen.insert(current) {
                return false;
            }
            match self.parent_of(current) {
                Some(link) => current = link.host,
                None => return false,
            }
        }
    }

    /// Depth-first members of the hierarchy under `root`
    ///
    /// Order is the node, then its action child, its sensor child and its
    /// parameter children by ascending slot.
    pub fn hierarchy(&self, root: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut visited = HashSet::new();
        self.collect_hierarchy(root, &mut result, &mut visited);
        result
    }

    fn collect_hierarchy(&self, id: NodeId, result: &mut Vec<NodeId>, visited: &mut HashSet<NodeId>) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        if !visited.insert(id) {
            return;
        }
        result.push(id);
        if let Some(action) = node.attached_action() {
            self.collect_hierarchy(action, result, visited);
        }
        if let Some(sensor) = node.attached_sensor() {
            self.collect_hierarchy(sensor, result, visited);
        }
        for (_, parameter) in node.attached_parameters() {
            self.collect_hierarchy(parameter, result, visited);
        }
    }

    // Attaching

    pub fn attach_sensor(&mut self, host: NodeId, child: NodeId) -> bool {
        self.attach(host, child, AttachmentSlot::Sensor)
    }

    pub fn attach_action(&mut self, host: NodeId, child: NodeId) -> bool {
        self.attach(host, child, AttachmentSlot::Action)
    }

    pub fn attach_parameter(&mut self, host: NodeId, child: NodeId, slot: usize) -> bool {
        self.attach(host, child, AttachmentSlot::Parameter(slot))
    }

    /// Attach a parameter to the first empty slot that accepts it, or else
    /// the first accepting slot
    pub fn attach_parameter_default(&mut self, host: NodeId, child: NodeId) -> bool {
        let (Some(host_node), Some(child_node)) = (self.nodes.get(&host), self.nodes.get(&child)) else {
            return false;
        };
        let child_type = child_node.node_type();
        let accepting: Vec<usize> = (0..host_node.parameter_slot_count())
            .filter(|slot| host_node.accepts_parameter(child_type, *slot))
            .collect();
        let slot = accepting
            .iter()
            .copied()
            .find(|slot| host_node.attached_parameter(*slot).is_none())
            .or_else(|| accepting.first().copied());
        match slot {
            Some(slot) => self.attach_parameter(host, child, slot),
            None => false,
        }
    }

    /// Nest `child` inside `slot` of `host`
    ///
    /// Fails without changing anything when either node is missing, the host
    /// does not accept the child there, or the child is an ancestor of the host.
    pub fn attach(&mut self, host: NodeId, child: NodeId, slot: AttachmentSlot) -> bool {
        if host == child {
            return false;
        }
        let (Some(host_node), Some(child_node)) = (self.nodes.get(&host), self.nodes.get(&child)) else {
            return false;
        };
        if !host_node.accepts_child(child_node.node_type(), slot) {
            return false;
        }
        if self.is_ancestor(child, host) {
            debug!("Refused to attach node {} under its descendant {}", child, host);
            return false;
        }
        if host_node.child_in(slot) == Some(child) {
            return true;
        }

        self.detach_from_parent(child);

        let beside = self
            .nodes
            .get(&host)
            .map(|node| node.position() + Vec2::new(node.size().x + layout::DETACH_OFFSET, 0.0));
        if let (Some(previous), Some(beside)) = (self.detach_slot(host, slot), beside) {
            self.set_node_position(previous, beside);
        }

        if let Some(host_node) = self.nodes.get_mut(&host) {
            host_node.set_child(slot, Some(child));
        }
        if let Some(child_node) = self.nodes.get_mut(&child) {
            child_node.parent = Some(ParentLink { host, slot });
            child_node.sockets_hidden = false;
        }

        let nested = self.hierarchy(child);
        self.sever_connections(&nested);

        let root = self.root_of(host);
        self.refresh_layout(root);
        self.mark_dirty();
        debug!("Attached node {} to {:?} of node {}", child, slot, host);
        true
    }

    // Detaching

    pub fn detach_sensor(&mut self, host: NodeId) -> Option<NodeId> {
        self.detach_slot(host, AttachmentSlot::Sensor)
    }

    pub fn detach_action(&mut self, host: NodeId) -> Option<NodeId> {
        self.detach_slot(host, AttachmentSlot::Action)
    }

    pub fn detach_parameter(&mut self, host: NodeId, slot: usize) -> Option<NodeId> {
        self.detach_slot(host, AttachmentSlot::Parameter(slot))
    }

    /// Release `child` from its host, if it has one
    pub fn detach_from_parent(&mut self, child: NodeId) -> bool {
        match self.parent_of(child) {
            Some(link) => self.detach_slot(link.host, link.slot).is_some(),
            None => false,
        }
    }

    /// Empty `slot` of `host`, returning the released child
    pub(crate) fn detach_slot(&mut self, host: NodeId, slot: AttachmentSlot) -> Option<NodeId> {
        let child = self.nodes.get(&host)?.child_in(slot)?;
        if let Some(host_node) = self.nodes.get_mut(&host) {
            host_node.set_child(slot, None);
        }
        if let Some(child_node) = self.nodes.get_mut(&child) {
            child_node.parent = None;
        }
        let root = self.root_of(host);
        self.refresh_layout(root);
        self.refresh_layout(child);
        self.mark_dirty();
        debug!("Detached node {} from {:?} of node {}", child, slot, host);
        Some(child)
    }

    // Layout propagation

    /// Recompute sizes bottom-up and child positions top-down for a hierarchy
    ///
    /// Every member is recalculated exactly once.
    pub fn refresh_layout(&mut self, root: NodeId) {
        let mut visited = HashSet::new();
        self.layout_sizes(root, &mut visited);
        self.position_children(root);
    }

    fn layout_sizes(&mut self, id: NodeId, visited: &mut HashSet<NodeId>) -> Option<Vec2> {
        if !visited.insert(id) {
            return None;
        }
        let node = self.nodes.get(&id)?;
        let sensor = node.attached_sensor();
        let action = node.attached_action();
        let parameters: Vec<(usize, NodeId)> = node.attached_parameters().collect();

        let mut children = ChildSizes {
            sensor: sensor.and_then(|c| self.layout_sizes(c, visited)),
            action: action.and_then(|c| self.layout_sizes(c, visited)),
            ..Default::default()
        };
        for (slot, parameter) in parameters {
            if let Some(size) = self.layout_sizes(parameter, visited) {
                children.parameters.insert(slot, size);
            }
        }

        let node = self.nodes.get_mut(&id)?;
        node.recalculate_dimensions(&children);
        Some(node.size())
    }

    fn position_children(&mut self, id: NodeId) {
        for member in self.hierarchy(id) {
            let Some(node) = self.nodes.get(&member) else {
                continue;
            };
            let placements: Vec<(NodeId, Pos2)> = [AttachmentSlot::Sensor, AttachmentSlot::Action]
                .into_iter()
                .chain(node.attached_parameters().map(|(slot, _)| AttachmentSlot::Parameter(slot)))
                .filter_map(|slot| Some((node.child_in(slot)?, node.slot_content_origin(slot)?)))
                .collect();
            for (child, origin) in placements {
                if let Some(child_node) = self.nodes.get_mut(&child) {
                    child_node.set_position(origin);
                }
            }
        }
    }

    /// Move a node, carrying its attached children along
    pub fn set_node_position(&mut self, id: NodeId, position: Pos2) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.set_position(position);
            self.position_children(id);
        }
    }

    /// Set a parameter value and re-lay out the hierarchy containing the node
    ///
    /// Returns false if the node or parameter does not exist.
    pub fn set_parameter_value_and_propagate(&mut self, id: NodeId, name: &str, value: impl Into<String>) -> bool {
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };
        if !node.set_parameter_value(name, value) {
            return false;
        }
        if node.parameter_affects_layout(name) {
            let root = self.root_of(id);
            self.refresh_layout(root);
        }
        true
    }

    /// Switch a node's mode and re-lay out its hierarchy
    pub fn set_node_mode(&mut self, id: NodeId, mode: NodeMode) -> bool {
        let Some(node) = self.nodes.get(&id) else {
            return false;
        };
        if node.mode() == Some(mode) {
            return true;
        }
        if !node.node_type().supports_mode(mode) {
            return false;
        }
        self.cancel_field_edits_for(id);
        if !self.nodes.get_mut(&id).is_some_and(|node| node.set_mode(mode)) {
            return false;
        }
        let root = self.root_of(id);
        self.refresh_layout(root);
        self.notify_parameters_changed(id);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::NodeType;

    /// Every node is free or referenced by exactly the slot its link names
    fn assert_exclusive(graph: &NodeGraph) {
        for node in graph.nodes() {
            match node.parent() {
                Some(link) => {
                    let host = graph.node(link.host).expect("host exists");
                    assert_eq!(host.child_in(link.slot), Some(node.id()));
                }
                None => {
                    for host in graph.nodes() {
                        assert!(host.attached_sensor() != Some(node.id()));
                        assert!(host.attached_action() != Some(node.id()));
                        assert!(host.attached_parameters().all(|(_, c)| c != node.id()));
                    }
                }
            }
        }
    }

    #[test]
    fn test_attach_sets_both_sides() {
        let mut graph = NodeGraph::new();
        let host = graph.create_node(NodeType::ControlIf, Pos2::ZERO);
        let sensor = graph.create_node(NodeType::SensorIsDaytime, Pos2::new(300.0, 0.0));

        assert!(graph.attach_sensor(host, sensor));
        assert_eq!(graph.node(host).unwrap().attached_sensor(), Some(sensor));
        assert_eq!(
            graph.parent_of(sensor),
            Some(ParentLink {
                host,
                slot: AttachmentSlot::Sensor
            })
        );
        let origin = graph.node(host).unwrap().slot_content_origin(AttachmentSlot::Sensor);
        assert_eq!(Some(graph.node(sensor).unwrap().position()), origin);
        assert_exclusive(&graph);
    }

    #[test]
    fn test_attach_rejects_wrong_kinds() {
        let mut graph = NodeGraph::new();
        let host = graph.create_node(NodeType::ControlIf, Pos2::ZERO);
        let mine = graph.create_node(NodeType::Mine, Pos2::ZERO);
        let block = graph.create_node(NodeType::ParamBlock, Pos2::ZERO);
        let item = graph.create_node(NodeType::ParamItem, Pos2::ZERO);

        assert!(!graph.attach_sensor(host, mine));
        assert!(!graph.attach_action(host, mine));
        assert!(!graph.attach_parameter(mine, item, 0));
        assert!(!graph.attach_parameter(mine, block, 1));
        assert!(!graph.attach_sensor(host, host));
        assert!(graph.attach_parameter(mine, block, 0));
        assert!(graph.node(item).unwrap().parent().is_none());
    }

    #[test]
    fn test_reattach_moves_child_and_evicts_occupant() {
        let mut graph = NodeGraph::new();
        let first = graph.create_node(NodeType::ControlIf, Pos2::ZERO);
        let second = graph.create_node(NodeType::ControlWaitUntil, Pos2::new(400.0, 0.0));
        let rain = graph.create_node(NodeType::SensorIsRaining, Pos2::ZERO);
        let day = graph.create_node(NodeType::SensorIsDaytime, Pos2::ZERO);

        assert!(graph.attach_sensor(first, rain));
        assert!(graph.attach_sensor(second, rain));
        assert_eq!(graph.node(first).unwrap().attached_sensor(), None);
        assert_eq!(graph.parent_of(rain).map(|l| l.host), Some(second));

        assert!(graph.attach_sensor(second, day));
        assert!(graph.parent_of(rain).is_none());
        let second_rect = graph.node(second).unwrap().rect();
        assert_eq!(
            graph.node(rain).unwrap().position(),
            Pos2::new(second_rect.right() + layout::DETACH_OFFSET, second_rect.top())
        );

        assert!(graph.attach_sensor(second, day));
        assert_exclusive(&graph);
    }

    #[test]
    fn test_cycle_guard_at_depth() {
        let mut graph = NodeGraph::new();
        let outer = graph.create_node(NodeType::ControlForever, Pos2::ZERO);
        let middle = graph.create_node(NodeType::ControlRepeat, Pos2::ZERO);
        let inner = graph.create_node(NodeType::ControlRepeatUntil, Pos2::ZERO);

        assert!(graph.attach_action(outer, middle));
        assert!(graph.attach_action(middle, inner));
        assert!(!graph.attach_action(inner, outer));
        assert!(!graph.attach_action(inner, middle));
        assert!(graph.is_ancestor(outer, inner));
        assert_eq!(graph.root_of(inner), outer);
        assert!(graph.parent_of(outer).is_none());
        assert_exclusive(&graph);
    }

    #[test]
    fn test_hierarchy_order() {
        let mut graph = NodeGraph::new();
        let host = graph.create_node(NodeType::ControlRepeatUntil, Pos2::ZERO);
        let sensor = graph.create_node(NodeType::SensorAtCoordinates, Pos2::ZERO);
        let coordinate = graph.create_node(NodeType::ParamCoordinate, Pos2::ZERO);
        let place = graph.create_node(NodeType::Place, Pos2::ZERO);
        let block = graph.create_node(NodeType::ParamBlock, Pos2::ZERO);
        let position = graph.create_node(NodeType::ParamCoordinate, Pos2::ZERO);

        assert!(graph.attach_sensor(host, sensor));
        assert!(graph.attach_parameter(sensor, coordinate, 0));
        assert!(graph.attach_action(host, place));
        assert!(graph.attach_parameter(place, position, 1));
        assert!(graph.attach_parameter(place, block, 0));

        assert_eq!(
            graph.hierarchy(host),
            vec![host, place, block, position, sensor, coordinate]
        );
    }

    #[test]
    fn test_attach_parameter_default_prefers_empty_slot() {
        let mut graph = NodeGraph::new();
        let place = graph.create_node(NodeType::Place, Pos2::ZERO);
        let first = graph.create_node(NodeType::ParamCoordinate, Pos2::ZERO);
        let second = graph.create_node(NodeType::ParamCoordinate, Pos2::ZERO);
        let entity = graph.create_node(NodeType::ParamEntity, Pos2::ZERO);

        assert!(graph.attach_parameter_default(place, first));
        assert_eq!(graph.node(place).unwrap().attached_parameter(1), Some(first));
        assert!(graph.attach_parameter_default(place, second));
        assert_eq!(graph.node(place).unwrap().attached_parameter(1), Some(second));
        assert!(graph.parent_of(first).is_none());
        assert!(!graph.attach_parameter_default(place, entity));
    }

    #[test]
    fn test_detach_is_idempotent() {
        let mut graph = NodeGraph::new();
        let host = graph.create_node(NodeType::ControlRepeat, Pos2::ZERO);
        let action = graph.create_node(NodeType::Stop, Pos2::ZERO);
        assert!(graph.attach_action(host, action));

        assert_eq!(graph.detach_action(host), Some(action));
        assert_eq!(graph.detach_action(host), None);
        assert!(!graph.detach_from_parent(action));
        assert!(graph.node(action).unwrap().parent().is_none());
    }

    #[test]
    fn test_attaching_severs_nested_connections() {
        let mut graph = NodeGraph::new();
        let host = graph.create_node(NodeType::ControlRepeat, Pos2::ZERO);
        let mine = graph.create_node(NodeType::Mine, Pos2::new(300.0, 0.0));
        let stop = graph.create_node(NodeType::Stop, Pos2::new(600.0, 0.0));
        assert!(graph.connect(mine, 0, stop, 0));

        assert!(graph.attach_action(host, mine));
        assert!(graph.connections().is_empty());
        assert!(!graph.node(mine).unwrap().should_render_sockets());
    }

    #[test]
    fn test_host_grows_with_nested_children() {
        let mut graph = NodeGraph::new();
        let outer = graph.create_node(NodeType::ControlRepeat, Pos2::ZERO);
        let inner = graph.create_node(NodeType::ControlRepeatUntil, Pos2::ZERO);
        let empty_height = graph.node(outer).unwrap().size().y;

        assert!(graph.attach_action(outer, inner));
        let with_inner = graph.node(outer).unwrap().size().y;
        assert!(with_inner > empty_height);

        let sensor = graph.create_node(NodeType::SensorHasItem, Pos2::ZERO);
        assert!(graph.attach_sensor(inner, sensor));
        assert!(graph.node(outer).unwrap().size().y > with_inner);

        let inner_rect = graph.node(inner).unwrap().rect();
        assert!(graph.node(outer).unwrap().rect().contains_rect(inner_rect));
    }

    #[test]
    fn test_propagation_recalculates_each_member_once() {
        let mut graph = NodeGraph::new();
        let host = graph.create_node(NodeType::Goto, Pos2::ZERO);
        let coordinate = graph.create_node(NodeType::ParamCoordinate, Pos2::ZERO);
        assert!(graph.attach_parameter(host, coordinate, 0));

        let before_host = graph.node(host).unwrap().layout_revision();
        let before_child = graph.node(coordinate).unwrap().layout_revision();
        assert!(graph.set_parameter_value_and_propagate(coordinate, "X", "1234567890"));
        assert_eq!(graph.node(host).unwrap().layout_revision(), before_host + 1);
        assert_eq!(graph.node(coordinate).unwrap().layout_revision(), before_child + 1);
        assert!(!graph.set_parameter_value_and_propagate(coordinate, "W", "1"));
    }

    #[test]
    fn test_set_node_mode() {
        let mut graph = NodeGraph::new();
        let goto = graph.create_node(NodeType::Goto, Pos2::ZERO);
        assert!(graph.set_parameter_value_and_propagate(goto, "Y", "70"));
        assert!(graph.set_node_mode(goto, NodeMode::GotoY));
        let node = graph.node(goto).unwrap();
        assert_eq!(node.parameters().len(), 1);
        assert_eq!(node.parameter_value("Y"), Some("70"));
        assert!(!graph.set_node_mode(goto, NodeMode::CoordinateAbsolute));
    }
}
