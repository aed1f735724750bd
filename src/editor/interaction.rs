//! Node interaction handling (dragging, connection drags, drop targets, clicks)

use std::time::{Duration, Instant};

use egui::{Pos2, Vec2};
use log::debug;

use crate::nodes::{AttachmentSlot, Connection, NodeGraph, NodeId, NodeType, SocketId, SocketKind, SocketRef};

/// What the pointer is currently doing to the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    Idle,
    DraggingNode(NodeId),
    DraggingConnection(SocketRef),
}

/// Slot a dragged or dropped node would land in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropTarget {
    pub host: NodeId,
    pub slot: AttachmentSlot,
}

#[derive(Debug, Clone)]
struct NodeDrag {
    node: NodeId,
    offset: Vec2,
    start: Pos2,
    detached: bool,
}

#[derive(Debug, Clone)]
struct ConnectionDrag {
    source: SocketRef,
    pointer: Pos2,
    /// Connection lifted off the source socket, with its former list index
    pending_restore: Option<(usize, Connection)>,
    hover: Option<SocketRef>,
}

/// Manages pointer interactions with the graph
#[derive(Debug, Clone)]
pub struct InteractionManager {
    node_drag: Option<NodeDrag>,
    connection_drag: Option<ConnectionDrag>,
    drop_target: Option<DropTarget>,
    hovered_socket: Option<SocketRef>,
    hovered_start: Option<NodeId>,
    // Double-click tracking
    last_click_time: Option<Instant>,
    last_clicked_node: Option<NodeId>,
    double_click_threshold: Duration,
}

impl InteractionManager {
    /// Creates a new interaction manager
    pub fn new(double_click_threshold_ms: u64) -> Self {
        Self {
            node_drag: None,
            connection_drag: None,
            drop_target: None,
            hovered_socket: None,
            hovered_start: None,
            last_click_time: None,
            last_clicked_node: None,
            double_click_threshold: Duration::from_millis(double_click_threshold_ms),
        }
    }

    pub fn state(&self) -> InteractionState {
        if let Some(drag) = &self.node_drag {
            InteractionState::DraggingNode(drag.node)
        } else if let Some(drag) = &self.connection_drag {
            InteractionState::DraggingConnection(drag.source)
        } else {
            InteractionState::Idle
        }
    }

    /// Drop all transient state
    pub fn reset(&mut self) {
        self.node_drag = None;
        self.connection_drag = None;
        self.drop_target = None;
        self.hovered_socket = None;
        self.hovered_start = None;
        self.last_click_time = None;
        self.last_clicked_node = None;
    }

    /// Forget every reference to a node that is about to disappear
    pub(crate) fn forget_node(&mut self, id: NodeId) {
        if self.node_drag.as_ref().is_some_and(|drag| drag.node == id) {
            self.node_drag = None;
        }
        if self.connection_drag.as_ref().is_some_and(|drag| drag.source.node == id) {
            self.connection_drag = None;
        }
        if let Some(drag) = self.connection_drag.as_mut() {
            if drag.hover.is_some_and(|hover| hover.node == id) {
                drag.hover = None;
            }
            if drag.pending_restore.is_some_and(|(_, c)| c.touches(id)) {
                drag.pending_restore = None;
            }
        }
        if self.drop_target.is_some_and(|target| target.host == id) {
            self.drop_target = None;
        }
        if self.hovered_socket.is_some_and(|socket| socket.node == id) {
            self.hovered_socket = None;
        }
        if self.hovered_start == Some(id) {
            self.hovered_start = None;
        }
        if self.last_clicked_node == Some(id) {
            self.last_clicked_node = None;
            self.last_click_time = None;
        }
    }

    /// Check if a node was double-clicked and update tracking
    pub fn check_double_click(&mut self, node_id: NodeId, now: Instant) -> bool {
        let is_double_click = match (self.last_click_time, self.last_clicked_node) {
            (Some(last_time), Some(last_node)) => {
                last_node == node_id && now.saturating_duration_since(last_time) < self.double_click_threshold
            }
            _ => false,
        };

        self.last_click_time = Some(now);
        self.last_clicked_node = Some(node_id);

        is_double_click
    }
}

impl Default for InteractionManager {
    fn default() -> Self {
        Self::new(crate::constants::interaction::DOUBLE_CLICK_THRESHOLD_MS)
    }
}

impl NodeGraph {
    pub fn interaction_state(&self) -> InteractionState {
        self.interaction.state()
    }

    pub fn drop_target(&self) -> Option<DropTarget> {
        self.interaction.drop_target
    }

    pub fn clear_drop_target(&mut self) {
        self.interaction.drop_target = None;
    }

    pub fn hovered_socket(&self) -> Option<SocketRef> {
        self.interaction.hovered_socket
    }

    pub fn hovered_start_node(&self) -> Option<NodeId> {
        self.interaction.hovered_start
    }

    /// Source socket and pointer of the connection being dragged
    pub fn connection_drag_line(&self) -> Option<(SocketRef, Pos2)> {
        self.interaction
            .connection_drag
            .as_ref()
            .map(|drag| (drag.source, drag.pointer))
    }

    /// Socket the dragged connection would snap to on release
    pub fn connection_drag_target(&self) -> Option<SocketRef> {
        self.interaction.connection_drag.as_ref().and_then(|drag| drag.hover)
    }

    /// Find the frontmost node that would take a `candidate` dropped at `point`
    ///
    /// Nested hosts sit in front of the hosts containing them, so the
    /// innermost slot wins.
    fn find_drop_target(&self, candidate: NodeType, point: Pos2, exclude: &[NodeId]) -> Option<DropTarget> {
        self.z_order
            .iter()
            .rev()
            .filter(|id| !exclude.contains(id))
            .filter_map(|id| self.node(*id))
            .find_map(|host| {
                let slot = if candidate.is_sensor() {
                    (host.accepts_sensor() && host.is_point_inside_sensor_slot(point)).then_some(AttachmentSlot::Sensor)
                } else if candidate.is_parameter() {
                    host.parameter_slot_index_at(point)
                        .filter(|slot| host.accepts_parameter(candidate, *slot))
                        .map(AttachmentSlot::Parameter)
                } else {
                    (host.accepts_action(candidate) && host.is_point_inside_action_slot(point))
                        .then_some(AttachmentSlot::Action)
                }?;
                Some(DropTarget { host: host.id(), slot })
            })
    }

    // Node drag

    /// Begin dragging a node; the pointer keeps its offset to the node corner
    pub fn start_dragging(&mut self, node: NodeId, pointer: Pos2) -> bool {
        if self.interaction.state() != InteractionState::Idle {
            return false;
        }
        let Some(position) = self.node(node).map(|n| n.position()) else {
            return false;
        };
        self.commit_field_edits();
        self.interaction.drop_target = None;
        self.interaction.node_drag = Some(NodeDrag {
            node,
            offset: pointer - position,
            start: position,
            detached: false,
        });
        if let Some(n) = self.node_mut(node) {
            n.dragging = true;
        }
        true
    }

    /// Move the dragged node or the dragged connection end
    ///
    /// An attached node leaves its host the first time it actually moves.
    pub fn update_drag(&mut self, pointer: Pos2) {
        if let Some(drag) = self.interaction.node_drag.clone() {
            let target_position = pointer - drag.offset;
            if !drag.detached && target_position != drag.start {
                self.detach_from_parent(drag.node);
                if let Some(active) = self.interaction.node_drag.as_mut() {
                    active.detached = true;
                }
            }
            if self.interaction.node_drag.as_ref().is_some_and(|d| d.detached) {
                self.set_node_position(drag.node, target_position);
                let dragged = self.hierarchy(drag.node);
                let target = self
                    .node(drag.node)
                    .map(|n| n.node_type())
                    .and_then(|node_type| self.find_drop_target(node_type, pointer, &dragged));
                self.interaction.drop_target = target;
                if let Some(n) = self.node_mut(drag.node) {
                    n.sockets_hidden = target.is_some();
                }
            }
        }

        if let Some(source) = self.interaction.connection_drag.as_ref().map(|d| d.source) {
            let wanted = source.kind.opposite();
            let radius = self.socket_hit_radius;
            let hover = self
                .nodes()
                .filter(|n| n.id() != source.node && n.should_render_sockets())
                .find_map(|n| n.socket_at(pointer, wanted, radius).map(|socket| SocketRef::new(n.id(), socket, wanted)));
            if let Some(drag) = self.interaction.connection_drag.as_mut() {
                drag.pointer = pointer;
                drag.hover = hover;
            }
        }
    }

    /// Drop the dragged node, attaching it to the current drop target if any
    ///
    /// A refused attach leaves the node free where it was dropped. The
    /// resulting hierarchy is brought to the front. Returns whether the node
    /// was attached.
    pub fn stop_dragging(&mut self) -> bool {
        let Some(drag) = self.interaction.node_drag.take() else {
            return false;
        };
        let target = self.interaction.drop_target.take();
        if let Some(n) = self.node_mut(drag.node) {
            n.dragging = false;
        }
        if !self.contains(drag.node) {
            return false;
        }

        let (attached, promote) = match target {
            Some(target) => {
                let attached = self.attach(target.host, drag.node, target.slot);
                if !attached {
                    debug!("Drop of node {} into {:?} refused", drag.node, target.slot);
                }
                (attached, if attached { target.host } else { drag.node })
            }
            None => (false, drag.node),
        };
        if !attached {
            if let Some(n) = self.node_mut(drag.node) {
                n.sockets_hidden = false;
            }
        }
        if drag.detached {
            self.mark_dirty();
        }
        self.bring_to_front(promote);
        attached
    }

    // Palette drops

    /// Highlight the slot a palette item would land in
    pub fn preview_sidebar_drag(&mut self, node_type: NodeType, point: Pos2) -> Option<DropTarget> {
        self.interaction.drop_target = self.find_drop_target(node_type, point, &[]);
        self.interaction.drop_target
    }

    /// Create a node from the palette, nesting it when dropped onto a slot
    pub fn handle_sidebar_drop(&mut self, node_type: NodeType, point: Pos2) -> NodeId {
        self.interaction.drop_target = None;
        let target = self.find_drop_target(node_type, point, &[]);
        let id = self.create_node(node_type, point);
        if let Some(size) = self.node(id).map(|n| n.size()) {
            self.set_node_position(id, point - size / 2.0);
        }
        if let Some(target) = target {
            self.attach(target.host, id, target.slot);
        }
        id
    }

    /// Whether a node sits more than halfway over a sidebar of `sidebar_width`
    pub fn is_node_over_sidebar(&self, id: NodeId, sidebar_width: f32) -> bool {
        self.node(id)
            .is_some_and(|n| n.position().x + n.size().x / 2.0 < sidebar_width)
    }

    /// Nodes that would vanish if the dragged node were released over the sidebar
    pub fn sidebar_deletion_preview(&self, sidebar_width: f32) -> Vec<NodeId> {
        match self.interaction.node_drag.as_ref() {
            Some(drag) if self.is_node_over_sidebar(drag.node, sidebar_width) => {
                if self.should_cascade_delete(drag.node) {
                    self.cascade_deletion_preview(drag.node)
                } else {
                    vec![drag.node]
                }
            }
            _ => Vec::new(),
        }
    }

    /// Delete a node dropped back onto the sidebar
    pub fn delete_node_if_over_sidebar(&mut self, id: NodeId, sidebar_width: f32) -> bool {
        self.is_node_over_sidebar(id, sidebar_width) && self.delete_node(id)
    }

    // Connection drag

    /// Begin dragging a connection from a socket
    ///
    /// Any connection already on that socket is lifted off and held until the
    /// drag ends.
    pub fn start_dragging_connection(&mut self, node: NodeId, socket: SocketId, kind: SocketKind, pointer: Pos2) -> bool {
        if self.interaction.state() != InteractionState::Idle {
            return false;
        }
        let valid = self
            .node(node)
            .is_some_and(|n| n.should_render_sockets() && socket < n.socket_count(kind));
        if !valid {
            return false;
        }
        self.commit_field_edits();

        let source = SocketRef::new(node, socket, kind);
        let pending_restore = self
            .connections
            .iter()
            .position(|c| c.uses_socket(source))
            .map(|index| (index, self.connections.remove(index)));
        if let Some((_, lifted)) = pending_restore {
            debug!("Lifted connection {:?} for re-routing", lifted);
        }
        self.interaction.connection_drag = Some(ConnectionDrag {
            source,
            pointer,
            pending_restore,
            hover: None,
        });
        true
    }

    /// Finish a connection drag
    ///
    /// Creates output-to-input connection when hovering a complementary
    /// socket, otherwise puts the lifted connection back.
    pub fn stop_dragging_connection(&mut self) -> Option<Connection> {
        let drag = self.interaction.connection_drag.take()?;
        match drag.hover {
            Some(target) if target.kind == drag.source.kind.opposite() && self.contains(target.node) => {
                let connection = match drag.source.kind {
                    SocketKind::Output => Connection::new(drag.source.node, drag.source.socket, target.node, target.socket),
                    SocketKind::Input => Connection::new(target.node, target.socket, drag.source.node, drag.source.socket),
                };
                self.insert_connection_exclusive(connection);
                Some(connection)
            }
            _ => {
                self.restore_lifted(drag.pending_restore);
                None
            }
        }
    }

    /// Abandon a connection drag, restoring whatever was lifted
    pub fn cancel_connection_drag(&mut self) {
        if let Some(drag) = self.interaction.connection_drag.take() {
            self.restore_lifted(drag.pending_restore);
        }
    }

    fn restore_lifted(&mut self, pending: Option<(usize, Connection)>) {
        if let Some((index, connection)) = pending {
            let index = index.min(self.connections.len());
            self.connections.insert(index, connection);
            debug!("Restored connection {:?}", connection);
        }
    }

    // Hover and clicks

    /// Track the run button and the socket under the pointer
    pub fn update_hover(&mut self, point: Pos2) {
        self.interaction.hovered_start = self.start_node_at(point);
        self.interaction.hovered_socket = None;
        if self.interaction.connection_drag.is_some() {
            return;
        }
        let radius = self.socket_hit_radius;
        let hovered = self
            .nodes()
            .filter(|n| n.should_render_sockets())
            .find_map(|n| {
                n.socket_at(point, SocketKind::Input, radius)
                    .map(|socket| SocketRef::input(n.id(), socket))
                    .or_else(|| {
                        n.socket_at(point, SocketKind::Output, radius)
                            .map(|socket| SocketRef::output(n.id(), socket))
                    })
            });
        self.interaction.hovered_socket = hovered;
    }

    /// Record a click on a node; returns true on a double-click
    pub fn handle_node_click(&mut self, id: NodeId) -> bool {
        self.handle_node_click_at(id, Instant::now())
    }

    pub fn handle_node_click_at(&mut self, id: NodeId, now: Instant) -> bool {
        self.interaction.check_double_click(id, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> (NodeGraph, NodeId, NodeId, NodeId) {
        let mut graph = NodeGraph::new();
        let a = graph.create_node(NodeType::Mine, Pos2::new(0.0, 0.0));
        let b = graph.create_node(NodeType::Stop, Pos2::new(300.0, 0.0));
        let c = graph.create_node(NodeType::Wait, Pos2::new(300.0, 200.0));
        assert!(graph.connect(a, 0, b, 0));
        (graph, a, b, c)
    }

    fn socket_pos(graph: &NodeGraph, node: NodeId, socket: SocketId, kind: SocketKind) -> Pos2 {
        graph.node(node).unwrap().socket_position(socket, kind)
    }

    #[test]
    fn test_cancelled_connection_drag_restores_original() {
        let (mut graph, a, _, _) = chain();
        let before = graph.connections().to_vec();

        let pointer = socket_pos(&graph, a, 0, SocketKind::Output);
        assert!(graph.start_dragging_connection(a, 0, SocketKind::Output, pointer));
        assert!(graph.connections().is_empty());
        assert!(matches!(graph.interaction_state(), InteractionState::DraggingConnection(_)));

        graph.update_drag(Pos2::new(-500.0, -500.0));
        assert_eq!(graph.stop_dragging_connection(), None);
        assert_eq!(graph.connections(), before.as_slice());
        assert_eq!(graph.interaction_state(), InteractionState::Idle);
    }

    #[test]
    fn test_connection_drag_rewires_to_hovered_input() {
        let (mut graph, a, b, c) = chain();
        let pointer = socket_pos(&graph, a, 0, SocketKind::Output);
        assert!(graph.start_dragging_connection(a, 0, SocketKind::Output, pointer));

        graph.update_drag(socket_pos(&graph, c, 0, SocketKind::Input));
        assert_eq!(graph.connection_drag_target(), Some(SocketRef::input(c, 0)));

        let created = graph.stop_dragging_connection();
        assert_eq!(created, Some(Connection::new(a, 0, c, 0)));
        assert_eq!(graph.connections(), &[Connection::new(a, 0, c, 0)]);
        assert!(graph.incoming(b).is_empty());
    }

    #[test]
    fn test_drag_from_input_stores_output_first() {
        let (mut graph, a, b, c) = chain();
        let pointer = socket_pos(&graph, c, 0, SocketKind::Input);
        assert!(graph.start_dragging_connection(c, 0, SocketKind::Input, pointer));
        graph.update_drag(socket_pos(&graph, b, 0, SocketKind::Output));

        assert_eq!(graph.stop_dragging_connection(), Some(Connection::new(b, 0, c, 0)));
        assert!(graph.connections().contains(&Connection::new(a, 0, b, 0)));
        assert_eq!(graph.connections().len(), 2);
    }

    #[test]
    fn test_connection_drag_evicts_occupied_target() {
        let (mut graph, a, b, c) = chain();
        let pointer = socket_pos(&graph, c, 0, SocketKind::Output);
        assert!(graph.start_dragging_connection(c, 0, SocketKind::Output, pointer));
        graph.update_drag(socket_pos(&graph, b, 0, SocketKind::Input));

        assert_eq!(graph.stop_dragging_connection(), Some(Connection::new(c, 0, b, 0)));
        assert_eq!(graph.connections(), &[Connection::new(c, 0, b, 0)]);
        assert!(graph.outgoing(a).is_empty());
    }

    #[test]
    fn test_same_kind_hover_is_ignored() {
        let (mut graph, a, _, c) = chain();
        let pointer = socket_pos(&graph, a, 0, SocketKind::Output);
        assert!(graph.start_dragging_connection(a, 0, SocketKind::Output, pointer));
        graph.update_drag(socket_pos(&graph, c, 0, SocketKind::Output));
        assert_eq!(graph.connection_drag_target(), None);
        graph.cancel_connection_drag();
        assert_eq!(graph.connections().len(), 1);
    }

    #[test]
    fn test_node_drag_detaches_and_reattaches() {
        let mut graph = NodeGraph::new();
        let first = graph.create_node(NodeType::ControlIf, Pos2::new(0.0, 0.0));
        let second = graph.create_node(NodeType::ControlWaitUntil, Pos2::new(400.0, 0.0));
        let sensor = graph.create_node(NodeType::SensorIsDaytime, Pos2::new(0.0, 300.0));
        assert!(graph.attach_sensor(first, sensor));

        let grab = graph.node(sensor).unwrap().position() + Vec2::new(2.0, 2.0);
        assert!(graph.start_dragging(sensor, grab));
        assert!(graph.node(sensor).unwrap().is_dragging());

        graph.update_drag(grab);
        assert_eq!(graph.parent_of(sensor).map(|l| l.host), Some(first));

        let slot_center = graph.node(second).unwrap().sensor_slot_rect().unwrap().center();
        graph.update_drag(slot_center);
        assert!(graph.parent_of(sensor).is_none());
        assert_eq!(
            graph.drop_target(),
            Some(DropTarget {
                host: second,
                slot: AttachmentSlot::Sensor
            })
        );
        assert!(graph.node(sensor).unwrap().sockets_hidden());

        assert!(graph.stop_dragging());
        assert_eq!(graph.parent_of(sensor).map(|l| l.host), Some(second));
        assert!(!graph.node(sensor).unwrap().is_dragging());
        assert_eq!(graph.z_order().last(), Some(&sensor));
        assert_eq!(graph.drop_target(), None);
    }

    #[test]
    fn test_drop_without_target_leaves_node_free() {
        let mut graph = NodeGraph::new();
        let host = graph.create_node(NodeType::ControlRepeat, Pos2::new(0.0, 0.0));
        let mine = graph.create_node(NodeType::Mine, Pos2::new(0.0, 300.0));
        assert!(graph.attach_action(host, mine));

        let grab = graph.node(mine).unwrap().position();
        assert!(graph.start_dragging(mine, grab));
        graph.update_drag(Pos2::new(600.0, 600.0));
        assert!(!graph.stop_dragging());

        let node = graph.node(mine).unwrap();
        assert!(node.parent().is_none());
        assert_eq!(node.position(), Pos2::new(600.0, 600.0));
        assert!(node.should_render_sockets());
        assert!(graph.node(host).unwrap().attached_action().is_none());
    }

    #[test]
    fn test_cannot_drop_into_own_subtree() {
        let mut graph = NodeGraph::new();
        let outer = graph.create_node(NodeType::ControlForever, Pos2::new(0.0, 0.0));
        let inner = graph.create_node(NodeType::ControlRepeat, Pos2::new(0.0, 300.0));
        assert!(graph.attach_action(outer, inner));

        let grab = graph.node(outer).unwrap().position();
        assert!(graph.start_dragging(outer, grab));
        let inner_slot = graph.node(inner).unwrap().action_slot_rect().unwrap().center();
        graph.update_drag(inner_slot);
        assert!(graph.drop_target().is_none());
        assert!(!graph.stop_dragging());
        assert_eq!(graph.parent_of(inner).map(|l| l.host), Some(outer));
    }

    #[test]
    fn test_sidebar_drop_nests_into_slot() {
        let mut graph = NodeGraph::new();
        let mine = graph.create_node(NodeType::Mine, Pos2::new(100.0, 100.0));
        let slot_center = graph.node(mine).unwrap().parameter_slot_rect(0).unwrap().center();

        assert_eq!(
            graph.preview_sidebar_drag(NodeType::ParamBlock, slot_center),
            Some(DropTarget {
                host: mine,
                slot: AttachmentSlot::Parameter(0)
            })
        );
        assert_eq!(graph.preview_sidebar_drag(NodeType::ParamItem, slot_center), None);

        let block = graph.handle_sidebar_drop(NodeType::ParamBlock, slot_center);
        assert_eq!(graph.node(mine).unwrap().attached_parameter(0), Some(block));

        let free = graph.handle_sidebar_drop(NodeType::Stop, Pos2::new(800.0, 800.0));
        let node = graph.node(free).unwrap();
        assert!(node.parent().is_none());
        assert_eq!(node.rect().center(), Pos2::new(800.0, 800.0));
    }

    #[test]
    fn test_sidebar_deletion() {
        let mut graph = NodeGraph::new();
        let host = graph.create_node(NodeType::ControlRepeat, Pos2::new(-100.0, 0.0));
        let stop = graph.create_node(NodeType::Stop, Pos2::new(0.0, 300.0));
        assert!(graph.attach_action(host, stop));

        assert!(graph.start_dragging(host, Pos2::new(-90.0, 5.0)));
        assert_eq!(graph.sidebar_deletion_preview(50.0), vec![stop, host]);
        graph.stop_dragging();

        assert!(!graph.delete_node_if_over_sidebar(host, -200.0));
        assert!(graph.delete_node_if_over_sidebar(host, 50.0));
        assert!(graph.is_empty());
    }

    #[test]
    fn test_hover_and_double_click() {
        let (mut graph, a, b, _) = chain();
        let output = socket_pos(&graph, a, 0, SocketKind::Output);
        graph.update_hover(output);
        assert_eq!(graph.hovered_socket(), Some(SocketRef::output(a, 0)));
        graph.update_hover(Pos2::new(-1000.0, -1000.0));
        assert_eq!(graph.hovered_socket(), None);

        let now = Instant::now();
        assert!(!graph.handle_node_click_at(a, now));
        assert!(graph.handle_node_click_at(a, now + Duration::from_millis(100)));
        assert!(!graph.handle_node_click_at(b, now + Duration::from_millis(150)));
        assert!(!graph.handle_node_click_at(b, now + Duration::from_millis(600)));
    }

    #[test]
    fn test_busy_state_rejects_new_drags() {
        let (mut graph, a, b, _) = chain();
        assert!(graph.start_dragging(b, Pos2::new(300.0, 0.0)));
        assert!(!graph.start_dragging_connection(a, 0, SocketKind::Output, Pos2::ZERO));
        assert!(!graph.start_dragging(a, Pos2::ZERO));
        graph.stop_dragging();
        assert_eq!(graph.interaction_state(), InteractionState::Idle);
    }

    #[test]
    fn test_removing_dragged_node_resets_drag() {
        let (mut graph, a, _, _) = chain();
        assert!(graph.start_dragging(a, Pos2::ZERO));
        graph.remove_node(a);
        assert_eq!(graph.interaction_state(), InteractionState::Idle);
        assert!(!graph.stop_dragging());
    }
}
