//! Node graph data structures and operations

use std::collections::{HashMap, HashSet};

use egui::{Pos2, Rect, Vec2};
use log::{debug, info, warn};

use super::factory::{NodeCategory, NodeType};
use super::hooks::{ExecutionController, GraphObserver};
use super::node::{AttachmentSlot, Node, NodeId};
use super::port::{SocketId, SocketKind, SocketRef};
use crate::config::EditorConfig;
use crate::constants::{interaction, layout, sockets};
use crate::editor::field_edit::FieldEditState;
use crate::editor::interaction::InteractionManager;

/// Directed execution-order edge from an output socket to an input socket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Connection {
    pub from_node: NodeId,
    pub from_socket: SocketId,
    pub to_node: NodeId,
    pub to_socket: SocketId,
}

impl Connection {
    /// Creates a new connection
    pub fn new(from_node: NodeId, from_socket: SocketId, to_node: NodeId, to_socket: SocketId) -> Self {
        Self {
            from_node,
            from_socket,
            to_node,
            to_socket,
        }
    }

    pub fn output(&self) -> SocketRef {
        SocketRef::output(self.from_node, self.from_socket)
    }

    pub fn input(&self) -> SocketRef {
        SocketRef::input(self.to_node, self.to_socket)
    }

    pub fn touches(&self, node: NodeId) -> bool {
        self.from_node == node || self.to_node == node
    }

    /// Whether this connection starts or ends at `socket`
    pub fn uses_socket(&self, socket: SocketRef) -> bool {
        match socket.kind {
            SocketKind::Output => self.from_node == socket.node && self.from_socket == socket.socket,
            SocketKind::Input => self.to_node == socket.node && self.to_socket == socket.socket,
        }
    }
}

/// Owned copy of the graph handed to an execution engine
#[derive(Debug, Clone, Default)]
pub struct GraphSnapshot {
    /// Nodes in render order
    pub nodes: Vec<Node>,
    pub connections: Vec<Connection>,
}

impl GraphSnapshot {
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id() == id)
    }

    /// Connections leaving `id`, in insertion order
    pub fn outgoing(&self, id: NodeId) -> impl Iterator<Item = &Connection> + '_ {
        self.connections.iter().filter(move |c| c.from_node == id)
    }
}

/// A graph containing nodes, their attachment hierarchy and their connections
pub struct NodeGraph {
    pub(crate) nodes: HashMap<NodeId, Node>,
    pub(crate) z_order: Vec<NodeId>,
    pub(crate) connections: Vec<Connection>,
    next_node_id: NodeId,
    selected: Option<NodeId>,
    observers: Vec<Box<dyn GraphObserver>>,
    dirty: bool,
    active_preset: String,
    pub(crate) socket_hit_radius: f32,
    pub(crate) interaction: InteractionManager,
    pub(crate) field_edit: FieldEditState,
}

impl NodeGraph {
    /// Creates a new empty node graph
    pub fn new() -> Self {
        Self::with_config(&EditorConfig::default())
    }

    /// Creates an empty graph tuned by the editor configuration
    pub fn with_config(config: &EditorConfig) -> Self {
        Self {
            nodes: HashMap::new(),
            z_order: Vec::new(),
            connections: Vec::new(),
            next_node_id: 0,
            selected: None,
            observers: Vec::new(),
            dirty: false,
            active_preset: config.active_preset.clone(),
            socket_hit_radius: config.socket_hit_radius,
            interaction: InteractionManager::new(config.double_click_threshold_ms),
            field_edit: FieldEditState::new(config.caret_blink_interval_ms),
        }
    }

    /// Starter workspace: a START node wired into a GOTO node around `center`
    pub fn with_default_layout(center: Pos2) -> Self {
        let mut graph = Self::new();
        let start = graph.create_node(NodeType::Start, center + Vec2::new(-100.0, -50.0));
        let goto = graph.create_node(NodeType::Goto, center + Vec2::new(0.0, -50.0));
        graph.connect(start, 0, goto, 0);
        graph.dirty = false;
        graph
    }

    /// Adds a node to the graph and returns its ID
    pub fn add_node(&mut self, mut node: Node) -> NodeId {
        let id = self.next_node_id;
        node.id = id;
        self.nodes.insert(id, node);
        self.z_order.push(id);
        self.next_node_id += 1;
        self.dirty = true;
        id
    }

    /// Creates a node of `node_type` at `position` and adds it
    pub fn create_node(&mut self, node_type: NodeType, position: Pos2) -> NodeId {
        let id = self.add_node(Node::new(node_type, position));
        debug!("Created {:?} node {}", node_type, id);
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in render order, back to front
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.z_order.iter().filter_map(|id| self.nodes.get(id))
    }

    pub fn z_order(&self) -> &[NodeId] {
        &self.z_order
    }

    pub fn find_by_uuid(&self, uuid: &str) -> Option<NodeId> {
        self.nodes().find(|node| node.uuid() == uuid).map(Node::id)
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn incoming(&self, id: NodeId) -> Vec<Connection> {
        self.connections.iter().filter(|c| c.to_node == id).copied().collect()
    }

    pub fn outgoing(&self, id: NodeId) -> Vec<Connection> {
        self.connections.iter().filter(|c| c.from_node == id).copied().collect()
    }

    pub fn connection_at_socket(&self, socket: SocketRef) -> Option<Connection> {
        self.connections.iter().find(|c| c.uses_socket(socket)).copied()
    }

    // Connections

    /// Connect an output socket to an input socket
    ///
    /// Both nodes must be free-floating and expose the sockets. Any connection
    /// already using either socket is evicted.
    pub fn connect(&mut self, from: NodeId, from_socket: SocketId, to: NodeId, to_socket: SocketId) -> bool {
        if from == to {
            return false;
        }
        let valid = match (self.nodes.get(&from), self.nodes.get(&to)) {
            (Some(source), Some(target)) => {
                source.should_render_sockets()
                    && target.should_render_sockets()
                    && from_socket < source.socket_count(SocketKind::Output)
                    && to_socket < target.socket_count(SocketKind::Input)
            }
            _ => false,
        };
        if !valid {
            return false;
        }
        self.insert_connection_exclusive(Connection::new(from, from_socket, to, to_socket));
        true
    }

    /// Push a connection after evicting whatever occupies its two sockets
    pub(crate) fn insert_connection_exclusive(&mut self, connection: Connection) {
        let output = connection.output();
        let input = connection.input();
        self.connections
            .retain(|c| !c.uses_socket(output) && !c.uses_socket(input));
        self.connections.push(connection);
        self.dirty = true;
        debug!(
            "Connected {}:{} -> {}:{}",
            connection.from_node, connection.from_socket, connection.to_node, connection.to_socket
        );
    }

    /// Removes a specific connection
    pub fn remove_connection(&mut self, connection: &Connection) -> bool {
        let before = self.connections.len();
        self.connections.retain(|c| c != connection);
        let removed = self.connections.len() != before;
        if removed {
            self.dirty = true;
        }
        removed
    }

    /// Removes the connection ending at an input socket
    pub fn disconnect_input(&mut self, node: NodeId, socket: SocketId) -> Option<Connection> {
        self.take_connection_at(SocketRef::input(node, socket))
    }

    /// Removes the connection starting at an output socket
    pub fn disconnect_output(&mut self, node: NodeId, socket: SocketId) -> Option<Connection> {
        self.take_connection_at(SocketRef::output(node, socket))
    }

    pub(crate) fn take_connection_at(&mut self, socket: SocketRef) -> Option<Connection> {
        let index = self.connections.iter().position(|c| c.uses_socket(socket))?;
        self.dirty = true;
        Some(self.connections.remove(index))
    }

    pub(crate) fn sever_connections(&mut self, ids: &[NodeId]) {
        let before = self.connections.len();
        self.connections
            .retain(|c| !ids.contains(&c.from_node) && !ids.contains(&c.to_node));
        if self.connections.len() != before {
            debug!("Severed {} connection(s) of nested nodes", before - self.connections.len());
        }
    }

    /// Connection whose line passes near `point`
    pub fn connection_at(&self, point: Pos2) -> Option<Connection> {
        self.connections.iter().copied().find(|c| {
            let (Some(source), Some(target)) = (self.nodes.get(&c.from_node), self.nodes.get(&c.to_node)) else {
                return false;
            };
            let start = source.socket_position(c.from_socket, SocketKind::Output);
            let end = target.socket_position(c.to_socket, SocketKind::Input);
            let mid_y = (start.y + end.y) / 2.0;
            (point.y - mid_y).abs() < sockets::CONNECTION_HIT_TOLERANCE
                && point.x >= start.x.min(end.x)
                && point.x <= start.x.max(end.x)
        })
    }

    // Removal

    /// Whether deleting `id` takes its attached subtree with it
    pub fn should_cascade_delete(&self, id: NodeId) -> bool {
        self.nodes
            .get(&id)
            .is_some_and(|node| node.category() == NodeCategory::Logic || node.has_attached_children())
    }

    /// Nodes a cascade delete of `id` would remove, children before parents
    pub fn cascade_deletion_preview(&self, id: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut visited = HashSet::new();
        self.collect_for_cascade(id, &mut order, &mut visited);
        order
    }

    fn collect_for_cascade(&self, id: NodeId, order: &mut Vec<NodeId>, visited: &mut HashSet<NodeId>) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        if !visited.insert(id) {
            return;
        }
        if let Some(sensor) = node.attached_sensor() {
            self.collect_for_cascade(sensor, order, visited);
        }
        if let Some(action) = node.attached_action() {
            self.collect_for_cascade(action, order, visited);
        }
        for (_, parameter) in node.attached_parameters() {
            self.collect_for_cascade(parameter, order, visited);
        }
        order.push(id);
    }

    /// Delete a node the way the editor does: cascade or splice
    pub fn delete_node(&mut self, id: NodeId) -> bool {
        if !self.contains(id) {
            return false;
        }
        if self.should_cascade_delete(id) {
            !self.remove_node_cascade(id).is_empty()
        } else {
            self.remove_node(id).is_some()
        }
    }

    /// Removes a node, splicing its incoming connections onto its outgoing ones
    ///
    /// Attached children are released and placed beside the removed node.
    pub fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        self.remove_node_internal(id, true, true)
    }

    /// Removes a node together with its attached subtree
    ///
    /// Only the topmost node's connections are spliced.
    pub fn remove_node_cascade(&mut self, id: NodeId) -> Vec<Node> {
        let order = self.cascade_deletion_preview(id);
        let mut removed = Vec::with_capacity(order.len());
        for member in order {
            if let Some(node) = self.remove_node_internal(member, member == id, false) {
                removed.push(node);
            }
        }
        info!("Cascade removed {} node(s)", removed.len());
        removed
    }

    fn remove_node_internal(&mut self, id: NodeId, auto_reconnect: bool, reposition_children: bool) -> Option<Node> {
        let node = self.nodes.get(&id)?;
        let beside = node.position() + Vec2::new(node.size().x + layout::DETACH_OFFSET, 0.0);
        let mut slots = Vec::new();
        if node.attached_sensor().is_some() {
            slots.push(AttachmentSlot::Sensor);
        }
        if node.attached_action().is_some() {
            slots.push(AttachmentSlot::Action);
        }
        slots.extend(node.attached_parameters().map(|(slot, _)| AttachmentSlot::Parameter(slot)));

        self.cancel_field_edits_for(id);

        for slot in slots {
            if let Some(child) = self.detach_slot(id, slot) {
                if reposition_children {
                    self.set_node_position(child, beside);
                }
            }
        }
        self.detach_from_parent(id);
        self.interaction.forget_node(id);

        if auto_reconnect {
            let incoming = self.incoming(id);
            let outgoing = self.outgoing(id);
            for inbound in &incoming {
                for outbound in &outgoing {
                    if inbound.from_node == outbound.to_node {
                        continue;
                    }
                    self.connections.push(Connection::new(
                        inbound.from_node,
                        inbound.from_socket,
                        outbound.to_node,
                        outbound.to_socket,
                    ));
                }
            }
        }

        self.connections.retain(|c| !c.touches(id));
        self.z_order.retain(|member| *member != id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        let node = self.nodes.remove(&id)?;
        for observer in self.observers.iter_mut() {
            observer.on_node_removed(&node);
        }
        self.dirty = true;
        debug!("Removed {:?} node {}", node.node_type(), id);
        Some(node)
    }

    /// Remove everything and reset all interaction state
    pub fn clear(&mut self) {
        self.field_edit = FieldEditState::new(self.field_edit.blink_interval_ms());
        self.interaction.reset();
        self.nodes.clear();
        self.z_order.clear();
        self.connections.clear();
        self.selected = None;
        self.dirty = true;
    }

    // Picking and ordering

    /// Topmost node under `point`
    ///
    /// Sensors win over everything (or the parameter attached inside them),
    /// then parameter nodes, then all other nodes, front to back.
    pub fn node_at(&self, point: Pos2) -> Option<NodeId> {
        for node in self.nodes() {
            if node.is_sensor() && node.contains_point(point) {
                let hit_parameter = node
                    .attached_parameters()
                    .find(|(_, child)| self.nodes.get(child).is_some_and(|c| c.contains_point(point)));
                return Some(hit_parameter.map_or(node.id(), |(_, child)| child));
            }
        }
        let front_to_back: Vec<&Node> = self.z_order.iter().rev().filter_map(|id| self.nodes.get(id)).collect();
        if let Some(node) = front_to_back.iter().find(|n| n.is_parameter() && n.contains_point(point)) {
            return Some(node.id());
        }
        front_to_back
            .iter()
            .find(|n| !n.is_sensor() && !n.is_parameter() && n.contains_point(point))
            .map(|n| n.id())
    }

    pub fn select_node(&mut self, id: Option<NodeId>) {
        if let Some(previous) = self.selected.take().and_then(|prev| self.nodes.get_mut(&prev)) {
            previous.selected = false;
        }
        if let Some(node) = id.and_then(|id| self.nodes.get_mut(&id)) {
            node.selected = true;
            self.selected = Some(node.id());
        }
    }

    pub fn selected_node(&self) -> Option<NodeId> {
        self.selected
    }

    /// Move the whole hierarchy containing `id` to the front, in hierarchy order
    pub fn bring_to_front(&mut self, id: NodeId) {
        if !self.contains(id) {
            return;
        }
        let root = self.root_of(id);
        let members = self.hierarchy(root);
        self.z_order.retain(|member| !members.contains(member));
        self.z_order.extend(members);
    }

    // Execution

    /// Distinct, trimmed names of all function entry nodes in render order
    pub fn function_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for node in self.nodes().filter(|n| n.node_type() == NodeType::EventFunction) {
            let Some(name) = node.parameter_value("Name").map(str::trim) else {
                continue;
            };
            if !name.is_empty() && !names.iter().any(|existing| existing == name) {
                names.push(name.to_string());
            }
        }
        names
    }

    /// Bounds of the run button drawn on a START node
    pub fn start_button_rect(node: &Node) -> Rect {
        Rect::from_center_size(
            node.rect().center() + Vec2::new(1.0, 0.0),
            Vec2::splat(interaction::START_BUTTON_SIZE),
        )
    }

    /// START node whose run button is under `point`
    pub fn start_node_at(&self, point: Pos2) -> Option<NodeId> {
        self.nodes()
            .find(|n| n.node_type() == NodeType::Start && Self::start_button_rect(n).contains(point))
            .map(Node::id)
    }

    /// Run or stop the chain rooted at a START node
    ///
    /// Open field edits are committed first. Returns whether the controller
    /// accepted the request.
    pub fn toggle_execution(&mut self, start: NodeId, controller: &mut dyn ExecutionController) -> bool {
        if self.nodes.get(&start).map(Node::node_type) != Some(NodeType::Start) {
            return false;
        }
        self.commit_field_edits();
        if controller.is_chain_active(start) {
            info!("Stopping chain started at node {}", start);
            return controller.request_stop_for_start(start);
        }
        let started = controller.execute_branch(start, &self.snapshot());
        if started {
            info!("Started chain at node {}", start);
        } else {
            warn!("Execution controller refused to start node {}", start);
        }
        started
    }

    pub fn halt_execution(&mut self, controller: &mut dyn ExecutionController) {
        controller.request_stop_all();
    }

    /// Owned copy of the nodes (in render order) and connections
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.nodes().cloned().collect(),
            connections: self.connections.clone(),
        }
    }

    // Observers and workspace state

    pub fn add_observer(&mut self, observer: Box<dyn GraphObserver>) {
        self.observers.push(observer);
    }

    /// Mark the workspace dirty and tell observers a node's parameters changed
    pub fn notify_parameters_changed(&mut self, id: NodeId) {
        self.dirty = true;
        if let Some(node) = self.nodes.get(&id) {
            for observer in self.observers.iter_mut() {
                observer.on_parameters_changed(node);
            }
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn active_preset(&self) -> &str {
        &self.active_preset
    }

    pub fn set_active_preset(&mut self, name: impl Into<String>) {
        self.active_preset = name.into();
    }

    /// Swap in the contents of another graph, keeping observers and settings
    pub(crate) fn replace_contents(&mut self, other: NodeGraph) {
        self.nodes = other.nodes;
        self.z_order = other.z_order;
        self.connections = other.connections;
        self.next_node_id = other.next_node_id;
        self.selected = None;
        self.interaction.reset();
        self.field_edit = FieldEditState::new(self.field_edit.blink_interval_ms());
    }
}

impl Default for NodeGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NodeGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeGraph")
            .field("nodes", &self.nodes.len())
            .field("connections", &self.connections)
            .field("active_preset", &self.active_preset)
            .field("dirty", &self.dirty)
            .finish()
    }
}
