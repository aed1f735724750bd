//! Node types and core node functionality

use std::collections::BTreeMap;

use egui::{Color32, Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::defaults::default_parameters;
use super::factory::{NodeCategory, NodeMetadata, NodeMode, NodeType};
use super::port::{is_within_socket, socket_center, SocketId, SocketKind};
use crate::constants::layout::*;

/// Arena handle for a node, local to one graph
pub type NodeId = usize;

/// Value type tag of a node parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParameterType {
    Text,
    Integer,
    Double,
    Boolean,
    Block,
    Item,
    Entity,
}

/// A named, string-encoded parameter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeParameter {
    name: String,
    parameter_type: ParameterType,
    value: String,
}

impl NodeParameter {
    pub fn new(name: impl Into<String>, parameter_type: ParameterType, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameter_type,
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameter_type(&self) -> ParameterType {
        self.parameter_type
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Row text shown on parameter nodes
    pub fn label(&self) -> String {
        format!("{}: {}", self.name, self.value)
    }
}

/// Which slot of its host a child occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachmentSlot {
    Sensor,
    Action,
    Parameter(usize),
}

/// Non-owning back-reference from a child to its host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentLink {
    pub host: NodeId,
    pub slot: AttachmentSlot,
}

/// Sizes of the children currently sitting in a node's slots
#[derive(Debug, Clone, Default)]
pub struct ChildSizes {
    pub sensor: Option<Vec2>,
    pub action: Option<Vec2>,
    pub parameters: BTreeMap<usize, Vec2>,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct SlotHeights {
    parameters: Vec<f32>,
    sensor: f32,
    action: f32,
}

/// Resolved vertical layout of a host node's sections
#[derive(Debug, Clone, Default)]
struct Sections {
    parameter_slots: Vec<Rect>,
    coordinate_top: Option<f32>,
    amount_top: Option<f32>,
    sensor_slot: Option<Rect>,
    action_slot: Option<Rect>,
    bottom: f32,
}

const COORDINATE_AXES: [&str; 3] = ["X", "Y", "Z"];

/// Core node structure representing a behavior block in the graph
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) id: NodeId,
    uuid: String,
    node_type: NodeType,
    mode: Option<NodeMode>,
    position: Pos2,
    size: Vec2,
    parameters: Vec<NodeParameter>,
    pub(crate) attached_sensor: Option<NodeId>,
    pub(crate) attached_action: Option<NodeId>,
    pub(crate) attached_parameters: BTreeMap<usize, NodeId>,
    pub(crate) parent: Option<ParentLink>,
    slot_heights: SlotHeights,
    layout_revision: u64,
    pub(crate) selected: bool,
    pub(crate) dragging: bool,
    pub(crate) sockets_hidden: bool,
}

impl Node {
    /// Creates a new node of the given type with a fresh identity and default parameters
    pub fn new(node_type: NodeType, position: Pos2) -> Self {
        let mode = node_type.default_mode();
        Self::build(
            Uuid::new_v4().to_string(),
            node_type,
            position,
            mode,
            default_parameters(node_type, mode),
        )
    }

    /// Recreates a persisted node with its original identity and parameter list
    ///
    /// Parameters are taken verbatim. An unsupported or missing mode falls back
    /// to the type's default mode.
    pub fn rehydrate(
        uuid: impl Into<String>,
        node_type: NodeType,
        position: Pos2,
        mode: Option<NodeMode>,
        parameters: Vec<NodeParameter>,
    ) -> Self {
        let mode = mode
            .filter(|m| node_type.supports_mode(*m))
            .or_else(|| node_type.default_mode());
        Self::build(uuid.into(), node_type, position, mode, parameters)
    }

    fn build(
        uuid: String,
        node_type: NodeType,
        position: Pos2,
        mode: Option<NodeMode>,
        parameters: Vec<NodeParameter>,
    ) -> Self {
        let mut node = Self {
            id: 0,
            uuid,
            node_type,
            mode,
            position,
            size: Vec2::ZERO,
            parameters,
            attached_sensor: None,
            attached_action: None,
            attached_parameters: BTreeMap::new(),
            parent: None,
            slot_heights: SlotHeights::default(),
            layout_revision: 0,
            selected: false,
            dragging: false,
            sockets_hidden: false,
        };
        node.recalculate_dimensions(&ChildSizes::default());
        node
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Stable identity preserved across save and load
    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    pub fn metadata(&self) -> NodeMetadata {
        self.node_type.metadata()
    }

    pub fn category(&self) -> NodeCategory {
        self.node_type.category()
    }

    pub fn display_name(&self) -> &'static str {
        self.node_type.display_name()
    }

    pub fn color(&self) -> Color32 {
        self.node_type.color()
    }

    pub fn mode(&self) -> Option<NodeMode> {
        self.mode
    }

    pub fn position(&self) -> Pos2 {
        self.position
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.position, self.size)
    }

    pub fn contains_point(&self, point: Pos2) -> bool {
        self.rect().contains(point)
    }

    pub(crate) fn set_position(&mut self, position: Pos2) {
        self.position = position;
    }

    pub fn is_sensor(&self) -> bool {
        self.node_type.is_sensor()
    }

    pub fn is_parameter(&self) -> bool {
        self.node_type.is_parameter()
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn sockets_hidden(&self) -> bool {
        self.sockets_hidden
    }

    /// Number of dimension recalculations this node has gone through
    pub fn layout_revision(&self) -> u64 {
        self.layout_revision
    }

    // Attachment state

    pub fn parent(&self) -> Option<ParentLink> {
        self.parent
    }

    pub fn is_attached(&self) -> bool {
        self.parent.is_some()
    }

    pub fn attached_sensor(&self) -> Option<NodeId> {
        self.attached_sensor
    }

    pub fn attached_action(&self) -> Option<NodeId> {
        self.attached_action
    }

    pub fn attached_parameter(&self, slot: usize) -> Option<NodeId> {
        self.attached_parameters.get(&slot).copied()
    }

    /// Parameter children in ascending slot order
    pub fn attached_parameters(&self) -> impl Iterator<Item = (usize, NodeId)> + '_ {
        self.attached_parameters.iter().map(|(slot, id)| (*slot, *id))
    }

    pub fn has_attached_children(&self) -> bool {
        self.attached_sensor.is_some() || self.attached_action.is_some() || !self.attached_parameters.is_empty()
    }

    /// Occupant of a slot
    pub fn child_in(&self, slot: AttachmentSlot) -> Option<NodeId> {
        match slot {
            AttachmentSlot::Sensor => self.attached_sensor,
            AttachmentSlot::Action => self.attached_action,
            AttachmentSlot::Parameter(index) => self.attached_parameter(index),
        }
    }

    pub(crate) fn set_child(&mut self, slot: AttachmentSlot, child: Option<NodeId>) {
        match (slot, child) {
            (AttachmentSlot::Sensor, child) => self.attached_sensor = child,
            (AttachmentSlot::Action, child) => self.attached_action = child,
            (AttachmentSlot::Parameter(index), Some(child)) => {
                self.attached_parameters.insert(index, child);
            }
            (AttachmentSlot::Parameter(index), None) => {
                self.attached_parameters.remove(&index);
            }
        }
    }

    // Acceptance predicates

    pub fn accepts_sensor(&self) -> bool {
        self.metadata().sensor_slot
    }

    pub fn has_action_slot(&self) -> bool {
        self.metadata().action_slot
    }

    /// Whether a node of `candidate` type may sit in this node's action slot
    pub fn accepts_action(&self, candidate: NodeType) -> bool {
        self.has_action_slot() && !candidate.is_sensor() && !candidate.is_parameter() && !candidate.is_entry_point()
    }

    pub fn parameter_slot_count(&self) -> usize {
        self.metadata().parameter_slots.len()
    }

    pub fn parameter_slot_label(&self, slot: usize) -> Option<&'static str> {
        self.metadata().parameter_slots.get(slot).map(|spec| spec.label)
    }

    /// Whether a node of `candidate` type may sit in parameter slot `slot`
    pub fn accepts_parameter(&self, candidate: NodeType, slot: usize) -> bool {
        candidate.is_parameter()
            && self
                .metadata()
                .parameter_slots
                .get(slot)
                .is_some_and(|spec| spec.accepts(candidate))
    }

    /// Whether `candidate` may occupy `slot` on this node
    pub fn accepts_child(&self, candidate: NodeType, slot: AttachmentSlot) -> bool {
        match slot {
            AttachmentSlot::Sensor => self.accepts_sensor() && candidate.is_sensor(),
            AttachmentSlot::Action => self.accepts_action(candidate),
            AttachmentSlot::Parameter(index) => self.accepts_parameter(candidate, index),
        }
    }

    // Parameters

    pub fn parameters(&self) -> &[NodeParameter] {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&NodeParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn parameter_value(&self, name: &str) -> Option<&str> {
        self.parameter(name).map(|p| p.value())
    }

    /// Set a named parameter's value; returns false if the node has no such parameter
    pub fn set_parameter_value(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.parameters.iter_mut().find(|p| p.name == name) {
            Some(parameter) => {
                parameter.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Whether changing this parameter can change the node's size
    pub fn parameter_affects_layout(&self, name: &str) -> bool {
        if self.is_parameter() {
            return true;
        }
        let meta = self.metadata();
        (meta.coordinate_fields && COORDINATE_AXES.contains(&name)) || (meta.amount_field && name == "Amount")
    }

    pub fn supports_mode_selection(&self) -> bool {
        !self.metadata().modes.is_empty()
    }

    /// Switch to another mode, re-deriving the parameter schema
    ///
    /// Values of parameters whose name survives the switch are kept. Returns
    /// false when the type has no such mode.
    pub fn set_mode(&mut self, mode: NodeMode) -> bool {
        if !self.node_type.supports_mode(mode) {
            return false;
        }
        if self.mode == Some(mode) {
            return true;
        }
        let mut parameters = default_parameters(self.node_type, Some(mode));
        for parameter in &mut parameters {
            if let Some(previous) = self.parameter(&parameter.name) {
                parameter.value = previous.value.clone();
            }
        }
        self.parameters = parameters;
        self.mode = Some(mode);
        true
    }

    // Layout

    /// Recompute this node's size from its type, parameters and child sizes
    pub fn recalculate_dimensions(&mut self, children: &ChildSizes) {
        self.layout_revision += 1;

        match self.node_type {
            NodeType::Start => {
                self.slot_heights = SlotHeights::default();
                self.size = Vec2::from(START_NODE_SIZE);
            }
            NodeType::EventFunction | NodeType::EventCall => {
                self.slot_heights = SlotHeights::default();
                self.size = Vec2::from(EVENT_NODE_SIZE);
            }
            _ if self.is_parameter() => {
                let mut labels: Vec<String> = self.parameters.iter().map(NodeParameter::label).collect();
                if let Some(mode) = self.mode {
                    labels.push(mode.display_label().to_string());
                }
                labels.push(self.display_name().to_string());
                let longest = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
                let width = (longest as f32 * CHAR_ADVANCE + 2.0 * SLOT_MARGIN)
                    .clamp(PARAMETER_NODE_MIN_WIDTH, PARAMETER_NODE_MAX_WIDTH);
                let rows = labels.len() - 1;
                self.slot_heights = SlotHeights::default();
                self.size = Vec2::new(width, HEADER_HEIGHT + rows as f32 * PARAMETER_ROW_HEIGHT + BOTTOM_PADDING);
            }
            _ => {
                let meta = self.metadata();
                let padded = |size: Option<Vec2>, min: f32| size.map_or(min, |s| (s.y + 2.0 * SLOT_PADDING).max(min));
                let heights = SlotHeights {
                    parameters: (0..meta.parameter_slots.len())
                        .map(|slot| padded(children.parameters.get(&slot).copied(), PARAMETER_SLOT_MIN_HEIGHT))
                        .collect(),
                    sensor: if meta.sensor_slot {
                        padded(children.sensor, SENSOR_SLOT_MIN_HEIGHT)
                    } else {
                        0.0
                    },
                    action: if meta.action_slot {
                        padded(children.action, ACTION_SLOT_MIN_HEIGHT)
                    } else {
                        0.0
                    },
                };

                let mut width = NODE_MIN_WIDTH.max(self.display_name().chars().count() as f32 * CHAR_ADVANCE + 2.0 * SLOT_MARGIN);
                let child_widths = children
                    .sensor
                    .iter()
                    .chain(children.action.iter())
                    .chain(children.parameters.values());
                for child in child_widths {
                    width = width.max(child.x + 2.0 * (SLOT_PADDING + SLOT_MARGIN));
                }
                if meta.coordinate_fields {
                    width = width.max(3.0 * COORDINATE_FIELD_WIDTH + 2.0 * COORDINATE_FIELD_SPACING + 2.0 * SLOT_MARGIN);
                }
                if meta.amount_field {
                    width = width.max(AMOUNT_FIELD_WIDTH + 2.0 * SLOT_MARGIN);
                }

                let sections = self.sections(&heights, width);
                self.slot_heights = heights;
                self.size = Vec2::new(width, sections.bottom - self.position.y + BOTTOM_PADDING);
            }
        }
    }

    fn sections(&self, heights: &SlotHeights, width: f32) -> Sections {
        let meta = self.metadata();
        let x = self.position.x + SLOT_MARGIN;
        let slot_width = (width - 2.0 * SLOT_MARGIN).max(0.0);
        let mut y = self.position.y + HEADER_HEIGHT;
        let mut sections = Sections::default();

        for height in &heights.parameters {
            y += SLOT_LABEL_HEIGHT;
            sections
                .parameter_slots
                .push(Rect::from_min_size(Pos2::new(x, y), Vec2::new(slot_width, *height)));
            y += height + SECTION_SPACING;
        }
        if meta.coordinate_fields {
            sections.coordinate_top = Some(y);
            y += FIELD_LABEL_HEIGHT + FIELD_HEIGHT + SECTION_SPACING;
        }
        if meta.amount_field {
            sections.amount_top = Some(y);
            y += FIELD_LABEL_HEIGHT + FIELD_HEIGHT + SECTION_SPACING;
        }
        if meta.sensor_slot {
            sections.sensor_slot = Some(Rect::from_min_size(Pos2::new(x, y), Vec2::new(slot_width, heights.sensor)));
            y += heights.sensor + SECTION_SPACING;
        }
        if meta.action_slot {
            sections.action_slot = Some(Rect::from_min_size(Pos2::new(x, y), Vec2::new(slot_width, heights.action)));
            y += heights.action + SECTION_SPACING;
        }
        sections.bottom = y;
        sections
    }

    fn current_sections(&self) -> Sections {
        self.sections(&self.slot_heights, self.size.x)
    }

    pub fn sensor_slot_rect(&self) -> Option<Rect> {
        self.current_sections().sensor_slot
    }

    pub fn action_slot_rect(&self) -> Option<Rect> {
        self.current_sections().action_slot
    }

    pub fn parameter_slot_rect(&self, slot: usize) -> Option<Rect> {
        self.current_sections().parameter_slots.get(slot).copied()
    }

    pub fn slot_rect(&self, slot: AttachmentSlot) -> Option<Rect> {
        match slot {
            AttachmentSlot::Sensor => self.sensor_slot_rect(),
            AttachmentSlot::Action => self.action_slot_rect(),
            AttachmentSlot::Parameter(index) => self.parameter_slot_rect(index),
        }
    }

    /// Where a child placed in `slot` gets its top-left corner
    pub fn slot_content_origin(&self, slot: AttachmentSlot) -> Option<Pos2> {
        self.slot_rect(slot)
            .map(|rect| rect.min + Vec2::splat(SLOT_PADDING))
    }

    pub fn is_point_inside_sensor_slot(&self, point: Pos2) -> bool {
        self.sensor_slot_rect().is_some_and(|rect| rect.contains(point))
    }

    pub fn is_point_inside_action_slot(&self, point: Pos2) -> bool {
        self.action_slot_rect().is_some_and(|rect| rect.contains(point))
    }

    pub fn parameter_slot_index_at(&self, point: Pos2) -> Option<usize> {
        self.current_sections()
            .parameter_slots
            .iter()
            .position(|rect| rect.contains(point))
    }

    /// Names of the coordinate axes this node shows editable fields for
    pub fn coordinate_axes(&self) -> Vec<&'static str> {
        if !self.metadata().coordinate_fields {
            return Vec::new();
        }
        COORDINATE_AXES
            .iter()
            .copied()
            .filter(|axis| self.parameter(axis).is_some())
            .collect()
    }

    /// Field rectangle for a coordinate axis parameter ("X", "Y" or "Z")
    pub fn coordinate_field_rect(&self, axis: &str) -> Option<Rect> {
        let top = self.current_sections().coordinate_top?;
        let column = self.coordinate_axes().iter().position(|a| *a == axis)?;
        let x = self.position.x + SLOT_MARGIN + column as f32 * (COORDINATE_FIELD_WIDTH + COORDINATE_FIELD_SPACING);
        Some(Rect::from_min_size(
            Pos2::new(x, top + FIELD_LABEL_HEIGHT),
            Vec2::new(COORDINATE_FIELD_WIDTH, FIELD_HEIGHT),
        ))
    }

    pub fn amount_field_rect(&self) -> Option<Rect> {
        let top = self.current_sections().amount_top?;
        Some(Rect::from_min_size(
            Pos2::new(self.position.x + SLOT_MARGIN, top + FIELD_LABEL_HEIGHT),
            Vec2::new(AMOUNT_FIELD_WIDTH, FIELD_HEIGHT),
        ))
    }

    pub fn is_point_inside_amount_field(&self, point: Pos2) -> bool {
        self.amount_field_rect().is_some_and(|rect| rect.contains(point))
    }

    // Sockets

    pub fn socket_count(&self, kind: SocketKind) -> usize {
        let meta = self.metadata();
        match kind {
            SocketKind::Input => meta.inputs,
            SocketKind::Output => meta.outputs,
        }
    }

    pub fn has_sockets(&self) -> bool {
        self.socket_count(SocketKind::Input) + self.socket_count(SocketKind::Output) > 0
    }

    /// Nested nodes and nodes being dragged out of a slot draw no sockets
    pub fn should_render_sockets(&self) -> bool {
        self.has_sockets() && self.parent.is_none() && !self.sockets_hidden
    }

    pub fn socket_position(&self, index: SocketId, kind: SocketKind) -> Pos2 {
        socket_center(self.rect(), kind, index, self.socket_count(kind))
    }

    pub fn is_socket_hit(&self, point: Pos2, index: SocketId, kind: SocketKind, radius: f32) -> bool {
        index < self.socket_count(kind) && is_within_socket(point, self.socket_position(index, kind), radius)
    }

    /// First socket of `kind` within `radius` of `point`
    pub fn socket_at(&self, point: Pos2, kind: SocketKind, radius: f32) -> Option<SocketId> {
        (0..self.socket_count(kind)).find(|index| self.is_socket_hit(point, *index, kind, radius))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_gets_defaults() {
        let node = Node::new(NodeType::Goto, Pos2::new(10.0, 20.0));
        assert_eq!(node.mode(), Some(NodeMode::GotoXyz));
        assert_eq!(node.parameters().len(), 3);
        assert_eq!(node.parameter_value("Y"), Some("0"));
        assert!(Uuid::parse_str(node.uuid()).is_ok());
        assert_eq!(node.layout_revision(), 1);
    }

    #[test]
    fn test_rehydrate_keeps_parameters_verbatim() {
        let params = vec![NodeParameter::new("Custom", ParameterType::Text, "kept")];
        let node = Node::rehydrate("abc", NodeType::Goto, Pos2::ZERO, None, params.clone());
        assert_eq!(node.uuid(), "abc");
        assert_eq!(node.parameters(), params.as_slice());
        assert_eq!(node.mode(), Some(NodeMode::GotoXyz));
    }

    #[test]
    fn test_set_mode_preserves_shared_values() {
        let mut node = Node::new(NodeType::Goto, Pos2::ZERO);
        assert!(node.set_parameter_value("X", "12"));
        assert!(node.set_parameter_value("Y", "64"));

        assert!(node.set_mode(NodeMode::GotoXz));
        assert_eq!(node.parameter_value("X"), Some("12"));
        assert_eq!(node.parameter_value("Y"), None);

        assert!(node.set_mode(NodeMode::GotoXyz));
        assert_eq!(node.parameter_value("Y"), Some("0"));
        assert!(!node.set_mode(NodeMode::CoordinateRelative));
    }

    #[test]
    fn test_acceptance_predicates() {
        let repeat_until = Node::new(NodeType::ControlRepeatUntil, Pos2::ZERO);
        assert!(repeat_until.accepts_sensor());
        assert!(repeat_until.accepts_action(NodeType::Mine));
        assert!(repeat_until.accepts_action(NodeType::ControlIf));
        assert!(!repeat_until.accepts_action(NodeType::SensorIsRaining));
        assert!(!repeat_until.accepts_action(NodeType::ParamBlock));
        assert!(!repeat_until.accepts_action(NodeType::Start));

        let place = Node::new(NodeType::Place, Pos2::ZERO);
        assert!(place.accepts_parameter(NodeType::ParamBlock, 0));
        assert!(place.accepts_parameter(NodeType::ParamCoordinate, 1));
        assert!(!place.accepts_parameter(NodeType::ParamCoordinate, 0));
        assert!(!place.accepts_parameter(NodeType::ParamBlock, 2));
        assert!(!place.accepts_sensor());
    }

    #[test]
    fn test_layout_grows_with_children() {
        let mut node = Node::new(NodeType::ControlIf, Pos2::ZERO);
        let empty_height = node.size().y;
        let children = ChildSizes {
            sensor: Some(Vec2::new(200.0, 60.0)),
            ..Default::default()
        };
        node.recalculate_dimensions(&children);
        assert!(node.size().y > empty_height);
        assert!(node.size().x >= 200.0 + 2.0 * (SLOT_PADDING + SLOT_MARGIN));
        assert_eq!(node.layout_revision(), 2);
    }

    #[test]
    fn test_slot_geometry() {
        let node = Node::new(NodeType::ControlRepeatUntil, Pos2::new(100.0, 100.0));
        let sensor = node.sensor_slot_rect().unwrap();
        let action = node.action_slot_rect().unwrap();
        assert!(sensor.bottom() < action.top());
        assert!(node.is_point_inside_sensor_slot(sensor.center()));
        assert!(!node.is_point_inside_action_slot(sensor.center()));
        assert!(node.rect().contains_rect(action));
    }

    #[test]
    fn test_coordinate_fields_follow_mode() {
        let mut node = Node::new(NodeType::Goto, Pos2::ZERO);
        let x = node.coordinate_field_rect("X").unwrap();
        let z = node.coordinate_field_rect("Z").unwrap();
        assert!(x.right() < z.left());

        node.set_mode(NodeMode::GotoY);
        assert!(node.coordinate_field_rect("X").is_none());
        assert_eq!(node.coordinate_field_rect("Y").unwrap().left(), x.left());
    }

    #[test]
    fn test_socket_hits() {
        let node = Node::new(NodeType::Craft, Pos2::new(0.0, 0.0));
        let output = node.socket_position(1, SocketKind::Output);
        assert!(node.is_socket_hit(output, 1, SocketKind::Output, 6.0));
        assert!(!node.is_socket_hit(output, 0, SocketKind::Output, 1.0));
        assert_eq!(node.socket_at(output, SocketKind::Output, 6.0), Some(1));
        assert!(node.should_render_sockets());

        let sensor = Node::new(NodeType::SensorIsDaytime, Pos2::ZERO);
        assert!(!sensor.should_render_sockets());
    }
}
