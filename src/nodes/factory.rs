//! Node type catalog with categories, slot layouts and rich metadata

use egui::Color32;
use serde::{Deserialize, Serialize};

/// Palette category of a node type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeCategory {
    Events,
    Logic,
    Movement,
    World,
    Utility,
    Sensors,
    Parameters,
}

impl NodeCategory {
    /// Get a human-readable name for this category
    pub fn name(&self) -> &'static str {
        match self {
            NodeCategory::Events => "Events",
            NodeCategory::Logic => "Logic",
            NodeCategory::Movement => "Movement",
            NodeCategory::World => "World",
            NodeCategory::Utility => "Utility",
            NodeCategory::Sensors => "Sensors",
            NodeCategory::Parameters => "Parameters",
        }
    }

    /// Get a color representing this category
    pub fn color(&self) -> Color32 {
        match self {
            NodeCategory::Events => Color32::from_rgb(76, 175, 80),
            NodeCategory::Logic => Color32::from_rgb(255, 152, 0),
            NodeCategory::Movement => Color32::from_rgb(33, 150, 243),
            NodeCategory::World => Color32::from_rgb(121, 85, 72),
            NodeCategory::Utility => Color32::from_rgb(158, 158, 158),
            NodeCategory::Sensors => Color32::from_rgb(0, 188, 212),
            NodeCategory::Parameters => Color32::from_rgb(156, 39, 176),
        }
    }
}

/// Every node type the editor can create
///
/// The serialized names (`START`, `CONTROL_IF`, `PARAM_BLOCK`, ...) are part of
/// the persisted document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    Start,
    EventFunction,
    EventCall,
    ControlRepeat,
    ControlRepeatUntil,
    ControlForever,
    ControlIf,
    ControlIfElse,
    ControlWaitUntil,
    Goto,
    Follow,
    Stop,
    Mine,
    Collect,
    Place,
    Craft,
    Wait,
    Message,
    SensorTouchingBlock,
    SensorAtCoordinates,
    SensorHasItem,
    SensorIsDaytime,
    SensorIsRaining,
    SensorHealthBelow,
    ParamCoordinate,
    ParamBlock,
    ParamItem,
    ParamEntity,
}

/// Mutually exclusive sub-variants of a node type
///
/// Switching mode re-derives the node's parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeMode {
    GotoXyz,
    GotoXz,
    GotoY,
    CoordinateAbsolute,
    CoordinateRelative,
}

impl NodeMode {
    pub fn display_label(&self) -> &'static str {
        match self {
            NodeMode::GotoXyz => "Mode: XYZ",
            NodeMode::GotoXz => "Mode: XZ",
            NodeMode::GotoY => "Mode: Y level",
            NodeMode::CoordinateAbsolute => "Mode: Absolute",
            NodeMode::CoordinateRelative => "Mode: Relative",
        }
    }
}

/// A parameter slot on a host node and the parameter types it accepts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSlotSpec {
    pub label: &'static str,
    pub accepts: &'static [NodeType],
}

impl ParameterSlotSpec {
    pub fn accepts(&self, candidate: NodeType) -> bool {
        self.accepts.contains(&candidate)
    }
}

const COORDINATE_SLOT: ParameterSlotSpec = ParameterSlotSpec {
    label: "Coordinate",
    accepts: &[NodeType::ParamCoordinate],
};
const BLOCK_SLOT: ParameterSlotSpec = ParameterSlotSpec {
    label: "Block",
    accepts: &[NodeType::ParamBlock],
};
const ITEM_SLOT: ParameterSlotSpec = ParameterSlotSpec {
    label: "Item",
    accepts: &[NodeType::ParamItem],
};
const ENTITY_SLOT: ParameterSlotSpec = ParameterSlotSpec {
    label: "Entity",
    accepts: &[NodeType::ParamEntity],
};
const POSITION_SLOT: ParameterSlotSpec = ParameterSlotSpec {
    label: "Position",
    accepts: &[NodeType::ParamCoordinate],
};

const GOTO_MODES: &[NodeMode] = &[NodeMode::GotoXyz, NodeMode::GotoXz, NodeMode::GotoY];
const COORDINATE_MODES: &[NodeMode] = &[NodeMode::CoordinateAbsolute, NodeMode::CoordinateRelative];

/// Static description of a node type
#[derive(Debug, Clone, PartialEq)]
pub struct NodeMetadata {
    pub display_name: &'static str,
    pub category: NodeCategory,
    /// Number of execution-order input sockets
    pub inputs: usize,
    /// Number of execution-order output sockets
    pub outputs: usize,
    pub sensor_slot: bool,
    pub action_slot: bool,
    pub parameter_slots: &'static [ParameterSlotSpec],
    pub coordinate_fields: bool,
    pub amount_field: bool,
    pub modes: &'static [NodeMode],
}

impl NodeMetadata {
    fn new(display_name: &'static str, category: NodeCategory, inputs: usize, outputs: usize) -> Self {
        Self {
            display_name,
            category,
            inputs,
            outputs,
            sensor_slot: false,
            action_slot: false,
            parameter_slots: &[],
            coordinate_fields: false,
            amount_field: false,
            modes: &[],
        }
    }

    fn with_sensor_slot(mut self) -> Self {
        self.sensor_slot = true;
        self
    }

    fn with_action_slot(mut self) -> Self {
        self.action_slot = true;
        self
    }

    fn with_parameter_slots(mut self, slots: &'static [ParameterSlotSpec]) -> Self {
        self.parameter_slots = slots;
        self
    }

    fn with_coordinate_fields(mut self) -> Self {
        self.coordinate_fields = true;
        self
    }

    fn with_amount_field(mut self) -> Self {
        self.amount_field = true;
        self
    }

    fn with_modes(mut self, modes: &'static [NodeMode]) -> Self {
        self.modes = modes;
        self
    }
}

impl NodeType {
    /// All node types in palette order
    pub const ALL: &'static [NodeType] = &[
        NodeType::Start,
        NodeType::EventFunction,
        NodeType::EventCall,
        NodeType::ControlRepeat,
        NodeType::ControlRepeatUntil,
        NodeType::ControlForever,
        NodeType::ControlIf,
        NodeType::ControlIfElse,
        NodeType::ControlWaitUntil,
        NodeType::Goto,
        NodeType::Follow,
        NodeType::Stop,
        NodeType::Mine,
        NodeType::Collect,
        NodeType::Place,
        NodeType::Craft,
        NodeType::Wait,
        NodeType::Message,
        NodeType::SensorTouchingBlock,
        NodeType::SensorAtCoordinates,
        NodeType::SensorHasItem,
        NodeType::SensorIsDaytime,
        NodeType::SensorIsRaining,
        NodeType::SensorHealthBelow,
        NodeType::ParamCoordinate,
        NodeType::ParamBlock,
        NodeType::ParamItem,
        NodeType::ParamEntity,
    ];

    /// Full metadata for this type
    pub fn metadata(&self) -> NodeMetadata {
        use NodeCategory::*;
        match self {
            NodeType::Start => NodeMetadata::new("Start", Events, 0, 1),
            NodeType::EventFunction => NodeMetadata::new("Function", Events, 0, 1),
            NodeType::EventCall => NodeMetadata::new("Call Function", Events, 1, 1),
            NodeType::ControlRepeat => NodeMetadata::new("Repeat", Logic, 1, 1).with_action_slot(),
            NodeType::ControlRepeatUntil => NodeMetadata::new("Repeat Until", Logic, 1, 1)
                .with_sensor_slot()
                .with_action_slot(),
            NodeType::ControlForever => NodeMetadata::new("Forever", Logic, 1, 0).with_action_slot(),
            NodeType::ControlIf => NodeMetadata::new("If", Logic, 1, 1).with_sensor_slot(),
            NodeType::ControlIfElse => NodeMetadata::new("If Else", Logic, 1, 2).with_sensor_slot(),
            NodeType::ControlWaitUntil => NodeMetadata::new("Wait Until", Logic, 1, 1).with_sensor_slot(),
            NodeType::Goto => NodeMetadata::new("Go To", Movement, 1, 1)
                .with_parameter_slots(&[COORDINATE_SLOT])
                .with_coordinate_fields()
                .with_modes(GOTO_MODES),
            NodeType::Follow => NodeMetadata::new("Follow", Movement, 1, 1).with_parameter_slots(&[ENTITY_SLOT]),
            NodeType::Stop => NodeMetadata::new("Stop", Movement, 1, 1),
            NodeType::Mine => NodeMetadata::new("Mine", World, 1, 1).with_parameter_slots(&[BLOCK_SLOT]),
            NodeType::Collect => NodeMetadata::new("Collect", World, 1, 1)
                .with_parameter_slots(&[BLOCK_SLOT])
                .with_amount_field(),
            NodeType::Place => NodeMetadata::new("Place", World, 1, 1)
                .with_parameter_slots(&[BLOCK_SLOT, POSITION_SLOT]),
            NodeType::Craft => NodeMetadata::new("Craft", World, 1, 2)
                .with_parameter_slots(&[ITEM_SLOT])
                .with_amount_field(),
            NodeType::Wait => NodeMetadata::new("Wait", Utility, 1, 1),
            NodeType::Message => NodeMetadata::new("Message", Utility, 1, 1),
            NodeType::SensorTouchingBlock => NodeMetadata::new("Touching Block", Sensors, 0, 0)
                .with_parameter_slots(&[BLOCK_SLOT]),
            NodeType::SensorAtCoordinates => NodeMetadata::new("At Coordinates", Sensors, 0, 0)
                .with_parameter_slots(&[COORDINATE_SLOT]),
            NodeType::SensorHasItem => NodeMetadata::new("Has Item", Sensors, 0, 0)
                .with_parameter_slots(&[ITEM_SLOT])
                .with_amount_field(),
            NodeType::SensorIsDaytime => NodeMetadata::new("Is Daytime", Sensors, 0, 0),
            NodeType::SensorIsRaining => NodeMetadata::new("Is Raining", Sensors, 0, 0),
            NodeType::SensorHealthBelow => NodeMetadata::new("Health Below", Sensors, 0, 0),
            NodeType::ParamCoordinate => NodeMetadata::new("Coordinate", Parameters, 0, 0)
                .with_modes(COORDINATE_MODES),
            NodeType::ParamBlock => NodeMetadata::new("Block", Parameters, 0, 0),
            NodeType::ParamItem => NodeMetadata::new("Item", Parameters, 0, 0),
            NodeType::ParamEntity => NodeMetadata::new("Entity", Parameters, 0, 0),
        }
    }

    pub fn display_name(&self) -> &'static str {
        self.metadata().display_name
    }

    pub fn category(&self) -> NodeCategory {
        self.metadata().category
    }

    pub fn color(&self) -> Color32 {
        self.category().color()
    }

    pub fn is_sensor(&self) -> bool {
        self.category() == NodeCategory::Sensors
    }

    pub fn is_parameter(&self) -> bool {
        self.category() == NodeCategory::Parameters
    }

    /// Event entry points cannot be nested inside another node
    pub fn is_entry_point(&self) -> bool {
        matches!(self, NodeType::Start | NodeType::EventFunction)
    }

    pub fn default_mode(&self) -> Option<NodeMode> {
        self.metadata().modes.first().copied()
    }

    pub fn supports_mode(&self, mode: NodeMode) -> bool {
        self.metadata().modes.contains(&mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_names() {
        assert_eq!(serde_json::to_string(&NodeType::Start).unwrap(), "\"START\"");
        assert_eq!(serde_json::to_string(&NodeType::ControlIfElse).unwrap(), "\"CONTROL_IF_ELSE\"");
        assert_eq!(serde_json::to_string(&NodeMode::GotoXz).unwrap(), "\"GOTO_XZ\"");
        let parsed: NodeType = serde_json::from_str("\"PARAM_COORDINATE\"").unwrap();
        assert_eq!(parsed, NodeType::ParamCoordinate);
    }

    #[test]
    fn test_categories() {
        assert!(NodeType::SensorIsRaining.is_sensor());
        assert!(NodeType::ParamBlock.is_parameter());
        assert_eq!(NodeType::ControlForever.category(), NodeCategory::Logic);
        assert!(!NodeType::Goto.is_sensor());
        assert!(NodeType::Start.is_entry_point());
    }

    #[test]
    fn test_sensors_and_parameters_have_no_sockets() {
        for node_type in NodeType::ALL {
            if node_type.is_sensor() || node_type.is_parameter() {
                let meta = node_type.metadata();
                assert_eq!(meta.inputs + meta.outputs, 0, "{:?}", node_type);
            }
        }
    }

    #[test]
    fn test_modes() {
        assert_eq!(NodeType::Goto.default_mode(), Some(NodeMode::GotoXyz));
        assert!(NodeType::Goto.supports_mode(NodeMode::GotoY));
        assert!(!NodeType::Goto.supports_mode(NodeMode::CoordinateRelative));
        assert_eq!(NodeType::Mine.default_mode(), None);
    }

    #[test]
    fn test_parameter_slot_acceptance() {
        let meta = NodeType::Place.metadata();
        assert_eq!(meta.parameter_slots.len(), 2);
        assert!(meta.parameter_slots[0].accepts(NodeType::ParamBlock));
        assert!(!meta.parameter_slots[0].accepts(NodeType::ParamCoordinate));
        assert!(meta.parameter_slots[1].accepts(NodeType::ParamCoordinate));
    }
}
