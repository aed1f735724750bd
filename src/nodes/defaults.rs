//! Default parameter values for nodes
//!
//! This module centralizes the parameter schema every node type starts with,
//! so fresh nodes and mode switches agree on names, types and values.

use super::factory::{NodeMode, NodeType};
use super::node::{NodeParameter, ParameterType};

/// Default values for movement and coordinate parameters
pub struct CoordinateDefaults;

impl CoordinateDefaults {
    pub const X: &'static str = "0";
    pub const Y: &'static str = "0";
    pub const Z: &'static str = "0";
}

/// Default values for world interaction parameters
pub struct WorldDefaults;

impl WorldDefaults {
    pub const AMOUNT: &'static str = "1";
    pub const BLOCK: &'static str = "stone";
    pub const ITEM: &'static str = "stick";
    pub const ENTITY: &'static str = "player";
}

/// Default values for control and utility parameters
pub struct ControlDefaults;

impl ControlDefaults {
    pub const REPEAT_COUNT: &'static str = "3";
    pub const WAIT_DURATION: &'static str = "1.0";
    pub const MESSAGE_TEXT: &'static str = "Hello";
    pub const HEALTH_THRESHOLD: &'static str = "10";
    pub const FUNCTION_NAME: &'static str = "";
}

fn coordinate_axes(names: &[&'static str]) -> Vec<NodeParameter> {
    names
        .iter()
        .map(|name| {
            let value = match *name {
                "X" => CoordinateDefaults::X,
                "Y" => CoordinateDefaults::Y,
                _ => CoordinateDefaults::Z,
            };
            NodeParameter::new(*name, ParameterType::Integer, value)
        })
        .collect()
}

/// Build the default parameter list for a node type in the given mode
///
/// `mode` is ignored for types without modes; `None` on a moded type uses
/// the type's default mode.
pub fn default_parameters(node_type: NodeType, mode: Option<NodeMode>) -> Vec<NodeParameter> {
    match node_type {
        NodeType::EventFunction | NodeType::EventCall => vec![NodeParameter::new(
            "Name",
            ParameterType::Text,
            ControlDefaults::FUNCTION_NAME,
        )],
        NodeType::ControlRepeat => vec![NodeParameter::new(
            "Count",
            ParameterType::Integer,
            ControlDefaults::REPEAT_COUNT,
        )],
        NodeType::Goto => match mode.or(node_type.default_mode()) {
            Some(NodeMode::GotoXz) => coordinate_axes(&["X", "Z"]),
            Some(NodeMode::GotoY) => coordinate_axes(&["Y"]),
            _ => coordinate_axes(&["X", "Y", "Z"]),
        },
        NodeType::Collect | NodeType::Craft | NodeType::SensorHasItem => vec![NodeParameter::new(
            "Amount",
            ParameterType::Integer,
            WorldDefaults::AMOUNT,
        )],
        NodeType::Wait => vec![NodeParameter::new(
            "Duration",
            ParameterType::Double,
            ControlDefaults::WAIT_DURATION,
        )],
        NodeType::Message => vec![NodeParameter::new(
            "Text",
            ParameterType::Text,
            ControlDefaults::MESSAGE_TEXT,
        )],
        NodeType::SensorHealthBelow => vec![NodeParameter::new(
            "Health",
            ParameterType::Integer,
            ControlDefaults::HEALTH_THRESHOLD,
        )],
        NodeType::ParamCoordinate => coordinate_axes(&["X", "Y", "Z"]),
        NodeType::ParamBlock => vec![NodeParameter::new("Block", ParameterType::Block, WorldDefaults::BLOCK)],
        NodeType::ParamItem => vec![NodeParameter::new("Item", ParameterType::Item, WorldDefaults::ITEM)],
        NodeType::ParamEntity => vec![NodeParameter::new(
            "Entity",
            ParameterType::Entity,
            WorldDefaults::ENTITY,
        )],
        NodeType::Start
        | NodeType::ControlRepeatUntil
        | NodeType::ControlForever
        | NodeType::ControlIf
        | NodeType::ControlIfElse
        | NodeType::ControlWaitUntil
        | NodeType::Follow
        | NodeType::Stop
        | NodeType::Mine
        | NodeType::Place
        | NodeType::SensorTouchingBlock
        | NodeType::SensorAtCoordinates
        | NodeType::SensorIsDaytime
        | NodeType::SensorIsRaining => Vec::new(),
    }
}
