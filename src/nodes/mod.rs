//! Node system - Core data structures, attachment hierarchy and node catalog

// Core node system modules
pub mod graph;
pub mod node;
pub mod port;
pub mod factory;
pub mod defaults;
pub mod hierarchy;
pub mod hooks;

// Re-export core types
pub use graph::{Connection, GraphSnapshot, NodeGraph};
pub use node::{AttachmentSlot, ChildSizes, Node, NodeId, NodeParameter, ParameterType, ParentLink};
pub use port::{SocketId, SocketKind, SocketRef};

// Re-export factory types
pub use factory::{NodeCategory, NodeMetadata, NodeMode, NodeType, ParameterSlotSpec};

// Re-export collaborator traits
pub use hooks::{ExecutionController, GraphObserver};
