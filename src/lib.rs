//! Waygraph core library
//!
//! A behavior graph model for an automation agent: typed nodes wired into an
//! execution-order graph, nested through sensor, action and parameter slots,
//! with the drag protocols and document format an editor front end needs.

// Public modules
pub mod config;
pub mod constants;
pub mod editor;
pub mod error;
pub mod nodes;

// Re-export commonly used types
pub use config::EditorConfig;
pub use editor::{FileManager, GraphDocument, InteractionState, PresetStore};
pub use error::{ConfigError, PersistenceError, PersistenceResult};
pub use nodes::{
    AttachmentSlot, Connection, ExecutionController, GraphObserver, GraphSnapshot, Node, NodeGraph, NodeId, NodeType,
    SocketKind,
};
