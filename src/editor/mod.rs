//! Editor-side behavior of the node graph
//!
//! Everything here extends [`NodeGraph`](crate::nodes::NodeGraph) with the
//! stateful protocols an interactive front end drives: pointer drags, inline
//! field editing and persistence.

// Module declarations
pub mod interaction;
pub mod field_edit;
pub mod file_manager;
pub mod preset;

// Re-exports
pub use interaction::{DropTarget, InteractionManager, InteractionState};
pub use field_edit::{
    CaretBlink, CoordinateAxis, EditField, EditKey, FieldEditState, FieldEditor, MonospaceMeasure, TextMeasure,
    AMOUNT_PARAMETER,
};
pub use file_manager::{
    read_document, write_document, ConnectionData, DocumentMetadata, FileManager, GraphDocument, NodeData,
    ParameterAttachmentData, ParameterData,
};
pub use preset::PresetStore;
