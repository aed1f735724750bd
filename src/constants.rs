//! Application-wide constants and default values
//!
//! Centralized location for all hard-coded values to improve maintainability

/// Node layout constants (world-space pixels)
pub mod layout {
    /// Height of the title strip at the top of every node
    pub const HEADER_HEIGHT: f32 = 18.0;

    /// Minimum width of a regular (non-parameter, non-event) node
    pub const NODE_MIN_WIDTH: f32 = 110.0;

    /// Fixed size of the START node
    pub const START_NODE_SIZE: [f32; 2] = [40.0, 40.0];

    /// Fixed size of the event function / call nodes
    pub const EVENT_NODE_SIZE: [f32; 2] = [120.0, 44.0];

    /// Horizontal margin between a node edge and its slots
    pub const SLOT_MARGIN: f32 = 6.0;

    /// Padding between a slot border and an attached child
    pub const SLOT_PADDING: f32 = 3.0;

    /// Vertical gap between stacked sections
    pub const SECTION_SPACING: f32 = 4.0;

    /// Height of the label row above a parameter slot
    pub const SLOT_LABEL_HEIGHT: f32 = 10.0;

    pub const SENSOR_SLOT_MIN_HEIGHT: f32 = 22.0;
    pub const ACTION_SLOT_MIN_HEIGHT: f32 = 26.0;
    pub const PARAMETER_SLOT_MIN_HEIGHT: f32 = 18.0;

    /// Input field geometry shared by the coordinate and amount editors
    pub const FIELD_LABEL_HEIGHT: f32 = 10.0;
    pub const FIELD_HEIGHT: f32 = 14.0;
    pub const COORDINATE_FIELD_WIDTH: f32 = 40.0;
    pub const COORDINATE_FIELD_SPACING: f32 = 4.0;
    pub const AMOUNT_FIELD_WIDTH: f32 = 60.0;

    /// Space reserved inside a field for its border and caret
    pub const FIELD_TEXT_INSET: f32 = 6.0;

    pub const BOTTOM_PADDING: f32 = 6.0;

    /// Parameter nodes list one row per parameter (plus one for the mode)
    pub const PARAMETER_ROW_HEIGHT: f32 = 10.0;
    pub const PARAMETER_NODE_MIN_WIDTH: f32 = 80.0;
    pub const PARAMETER_NODE_MAX_WIDTH: f32 = 180.0;

    /// Glyph advance used when sizing labels without a font
    pub const CHAR_ADVANCE: f32 = 6.0;

    /// Horizontal offset for children pushed out of a slot
    pub const DETACH_OFFSET: f32 = 12.0;
}

/// Connection socket constants
pub mod sockets {
    /// Default pointer distance at which a socket counts as hit
    pub const SOCKET_HIT_RADIUS: f32 = 6.0;

    /// Vertical tolerance when picking a connection line
    pub const CONNECTION_HIT_TOLERANCE: f32 = 10.0;
}

/// Interaction timing constants
pub mod interaction {
    /// Caret blink period for the field editors (milliseconds)
    pub const CARET_BLINK_INTERVAL_MS: u64 = 500;

    /// Maximum delay between two clicks on a node to count as a double-click
    pub const DOUBLE_CLICK_THRESHOLD_MS: u64 = 300;

    /// Edge length of the play button drawn on START nodes
    pub const START_BUTTON_SIZE: f32 = 10.0;
}

/// Persistence constants
pub mod persistence {
    pub const DOCUMENT_VERSION: &str = "1.0";
    pub const CREATOR: &str = "waygraph 0.1";
    pub const APP_DIR_NAME: &str = "waygraph";
    pub const PRESET_DIR_NAME: &str = "presets";
    pub const PRESET_EXTENSION: &str = "json";
    pub const CONFIG_FILE_NAME: &str = "config.json";
    pub const DEFAULT_PRESET: &str = "default";
}
