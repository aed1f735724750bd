//! Inline text editing for coordinate and amount fields

use std::time::{Duration, Instant};

use egui::Pos2;
use log::debug;

use crate::constants::layout::{CHAR_ADVANCE, FIELD_TEXT_INSET};
use crate::nodes::{NodeGraph, NodeId};

/// Name of the parameter backing the amount field
pub const AMOUNT_PARAMETER: &str = "Amount";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoordinateAxis {
    X,
    Y,
    Z,
}

impl CoordinateAxis {
    pub const ALL: [CoordinateAxis; 3] = [CoordinateAxis::X, CoordinateAxis::Y, CoordinateAxis::Z];

    /// Parameter name backing this axis
    pub fn name(&self) -> &'static str {
        match self {
            CoordinateAxis::X => "X",
            CoordinateAxis::Y => "Y",
            CoordinateAxis::Z => "Z",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|axis| axis.name() == name)
    }
}

/// Keys with a meaning inside a field editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Backspace,
    Enter,
    Escape,
    Tab,
    ShiftTab,
}

/// Measures rendered text so a field never overflows
pub trait TextMeasure {
    fn text_width(&self, text: &str) -> f32;
}

/// Fixed advance per character
#[derive(Debug, Clone, Copy)]
pub struct MonospaceMeasure {
    pub advance: f32,
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self { advance: CHAR_ADVANCE }
    }
}

impl TextMeasure for MonospaceMeasure {
    fn text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.advance
    }
}

/// Which field an editor is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Coordinate(CoordinateAxis),
    Amount,
}

impl EditField {
    pub fn parameter_name(&self) -> &'static str {
        match self {
            EditField::Coordinate(axis) => axis.name(),
            EditField::Amount => AMOUNT_PARAMETER,
        }
    }
}

/// An open edit session on one field of one node
#[derive(Debug, Clone, PartialEq)]
pub struct FieldEditor {
    node: NodeId,
    field: EditField,
    buffer: String,
    original: String,
}

impl FieldEditor {
    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn field(&self) -> EditField {
        self.field
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    /// Value written back on commit
    fn committed_value(&self) -> String {
        match self.field {
            EditField::Coordinate(_) if self.buffer.is_empty() || self.buffer == "-" => "0".to_string(),
            EditField::Amount if self.buffer.is_empty() => {
                if self.original.is_empty() {
                    "0".to_string()
                } else {
                    self.original.clone()
                }
            }
            _ => self.buffer.clone(),
        }
    }
}

/// Caret visibility toggled on a fixed interval
#[derive(Debug, Clone)]
pub struct CaretBlink {
    visible: bool,
    last_toggle: Instant,
    interval: Duration,
}

impl CaretBlink {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            visible: true,
            last_toggle: Instant::now(),
            interval: Duration::from_millis(interval_ms),
        }
    }

    /// Show the caret and restart the interval
    pub fn reset(&mut self, now: Instant) {
        self.visible = true;
        self.last_toggle = now;
    }

    /// Advance the blink; returns whether visibility flipped
    pub fn tick(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_toggle) >= self.interval {
            self.visible = !self.visible;
            self.last_toggle = now;
            true
        } else {
            false
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

/// Both editors; at most one of them is open at a time
#[derive(Debug, Clone)]
pub struct FieldEditState {
    coordinate: Option<FieldEditor>,
    amount: Option<FieldEditor>,
    caret: CaretBlink,
}

impl FieldEditState {
    pub fn new(blink_interval_ms: u64) -> Self {
        Self {
            coordinate: None,
            amount: None,
            caret: CaretBlink::new(blink_interval_ms),
        }
    }

    pub fn blink_interval_ms(&self) -> u64 {
        self.caret.interval().as_millis() as u64
    }
}

impl Default for FieldEditState {
    fn default() -> Self {
        Self::new(crate::constants::interaction::CARET_BLINK_INTERVAL_MS)
    }
}

impl NodeGraph {
    pub fn coordinate_editor(&self) -> Option<&FieldEditor> {
        self.field_edit.coordinate.as_ref()
    }

    pub fn amount_editor(&self) -> Option<&FieldEditor> {
        self.field_edit.amount.as_ref()
    }

    pub fn is_editing_coordinate_field(&self) -> bool {
        self.field_edit.coordinate.is_some()
    }

    pub fn is_editing_amount_field(&self) -> bool {
        self.field_edit.amount.is_some()
    }

    pub fn is_caret_visible(&self) -> bool {
        self.field_edit.caret.is_visible()
    }

    /// Drive the caret blink from the frame clock
    pub fn tick_caret(&mut self, now: Instant) -> bool {
        if self.field_edit.coordinate.is_none() && self.field_edit.amount.is_none() {
            return false;
        }
        self.field_edit.caret.tick(now)
    }

    /// Coordinate axis whose field contains `point`
    pub fn coordinate_axis_at(&self, node: NodeId, point: Pos2) -> Option<CoordinateAxis> {
        let node = self.node(node)?;
        node.coordinate_axes()
            .into_iter()
            .find(|axis| node.coordinate_field_rect(axis).is_some_and(|rect| rect.contains(point)))
            .and_then(CoordinateAxis::from_name)
    }

    pub fn is_point_inside_amount_field(&self, node: NodeId, point: Pos2) -> bool {
        self.node(node).is_some_and(|n| n.is_point_inside_amount_field(point))
    }

    // Shared helpers

    fn open_editor(&mut self, node: NodeId, field: EditField) -> Option<FieldEditor> {
        let value = self
            .node(node)?
            .parameter_value(field.parameter_name())
            .unwrap_or_default()
            .to_string();
        self.field_edit.caret.reset(Instant::now());
        Some(FieldEditor {
            node,
            field,
            buffer: value.clone(),
            original: value,
        })
    }

    /// Write an editor's value back; returns whether the stored value changed
    fn apply_edit(&mut self, editor: &FieldEditor) -> bool {
        let name = editor.field.parameter_name();
        let value = editor.committed_value();
        let previous = self
            .node(editor.node)
            .and_then(|n| n.parameter_value(name))
            .unwrap_or_default()
            .to_string();
        self.set_parameter_value_and_propagate(editor.node, name, value.as_str());
        previous != value
    }

    fn revert_edit(&mut self, editor: &FieldEditor) {
        let name = editor.field.parameter_name();
        self.set_parameter_value_and_propagate(editor.node, name, editor.original.as_str());
    }

    fn close_editor(&mut self, editor: FieldEditor, commit: bool) -> bool {
        if !self.contains(editor.node) {
            return false;
        }
        if !commit {
            self.revert_edit(&editor);
            return false;
        }
        let changed = self.apply_edit(&editor);
        if changed {
            debug!("Committed {} = {:?} on node {}", editor.field.parameter_name(), editor.buffer, editor.node);
            self.notify_parameters_changed(editor.node);
        }
        changed
    }

    fn append_char(&mut self, field: EditField, c: char, measure: &dyn TextMeasure) -> bool {
        let editor = match field {
            EditField::Coordinate(_) => self.field_edit.coordinate.as_ref(),
            EditField::Amount => self.field_edit.amount.as_ref(),
        };
        let Some(editor) = editor else {
            return false;
        };
        let field_rect = self.node(editor.node).and_then(|n| match editor.field {
            EditField::Coordinate(axis) => n.coordinate_field_rect(axis.name()),
            EditField::Amount => n.amount_field_rect(),
        });
        let Some(field_rect) = field_rect else {
            return false;
        };

        let candidate = if c.is_ascii_digit() {
            let mut candidate = editor.buffer.clone();
            candidate.push(c);
            (measure.text_width(&candidate) <= field_rect.width() - FIELD_TEXT_INSET).then_some(candidate)
        } else if c == '-' && matches!(field, EditField::Coordinate(_)) && editor.buffer.is_empty() {
            Some("-".to_string())
        } else {
            return false;
        };

        if let Some(candidate) = candidate {
            let editor = match field {
                EditField::Coordinate(_) => self.field_edit.coordinate.as_mut(),
                EditField::Amount => self.field_edit.amount.as_mut(),
            };
            if let Some(editor) = editor {
                editor.buffer = candidate;
            }
            self.field_edit.caret.reset(Instant::now());
        }
        true
    }

    fn pop_char(&mut self, field: EditField) {
        let editor = match field {
            EditField::Coordinate(_) => self.field_edit.coordinate.as_mut(),
            EditField::Amount => self.field_edit.amount.as_mut(),
        };
        if let Some(editor) = editor {
            if editor.buffer.pop().is_some() {
                self.field_edit.caret.reset(Instant::now());
            }
        }
    }

    // Coordinate fields

    /// Open the editor on one axis of a node
    ///
    /// Opening on a node without that field closes (and reverts) any open
    /// coordinate editor instead. An open amount editor is committed first.
    pub fn start_coordinate_editing(&mut self, node: NodeId, axis: CoordinateAxis) -> bool {
        let has_field = self
            .node(node)
            .is_some_and(|n| n.coordinate_field_rect(axis.name()).is_some());
        if !has_field {
            self.stop_coordinate_editing(false);
            return false;
        }

        self.stop_amount_editing(true);

        let field = EditField::Coordinate(axis);
        if let Some(current) = self.field_edit.coordinate.take() {
            if current.node == node && current.field == field {
                self.field_edit.coordinate = Some(current);
                return true;
            }
            self.close_editor(current, true);
        }

        self.field_edit.coordinate = self.open_editor(node, field);
        self.field_edit.coordinate.is_some()
    }

    /// Close the coordinate editor; returns whether a committed value changed
    pub fn stop_coordinate_editing(&mut self, commit: bool) -> bool {
        let Some(editor) = self.field_edit.coordinate.take() else {
            return false;
        };
        let changed = self.close_editor(editor, commit);
        self.field_edit.caret.reset(Instant::now());
        changed
    }

    pub fn handle_coordinate_key(&mut self, key: EditKey) -> bool {
        let Some(editor) = self.field_edit.coordinate.as_ref() else {
            return false;
        };
        let (node, field) = (editor.node, editor.field);
        match key {
            EditKey::Backspace => self.pop_char(field),
            EditKey::Enter => {
                self.stop_coordinate_editing(true);
            }
            EditKey::Escape => {
                self.stop_coordinate_editing(false);
            }
            EditKey::Tab | EditKey::ShiftTab => {
                let EditField::Coordinate(current) = field else {
                    return false;
                };
                let axes = self.node(node).map(|n| n.coordinate_axes()).unwrap_or_default();
                let Some(index) = axes.iter().position(|a| *a == current.name()) else {
                    return true;
                };
                let step = if key == EditKey::Tab { 1 } else { axes.len() - 1 };
                let next = axes[(index + step) % axes.len()];
                if let Some(next) = CoordinateAxis::from_name(next) {
                    self.start_coordinate_editing(node, next);
                }
            }
        }
        true
    }

    /// Type into the coordinate editor: digits, or a leading minus sign
    pub fn handle_coordinate_char(&mut self, c: char, measure: &dyn TextMeasure) -> bool {
        match self.field_edit.coordinate.as_ref() {
            Some(editor) => self.append_char(editor.field, c, measure),
            None => false,
        }
    }

    // Amount field

    /// Open the amount editor on a node, committing any other open editor
    pub fn start_amount_editing(&mut self, node: NodeId) -> bool {
        let has_field = self.node(node).is_some_and(|n| n.amount_field_rect().is_some());
        if !has_field {
            self.stop_amount_editing(false);
            return false;
        }

        if let Some(current) = self.field_edit.amount.take() {
            if current.node == node {
                self.field_edit.amount = Some(current);
                return true;
            }
            self.close_editor(current, true);
        }

        self.stop_coordinate_editing(true);

        self.field_edit.amount = self.open_editor(node, EditField::Amount);
        self.field_edit.amount.is_some()
    }

    /// Close the amount editor; returns whether a committed value changed
    pub fn stop_amount_editing(&mut self, commit: bool) -> bool {
        let Some(editor) = self.field_edit.amount.take() else {
            return false;
        };
        let changed = self.close_editor(editor, commit);
        self.field_edit.caret.reset(Instant::now());
        changed
    }

    pub fn handle_amount_key(&mut self, key: EditKey) -> bool {
        if self.field_edit.amount.is_none() {
            return false;
        }
        match key {
            EditKey::Backspace => self.pop_char(EditField::Amount),
            EditKey::Enter => {
                self.stop_amount_editing(true);
            }
            EditKey::Escape => {
                self.stop_amount_editing(false);
            }
            EditKey::Tab | EditKey::ShiftTab => return false,
        }
        true
    }

    /// Type into the amount editor: digits only
    pub fn handle_amount_char(&mut self, c: char, measure: &dyn TextMeasure) -> bool {
        if self.field_edit.amount.is_none() {
            return false;
        }
        self.append_char(EditField::Amount, c, measure)
    }

    // Lifecycle

    /// Commit whatever editor is open
    pub fn commit_field_edits(&mut self) {
        self.stop_coordinate_editing(true);
        self.stop_amount_editing(true);
    }

    /// Revert and close editors bound to a node about to change shape or vanish
    pub(crate) fn cancel_field_edits_for(&mut self, id: NodeId) {
        if self.field_edit.coordinate.as_ref().is_some_and(|e| e.node == id) {
            self.stop_coordinate_editing(false);
        }
        if self.field_edit.amount.as_ref().is_some_and(|e| e.node == id) {
            self.stop_amount_editing(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::{GraphObserver, Node, NodeMode, NodeType};
    use std::cell::RefCell;
    use std::rc::Rc;

    struct CountingObserver(Rc<RefCell<usize>>);

    impl GraphObserver for CountingObserver {
        fn on_parameters_changed(&mut self, _node: &Node) {
            *self.0.borrow_mut() += 1;
        }
    }

    fn goto_graph() -> (NodeGraph, NodeId) {
        let mut graph = NodeGraph::new();
        let goto = graph.create_node(NodeType::Goto, Pos2::new(0.0, 0.0));
        (graph, goto)
    }

    fn type_str(graph: &mut NodeGraph, text: &str) {
        let measure = MonospaceMeasure::default();
        for c in text.chars() {
            graph.handle_coordinate_char(c, &measure);
        }
    }

    #[test]
    fn test_commit_recalculates_once() {
        let (mut graph, goto) = goto_graph();
        graph.set_parameter_value_and_propagate(goto, "X", "12");
        let calls = Rc::new(RefCell::new(0));
        graph.add_observer(Box::new(CountingObserver(calls.clone())));

        assert!(graph.start_coordinate_editing(goto, CoordinateAxis::X));
        assert_eq!(graph.coordinate_editor().map(|e| e.buffer()), Some("12"));
        let revision = graph.node(goto).unwrap().layout_revision();

        type_str(&mut graph, "3");
        assert!(graph.handle_coordinate_key(EditKey::Enter));

        let node = graph.node(goto).unwrap();
        assert_eq!(node.parameter_value("X"), Some("123"));
        assert_eq!(node.layout_revision() - revision, 1);
        assert_eq!(*calls.borrow(), 1);
        assert!(!graph.is_editing_coordinate_field());
        assert!(graph.is_dirty());
    }

    #[test]
    fn test_escape_restores_original() {
        let (mut graph, goto) = goto_graph();
        graph.set_parameter_value_and_propagate(goto, "Y", "64");
        graph.mark_clean();

        graph.start_coordinate_editing(goto, CoordinateAxis::Y);
        graph.handle_coordinate_key(EditKey::Backspace);
        graph.handle_coordinate_key(EditKey::Backspace);
        type_str(&mut graph, "99");
        assert_eq!(graph.coordinate_editor().map(|e| e.buffer()), Some("99"));

        graph.handle_coordinate_key(EditKey::Escape);
        assert_eq!(graph.node(goto).unwrap().parameter_value("Y"), Some("64"));
        assert!(!graph.is_dirty());
    }

    #[test]
    fn test_minus_and_empty_commit_to_zero() {
        let (mut graph, goto) = goto_graph();
        graph.start_coordinate_editing(goto, CoordinateAxis::Z);
        while graph.coordinate_editor().is_some_and(|e| !e.buffer().is_empty()) {
            graph.handle_coordinate_key(EditKey::Backspace);
        }
        type_str(&mut graph, "-");
        type_str(&mut graph, "-");
        assert_eq!(graph.coordinate_editor().map(|e| e.buffer()), Some("-"));
        assert!(!graph.handle_coordinate_char('a', &MonospaceMeasure::default()));

        graph.stop_coordinate_editing(true);
        assert_eq!(graph.node(goto).unwrap().parameter_value("Z"), Some("0"));
    }

    #[test]
    fn test_field_width_limits_input() {
        let (mut graph, goto) = goto_graph();
        graph.set_parameter_value_and_propagate(goto, "X", "");
        graph.start_coordinate_editing(goto, CoordinateAxis::X);
        type_str(&mut graph, "123456789");
        // 40px field, 6px inset, 6px per glyph
        assert_eq!(graph.coordinate_editor().map(|e| e.buffer()), Some("12345"));
    }

    #[test]
    fn test_tab_cycles_present_axes() {
        let (mut graph, goto) = goto_graph();
        assert!(graph.set_node_mode(goto, NodeMode::GotoXz));

        graph.start_coordinate_editing(goto, CoordinateAxis::X);
        graph.handle_coordinate_key(EditKey::Tab);
        assert_eq!(
            graph.coordinate_editor().map(|e| e.field()),
            Some(EditField::Coordinate(CoordinateAxis::Z))
        );
        graph.handle_coordinate_key(EditKey::Tab);
        assert_eq!(
            graph.coordinate_editor().map(|e| e.field()),
            Some(EditField::Coordinate(CoordinateAxis::X))
        );
        graph.handle_coordinate_key(EditKey::ShiftTab);
        assert_eq!(
            graph.coordinate_editor().map(|e| e.field()),
            Some(EditField::Coordinate(CoordinateAxis::Z))
        );
        assert!(!graph.start_coordinate_editing(goto, CoordinateAxis::Y));
        assert!(!graph.is_editing_coordinate_field());
    }

    #[test]
    fn test_amount_editing() {
        let mut graph = NodeGraph::new();
        let collect = graph.create_node(NodeType::Collect, Pos2::new(0.0, 0.0));
        let measure = MonospaceMeasure::default();

        assert!(graph.start_amount_editing(collect));
        assert_eq!(graph.amount_editor().map(|e| e.original()), Some("1"));
        graph.handle_amount_key(EditKey::Backspace);
        assert!(!graph.handle_amount_char('-', &measure));
        graph.handle_amount_char('4', &measure);
        graph.handle_amount_char('2', &measure);
        assert!(!graph.handle_amount_key(EditKey::Tab));
        graph.handle_amount_key(EditKey::Enter);
        assert_eq!(graph.node(collect).unwrap().parameter_value(AMOUNT_PARAMETER), Some("42"));

        // Emptied buffer falls back to the value the edit started from
        graph.start_amount_editing(collect);
        graph.handle_amount_key(EditKey::Backspace);
        graph.handle_amount_key(EditKey::Backspace);
        graph.stop_amount_editing(true);
        assert_eq!(graph.node(collect).unwrap().parameter_value(AMOUNT_PARAMETER), Some("42"));

        let stop = graph.create_node(NodeType::Stop, Pos2::new(300.0, 0.0));
        assert!(!graph.start_amount_editing(stop));
    }

    #[test]
    fn test_editors_are_exclusive() {
        let mut graph = NodeGraph::new();
        let goto = graph.create_node(NodeType::Goto, Pos2::new(0.0, 0.0));
        let craft = graph.create_node(NodeType::Craft, Pos2::new(300.0, 0.0));

        graph.start_coordinate_editing(goto, CoordinateAxis::X);
        type_str(&mut graph, "7");
        graph.start_amount_editing(craft);
        assert!(!graph.is_editing_coordinate_field());
        assert!(graph.is_editing_amount_field());
        assert!(graph.node(goto).unwrap().parameter_value("X").is_some_and(|v| v.ends_with('7')));

        graph.handle_amount_char('5', &MonospaceMeasure::default());
        graph.start_coordinate_editing(goto, CoordinateAxis::Y);
        assert!(!graph.is_editing_amount_field());
        assert_eq!(graph.node(craft).unwrap().parameter_value(AMOUNT_PARAMETER), Some("15"));
    }

    #[test]
    fn test_removing_node_reverts_and_closes_editor() {
        let (mut graph, goto) = goto_graph();
        graph.start_coordinate_editing(goto, CoordinateAxis::X);
        graph.remove_node(goto);
        assert!(!graph.is_editing_coordinate_field());
        assert!(!graph.handle_coordinate_char('1', &MonospaceMeasure::default()));
    }

    #[test]
    fn test_caret_blink() {
        let mut caret = CaretBlink::new(500);
        let start = Instant::now();
        caret.reset(start);
        assert!(!caret.tick(start + Duration::from_millis(100)));
        assert!(caret.tick(start + Duration::from_millis(500)));
        assert!(!caret.is_visible());
        caret.reset(start);
        assert!(caret.is_visible());
    }
}
