//! Input strategies: the widgets that edit a pending value.
//!
//! An [`InputStrategy`] is configured once per column and creates a fresh
//! [`CellInput`] every time a cell of that column enters edit mode. The live
//! input receives raw UI events and answers with [`InputAction`]s; it never
//! touches the session directly. The edit controller executes the actions,
//! so it only depends on this contract and not on any widget internals.

mod buffer;
mod checkbox;
mod date;
mod number;
mod select;
mod text;

pub use buffer::TextBuffer;
pub use checkbox::CheckboxInput;
pub use date::DateInput;
pub use number::NumberInput;
pub use select::{SelectInput, SelectOption};
pub use text::{EmailInput, TextInput};

use crate::behavior::{ButtonPosition, EditBehavior, Trigger, TriggerAction};
use crate::model::Value;

// =============================================================================
// Events
// =============================================================================

/// Keys an input reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Character key
    Char(char),
    /// Enter/Return
    Enter,
    /// Escape
    Escape,
    /// Backspace
    Backspace,
    /// Delete
    Delete,
    /// Tab
    Tab,
    /// Space
    Space,
    /// Arrow up
    Up,
    /// Arrow down
    Down,
    /// Arrow left
    Left,
    /// Arrow right
    Right,
    /// Home
    Home,
    /// End
    End,
}

/// A UI event delivered to the live input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(Key),
    /// Focus left the input.
    Blur,
    /// The save action button was pressed.
    SaveButton,
    /// The cancel action button was pressed.
    CancelButton,
    /// An option was picked (select inputs).
    Choose(usize),
    /// The control was toggled (checkbox inputs).
    Toggle,
}

impl InputEvent {
    /// Convenience for typing a whole string.
    pub fn typed(text: &str) -> Vec<InputEvent> {
        text.chars().map(|c| InputEvent::Key(Key::Char(c))).collect()
    }
}

/// What the live input asks the controller to do.
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    /// Replace the pending value.
    Change(Value),
    /// Commit the pending value.
    Save,
    /// Discard the pending value.
    Cancel,
    /// Leave edit mode without saving or cancelling.
    Exit,
}

// =============================================================================
// Props and view
// =============================================================================

/// Everything an input gets to know about the session it edits.
#[derive(Debug, Clone)]
pub struct InputProps {
    /// Pending value of the session.
    pub value: Value,
    /// Behavior of the column.
    pub behavior: EditBehavior,
    /// A save is in flight; the input must not emit actions.
    pub is_saving: bool,
    /// Last validation or persistence error.
    pub error: Option<String>,
    pub placeholder: Option<String>,
    pub disabled: bool,
    pub auto_focus: bool,
    pub select_all_on_focus: bool,
}

impl InputProps {
    /// Props for a fresh session seeded with `value`.
    pub fn new(value: Value, behavior: EditBehavior) -> Self {
        Self {
            value,
            auto_focus: behavior.auto_focus(),
            select_all_on_focus: behavior.select_all_on_focus(),
            behavior,
            is_saving: false,
            error: None,
            placeholder: None,
            disabled: false,
        }
    }

    /// Returns `true` when events must be ignored.
    pub fn is_locked(&self) -> bool {
        self.is_saving || self.disabled
    }
}

/// An option row of an open select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub label: String,
    pub selected: bool,
    pub highlighted: bool,
}

/// The control part of an input view.
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    Text {
        text: String,
        cursor: usize,
        selected_all: bool,
    },
    Checkbox {
        checked: bool,
    },
    Select {
        options: Vec<OptionView>,
    },
}

/// Render model of an edit surface.
#[derive(Debug, Clone, PartialEq)]
pub struct InputView {
    /// Name of the strategy that produced this view.
    pub kind: &'static str,
    pub control: Control,
    pub placeholder: Option<String>,
    pub focused: bool,
    /// The control is greyed out (disabled or saving).
    pub inactive: bool,
    /// Where the save/cancel buttons go, when shown.
    pub buttons: Option<ButtonPosition>,
    /// Inline error below the control.
    pub error: Option<String>,
}

impl InputView {
    pub(crate) fn new(kind: &'static str, control: Control, props: &InputProps, focused: bool) -> Self {
        Self {
            kind,
            control,
            placeholder: props.placeholder.clone(),
            focused,
            inactive: props.is_locked(),
            buttons: props
                .behavior
                .show_action_buttons()
                .then(|| props.behavior.button_position()),
            error: props.error.clone(),
        }
    }
}

// =============================================================================
// Traits
// =============================================================================

/// Factory for a column's edit widget.
///
/// One implementation per value type; swap it per column through the edit
/// configuration.
pub trait InputStrategy: Send + Sync + std::fmt::Debug {
    /// Stable name, used in views and logs.
    fn name(&self) -> &'static str;

    /// Create a live input seeded with `props.value`.
    fn create(&self, props: &InputProps) -> Box<dyn CellInput>;
}

/// A live edit widget owned by an open session.
pub trait CellInput: Send + Sync + std::fmt::Debug {
    /// React to a UI event.
    fn handle(&mut self, event: &InputEvent, props: &InputProps) -> Vec<InputAction>;

    /// Current render model.
    fn view(&self, props: &InputProps) -> InputView;

    /// The pending value was replaced from outside the widget.
    fn sync(&mut self, value: &Value);
}

/// Maps a trigger through the behavior into actions.
///
/// A save is preceded by a `Change` carrying the widget's committed value so
/// the controller validates exactly what is on screen.
pub(crate) fn resolve_trigger(behavior: &EditBehavior, trigger: Trigger, current: Value) -> Vec<InputAction> {
    match behavior.resolve(trigger) {
        Some(TriggerAction::Save) => vec![InputAction::Change(current), InputAction::Save],
        Some(TriggerAction::Cancel) => vec![InputAction::Cancel],
        None => Vec::new(),
    }
}

/// Handles the events every text-like input shares.
///
/// Returns `None` for events the caller must handle itself.
pub(crate) fn handle_commit_event(
    event: &InputEvent,
    props: &InputProps,
    current: impl FnOnce() -> Value,
) -> Option<Vec<InputAction>> {
    let behavior = &props.behavior;
    let actions = match event {
        InputEvent::Key(Key::Enter) => resolve_trigger(behavior, Trigger::Enter, current()),
        InputEvent::Key(Key::Escape) => resolve_trigger(behavior, Trigger::Escape, current()),
        InputEvent::Key(Key::Tab) | InputEvent::Blur => resolve_trigger(behavior, Trigger::Blur, current()),
        InputEvent::SaveButton if behavior.show_action_buttons() => {
            vec![InputAction::Change(current()), InputAction::Save]
        }
        InputEvent::CancelButton if behavior.show_action_buttons() => vec![InputAction::Cancel],
        InputEvent::SaveButton | InputEvent::CancelButton => Vec::new(),
        _ => return None,
    };
    Some(actions)
}
