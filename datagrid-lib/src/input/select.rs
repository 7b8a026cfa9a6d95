//! Dropdown select input.

use super::{resolve_trigger, CellInput, Control, InputAction, InputEvent, InputProps, InputStrategy, InputView, Key, OptionView};
use crate::behavior::Trigger;
use crate::model::Value;

/// One choice of a select input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Select input over a fixed option list.
///
/// Choosing an option is the commit: it emits the option value and saves
/// immediately. Escape and blur go through the behavior like any other
/// trigger; the cancel button only works when action buttons are shown.
#[derive(Debug, Clone, Default)]
pub struct SelectInput {
    options: Vec<SelectOption>,
}

impl SelectInput {
    pub fn new(options: Vec<SelectOption>) -> Self {
        Self { options }
    }

    /// Build from `(value, label)` pairs.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self::new(
            pairs
                .into_iter()
                .map(|(value, label)| SelectOption::new(value, label))
                .collect(),
        )
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Display label for a stored value.
    pub fn label_for(&self, value: &Value) -> Option<&str> {
        let value = value.as_text()?;
        self.options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
    }
}

impl InputStrategy for SelectInput {
    fn name(&self) -> &'static str {
        "select"
    }

    fn create(&self, props: &InputProps) -> Box<dyn CellInput> {
        let selected = props
            .value
            .as_text()
            .and_then(|v| self.options.iter().position(|o| o.value == v));
        Box::new(SelectField {
            options: self.options.clone(),
            selected,
            highlighted: selected.unwrap_or(0),
        })
    }
}

#[derive(Debug)]
struct SelectField {
    options: Vec<SelectOption>,
    selected: Option<usize>,
    highlighted: usize,
}

impl SelectField {
    fn choose(&mut self, index: usize) -> Vec<InputAction> {
        let Some(option) = self.options.get(index) else {
            return Vec::new();
        };
        let value = Value::from(option.value.as_str());
        self.selected = Some(index);
        self.highlighted = index;
        vec![InputAction::Change(value), InputAction::Save]
    }
}

impl CellInput for SelectField {
    fn handle(&mut self, event: &InputEvent, props: &InputProps) -> Vec<InputAction> {
        if props.is_locked() {
            return Vec::new();
        }
        match event {
            InputEvent::Choose(index) => self.choose(*index),
            InputEvent::Key(Key::Enter) => self.choose(self.highlighted),
            InputEvent::Key(Key::Up) => {
                self.highlighted = self.highlighted.saturating_sub(1);
                Vec::new()
            }
            InputEvent::Key(Key::Down) => {
                if self.highlighted + 1 < self.options.len() {
                    self.highlighted += 1;
                }
                Vec::new()
            }
            InputEvent::Key(Key::Escape) => resolve_trigger(&props.behavior, Trigger::Escape, props.value.clone()),
            InputEvent::CancelButton if props.behavior.show_action_buttons() => vec![InputAction::Cancel],
            InputEvent::Blur if props.behavior.cancels_on(Trigger::Blur) => vec![InputAction::Cancel],
            _ => Vec::new(),
        }
    }

    fn view(&self, props: &InputProps) -> InputView {
        let options = self
            .options
            .iter()
            .enumerate()
            .map(|(i, o)| OptionView {
                label: o.label.clone(),
                selected: self.selected == Some(i),
                highlighted: self.highlighted == i,
            })
            .collect();
        InputView::new("select", Control::Select { options }, props, true)
    }

    fn sync(&mut self, value: &Value) {
        self.selected = value
            .as_text()
            .and_then(|v| self.options.iter().position(|o| o.value == v));
        if let Some(index) = self.selected {
            self.highlighted = index;
        }
    }
}
