//! Checkbox input.

use super::{resolve_trigger, CellInput, Control, InputAction, InputEvent, InputProps, InputStrategy, InputView, Key};
use crate::behavior::Trigger;
use crate::model::Value;

/// Boolean input; toggling is the commit.
///
/// Space, Enter or a pointer toggle flips the value and saves right away.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckboxInput;

impl InputStrategy for CheckboxInput {
    fn name(&self) -> &'static str {
        "checkbox"
    }

    fn create(&self, props: &InputProps) -> Box<dyn CellInput> {
        Box::new(CheckboxField {
            checked: props.value.as_bool().unwrap_or(false),
        })
    }
}

#[derive(Debug)]
struct CheckboxField {
    checked: bool,
}

impl CellInput for CheckboxField {
    fn handle(&mut self, event: &InputEvent, props: &InputProps) -> Vec<InputAction> {
        if props.is_locked() {
            return Vec::new();
        }
        match event {
            InputEvent::Toggle | InputEvent::Key(Key::Space) | InputEvent::Key(Key::Enter) => {
                self.checked = !self.checked;
                vec![InputAction::Change(Value::Bool(self.checked)), InputAction::Save]
            }
            InputEvent::Key(Key::Escape) if props.behavior.cancels_on(Trigger::Escape) => {
                vec![InputAction::Cancel]
            }
            InputEvent::Blur => resolve_trigger(&props.behavior, Trigger::Blur, Value::Bool(self.checked)),
            _ => Vec::new(),
        }
    }

    fn view(&self, props: &InputProps) -> InputView {
        InputView::new(
            "checkbox",
            Control::Checkbox {
                checked: self.checked,
            },
            props,
            true,
        )
    }

    fn sync(&mut self, value: &Value) {
        self.checked = value.as_bool().unwrap_or(false);
    }
}
