//! Text and email inputs.

use super::{
    handle_commit_event, CellInput, Control, InputAction, InputEvent, InputProps, InputStrategy, InputView,
    TextBuffer,
};
use crate::model::Value;

/// Plain single-line text input.
///
/// Every edit emits a `Change`. Enter, Escape and blur (or Tab) are mapped
/// through the column behavior; the action buttons commit or discard when
/// the behavior shows them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextInput;

impl InputStrategy for TextInput {
    fn name(&self) -> &'static str {
        "text"
    }

    fn create(&self, props: &InputProps) -> Box<dyn CellInput> {
        Box::new(TextField::new(self.name(), props))
    }
}

/// Text input for email addresses.
///
/// Behaves like [`TextInput`]; format checks belong in the column validator
/// (see `Rules::email`).
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailInput;

impl InputStrategy for EmailInput {
    fn name(&self) -> &'static str {
        "email"
    }

    fn create(&self, props: &InputProps) -> Box<dyn CellInput> {
        Box::new(TextField::new(self.name(), props))
    }
}

#[derive(Debug)]
struct TextField {
    kind: &'static str,
    buffer: TextBuffer,
    focused: bool,
}

impl TextField {
    fn new(kind: &'static str, props: &InputProps) -> Self {
        let buffer = TextBuffer::new(props.value.display());
        let buffer = if props.auto_focus && props.select_all_on_focus {
            buffer.select_all()
        } else {
            buffer
        };
        Self {
            kind,
            buffer,
            focused: props.auto_focus,
        }
    }

    fn current(&self) -> Value {
        Value::from(self.buffer.text())
    }
}

impl CellInput for TextField {
    fn handle(&mut self, event: &InputEvent, props: &InputProps) -> Vec<InputAction> {
        if props.is_locked() {
            return Vec::new();
        }
        if matches!(event, InputEvent::Blur) {
            self.focused = false;
        }
        if let Some(actions) = handle_commit_event(event, props, || self.current()) {
            return actions;
        }
        match event {
            InputEvent::Key(key) => {
                self.focused = true;
                if self.buffer.apply(*key) {
                    vec![InputAction::Change(self.current())]
                } else {
                    Vec::new()
                }
            }
            _ => Vec::new(),
        }
    }

    fn view(&self, props: &InputProps) -> InputView {
        InputView::new(
            self.kind,
            Control::Text {
                text: self.buffer.text().to_string(),
                cursor: self.buffer.cursor(),
                selected_all: self.buffer.is_selected_all(),
            },
            props,
            self.focused,
        )
    }

    fn sync(&mut self, value: &Value) {
        self.buffer.set_text(value.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::{ButtonPosition, EditBehavior};
    use crate::input::Key;

    fn run(input: &mut dyn CellInput, props: &InputProps, events: &[InputEvent]) -> Vec<InputAction> {
        events.iter().flat_map(|e| input.handle(e, props)).collect()
    }

    #[test]
    fn test_enter_saves_with_click_to_edit() {
        let props = InputProps::new(Value::from("Jane"), EditBehavior::click_to_edit());
        let mut input = TextInput.create(&props);
        let actions = run(input.as_mut(), &props, &[InputEvent::Key(Key::End), InputEvent::Key(Key::Char('t'))]);
        assert_eq!(actions, vec![InputAction::Change(Value::from("Janet"))]);

        let actions = input.handle(&InputEvent::Key(Key::Enter), &props);
        assert_eq!(
            actions,
            vec![InputAction::Change(Value::from("Janet")), InputAction::Save]
        );
    }

    #[test]
    fn test_escape_cancels_and_blur_saves() {
        let props = InputProps::new(Value::from("a"), EditBehavior::click_to_edit());
        let mut input = TextInput.create(&props);
        assert_eq!(input.handle(&InputEvent::Key(Key::Escape), &props), vec![InputAction::Cancel]);
        assert_eq!(
            input.handle(&InputEvent::Blur, &props),
            vec![InputAction::Change(Value::from("a")), InputAction::Save]
        );
    }

    #[test]
    fn test_buttons_only_with_manual_behavior() {
        let props = InputProps::new(Value::from("x"), EditBehavior::click_with_buttons());
        let mut input = TextInput.create(&props);
        assert!(input.handle(&InputEvent::Key(Key::Enter), &props).is_empty());
        assert!(input.handle(&InputEvent::Blur, &props).is_empty());
        assert_eq!(input.handle(&InputEvent::CancelButton, &props), vec![InputAction::Cancel]);

        let view = input.view(&props);
        assert_eq!(view.buttons, Some(ButtonPosition::TopRight));

        let plain = InputProps::new(Value::from("x"), EditBehavior::click_to_edit());
        assert!(input.handle(&InputEvent::SaveButton, &plain).is_empty());
    }

    #[test]
    fn test_locked_while_saving() {
        let mut props = InputProps::new(Value::from("x"), EditBehavior::click_to_edit());
        let mut input = TextInput.create(&props);
        props.is_saving = true;
        assert!(input.handle(&InputEvent::Key(Key::Char('y')), &props).is_empty());
        assert!(input.handle(&InputEvent::Key(Key::Enter), &props).is_empty());
        assert!(input.view(&props).inactive);
    }

    #[test]
    fn test_select_all_on_focus() {
        let props = InputProps::new(Value::from("Jane"), EditBehavior::click_to_edit());
        let mut input = TextInput.create(&props);
        match input.view(&props).control {
            Control::Text { selected_all, .. } => assert!(selected_all),
            other => panic!("unexpected control {other:?}"),
        }
        let actions = run(input.as_mut(), &props, &InputEvent::typed("Bo"));
        assert_eq!(actions.last(), Some(&InputAction::Change(Value::from("Bo"))));
    }
}
