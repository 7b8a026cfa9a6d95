//! Date input.

use chrono::NaiveDate;

use super::{
    handle_commit_event, CellInput, Control, InputAction, InputEvent, InputProps, InputStrategy, InputView, Key,
    TextBuffer,
};
use crate::model::{DATE_FORMAT, Value};

/// Date input in `YYYY-MM-DD` form.
///
/// A complete, valid date is emitted as `Value::Date`, an empty field as
/// `Value::Null`. Anything else stays `Value::Text` so the column validator
/// (`Rules::date`) can reject it with a message.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateInput;

impl InputStrategy for DateInput {
    fn name(&self) -> &'static str {
        "date"
    }

    fn create(&self, props: &InputProps) -> Box<dyn CellInput> {
        Box::new(DateField {
            buffer: TextBuffer::new(props.value.display()),
            focused: props.auto_focus,
        })
    }
}

/// Parse date text the way the input commits it.
pub(crate) fn parse_date(text: &str) -> Value {
    let text = text.trim();
    if text.is_empty() {
        return Value::Null;
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map(Value::Date)
        .unwrap_or_else(|_| Value::from(text))
}

#[derive(Debug)]
struct DateField {
    buffer: TextBuffer,
    focused: bool,
}

impl CellInput for DateField {
    fn handle(&mut self, event: &InputEvent, props: &InputProps) -> Vec<InputAction> {
        if props.is_locked() {
            return Vec::new();
        }
        if matches!(event, InputEvent::Blur) {
            self.focused = false;
        }
        if let Some(actions) = handle_commit_event(event, props, || parse_date(self.buffer.text())) {
            return actions;
        }
        match event {
            InputEvent::Key(Key::Char(c)) if !(c.is_ascii_digit() || *c == '-') => Vec::new(),
            InputEvent::Key(key) => {
                self.focused = true;
                if self.buffer.apply(*key) {
                    vec![InputAction::Change(parse_date(self.buffer.text()))]
                } else {
                    Vec::new()
                }
            }
            _ => Vec::new(),
        }
    }

    fn view(&self, props: &InputProps) -> InputView {
        InputView::new(
            "date",
            Control::Text {
                text: self.buffer.text().to_string(),
                cursor: self.buffer.cursor(),
                selected_all: false,
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
    use crate::behavior::EditBehavior;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2023-02-20"),
            Value::Date(NaiveDate::from_ymd_opt(2023, 2, 20).unwrap())
        );
        assert_eq!(parse_date(""), Value::Null);
        assert_eq!(parse_date("2023-02-30"), Value::from("2023-02-30"));
    }

    #[test]
    fn test_editing_day_commits_date() {
        let start = Value::Date(NaiveDate::from_ymd_opt(2023, 1, 15).unwrap());
        let props = InputProps::new(start, EditBehavior::click_to_edit());
        let mut input = DateInput.create(&props);
        input.handle(&InputEvent::Key(Key::Backspace), &props);
        input.handle(&InputEvent::Key(Key::Char('8')), &props);
        assert!(input.handle(&InputEvent::Key(Key::Char('x')), &props).is_empty());
        assert_eq!(
            input.handle(&InputEvent::Key(Key::Enter), &props),
            vec![
                InputAction::Change(Value::Date(NaiveDate::from_ymd_opt(2023, 1, 18).unwrap())),
                InputAction::Save
            ]
        );
    }
}
