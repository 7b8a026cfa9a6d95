//! Numeric input.

use super::{
    handle_commit_event, CellInput, Control, InputAction, InputEvent, InputProps, InputStrategy, InputView, Key,
    TextBuffer,
};
use crate::model::Value;

/// Numeric input with optional bounds.
///
/// Integers are produced as `Value::Int`, anything else that parses as
/// `Value::Float`. An unparsable entry commits as `0`. With bounds set, a
/// value outside them is never emitted as a change, so the last in-range
/// value is what gets saved.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberInput {
    min: Option<f64>,
    max: Option<f64>,
}

impl NumberInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict accepted values to `min..=max`.
    pub fn bounded(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }
}

impl InputStrategy for NumberInput {
    fn name(&self) -> &'static str {
        "number"
    }

    fn create(&self, props: &InputProps) -> Box<dyn CellInput> {
        let text = match &props.value {
            Value::Null => String::new(),
            other => other.display(),
        };
        let buffer = TextBuffer::new(text);
        Box::new(NumberField {
            buffer: if props.auto_focus && props.select_all_on_focus { buffer.select_all() } else { buffer },
            min: self.min,
            max: self.max,
            focused: props.auto_focus,
        })
    }
}

/// Parse a number the way the input commits it.
pub(crate) fn parse_number(text: &str) -> Option<Value> {
    let text = text.trim();
    if let Ok(i) = text.parse::<i64>() {
        return Some(Value::Int(i));
    }
    text.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(Value::Float)
}

fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E')
}

#[derive(Debug)]
struct NumberField {
    buffer: TextBuffer,
    min: Option<f64>,
    max: Option<f64>,
    focused: bool,
}

impl NumberField {
    fn in_bounds(&self, value: &Value) -> bool {
        let Some(n) = value.as_f64() else {
            return true;
        };
        self.min.is_none_or(|min| n >= min) && self.max.is_none_or(|max| n <= max)
    }

    fn committed(&self) -> Value {
        parse_number(self.buffer.text()).unwrap_or(Value::Int(0))
    }
}

impl CellInput for NumberField {
    fn handle(&mut self, event: &InputEvent, props: &InputProps) -> Vec<InputAction> {
        if props.is_locked() {
            return Vec::new();
        }
        if matches!(event, InputEvent::Blur) {
            self.focused = false;
        }
        if let Some(actions) = handle_commit_event(event, props, || self.committed()) {
            // Out-of-range commits save the previous pending value.
            return actions
                .into_iter()
                .filter(|action| match action {
                    InputAction::Change(value) => self.in_bounds(value),
                    _ => true,
                })
                .collect();
        }
        match event {
            InputEvent::Key(Key::Char(c)) if !is_number_char(*c) => Vec::new(),
            InputEvent::Key(key) => {
                self.focused = true;
                if !self.buffer.apply(*key) {
                    return Vec::new();
                }
                match parse_number(self.buffer.text()) {
                    Some(value) if self.in_bounds(&value) => vec![InputAction::Change(value)],
                    _ => Vec::new(),
                }
            }
            _ => Vec::new(),
        }
    }

    fn view(&self, props: &InputProps) -> InputView {
        InputView::new(
            "number",
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
