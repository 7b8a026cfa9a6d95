//! Per-column edit configuration.

use std::fmt;
use std::sync::Arc;

use super::handler::SaveHandler;
use crate::behavior::EditBehavior;
use crate::input::{InputStrategy, TextInput};
use crate::model::{ColumnId, Record, Value};

/// Validator: `Some(message)` rejects the pending value.
pub type ValidateFn = Arc<dyn Fn(&Value, &Record) -> Option<String> + Send + Sync>;

/// Predicate deciding whether a row's cell may be edited at all.
pub type DisabledFn = Arc<dyn Fn(&Record) -> bool + Send + Sync>;

/// Lifecycle callback (`on_cancel`, `on_edit_start`, `on_edit_end`).
pub type RowCallback = Arc<dyn Fn(&Record, &ColumnId) + Send + Sync>;

/// How a column's cells are edited.
///
/// # Example
///
/// ```
/// use datagrid_lib::behavior::EditBehavior;
/// use datagrid_lib::edit::CellEditConfig;
/// use datagrid_lib::input::NumberInput;
/// use datagrid_lib::validation::Rules;
///
/// let config = CellEditConfig::new()
///     .behavior(EditBehavior::double_click_to_edit())
///     .input(NumberInput::new())
///     .validate(Rules::new().min(18.0, "Age must be at least 18").into_fn())
///     .placeholder("Enter age...");
/// assert!(config.is_enabled());
/// ```
#[derive(Clone)]
pub struct CellEditConfig {
    pub(crate) enabled: bool,
    pub(crate) behavior: Option<EditBehavior>,
    pub(crate) input: Arc<dyn InputStrategy>,
    pub(crate) validate: Option<ValidateFn>,
    pub(crate) on_save: Option<Arc<dyn SaveHandler>>,
    pub(crate) on_cancel: Option<RowCallback>,
    pub(crate) on_edit_start: Option<RowCallback>,
    pub(crate) on_edit_end: Option<RowCallback>,
    pub(crate) placeholder: Option<String>,
    pub(crate) disabled: Option<DisabledFn>,
}

impl Default for CellEditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            behavior: None,
            input: Arc::new(TextInput),
            validate: None,
            on_save: None,
            on_cancel: None,
            on_edit_start: None,
            on_edit_end: None,
            placeholder: None,
            disabled: None,
        }
    }
}

impl fmt::Debug for CellEditConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellEditConfig")
            .field("enabled", &self.enabled)
            .field("behavior", &self.behavior)
            .field("input", &self.input.name())
            .field("validate", &self.validate.is_some())
            .field("on_save", &self.on_save.is_some())
            .field("placeholder", &self.placeholder)
            .field("disabled", &self.disabled.is_some())
            .finish_non_exhaustive()
    }
}

impl CellEditConfig {
    /// Enabled text editing with the grid's default behavior.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn behavior(mut self, behavior: EditBehavior) -> Self {
        self.behavior = Some(behavior);
        self
    }

    pub fn input(mut self, input: impl InputStrategy + 'static) -> Self {
        self.input = Arc::new(input);
        self
    }

    pub fn input_arc(mut self, input: Arc<dyn InputStrategy>) -> Self {
        self.input = input;
        self
    }

    pub fn validate(mut self, validate: ValidateFn) -> Self {
        self.validate = Some(validate);
        self
    }

    /// Column-specific save handler; takes precedence over the grid's.
    pub fn on_save(mut self, handler: impl SaveHandler + 'static) -> Self {
        self.on_save = Some(Arc::new(handler));
        self
    }

    pub fn on_cancel(mut self, f: impl Fn(&Record, &ColumnId) + Send + Sync + 'static) -> Self {
        self.on_cancel = Some(Arc::new(f));
        self
    }

    pub fn on_edit_start(mut self, f: impl Fn(&Record, &ColumnId) + Send + Sync + 'static) -> Self {
        self.on_edit_start = Some(Arc::new(f));
        self
    }

    pub fn on_edit_end(mut self, f: impl Fn(&Record, &ColumnId) + Send + Sync + 'static) -> Self {
        self.on_edit_end = Some(Arc::new(f));
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn disabled(mut self, f: impl Fn(&Record) -> bool + Send + Sync + 'static) -> Self {
        self.disabled = Some(Arc::new(f));
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The explicit behavior, if one was set.
    pub fn explicit_behavior(&self) -> Option<&EditBehavior> {
        self.behavior.as_ref()
    }

    pub fn input_strategy(&self) -> &Arc<dyn InputStrategy> {
        &self.input
    }

    pub fn placeholder_text(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    /// Returns `true` if editing is switched off for this row.
    pub fn is_disabled_for(&self, row: &Record) -> bool {
        self.disabled.as_ref().is_some_and(|f| f(row))
    }

    pub(crate) fn run_validate(&self, value: &Value, row: &Record) -> Option<String> {
        self.validate.as_ref().and_then(|f| f(value, row))
    }
}
