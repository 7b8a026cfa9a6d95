//! Fluent builder for edit behaviors.

use std::collections::BTreeSet;

use super::{ButtonPosition, EditBehavior, EditMode, Trigger};

/// Builder for [`EditBehavior`].
///
/// Every step consumes the builder and returns a new one, so a partially
/// configured builder can be cloned and branched without shared state.
/// Starts from [`EditBehavior::click_to_edit`]. No validation happens in
/// [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct BehaviorBuilder {
    behavior: EditBehavior,
}

impl BehaviorBuilder {
    /// Creates a builder with click-to-edit defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing behavior.
    pub fn from_behavior(behavior: EditBehavior) -> Self {
        Self { behavior }
    }

    fn map(self, f: impl FnOnce(EditBehavior) -> EditBehavior) -> Self {
        Self {
            behavior: f(self.behavior),
        }
    }

    /// Open on a single click.
    pub fn click_to_edit(self) -> Self {
        self.map(|b| EditBehavior {
            mode: EditMode::Click,
            ..b
        })
    }

    /// Open on a double click.
    pub fn double_click_to_edit(self) -> Self {
        self.map(|b| EditBehavior {
            mode: EditMode::DoubleClick,
            ..b
        })
    }

    /// Add a save trigger.
    pub fn save_on(self, trigger: Trigger) -> Self {
        self.map(|mut b| {
            b.save_on.insert(trigger);
            b
        })
    }

    /// Add a cancel trigger.
    pub fn cancel_on(self, trigger: Trigger) -> Self {
        self.map(|mut b| {
            b.cancel_on.insert(trigger);
            b
        })
    }

    /// Save when the input loses focus.
    pub fn save_on_blur(self) -> Self {
        self.save_on(Trigger::Blur)
    }

    /// Save on the Enter key.
    pub fn save_on_enter(self) -> Self {
        self.save_on(Trigger::Enter)
    }

    /// Cancel on the Escape key.
    pub fn cancel_on_escape(self) -> Self {
        self.cancel_on(Trigger::Escape)
    }

    /// Show save/cancel buttons and commit only through them.
    ///
    /// Replaces both trigger sets with `{manual}`.
    pub fn with_action_buttons(self, position: ButtonPosition) -> Self {
        self.map(|b| EditBehavior {
            show_action_buttons: true,
            button_position: position,
            save_on: BTreeSet::from([Trigger::Manual]),
            cancel_on: BTreeSet::from([Trigger::Manual]),
            ..b
        })
    }

    /// Hide the save/cancel buttons. Trigger sets are left as they are.
    pub fn without_action_buttons(self) -> Self {
        self.map(|b| EditBehavior {
            show_action_buttons: false,
            ..b
        })
    }

    /// Do not focus the input when editing starts.
    pub fn no_auto_focus(self) -> Self {
        self.map(|b| EditBehavior {
            auto_focus: false,
            ..b
        })
    }

    /// Do not select the existing text when the input is focused.
    pub fn no_text_selection(self) -> Self {
        self.map(|b| EditBehavior {
            select_all_on_focus: false,
            ..b
        })
    }

    /// Freeze into an immutable descriptor.
    pub fn build(self) -> EditBehavior {
        self.behavior
    }
}
