//! Edit behavior descriptor types.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::ConfigWarning;

/// Which pointer gesture opens a cell for editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EditMode {
    #[default]
    Click,
    DoubleClick,
}

impl EditMode {
    /// Hover hint shown on a display cell.
    pub fn hint(&self) -> &'static str {
        match self {
            Self::Click => "Click to edit",
            Self::DoubleClick => "Double-click to edit",
        }
    }
}

/// A pointer gesture on a display cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    Click,
    DoubleClick,
}

/// An event that can save or cancel a pending edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Trigger {
    /// The input lost focus.
    Blur,
    /// The Enter key.
    Enter,
    /// The Escape key.
    Escape,
    /// An explicit request: an action button or a host call.
    Manual,
}

impl std::fmt::Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Blur => "blur",
            Self::Enter => "enter",
            Self::Escape => "escape",
            Self::Manual => "manual",
        };
        f.write_str(name)
    }
}

/// Where the save/cancel buttons sit relative to the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ButtonPosition {
    #[default]
    TopRight,
    BottomRight,
}

/// What a trigger resolves to under a given behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerAction {
    Save,
    Cancel,
}

/// Declarative configuration of which gestures open, save and cancel an edit.
///
/// Immutable once built. Inconsistent combinations are legal; see
/// [`EditBehavior::lint`] for the warnings they produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditBehavior {
    pub(super) mode: EditMode,
    pub(super) save_on: BTreeSet<Trigger>,
    pub(super) cancel_on: BTreeSet<Trigger>,
    pub(super) show_action_buttons: bool,
    pub(super) button_position: ButtonPosition,
    pub(super) auto_focus: bool,
    pub(super) select_all_on_focus: bool,
}

impl Default for EditBehavior {
    fn default() -> Self {
        Self::click_to_edit()
    }
}

impl EditBehavior {
    // =========================================================================
    // Presets
    // =========================================================================

    /// Single click opens; Enter or blur saves; Escape cancels.
    pub fn click_to_edit() -> Self {
        Self {
            mode: EditMode::Click,
            save_on: BTreeSet::from([Trigger::Blur, Trigger::Enter]),
            cancel_on: BTreeSet::from([Trigger::Escape]),
            show_action_buttons: false,
            button_position: ButtonPosition::TopRight,
            auto_focus: true,
            select_all_on_focus: true,
        }
    }

    /// Double click opens; Enter or blur saves; Escape cancels.
    pub fn double_click_to_edit() -> Self {
        Self {
            mode: EditMode::DoubleClick,
            ..Self::click_to_edit()
        }
    }

    /// Single click opens; only the save/cancel buttons commit or discard.
    pub fn click_with_buttons() -> Self {
        Self {
            mode: EditMode::Click,
            save_on: BTreeSet::from([Trigger::Manual]),
            cancel_on: BTreeSet::from([Trigger::Manual]),
            show_action_buttons: true,
            ..Self::click_to_edit()
        }
    }

    /// Returns a copy with a different opening gesture.
    pub fn with_mode(&self, mode: EditMode) -> Self {
        Self {
            mode,
            ..self.clone()
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn save_triggers(&self) -> impl Iterator<Item = Trigger> + '_ {
        self.save_on.iter().copied()
    }

    pub fn cancel_triggers(&self) -> impl Iterator<Item = Trigger> + '_ {
        self.cancel_on.iter().copied()
    }

    pub fn show_action_buttons(&self) -> bool {
        self.show_action_buttons
    }

    pub fn button_position(&self) -> ButtonPosition {
        self.button_position
    }

    pub fn auto_focus(&self) -> bool {
        self.auto_focus
    }

    pub fn select_all_on_focus(&self) -> bool {
        self.select_all_on_focus
    }

    // =========================================================================
    // Trigger matching
    // =========================================================================

    /// Returns `true` if the gesture opens this cell for editing.
    pub fn matches_gesture(&self, gesture: Gesture) -> bool {
        matches!(
            (self.mode, gesture),
            (EditMode::Click, Gesture::Click) | (EditMode::DoubleClick, Gesture::DoubleClick)
        )
    }

    pub fn saves_on(&self, trigger: Trigger) -> bool {
        self.save_on.contains(&trigger)
    }

    pub fn cancels_on(&self, trigger: Trigger) -> bool {
        self.cancel_on.contains(&trigger)
    }

    /// Resolves a trigger against both sets. The save set is checked first.
    pub fn resolve(&self, trigger: Trigger) -> Option<TriggerAction> {
        if self.saves_on(trigger) {
            Some(TriggerAction::Save)
        } else if self.cancels_on(trigger) {
            Some(TriggerAction::Cancel)
        } else {
            None
        }
    }

    // =========================================================================
    // Lint
    // =========================================================================

    /// Reports ambiguous or dead trigger combinations.
    ///
    /// Never fails; callers decide whether to log or surface the warnings.
    pub fn lint(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.show_action_buttons {
            warnings.extend(
                self.save_triggers()
                    .filter(|t| *t != Trigger::Manual)
                    .map(ConfigWarning::ButtonsWithAutomaticSave),
            );
            warnings.extend(
                self.cancel_triggers()
                    .filter(|t| *t != Trigger::Manual)
                    .map(ConfigWarning::ButtonsWithAutomaticCancel),
            );
        }

        warnings.extend(
            self.save_on
                .intersection(&self.cancel_on)
                .copied()
                .map(ConfigWarning::TriggerInBothSets),
        );

        if self.save_on.is_empty() && !self.show_action_buttons {
            warnings.push(ConfigWarning::NoSavePath);
        }

        warnings
    }
}
