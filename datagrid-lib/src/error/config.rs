//! Configuration lint warnings

use crate::behavior::Trigger;

/// A questionable edit behavior combination.
///
/// Behaviors are never rejected at build time. These warnings are logged
/// when a column is registered so that redundant or dead commit paths are
/// visible instead of silently picking one interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigWarning {
    /// Action buttons are shown but saving also fires on a non-manual trigger.
    ButtonsWithAutomaticSave(Trigger),
    /// Action buttons are shown but cancelling also fires on a non-manual trigger.
    ButtonsWithAutomaticCancel(Trigger),
    /// The trigger is in both sets; it will always save.
    TriggerInBothSets(Trigger),
    /// No reachable trigger commits the pending value.
    NoSavePath,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ButtonsWithAutomaticSave(trigger) => write!(
                f,
                "action buttons are shown but '{}' also saves; both paths can commit",
                trigger
            ),
            Self::ButtonsWithAutomaticCancel(trigger) => write!(
                f,
                "action buttons are shown but '{}' also cancels; both paths can discard",
                trigger
            ),
            Self::TriggerInBothSets(trigger) => write!(
                f,
                "'{}' is both a save and a cancel trigger; save takes precedence",
                trigger
            ),
            Self::NoSavePath => write!(f, "no trigger can save this cell"),
        }
    }
}
