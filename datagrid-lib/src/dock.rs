//! Floating action dock for bulk actions on selected rows.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, error};
use serde::{Deserialize, Serialize};

use crate::error::ActionError;
use crate::model::Record;

/// Visual weight of an action button or menu item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionVariant {
    #[default]
    Default,
    Destructive,
    Outline,
    Secondary,
    Ghost,
    Link,
}

/// Runs a bulk action against the selected rows.
///
/// Closures `Fn(Vec<Record>) -> impl Future<Output = Result<(), ActionError>>`
/// implement this trait.
#[async_trait]
pub trait ActionHandler: Send + Sync {
    async fn run(&self, rows: &[Record]) -> Result<(), ActionError>;
}

#[async_trait]
impl<F, Fut> ActionHandler for F
where
    F: Fn(Vec<Record>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), ActionError>> + Send,
{
    async fn run(&self, rows: &[Record]) -> Result<(), ActionError> {
        (self)(rows.to_vec()).await
    }
}

/// Predicate over the selected rows.
pub type RowsPredicate = Arc<dyn Fn(&[Record]) -> bool + Send + Sync>;

/// A bulk action offered while rows are selected.
#[derive(Clone)]
pub struct GridAction {
    id: String,
    label: String,
    variant: ActionVariant,
    handler: Arc<dyn ActionHandler>,
    visible: Option<RowsPredicate>,
    enabled: Option<RowsPredicate>,
}

impl std::fmt::Debug for GridAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridAction")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("variant", &self.variant)
            .finish_non_exhaustive()
    }
}

impl GridAction {
    pub fn new(id: impl Into<String>, label: impl Into<String>, handler: impl ActionHandler + 'static) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            variant: ActionVariant::Default,
            handler: Arc::new(handler),
            visible: None,
            enabled: None,
        }
    }

    pub fn variant(mut self, variant: ActionVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Show the action only when `f` holds for the selection.
    pub fn visible_when(mut self, f: impl Fn(&[Record]) -> bool + Send + Sync + 'static) -> Self {
        self.visible = Some(Arc::new(f));
        self
    }

    /// Grey the action out unless `f` holds for the selection.
    pub fn enabled_when(mut self, f: impl Fn(&[Record]) -> bool + Send + Sync + 'static) -> Self {
        self.enabled = Some(Arc::new(f));
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_visible(&self, rows: &[Record]) -> bool {
        self.visible.as_ref().is_none_or(|f| f(rows))
    }

    pub fn is_enabled(&self, rows: &[Record]) -> bool {
        self.enabled.as_ref().is_none_or(|f| f(rows))
    }
}

/// One rendered action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockButton {
    pub id: String,
    pub label: String,
    pub variant: ActionVariant,
    pub enabled: bool,
}

/// Render model of the dock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockView {
    /// Number of selected rows, shown on the clear-selection button.
    pub selected_count: usize,
    /// Buttons shown directly in the dock.
    pub primary: Vec<DockButton>,
    /// Buttons behind the "More" dropdown.
    pub overflow: Vec<DockButton>,
}

impl DockView {
    /// Label of the clear-selection button.
    pub fn selection_label(&self) -> String {
        format!("{} selected", self.selected_count)
    }
}

/// Builds and runs the dock.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionDock;

impl ActionDock {
    /// Number of actions shown before the rest overflow.
    pub const DEFAULT_PRIMARY_LIMIT: usize = 3;

    /// Dock for `selected`, or `None` when there is nothing to show.
    pub fn view(selected: &[Record], actions: &[GridAction], primary_limit: usize) -> Option<DockView> {
        if selected.is_empty() || actions.is_empty() {
            return None;
        }

        let mut buttons = actions
            .iter()
            .filter(|action| action.is_visible(selected))
            .map(|action| DockButton {
                id: action.id.clone(),
                label: action.label.clone(),
                variant: action.variant,
                enabled: action.is_enabled(selected),
            })
            .collect::<Vec<_>>();
        let overflow = buttons.split_off(primary_limit.min(buttons.len()));

        Some(DockView {
            selected_count: selected.len(),
            primary: buttons,
            overflow,
        })
    }

    /// Run `action` against `rows`. Failures are logged, not propagated.
    ///
    /// Returns `true` if the action ran and succeeded.
    pub async fn run(action: &GridAction, rows: &[Record]) -> bool {
        if !action.is_enabled(rows) {
            debug!("Action '{}' is disabled for the current selection", action.id);
            return false;
        }
        debug!("Running action '{}' on {} rows", action.id, rows.len());
        match action.handler.run(rows).await {
            Ok(()) => true,
            Err(e) => {
                error!("Action '{}' failed: {}", action.id, e);
                false
            }
        }
    }
}
