//! Grid-wide configuration.

use serde::{Deserialize, Serialize};

use crate::behavior::EditMode;
use crate::dock::ActionDock;
use crate::error::GridError;

/// Grid-wide switches.
///
/// Loadable from JSON with camelCase keys; missing keys take their defaults.
///
/// ```
/// use datagrid_lib::GridConfig;
/// use datagrid_lib::behavior::EditMode;
///
/// let config = GridConfig::from_json(r#"{ "enableCellEditing": true, "defaultEditMode": "double-click" }"#).unwrap();
/// assert!(config.enable_cell_editing);
/// assert_eq!(config.default_edit_mode, EditMode::DoubleClick);
/// assert!(config.enable_multi_row_selection);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    /// Master switch for inline editing.
    pub enable_cell_editing: bool,
    /// Opening gesture for columns without an explicit behavior.
    pub default_edit_mode: EditMode,
    pub enable_row_selection: bool,
    pub enable_multi_row_selection: bool,
    pub enable_cell_context_menu: bool,
    pub enable_header_context_menu: bool,
    /// Dock actions shown before the rest overflow into "More".
    pub dock_primary_limit: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            enable_cell_editing: false,
            default_edit_mode: EditMode::Click,
            enable_row_selection: false,
            enable_multi_row_selection: true,
            enable_cell_context_menu: false,
            enable_header_context_menu: false,
            dock_primary_limit: ActionDock::DEFAULT_PRIMARY_LIMIT,
        }
    }
}

impl GridConfig {
    pub fn from_json(json: &str) -> Result<Self, GridError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, GridError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
