//! Cell context menu items.

use std::sync::Arc;

use log::{debug, warn};

use crate::dock::ActionVariant;
use crate::grid::{DataGrid, GridColumn};
use crate::model::{Record, RowId, Value};

/// The cell a context menu was opened on.
pub struct CellMenuTarget<'a> {
    pub grid: &'a DataGrid,
    pub row_id: RowId,
    /// Snapshot of the row when the menu was opened.
    pub row: Record,
    pub column: Arc<GridColumn>,
    /// Committed value of the cell.
    pub value: Value,
}

pub type CellAction = Arc<dyn Fn(&CellMenuTarget<'_>) + Send + Sync>;
pub type CellPredicate = Arc<dyn Fn(&CellMenuTarget<'_>) -> bool + Send + Sync>;

/// An entry of the cell context menu.
#[derive(Clone)]
pub struct CellMenuItem {
    pub id: String,
    pub label: String,
    pub variant: ActionVariant,
    pub separator: bool,
    action: CellAction,
    enabled: Option<CellPredicate>,
}

impl std::fmt::Debug for CellMenuItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CellMenuItem")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("variant", &self.variant)
            .field("separator", &self.separator)
            .finish_non_exhaustive()
    }
}

impl CellMenuItem {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        action: impl Fn(&CellMenuTarget<'_>) + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            variant: ActionVariant::Default,
            separator: false,
            action: Arc::new(action),
            enabled: None,
        }
    }

    /// A divider line.
    pub fn separator(id: impl Into<String>) -> Self {
        Self {
            separator: true,
            ..Self::new(id, "", |_| {})
        }
    }

    pub fn variant(mut self, variant: ActionVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn enabled_when(mut self, f: impl Fn(&CellMenuTarget<'_>) -> bool + Send + Sync + 'static) -> Self {
        self.enabled = Some(Arc::new(f));
        self
    }

    pub fn is_enabled(&self, target: &CellMenuTarget<'_>) -> bool {
        !self.separator && self.enabled.as_ref().is_none_or(|f| f(target))
    }

    /// Run the item. Returns `false` for separators and disabled items.
    pub fn run(&self, target: &CellMenuTarget<'_>) -> bool {
        if !self.is_enabled(target) {
            return false;
        }
        debug!("Cell menu '{}' on {}:{}", self.id, target.row_id, target.column.id());
        (self.action)(target);
        true
    }
}

// =============================================================================
// Built-in items
// =============================================================================

/// Copies the displayed cell value.
pub fn copy_cell() -> CellMenuItem {
    CellMenuItem::new("copy-cell", "Copy Cell", |t| t.grid.clipboard_handle().write_text(t.value.display()))
}

/// Copies the row as pretty JSON.
pub fn copy_row() -> CellMenuItem {
    CellMenuItem::new("copy-row", "Copy Row", |t| t.grid.clipboard_handle().write_text(t.row.to_json()))
}

/// Opens the cell for editing; disabled on columns without editing.
pub fn edit_cell() -> CellMenuItem {
    edit_cell_with(|t| {
        let result = t
            .grid
            .cell(t.row_id.clone(), t.column.id().clone())
            .map_err(|e| e.to_string())
            .and_then(|editor| editor.begin().map_err(|e| e.to_string()));
        if let Err(e) = result {
            warn!("Cannot edit {}:{}: {}", t.row_id, t.column.id(), e);
        }
    })
}

/// "Edit Cell" running `on_edit` instead of opening the editor.
pub fn edit_cell_with(on_edit: impl Fn(&CellMenuTarget<'_>) + Send + Sync + 'static) -> CellMenuItem {
    CellMenuItem::new("edit-cell", "Edit Cell", on_edit).enabled_when(|t| t.column.is_editable())
}

/// Removes the row from the grid.
pub fn delete_row() -> CellMenuItem {
    CellMenuItem::new("delete-row", "Delete Row", |t| {
        t.grid.remove_row(&t.row_id);
    })
    .variant(ActionVariant::Destructive)
}

/// "Delete Row" handing the row to `on_delete` instead.
pub fn delete_row_with(on_delete: impl Fn(&RowId, &Record) + Send + Sync + 'static) -> CellMenuItem {
    custom_delete("delete-row", "Delete Row", on_delete)
}

/// Toggles selection of the row.
pub fn select_row() -> CellMenuItem {
    CellMenuItem::new("select-row", "Toggle Selection", |t| {
        t.grid.toggle_row_selected(&t.row_id);
    })
}

pub fn view_details(on_view: impl Fn(&RowId, &Record) + Send + Sync + 'static) -> CellMenuItem {
    CellMenuItem::new("view-details", "View Details", move |t| on_view(&t.row_id, &t.row))
}

/// Copy item with a custom text extractor.
pub fn custom_copy(
    id: impl Into<String>,
    label: impl Into<String>,
    get_text: impl Fn(&CellMenuTarget<'_>) -> String + Send + Sync + 'static,
) -> CellMenuItem {
    CellMenuItem::new(id, label, move |t| t.grid.clipboard_handle().write_text(get_text(t)))
}

pub fn custom_edit(
    id: impl Into<String>,
    label: impl Into<String>,
    on_edit: impl Fn(&CellMenuTarget<'_>) + Send + Sync + 'static,
) -> CellMenuItem {
    CellMenuItem::new(id, label, on_edit)
}

pub fn custom_delete(
    id: impl Into<String>,
    label: impl Into<String>,
    on_delete: impl Fn(&RowId, &Record) + Send + Sync + 'static,
) -> CellMenuItem {
    CellMenuItem::new(id, label, move |t| on_delete(&t.row_id, &t.row)).variant(ActionVariant::Destructive)
}

/// Copy cell, copy row, separator, toggle selection.
pub fn common_cell_items() -> Vec<CellMenuItem> {
    vec![copy_cell(), copy_row(), CellMenuItem::separator("sep-1"), select_row()]
}
