//! The data grid: rows, columns and the editing, selection, dock and menu
//! plumbing around them.

mod column;
mod config;

pub use column::GridColumn;
pub use config::GridConfig;

use std::sync::{Arc, RwLock};

use log::{debug, warn};

use crate::dock::{ActionDock, DockView, GridAction};
use crate::edit::{CellEditConfig, CellEditor, CellView, EditContext, EditCoordinator, EditFailure, SaveHandler};
use crate::error::GridError;
use crate::menu::{CellMenuItem, CellMenuTarget, Clipboard, HeaderColumn, HeaderMenuItem, MemoryClipboard};
use crate::model::{CellId, ColumnId, Record, RowId, RowStore};
use crate::selection::{Selection, SelectionMode};

/// Called with the selected rows, in row order, whenever the selection changes.
pub type SelectionCallback = Arc<dyn Fn(&[Record]) + Send + Sync>;

/// A data grid.
///
/// ```
/// use datagrid_lib::prelude::*;
/// use datagrid_lib::presets;
///
/// let grid = DataGrid::new(vec![Record::with_id("1").set("name", "John")])
///     .config(GridConfig { enable_cell_editing: true, ..Default::default() })
///     .column(GridColumn::new("name", "Name").editable(presets::text::click_to_edit()));
///
/// let cell = grid.cell("1", "name").unwrap();
/// assert_eq!(cell.activate(Gesture::Click), Ok(true));
/// assert_eq!(grid.active_cell(), Some(CellId::new("1", "name")));
/// ```
pub struct DataGrid {
    config: GridConfig,
    columns: Vec<Arc<GridColumn>>,
    ctx: EditContext,
    selection: RwLock<Selection<RowId>>,
    on_row_selection_change: Option<SelectionCallback>,
    actions: Vec<GridAction>,
    cell_menu: Vec<CellMenuItem>,
    header_menu: Vec<HeaderMenuItem>,
    clipboard: Arc<dyn Clipboard>,
}

impl std::fmt::Debug for DataGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataGrid")
            .field("config", &self.config)
            .field("columns", &self.columns)
            .field("rows", &self.ctx.rows.len())
            .field("active_cell", &self.active_cell())
            .field("actions", &self.actions)
            .finish_non_exhaustive()
    }
}

impl DataGrid {
    pub fn new(rows: Vec<Record>) -> Self {
        Self {
            config: GridConfig::default(),
            columns: Vec::new(),
            ctx: EditContext {
                rows: RowStore::new(rows),
                ..Default::default()
            },
            selection: RwLock::new(Selection::default()),
            on_row_selection_change: None,
            actions: Vec::new(),
            cell_menu: Vec::new(),
            header_menu: Vec::new(),
            clipboard: Arc::new(MemoryClipboard::new()),
        }
    }

    // =========================================================================
    // Builder
    // =========================================================================

    /// Apply grid-wide settings. Resets the row selection.
    pub fn config(mut self, config: GridConfig) -> Self {
        self.ctx.default_mode = config.default_edit_mode;
        self.selection = RwLock::new(Selection::new(SelectionMode::from_flags(
            config.enable_row_selection,
            config.enable_multi_row_selection,
        )));
        self.config = config;
        self
    }

    /// Register a column. Questionable edit behaviors are logged, not rejected.
    pub fn column(mut self, column: GridColumn) -> Self {
        if let Some(behavior) = column.edit_config().and_then(|c| c.explicit_behavior()) {
            for warning in behavior.lint() {
                warn!("Column '{}': {}", column.id(), warning);
            }
        }
        self.columns.push(Arc::new(column));
        self
    }

    pub fn columns(self, columns: impl IntoIterator<Item = GridColumn>) -> Self {
        columns.into_iter().fold(self, Self::column)
    }

    /// Save handler for columns without their own `on_save`.
    pub fn on_cell_edit(mut self, handler: impl SaveHandler + 'static) -> Self {
        self.ctx.on_cell_edit = Some(Arc::new(handler));
        self
    }

    /// Called once per failed save.
    pub fn on_cell_edit_error(mut self, f: impl Fn(&EditFailure) + Send + Sync + 'static) -> Self {
        self.ctx.on_cell_edit_error = Some(Arc::new(f));
        self
    }

    pub fn on_row_selection_change(mut self, f: impl Fn(&[Record]) + Send + Sync + 'static) -> Self {
        self.on_row_selection_change = Some(Arc::new(f));
        self
    }

    pub fn action(mut self, action: GridAction) -> Self {
        self.actions.push(action);
        self
    }

    pub fn cell_menu(mut self, items: Vec<CellMenuItem>) -> Self {
        self.cell_menu = items;
        self
    }

    pub fn header_menu(mut self, items: Vec<HeaderMenuItem>) -> Self {
        self.header_menu = items;
        self
    }

    pub fn clipboard(mut self, clipboard: impl Clipboard + 'static) -> Self {
        self.clipboard = Arc::new(clipboard);
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn settings(&self) -> &GridConfig {
        &self.config
    }

    /// The authoritative rows.
    pub fn rows(&self) -> &RowStore {
        &self.ctx.rows
    }

    pub fn coordinator(&self) -> &EditCoordinator {
        &self.ctx.coordinator
    }

    pub fn get_columns(&self) -> &[Arc<GridColumn>] {
        &self.columns
    }

    pub fn get_column(&self, id: &ColumnId) -> Option<&Arc<GridColumn>> {
        self.columns.iter().find(|c| c.id() == id)
    }

    pub fn clipboard_handle(&self) -> &Arc<dyn Clipboard> {
        &self.clipboard
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// Edit controller of a cell.
    ///
    /// Cells of columns without editing, or of a grid with editing switched
    /// off, get a controller that refuses to begin.
    pub fn cell(&self, row: impl Into<RowId>, column: impl Into<ColumnId>) -> Result<CellEditor, GridError> {
        let row = row.into();
        let column = column.into();
        let col = self
            .get_column(&column)
            .ok_or_else(|| GridError::UnknownColumn(column.to_string()))?;
        if !self.ctx.rows.contains(&row) {
            return Err(GridError::UnknownRow(row.to_string()));
        }

        let config = match col.edit_config() {
            Some(config) if self.config.enable_cell_editing => config.clone(),
            _ => Arc::new(CellEditConfig::new().enabled(false)),
        };
        let accessor = col.accessor_key().to_string();
        Ok(CellEditor::new(CellId::new(row, column), accessor, config, self.ctx.clone()))
    }

    /// The cell currently being edited.
    pub fn active_cell(&self) -> Option<CellId> {
        self.ctx.coordinator.active_cell()
    }

    pub fn cell_view(&self, row: impl Into<RowId>, column: impl Into<ColumnId>) -> Result<CellView, GridError> {
        self.cell(row, column).map(|cell| cell.view())
    }

    /// Remove a row, closing its edit session and dropping it from the
    /// selection.
    ///
    /// A session with a save in flight stays open; that save then fails with
    /// `EditError::UnknownRow` and closes it.
    pub fn remove_row(&self, id: &RowId) -> Option<Record> {
        if self.active_cell().is_some_and(|cell| &cell.row_id == id) {
            self.ctx.coordinator.end_edit();
        }
        let removed = self.ctx.rows.remove(id)?;
        debug!("Removed row {}", id);
        let was_selected = self
            .selection
            .write()
            .map(|mut selection| {
                let was = selection.is_selected(id);
                selection.retain(|key| key != id);
                was
            })
            .unwrap_or(false);
        if was_selected {
            self.notify_selection();
        }
        Some(removed)
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Flip selection of a row. Returns `true` if the selection changed.
    pub fn toggle_row_selected(&self, id: &RowId) -> bool {
        if !self.ctx.rows.contains(id) {
            return false;
        }
        let changed = self
            .selection
            .write()
            .map(|mut selection| selection.toggle(id.clone()))
            .unwrap_or(false);
        if changed {
            self.notify_selection();
        }
        changed
    }

    pub fn set_row_selected(&self, id: &RowId, selected: bool) -> bool {
        if !self.ctx.rows.contains(id) {
            return false;
        }
        let changed = self
            .selection
            .write()
            .map(|mut selection| selection.set(id.clone(), selected))
            .unwrap_or(false);
        if changed {
            self.notify_selection();
        }
        changed
    }

    /// Select every row (multi-selection only).
    pub fn select_all_rows(&self) -> bool {
        let ids = self.ctx.rows.ids();
        let changed = self
            .selection
            .write()
            .map(|mut selection| selection.select_all(ids))
            .unwrap_or(false);
        if changed {
            self.notify_selection();
        }
        changed
    }

    pub fn clear_selection(&self) {
        let changed = self
            .selection
            .write()
            .map(|mut selection| {
                let had = !selection.is_empty();
                selection.clear();
                had
            })
            .unwrap_or(false);
        if changed {
            self.notify_selection();
        }
    }

    pub fn is_row_selected(&self, id: &RowId) -> bool {
        self.selection
            .read()
            .map(|selection| selection.is_selected(id))
            .unwrap_or(false)
    }

    /// Selected rows in row order.
    pub fn selected_rows(&self) -> Vec<Record> {
        let Ok(selection) = self.selection.read() else {
            return Vec::new();
        };
        self.ctx
            .rows
            .ids()
            .into_iter()
            .filter(|id| selection.is_selected(id))
            .filter_map(|id| self.ctx.rows.get(&id))
            .collect()
    }

    fn notify_selection(&self) {
        if let Some(f) = &self.on_row_selection_change {
            f(&self.selected_rows());
        }
    }

    // =========================================================================
    // Dock
    // =========================================================================

    pub fn dock_view(&self) -> Option<DockView> {
        ActionDock::view(&self.selected_rows(), &self.actions, self.config.dock_primary_limit)
    }

    /// Run a dock action on the selected rows.
    ///
    /// `Ok(false)` when the action is disabled or failed; failures are logged.
    pub async fn run_action(&self, id: &str) -> Result<bool, GridError> {
        let action = self
            .actions
            .iter()
            .find(|a| a.id() == id)
            .ok_or_else(|| GridError::UnknownAction(id.to_string()))?;
        let rows = self.selected_rows();
        Ok(ActionDock::run(action, &rows).await)
    }

    // =========================================================================
    // Context menus
    // =========================================================================

    /// Cell menu items; empty unless the cell menu is enabled.
    pub fn cell_menu_items(&self) -> &[CellMenuItem] {
        if self.config.enable_cell_context_menu {
            &self.cell_menu
        } else {
            &[]
        }
    }

    /// Header menu items; empty unless the header menu is enabled.
    pub fn header_menu_items(&self) -> &[HeaderMenuItem] {
        if self.config.enable_header_context_menu {
            &self.header_menu
        } else {
            &[]
        }
    }

    pub fn cell_menu_target(
        &self,
        row: impl Into<RowId>,
        column: impl Into<ColumnId>,
    ) -> Result<CellMenuTarget<'_>, GridError> {
        let row_id = row.into();
        let column = column.into();
        let column = self
            .get_column(&column)
            .cloned()
            .ok_or_else(|| GridError::UnknownColumn(column.to_string()))?;
        let row = self
            .ctx
            .rows
            .get(&row_id)
            .ok_or_else(|| GridError::UnknownRow(row_id.to_string()))?;
        Ok(CellMenuTarget {
            grid: self,
            value: row.value(column.accessor_key()),
            row_id,
            row,
            column,
        })
    }

    /// Run a cell menu item by id. `Ok(false)` when it is disabled.
    pub fn run_cell_menu_item(
        &self,
        item: &str,
        row: impl Into<RowId>,
        column: impl Into<ColumnId>,
    ) -> Result<bool, GridError> {
        let target = self.cell_menu_target(row, column)?;
        let item = self
            .cell_menu_items()
            .iter()
            .find(|i| i.id == item)
            .ok_or_else(|| GridError::UnknownAction(item.to_string()))?;
        Ok(item.run(&target))
    }

    /// Run a header menu item by id against the engine's column state.
    pub fn run_header_menu_item(&self, item: &str, column: &mut dyn HeaderColumn) -> Result<bool, GridError> {
        let item = self
            .header_menu_items()
            .iter()
            .find(|i| i.id == item)
            .ok_or_else(|| GridError::UnknownAction(item.to_string()))?;
        Ok(item.run(column))
    }
}
