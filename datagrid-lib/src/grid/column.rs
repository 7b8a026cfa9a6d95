//! Column definitions.

use std::sync::Arc;

use crate::edit::CellEditConfig;
use crate::menu::ColumnState;
use crate::model::ColumnId;

/// A grid column: identity, the row field it shows and what it allows.
#[derive(Debug, Clone)]
pub struct GridColumn {
    id: ColumnId,
    header: String,
    accessor: String,
    sortable: bool,
    filterable: bool,
    hideable: bool,
    pinnable: bool,
    resizable: bool,
    size: Option<u16>,
    edit: Option<Arc<CellEditConfig>>,
}

impl GridColumn {
    /// Column reading the row field named like its id.
    pub fn new(id: impl Into<String>, header: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            accessor: id.clone(),
            id: ColumnId::new(id),
            header: header.into(),
            sortable: true,
            filterable: true,
            hideable: true,
            pinnable: true,
            resizable: true,
            size: None,
            edit: None,
        }
    }

    /// Read and write a different row field.
    pub fn accessor(mut self, key: impl Into<String>) -> Self {
        self.accessor = key.into();
        self
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self
    }

    pub fn hideable(mut self, hideable: bool) -> Self {
        self.hideable = hideable;
        self
    }

    pub fn pinnable(mut self, pinnable: bool) -> Self {
        self.pinnable = pinnable;
        self
    }

    pub fn resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    pub fn size(mut self, size: u16) -> Self {
        self.size = Some(size);
        self
    }

    /// Make the column editable.
    pub fn editable(mut self, config: CellEditConfig) -> Self {
        self.edit = Some(Arc::new(config));
        self
    }

    pub fn id(&self) -> &ColumnId {
        &self.id
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn accessor_key(&self) -> &str {
        &self.accessor
    }

    pub fn edit_config(&self) -> Option<&Arc<CellEditConfig>> {
        self.edit.as_ref()
    }

    /// Returns `true` if the column has an enabled edit configuration.
    pub fn is_editable(&self) -> bool {
        self.edit.as_ref().is_some_and(|c| c.is_enabled())
    }

    /// Initial header state for the table engine.
    pub fn header_state(&self) -> ColumnState {
        ColumnState {
            id: self.id.clone(),
            sortable: self.sortable,
            filterable: self.filterable,
            pinnable: self.pinnable,
            hideable: self.hideable,
            resizable: self.resizable,
            size: self.size,
            ..Default::default()
        }
    }
}
