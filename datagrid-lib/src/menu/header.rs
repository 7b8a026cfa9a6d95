//! Column header context menu items.

use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::dock::ActionVariant;
use crate::model::{ColumnId, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinSide {
    Left,
    Right,
}

/// The table engine's view of a column, as far as header menus need it.
///
/// Sorting, filtering and layout themselves are computed elsewhere; header
/// items only read and flip this state.
pub trait HeaderColumn {
    fn id(&self) -> &ColumnId;

    fn can_sort(&self) -> bool;
    fn sorted(&self) -> Option<SortDirection>;
    fn set_sorting(&mut self, direction: Option<SortDirection>);

    fn can_filter(&self) -> bool;
    fn filter_value(&self) -> Option<&Value>;
    fn set_filter_value(&mut self, value: Option<Value>);

    fn can_pin(&self) -> bool;
    fn pinned(&self) -> Option<PinSide>;
    fn pin(&mut self, side: Option<PinSide>);

    fn can_hide(&self) -> bool;
    fn is_visible(&self) -> bool;
    fn set_visible(&mut self, visible: bool);

    fn can_resize(&self) -> bool;
    fn reset_size(&mut self);
}

/// In-memory [`HeaderColumn`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColumnState {
    pub id: ColumnId,
    pub sortable: bool,
    pub filterable: bool,
    pub pinnable: bool,
    pub hideable: bool,
    pub resizable: bool,
    pub sort: Option<SortDirection>,
    pub filter: Option<Value>,
    pub pin: Option<PinSide>,
    pub visible: bool,
    /// Explicit width; `None` is the default size.
    pub size: Option<u16>,
}

impl Default for ColumnState {
    fn default() -> Self {
        Self {
            id: ColumnId::new(""),
            sortable: true,
            filterable: true,
            pinnable: true,
            hideable: true,
            resizable: true,
            sort: None,
            filter: None,
            pin: None,
            visible: true,
            size: None,
        }
    }
}

impl ColumnState {
    pub fn new(id: impl Into<ColumnId>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

impl HeaderColumn for ColumnState {
    fn id(&self) -> &ColumnId {
        &self.id
    }

    fn can_sort(&self) -> bool {
        self.sortable
    }

    fn sorted(&self) -> Option<SortDirection> {
        self.sort
    }

    fn set_sorting(&mut self, direction: Option<SortDirection>) {
        self.sort = direction;
    }

    fn can_filter(&self) -> bool {
        self.filterable
    }

    fn filter_value(&self) -> Option<&Value> {
        self.filter.as_ref()
    }

    fn set_filter_value(&mut self, value: Option<Value>) {
        self.filter = value;
    }

    fn can_pin(&self) -> bool {
        self.pinnable
    }

    fn pinned(&self) -> Option<PinSide> {
        self.pin
    }

    fn pin(&mut self, side: Option<PinSide>) {
        self.pin = side;
    }

    fn can_hide(&self) -> bool {
        self.hideable
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn can_resize(&self) -> bool {
        self.resizable
    }

    fn reset_size(&mut self) {
        self.size = None;
    }
}

pub type HeaderAction = Arc<dyn Fn(&mut dyn HeaderColumn) + Send + Sync>;
pub type HeaderPredicate = Arc<dyn Fn(&dyn HeaderColumn) -> bool + Send + Sync>;

/// An entry of the header context menu.
#[derive(Clone)]
pub struct HeaderMenuItem {
    pub id: String,
    pub label: String,
    pub variant: ActionVariant,
    pub separator: bool,
    action: HeaderAction,
    enabled: Option<HeaderPredicate>,
}

impl std::fmt::Debug for HeaderMenuItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeaderMenuItem")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("separator", &self.separator)
            .finish_non_exhaustive()
    }
}

impl HeaderMenuItem {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        action: impl Fn(&mut dyn HeaderColumn) + Send + Sync + 'static,
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

    pub fn enabled_when(mut self, f: impl Fn(&dyn HeaderColumn) -> bool + Send + Sync + 'static) -> Self {
        self.enabled = Some(Arc::new(f));
        self
    }

    pub fn is_enabled(&self, column: &dyn HeaderColumn) -> bool {
        !self.separator && self.enabled.as_ref().is_none_or(|f| f(column))
    }

    /// Run the item. Returns `false` for separators and disabled items.
    pub fn run(&self, column: &mut dyn HeaderColumn) -> bool {
        if !self.is_enabled(column) {
            return false;
        }
        debug!("Header menu '{}' on {}", self.id, column.id());
        (self.action)(column);
        true
    }
}

// =============================================================================
// Built-in items
// =============================================================================

pub fn sort_ascending() -> HeaderMenuItem {
    HeaderMenuItem::new("sort-asc", "Sort Ascending", |c| c.set_sorting(Some(SortDirection::Asc)))
        .enabled_when(|c| c.can_sort())
}

pub fn sort_descending() -> HeaderMenuItem {
    HeaderMenuItem::new("sort-desc", "Sort Descending", |c| c.set_sorting(Some(SortDirection::Desc)))
        .enabled_when(|c| c.can_sort())
}

pub fn clear_sort() -> HeaderMenuItem {
    HeaderMenuItem::new("clear-sort", "Clear Sort", |c| c.set_sorting(None)).enabled_when(|c| c.sorted().is_some())
}

/// "Filter Column"; only records the request. Use [`filter_column_with`] to
/// open a real filter UI.
pub fn filter_column() -> HeaderMenuItem {
    filter_column_with(|c| debug!("Filter requested for column {}", c.id()))
}

pub fn filter_column_with(on_filter: impl Fn(&mut dyn HeaderColumn) + Send + Sync + 'static) -> HeaderMenuItem {
    HeaderMenuItem::new("filter-column", "Filter Column", on_filter).enabled_when(|c| c.can_filter())
}

pub fn clear_filter() -> HeaderMenuItem {
    HeaderMenuItem::new("clear-filter", "Clear Filter", |c| c.set_filter_value(None))
        .enabled_when(|c| c.filter_value().is_some())
}

pub fn pin_left() -> HeaderMenuItem {
    HeaderMenuItem::new("pin-left", "Pin Left", |c| c.pin(Some(PinSide::Left)))
        .enabled_when(|c| c.can_pin() && c.pinned() != Some(PinSide::Left))
}

pub fn pin_right() -> HeaderMenuItem {
    HeaderMenuItem::new("pin-right", "Pin Right", |c| c.pin(Some(PinSide::Right)))
        .enabled_when(|c| c.can_pin() && c.pinned() != Some(PinSide::Right))
}

pub fn unpin_column() -> HeaderMenuItem {
    HeaderMenuItem::new("unpin-column", "Unpin Column", |c| c.pin(None)).enabled_when(|c| c.pinned().is_some())
}

pub fn hide_column() -> HeaderMenuItem {
    HeaderMenuItem::new("hide-column", "Hide Column", |c| c.set_visible(false)).enabled_when(|c| c.can_hide())
}

pub fn show_column() -> HeaderMenuItem {
    HeaderMenuItem::new("show-column", "Show Column", |c| c.set_visible(true)).enabled_when(|c| !c.is_visible())
}

pub fn auto_resize_column() -> HeaderMenuItem {
    HeaderMenuItem::new("auto-resize", "Auto Resize", |c| c.reset_size()).enabled_when(|c| c.can_resize())
}

/// Sorting, filtering, pinning and visibility items with separators.
pub fn common_header_items() -> Vec<HeaderMenuItem> {
    vec![
        sort_ascending(),
        sort_descending(),
        clear_sort(),
        HeaderMenuItem::separator("sep-1"),
        filter_column(),
        clear_filter(),
        HeaderMenuItem::separator("sep-2"),
        pin_left(),
        pin_right(),
        unpin_column(),
        HeaderMenuItem::separator("sep-3"),
        hide_column(),
        auto_resize_column(),
    ]
}
