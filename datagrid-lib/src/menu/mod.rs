//! Context menus for cells and column headers.
//!
//! Items are plain data plus a synchronous action. Bundles of the usual
//! items are available as [`common_cell_items`] and [`common_header_items`];
//! the individual constructors can be mixed with custom items freely.

mod cell;
mod clipboard;
mod header;

pub use cell::*;
pub use clipboard::{Clipboard, MemoryClipboard};
pub use header::*;
