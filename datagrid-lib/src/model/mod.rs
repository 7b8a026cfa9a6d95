//! Row, cell and value types shared by the grid.

mod cell;
mod record;
mod store;
mod value;

pub use cell::*;
pub use record::Record;
pub use store::RowStore;
pub use value::{DATE_FORMAT, Value};
