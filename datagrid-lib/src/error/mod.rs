//! Error types

mod action;
mod config;
mod edit;
mod grid;
mod save;

pub use action::*;
pub use config::*;
pub use edit::*;
pub use grid::*;
pub use save::*;
