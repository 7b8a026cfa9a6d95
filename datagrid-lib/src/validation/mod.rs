//! Validation rules for cell edits.
//!
//! A column validator is any `Fn(&Value, &Record) -> Option<String>`; this
//! module offers a fluent way to build one from common rules.
//!
//! # Example
//!
//! ```
//! use datagrid_lib::model::{Record, Value};
//! use datagrid_lib::validation::Rules;
//!
//! let rules = Rules::new()
//!     .required("Name is required")
//!     .min_length(2, "Name must be at least 2 characters");
//!
//! let row = Record::new();
//! assert_eq!(rules.check(&Value::from("J"), &row).as_deref(), Some("Name must be at least 2 characters"));
//! assert_eq!(rules.check(&Value::from("Janet"), &row), None);
//! ```

mod rules;

pub use rules::Rules;
