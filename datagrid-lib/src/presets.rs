//! Ready-made column edit configurations.
//!
//! ```
//! use datagrid_lib::presets;
//!
//! let age = presets::number::range(18.0, 100.0);
//! assert_eq!(age.placeholder_text(), Some("Enter number (18-100)..."));
//! ```

use crate::behavior::EditBehavior;
use crate::edit::CellEditConfig;

/// Fill in click-to-edit unless `config` already has a behavior.
pub fn quick_edit(config: CellEditConfig) -> CellEditConfig {
    with_default_behavior(config, EditBehavior::click_to_edit())
}

/// `config` with the click-to-edit behavior.
pub fn click_to_edit(config: CellEditConfig) -> CellEditConfig {
    config.enabled(true).behavior(EditBehavior::click_to_edit())
}

/// `config` with explicit save and cancel buttons.
pub fn click_with_buttons(config: CellEditConfig) -> CellEditConfig {
    config.enabled(true).behavior(EditBehavior::click_with_buttons())
}

/// `config` opened by double click.
pub fn double_click_to_edit(config: CellEditConfig) -> CellEditConfig {
    config.enabled(true).behavior(EditBehavior::double_click_to_edit())
}

fn with_default_behavior(config: CellEditConfig, behavior: EditBehavior) -> CellEditConfig {
    if config.explicit_behavior().is_some() {
        config.enabled(true)
    } else {
        config.enabled(true).behavior(behavior)
    }
}

pub mod text {
    use super::*;
    use crate::input::TextInput;
    use crate::validation::Rules;

    fn base() -> CellEditConfig {
        CellEditConfig::new().input(TextInput).placeholder("Enter text...")
    }

    pub fn click_to_edit() -> CellEditConfig {
        super::click_to_edit(base())
    }

    pub fn with_buttons() -> CellEditConfig {
        super::click_with_buttons(base())
    }

    /// Text that may not be blank.
    pub fn required() -> CellEditConfig {
        super::click_to_edit(base().validate(Rules::new().required("This field is required").into_fn()))
    }
}

pub mod number {
    use super::*;
    use crate::input::NumberInput;
    use crate::validation::Rules;

    pub fn basic() -> CellEditConfig {
        click_to_edit(CellEditConfig::new().input(NumberInput::new()).placeholder("Enter number..."))
    }

    /// Zero or greater.
    pub fn positive() -> CellEditConfig {
        click_to_edit(
            CellEditConfig::new()
                .input(NumberInput::new())
                .placeholder("Enter positive number...")
                .validate(Rules::new().positive("Must be positive").into_fn()),
        )
    }

    /// Between `min` and `max`, inclusive.
    pub fn range(min: f64, max: f64) -> CellEditConfig {
        click_to_edit(
            CellEditConfig::new()
                .input(NumberInput::new())
                .placeholder(format!("Enter number ({}-{})...", min, max))
                .validate(Rules::new().range(min, max).into_fn()),
        )
    }
}

pub mod boolean {
    use super::*;
    use crate::input::CheckboxInput;

    pub fn checkbox() -> CellEditConfig {
        click_to_edit(CellEditConfig::new().input(CheckboxInput))
    }
}

pub mod date {
    use super::*;
    use crate::input::DateInput;

    pub fn basic() -> CellEditConfig {
        click_to_edit(CellEditConfig::new().input(DateInput))
    }

    pub fn with_buttons() -> CellEditConfig {
        click_with_buttons(CellEditConfig::new().input(DateInput))
    }
}

pub mod email {
    use super::*;
    use crate::input::EmailInput;
    use crate::validation::Rules;

    pub fn basic() -> CellEditConfig {
        click_to_edit(
            CellEditConfig::new()
                .input(EmailInput)
                .placeholder("Enter email...")
                .validate(Rules::new().email("Invalid email format").into_fn()),
        )
    }
}
