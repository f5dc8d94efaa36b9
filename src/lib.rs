#![allow(nonstandard_style)]

pub mod controller;
pub mod error_handling;
pub mod evaluating;
pub mod formatting;
pub mod mode;
pub mod parsing;
pub mod scanning;
pub mod settings;
pub mod variables;

pub use controller::{Command, Controller};
pub use error_handling::{CalcError, ErrorKind, Result};
pub use evaluating::{evaluate, Evaluator};
pub use formatting::{format, group_digits, FormattedOutput};
pub use mode::{mode_label, Mode};
pub use settings::Settings;
pub use variables::{Variable, VariableStore};
