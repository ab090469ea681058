//! Project parameter form: the ordered value store and the key-driven field
//! descriptions the UI is generated from.

mod fields;
mod store;

pub use fields::*;
pub use store::*;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Unknown form field: {0}")]
    UnknownField(String),

    #[error("Invalid assignment (expected key=value): {0}")]
    InvalidAssignment(String),
}
