//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod dataset;
pub mod error;
pub mod key_action;

// Re-export for convenience
pub use dataset::{Dataset, DatasetError, Row};
pub use error::AppError;
pub use key_action::KeyAction;
