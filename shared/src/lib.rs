//! Account Service Shared Library
//!
//! Wire types, the token error taxonomy and request validation shared by
//! the backend and its test harnesses.

pub mod errors;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use types::*;
