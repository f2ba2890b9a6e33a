//! Utility modules and helper functions
//!
//! Platform adapters (browser, keyboard, clipboard) and shared helpers.

pub mod browser;
pub mod input;
pub mod logging;
pub mod validation;

// Re-export commonly used utilities
pub use browser::*;
pub use input::*;
pub use logging::*;
pub use validation::*;
