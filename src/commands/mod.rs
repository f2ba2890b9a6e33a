//! Command handlers
//!
//! User-level actions of the parser: forwarding a link to a parse service,
//! visiting a platform, detecting the browser's URL and the interactive
//! history-tracked entry. The CLI binary is a thin layer over these.

pub mod entry;
pub mod link;
pub mod parse;
pub mod platform;

// Re-export all command functions for easy access
pub use entry::*;
pub use link::*;
pub use parse::*;
pub use platform::*;
