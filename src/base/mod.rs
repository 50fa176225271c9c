//! Foundation types shared by every other module.
//!
//! - [`FileId`] - compact identifier for a compilation unit
//! - [`TextRange`], [`TextSize`] - byte-offset source positions
//!
//! This module has NO dependencies on other slnscope modules.

mod file_id;

pub use file_id::FileId;

// Re-export text-size types for convenience (the same types rowan builds on)
pub use text_size::{TextRange, TextSize};
