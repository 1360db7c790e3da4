//! Task graph model and makefile parsing
//!
//! This module turns makefile text into an immutable [`TaskGraph`] and
//! handles locating the makefile on disk.

pub mod load;
pub mod parse;
pub mod types;

// Re-export main types
pub use load::*;
pub use parse::*;
pub use types::*;
