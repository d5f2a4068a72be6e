//! Resolved Declaration Types
//!
//! This crate contains the data structures handed to the proxy generator by
//! the declaration-resolution front end: subjects, their members, and the
//! type references those members use. It holds pure data with a few query
//! helpers and performs no file I/O or code generation.

pub mod members;
pub mod types;

// Re-export commonly used types at the crate root
pub use members::*;
pub use types::*;
