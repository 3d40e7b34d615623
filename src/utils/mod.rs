//! Shared utilities.
//!
//! - [`cookie`]: building and clearing the `refresh` cookie

pub mod cookie;
