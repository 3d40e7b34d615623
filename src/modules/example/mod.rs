//! Role-check routes, mounted only in debug mode.

pub mod controller;
pub mod router;
