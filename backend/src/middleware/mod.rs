//! Request middleware.
//!
//! Purpose: define middleware for request lifecycle concerns, currently
//! trace-identifier correlation.

pub mod trace;

pub use trace::Trace;
