//! Request middleware.
//!
//! Purpose: lifecycle concerns shared by every route, currently request
//! tracing.

pub mod trace;

pub use trace::Trace;
