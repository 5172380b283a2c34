//! Application layer
//!
//! Use cases that orchestrate domain services for workflows which span
//! more than one aggregate or port.

pub mod auth;
pub mod invoice;
