//! # API Middleware
//!
//! Request-level middleware for the CEX API surface.

pub mod metrics;
