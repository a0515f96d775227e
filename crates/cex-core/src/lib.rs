#![deny(missing_docs)]

//! # cex-core — Foundational Types for the CEX Demo Stack
//!
//! This crate defines the foundational types that every other crate in the
//! workspace depends on. It has no internal crate dependencies — only `serde`,
//! `serde_json`, `thiserror`, and `chrono` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** An [`AssetSymbol`] is not a
//!    bare `String`; construction validates format once and the rest of the
//!    stack can rely on it.
//!
//! 2. **Range-validated calendar dates.** [`DateInfo`] enforces the ranges the
//!    document scanner can actually guarantee (month 1–12, day 1–31, year
//!    1900..=current) and nothing more. Callers must not assume full calendar
//!    validity.
//!
//! 3. **[`CexError`] hierarchy.** Structured errors with `thiserror` — no
//!    `Box<dyn Error>`, no `.unwrap()` outside tests.

pub mod calendar;
pub mod error;
pub mod market;
pub mod temporal;

// Re-export primary types at crate root for ergonomic imports.
pub use calendar::DateInfo;
pub use error::{CexError, StorageError, ValidationError};
pub use market::{AssetSymbol, TradeSide};
pub use temporal::Timestamp;
