#![deny(missing_docs)]

//! # cex-ocr — Date Extraction from Recognized Document Text
//!
//! Best-effort extraction of a birth date from the raw text an external
//! image-to-text engine produces for an ID document. The extractor applies
//! an ordered list of patterns and returns the first structurally valid
//! match.
//!
//! ## Architecture
//!
//! - **Patterns** (`pattern.rs`): the ordered pattern list and the
//!   hand-rolled byte scanners that find candidate matches. OCR output is
//!   messy enough that anchored parsing is useless; every scanner searches
//!   the whole text for its shape.
//!
//! - **Extraction** (`extract.rs`): disambiguation of numeric triples,
//!   range validation via [`cex_core::DateInfo`], and the public
//!   [`extract_date_from_text`] entry point.
//!
//! ## Accuracy Notice
//!
//! This is a heuristic, not a parser. Ambiguous numeric triples are read
//! as month/day/year (US-style IDs) unless the month token exceeds 12, in
//! which case month and day are swapped. Dates that pass range validation
//! may still be calendar-invalid; see `DateInfo` for the contract.

pub mod extract;
pub mod pattern;

pub use extract::{extract_date_from_text, ExtractError};
