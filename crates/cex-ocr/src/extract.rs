//! # Date Extraction
//!
//! Resolves raw pattern matches into validated [`DateInfo`] values and
//! exposes the public entry point.
//!
//! ## Disambiguation
//!
//! A numeric triple carries no format marker, so year position is inferred:
//! a leading token above 1000 is the year (Y/M/D); otherwise a trailing
//! token above 1000 is the year and the triple reads month/day/year, with
//! month and day swapped when the month token exceeds 12 (US-style IDs
//! are the common case). Triples with no such token are abandoned and
//! scanning falls through to the next pattern.

use cex_core::DateInfo;
use thiserror::Error;

use crate::pattern::{NumericTriple, RawMatch, PATTERN_ORDER};

/// Extraction failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// No pattern produced a structurally valid, range-valid date.
    #[error("could not find a valid date pattern in the text")]
    NoDateFound,
}

/// Extract the first valid date from recognized document text.
///
/// Applies the ordered pattern list; the first match that disambiguates
/// and passes range validation wins. Later patterns are still tried when
/// an earlier pattern matches but fails validation.
pub fn extract_date_from_text(text: &str) -> Result<DateInfo, ExtractError> {
    for pattern in PATTERN_ORDER {
        let Some(raw) = pattern.find(text) else {
            continue;
        };
        if let Some(date) = resolve(raw) {
            return Ok(date);
        }
    }
    Err(ExtractError::NoDateFound)
}

/// Resolve a raw match into a range-validated date, or `None` when the
/// match cannot be disambiguated or fails validation.
fn resolve(raw: RawMatch) -> Option<DateInfo> {
    let (year, month, day) = match raw {
        RawMatch::MonthName { month, day, year } => (year, month, day),
        RawMatch::Numeric(triple) => disambiguate(triple)?,
    };
    DateInfo::new(i32::try_from(year).ok()?, month, day).ok()
}

/// Infer year/month/day positions for a numeric triple.
fn disambiguate(triple: NumericTriple) -> Option<(u32, u32, u32)> {
    let [first, second, third] = triple.values;

    if first > 1000 {
        return Some((first, second, third));
    }

    if third > 1000 {
        // Month/day/year, swapping when the month slot cannot be a month.
        let (month, day) = if first > 12 {
            (second, first)
        } else {
            (first, second)
        };
        return Some((third, month, day));
    }

    None
}
