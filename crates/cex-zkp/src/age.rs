//! # Age-Check Circuit
//!
//! The input bundle for an age comparison proof: birth date, current date,
//! and the minimum age threshold. The circuit's single public signal is
//! the comparison result — `"1"` when the computed age meets the
//! threshold, `"0"` otherwise.
//!
//! The date of birth is the *private* input: a real circuit would commit
//! to it without revealing it. The simulation keeps the shape but not the
//! privacy.

use cex_core::DateInfo;
use serde::{Deserialize, Serialize};

/// Public signal emitted when the age threshold is met.
pub const SIGNAL_OVER_AGE: &str = "1";

/// Public signal emitted when the age threshold is not met.
pub const SIGNAL_UNDER_AGE: &str = "0";

/// Inputs to the age comparison circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeCircuit {
    /// The prover's date of birth (private input).
    pub birth_date: DateInfo,
    /// The date the comparison is evaluated at.
    pub current_date: DateInfo,
    /// Minimum age threshold (e.g. 18).
    pub min_age: u32,
}

impl AgeCircuit {
    /// Evaluate the comparison: is the prover at least `min_age` years old
    /// on `current_date`?
    pub fn satisfied(&self) -> bool {
        let age = self.birth_date.age_at(&self.current_date);
        age >= 0 && (age as u32) >= self.min_age
    }

    /// The circuit's public signal: [`SIGNAL_OVER_AGE`] or
    /// [`SIGNAL_UNDER_AGE`].
    pub fn public_signal(&self) -> &'static str {
        if self.satisfied() {
            SIGNAL_OVER_AGE
        } else {
            SIGNAL_UNDER_AGE
        }
    }
}
