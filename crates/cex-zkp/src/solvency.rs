//! # Solvency Attestation
//!
//! A transparent SHA-256 attestation over an exchange solvency report.
//! Deterministic and recomputable by anyone holding the report — it
//! proves integrity of the published figures, not their truth, and it is
//! **not** a zero-knowledge proof of reserves.
//!
//! The digest is computed over the report's canonical JSON with sorted
//! keys (serde_json's map ordering for a struct is declaration order,
//! which is fixed here), so byte-identical reports produce identical
//! attestations.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use cex_core::Timestamp;

use crate::traits::ProofError;

/// Published solvency figures, in whole USD.
///
/// Integer amounts keep the digest deterministic; float formatting
/// variance would break recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolvencyReport {
    /// Total exchange assets.
    pub total_assets: u64,
    /// Total customer liabilities.
    pub total_liabilities: u64,
    /// Assets attested under proof of reserves.
    pub proof_of_reserves: u64,
}

impl SolvencyReport {
    /// Whether assets cover liabilities.
    pub fn is_solvent(&self) -> bool {
        self.total_assets >= self.total_liabilities
    }
}

/// A report plus its transparent digest and issue time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolvencyAttestation {
    /// The attested report.
    #[serde(flatten)]
    pub report: SolvencyReport,
    /// Hex-encoded SHA-256 over the report's canonical JSON.
    pub attestation: String,
    /// When the attestation was produced.
    pub last_updated: Timestamp,
}

impl SolvencyAttestation {
    /// Attest a report at the current time.
    pub fn issue(report: SolvencyReport) -> Result<Self, ProofError> {
        Ok(Self {
            attestation: digest_report(&report)?,
            report,
            last_updated: Timestamp::now(),
        })
    }

    /// Recompute the digest and compare. True iff the figures match the
    /// attestation.
    pub fn is_consistent(&self) -> bool {
        digest_report(&self.report)
            .map(|expected| expected == self.attestation)
            .unwrap_or(false)
    }
}

/// Hex-encoded SHA-256 over the report's canonical JSON bytes.
fn digest_report(report: &SolvencyReport) -> Result<String, ProofError> {
    let bytes = serde_json::to_vec(report)
        .map_err(|e| ProofError::Prover(format!("report serialization failed: {e}")))?;
    let digest = Sha256::digest(&bytes);
    Ok(digest.iter().map(|b| format!("{b:02x}")).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> SolvencyReport {
        SolvencyReport {
            total_assets: 2_450_000_000,
            total_liabilities: 1_820_000_000,
            proof_of_reserves: 2_100_000_000,
        }
    }

    #[test]
    fn digest_is_64_hex_chars() {
        let att = SolvencyAttestation::issue(report()).unwrap();
        assert_eq!(att.attestation.len(), 64);
        assert!(att.attestation.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn digest_is_deterministic() {
        let a = SolvencyAttestation::issue(report()).unwrap();
        let b = SolvencyAttestation::issue(report()).unwrap();
        assert_eq!(a.attestation, b.attestation);
    }

    #[test]
    fn different_reports_produce_different_digests() {
        let mut other = report();
        other.total_assets += 1;
        let a = SolvencyAttestation::issue(report()).unwrap();
        let b = SolvencyAttestation::issue(other).unwrap();
        assert_ne!(a.attestation, b.attestation);
    }

    #[test]
    fn consistency_check_detects_tampering() {
        let mut att = SolvencyAttestation::issue(report()).unwrap();
        assert!(att.is_consistent());

        att.report.total_liabilities += 1;
        assert!(!att.is_consistent());
    }

    #[test]
    fn solvency_comparison() {
        assert!(report().is_solvent());
        let underwater = SolvencyReport {
            total_assets: 1,
            total_liabilities: 2,
            proof_of_reserves: 1,
        };
        assert!(!underwater.is_solvent());
    }

    #[test]
    fn attestation_serde_flattens_report() {
        let att = SolvencyAttestation::issue(report()).unwrap();
        let json = serde_json::to_value(&att).unwrap();
        assert!(json.get("totalAssets").is_some());
        assert!(json.get("attestation").is_some());
        assert!(json.get("lastUpdated").is_some());
    }
}
