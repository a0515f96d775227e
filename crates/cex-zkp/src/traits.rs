//! # Proof System Trait
//!
//! Defines the abstract interface for zero-knowledge proof systems.
//! All implementations (the current simulation, future Groth16/PLONK
//! backends) must satisfy this trait.
//!
//! ## Invariant
//!
//! The trait requires `Send + Sync` bounds for safe concurrent access.
//! Proof generation and verification have no side effects beyond RNG use.

use thiserror::Error;

/// Error during proof generation.
#[derive(Error, Debug)]
pub enum ProofError {
    /// The circuit inputs are malformed or unsatisfiable.
    #[error("circuit error: {0}")]
    Circuit(String),
    /// Internal prover failure.
    #[error("prover error: {0}")]
    Prover(String),
}

/// Error during proof verification.
///
/// Malformed *payloads* are not errors — they verify as `false` (a forged
/// or truncated envelope is simply an invalid proof). Errors are reserved
/// for conditions local callers can fix, like an incompatible key.
#[derive(Error, Debug)]
pub enum VerifyError {
    /// The verifying key is incompatible with this proof.
    #[error("key mismatch: {0}")]
    KeyMismatch(String),
}

/// Abstract interface for a zero-knowledge proof system.
///
/// Each implementation provides its own proof, key, and circuit types.
/// The trait keeps the simulated and real implementations interchangeable
/// at compile time.
pub trait ProofSystem: Send + Sync {
    /// The proof type produced by this system.
    type Proof: Send + Sync;
    /// The verifying key type.
    type VerifyingKey: Clone + Send + Sync;
    /// The proving key type.
    type ProvingKey: Send + Sync;
    /// The circuit input bundle.
    type Circuit: Send + Sync;

    /// Generate a proof for the circuit.
    fn prove(
        &self,
        pk: &Self::ProvingKey,
        circuit: &Self::Circuit,
    ) -> Result<Self::Proof, ProofError>;

    /// Verify a proof against its public signals.
    ///
    /// Returns `Ok(false)` for invalid or malformed material; `Err` only
    /// for key-level misuse.
    fn verify(
        &self,
        vk: &Self::VerifyingKey,
        proof: &Self::Proof,
        public_signals: &[String],
    ) -> Result<bool, VerifyError>;
}
