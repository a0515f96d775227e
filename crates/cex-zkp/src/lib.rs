#![deny(missing_docs)]

//! # cex-zkp — Simulated Zero-Knowledge Proof Flow
//!
//! Defines the trait-based proof system abstraction and the simulated
//! implementation used by the age-verification flow.
//!
//! ## Architecture
//!
//! - **Traits** (`traits.rs`): The `ProofSystem` trait defines the interface
//!   that all proof system implementations must satisfy, so the simulation
//!   and a future real backend are interchangeable at compile time.
//!
//! - **Age circuit** (`age.rs`): The input bundle for an age comparison —
//!   birth date, current date, minimum age — and its single public signal.
//!
//! - **Simulation** (`simulated.rs`): `SimulatedGroth16` fabricates a
//!   Groth16-shaped payload from random integers and encodes the age
//!   comparison result as a plaintext public signal. Verification reads
//!   the signal back. **No cryptography is involved.**
//!
//! - **Solvency** (`solvency.rs`): a transparent SHA-256 attestation digest
//!   over a solvency report — deterministic and recomputable by anyone,
//!   also not a ZK proof.
//!
//! ## Security Notice
//!
//! Nothing in this crate binds a statement to a secret. The "proofs" are
//! placeholders that can be forged trivially by writing the desired flag
//! into the public signals. Real backends (arkworks Groth16, halo2 PLONK)
//! would replace `SimulatedGroth16` behind the same trait.

pub mod age;
pub mod simulated;
pub mod solvency;
pub mod traits;

pub use age::AgeCircuit;
pub use simulated::{AgeProofPayload, ProofData, SimulatedGroth16};
pub use solvency::{SolvencyAttestation, SolvencyReport};
pub use traits::{ProofError, ProofSystem, VerifyError};
