//! # Simulated Groth16 Proof System
//!
//! Fabricates a Groth16-shaped proof payload for the age-verification
//! demo. The group-element slots (`pi_a`, `pi_b`, `pi_c`) are filled with
//! random decimal integers; the only real content is the public signal
//! carrying the age comparison result as `"1"` or `"0"`.
//!
//! ## How It Works
//!
//! - `prove()` evaluates the [`AgeCircuit`] directly, draws random
//!   integers for the payload, and appends the comparison flag as
//!   `public_signals[0]`.
//! - `verify()` reads `public_signals[0]` and answers `true` iff it
//!   equals `"1"`. Any other value, or an empty signal list, answers
//!   `false`.
//!
//! ## Security Warning
//!
//! **NOT A PROOF.** The payload carries no binding guarantee and can be
//! forged by writing the desired flag into the public signals. It exists
//! so the surrounding flow (extraction → proof → verification → login)
//! exercises realistic shapes end to end.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::age::{AgeCircuit, SIGNAL_OVER_AGE};
use crate::traits::{ProofError, ProofSystem, VerifyError};

/// A Groth16-shaped proof payload with random stand-in group elements.
///
/// Field names and nesting mirror the snarkjs output format so the wire
/// envelope is indistinguishable from a real prover's at the JSON level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeProofPayload {
    /// G1 element stand-in: two random coordinates and the affine marker.
    pub pi_a: [String; 3],
    /// G2 element stand-in: coordinate pairs plus the affine marker pair.
    pub pi_b: [[String; 2]; 3],
    /// G1 element stand-in.
    pub pi_c: [String; 3],
    /// Proof system tag, always `"groth16"`.
    pub protocol: String,
}

/// The wire envelope: proof payload plus ordered public signals.
///
/// Created per verification request and consumed immediately — never
/// persisted. `public_signals[0]` carries the age flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofData {
    /// The simulated proof payload.
    pub proof: AgeProofPayload,
    /// Ordered public signals; index 0 is the age comparison flag.
    pub public_signals: Vec<String>,
}

/// Simulated verifying key — stateless, nothing to verify against.
#[derive(Debug, Clone, Default)]
pub struct SimulatedVerifyingKey;

/// Simulated proving key — stateless, nothing is committed.
#[derive(Debug, Clone, Default)]
pub struct SimulatedProvingKey;

/// The simulated proof system.
///
/// Implements [`ProofSystem`] with fabricated payloads. Swapping in a real
/// backend means swapping this type; callers depend only on the trait.
#[derive(Debug, Default)]
pub struct SimulatedGroth16;

/// Upper bound for the random stand-in integers, matching the 16-digit
/// values the demo payloads have always carried.
const ELEMENT_BOUND: u64 = 10_000_000_000_000_000;

/// Draw one random group-element stand-in as a decimal string.
fn random_element<R: Rng>(rng: &mut R) -> String {
    rng.gen_range(0..ELEMENT_BOUND).to_string()
}

impl SimulatedGroth16 {
    /// Generate a proof envelope for an age circuit.
    ///
    /// Convenience wrapper over the trait method with the stateless keys
    /// filled in.
    pub fn prove_age(&self, circuit: &AgeCircuit) -> Result<ProofData, ProofError> {
        self.prove(&SimulatedProvingKey, circuit)
    }

    /// Verify a wire envelope.
    ///
    /// Reads the flag out of `envelope.public_signals`; the payload itself
    /// is never inspected. Malformed envelopes answer `false`.
    pub fn verify_envelope(&self, envelope: &ProofData) -> bool {
        // Infallible for the simulated key; the Err arm is unreachable.
        self.verify(
            &SimulatedVerifyingKey,
            envelope,
            &envelope.public_signals,
        )
        .unwrap_or(false)
    }
}

impl ProofSystem for SimulatedGroth16 {
    type Proof = ProofData;
    type VerifyingKey = SimulatedVerifyingKey;
    type ProvingKey = SimulatedProvingKey;
    type Circuit = AgeCircuit;

    /// Fabricate a proof: random payload plus the real comparison flag.
    fn prove(
        &self,
        _pk: &Self::ProvingKey,
        circuit: &Self::Circuit,
    ) -> Result<Self::Proof, ProofError> {
        let mut rng = rand::thread_rng();

        let proof = AgeProofPayload {
            pi_a: [
                random_element(&mut rng),
                random_element(&mut rng),
                "1".to_string(),
            ],
            pi_b: [
                [random_element(&mut rng), random_element(&mut rng)],
                [random_element(&mut rng), random_element(&mut rng)],
                ["1".to_string(), "0".to_string()],
            ],
            pi_c: [
                random_element(&mut rng),
                random_element(&mut rng),
                "1".to_string(),
            ],
            protocol: "groth16".to_string(),
        };

        Ok(ProofData {
            proof,
            public_signals: vec![circuit.public_signal().to_string()],
        })
    }

    /// Read the age flag back out of the public signals.
    ///
    /// True iff `public_signals[0] == "1"`. The proof payload is ignored —
    /// there is nothing cryptographic to check.
    fn verify(
        &self,
        _vk: &Self::VerifyingKey,
        _proof: &ProofData,
        public_signals: &[String],
    ) -> Result<bool, VerifyError> {
        Ok(public_signals.first().map(String::as_str) == Some(SIGNAL_OVER_AGE))
    }
}
