//! Verifier for Schnorr-style identity proofs
//!
//! A proof `(r, s)` over `data` is accepted iff
//! `g^s * pk^challenge(r, data) mod p == r`.
//!
//! Verification is total: any input, including out-of-range or negative
//! fields, yields `true` or `false`.
//!
//! # Example
//!
//! ```rust
//! use compliance_fort::proof::Verifier;
//! use compliance_fort::types::Message;
//!
//! let verifier = Verifier::default();
//! let msg = Message::new(1, 100, 22, 6, 17);
//! assert!(verifier.verify_proof(&msg, 17));
//! assert!(!verifier.verify_proof(&msg, 16));
//! ```

use crate::arith::{mod_mul, mod_pow, reduce_signed};
use crate::crypto::{AdditiveChallenge, ChallengeFunction};
use crate::params::GroupParams;
use crate::types::Message;

/// Verifier for proof-bearing messages
///
/// Must be built with the same challenge function as the prover.
#[derive(Debug, Clone)]
pub struct Verifier<C = AdditiveChallenge> {
    /// Group parameters
    params: GroupParams,
    challenge: C,
}

impl Verifier {
    /// Create a legacy verifier over the given parameters
    ///
    /// # Arguments
    /// * `params` - Group parameters
    ///
    /// # Returns
    /// New `Verifier` instance
    pub fn new(params: GroupParams) -> Self {
        Self::with_challenge(params, AdditiveChallenge)
    }
}

impl Default for Verifier {
    fn default() -> Self {
        Self::new(GroupParams::default())
    }
}

impl<C: ChallengeFunction> Verifier<C> {
    /// Create a verifier with an explicit challenge function
    pub fn with_challenge(params: GroupParams, challenge: C) -> Self {
        Self { params, challenge }
    }

    /// Verify a message's proof against `public_key`
    ///
    /// # Arguments
    /// * `message` - The proof-bearing message
    /// * `public_key` - The verifier's reference key (not `message.public_key`)
    ///
    /// # Returns
    /// `true` if the verification equation holds, `false` otherwise
    pub fn verify_proof(&self, message: &Message, public_key: i32) -> bool {
        // A negative response has no exponent meaning
        if message.proof_s < 0 {
            return false;
        }

        let p = self.params.prime();
        let r = message.proof_r as i64;

        // The equation only produces residues in [0, p), so an r outside
        // that range can never satisfy it
        if r < 0 || r >= p as i64 {
            return false;
        }

        let c = self.challenge.challenge(r as u64, message.data, &self.params);
        let pk = reduce_signed(public_key as i64, p);

        let lhs = mod_mul(
            mod_pow(self.params.generator(), message.proof_s as u64, p),
            mod_pow(pk, c, p),
            p,
        );

        let valid = lhs == r as u64;
        log::trace!("verify message {}: {}", message.id, valid);
        valid
    }

    /// Verify a message against the public key it carries
    pub fn verify_self_signed(&self, message: &Message) -> bool {
        self.verify_proof(message, message.public_key)
    }

    /// Get the parameters used by this verifier
    pub fn params(&self) -> &GroupParams {
        &self.params
    }
}
