//! Prover for Schnorr-style identity proofs
//!
//! This module provides the Prover struct, which turns a secret key and a
//! message into a two-part proof `(r, s)`.
//!
//! # Method
//!
//! 1. Nonce: `k` from the configured `NonceSource`
//! 2. Commitment: `r = g^k mod p`
//! 3. Challenge: `c = challenge(r, data)`
//! 4. Response: `s = (k - c * sk) mod (p - 1)`, normalised into `[0, p - 2]`
//!
//! # Example
//!
//! ```rust
//! use compliance_fort::proof::Prover;
//!
//! let prover = Prover::default();
//! let keys = prover.keypair(7);
//! let msg = prover.create_proof(1, 100, keys.secret_key, keys.public_key);
//! assert_eq!((msg.proof_r, msg.proof_s), (22, 6));
//! ```

use crate::arith::mod_pow;
use crate::crypto::{AdditiveChallenge, ChallengeFunction, IdDerivedNonce, NonceSource};
use crate::params::GroupParams;
use crate::types::{derive_public_key, KeyPair, Message};

/// Prover for generating proofs
///
/// Generic over the nonce source and the challenge function; the defaults
/// reproduce the legacy protocol.
#[derive(Debug, Clone)]
pub struct Prover<N = IdDerivedNonce, C = AdditiveChallenge> {
    /// Group parameters
    params: GroupParams,
    nonce: N,
    challenge: C,
}

impl Prover {
    /// Create a legacy prover over the given parameters
    ///
    /// # Arguments
    /// * `params` - Group parameters
    ///
    /// # Returns
    /// New `Prover` instance
    pub fn new(params: GroupParams) -> Self {
        Self::with_capabilities(params, IdDerivedNonce, AdditiveChallenge)
    }
}

impl Default for Prover {
    fn default() -> Self {
        Self::new(GroupParams::default())
    }
}

impl<N: NonceSource, C: ChallengeFunction> Prover<N, C> {
    /// Create a prover with an explicit nonce source and challenge function
    pub fn with_capabilities(params: GroupParams, nonce: N, challenge: C) -> Self {
        Self {
            params,
            nonce,
            challenge,
        }
    }

    /// Derive the public key for `secret_key`
    pub fn derive_public_key(&self, secret_key: i32) -> i32 {
        derive_public_key(&self.params, secret_key)
    }

    /// Derive a full key pair for `secret_key`
    pub fn keypair(&self, secret_key: i32) -> KeyPair {
        KeyPair::from_secret(&self.params, secret_key)
    }

    /// Create a proof that the holder of `secret_key` produced `data`
    ///
    /// # Arguments
    /// * `id` - Message identifier (feeds the legacy nonce)
    /// * `data` - Payload the proof attests to
    /// * `secret_key` - Prover's secret key
    /// * `public_key` - Public key copied into the message
    ///
    /// # Returns
    /// The proof-bearing `Message`
    pub fn create_proof(&self, id: i32, data: i32, secret_key: i32, public_key: i32) -> Message {
        let p = self.params.prime();
        let order = self.params.order() as i128;

        let k = self.nonce.nonce(id, &self.params);
        let r = mod_pow(self.params.generator(), k, p);
        let c = self.challenge.challenge(r, data, &self.params);

        let s = (k as i128 - c as i128 * secret_key as i128).rem_euclid(order);

        log::trace!("proof for message {}: r={} c={} s={}", id, r, c, s);

        Message {
            id,
            data,
            proof_r: r as i32,
            proof_s: s as i32,
            public_key,
        }
    }

    /// Get the parameters used by this prover
    pub fn params(&self) -> &GroupParams {
        &self.params
    }
}
