//! Challenge functions
//!
//! A challenge binds the commitment `r` to the message data. The prover and
//! the verifier must use the same function.
//!
//! - `AdditiveChallenge`: the legacy `(r + data) mod prime`. Reversible and
//!   collision-prone (data values congruent modulo `prime` share a challenge),
//!   kept for interoperability with existing verifiers.
//! - `Sha256Challenge`, `Blake2bChallenge`: hash `r || data` and reduce.
//!
//! # Example
//!
//! ```rust
//! use compliance_fort::crypto::{AdditiveChallenge, ChallengeFunction};
//! use compliance_fort::params::GroupParams;
//!
//! let c = AdditiveChallenge.challenge(22, 100, &GroupParams::default());
//! assert_eq!(c, 7);
//! ```

use crate::arith::reduce_signed;
use crate::params::GroupParams;
use blake2::Blake2b512;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Derives the challenge from a commitment and the message data
pub trait ChallengeFunction: Send + Sync {
    /// Challenge for commitment `commitment` over `data`, in `[0, prime)`
    fn challenge(&self, commitment: u64, data: i32, params: &GroupParams) -> u64;
}

/// Legacy challenge: `(r + data) mod prime`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdditiveChallenge;

impl ChallengeFunction for AdditiveChallenge {
    fn challenge(&self, commitment: u64, data: i32, params: &GroupParams) -> u64 {
        reduce_signed(commitment as i64 + data as i64, params.prime())
    }
}

/// SHA-256 over `r || data`, reduced modulo `prime`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha256Challenge;

impl ChallengeFunction for Sha256Challenge {
    fn challenge(&self, commitment: u64, data: i32, params: &GroupParams) -> u64 {
        let mut hasher = Sha256::new();
        Digest::update(&mut hasher, commitment.to_be_bytes());
        Digest::update(&mut hasher, data.to_be_bytes());
        digest_to_residue(&Digest::finalize(hasher), params.prime())
    }
}

/// Blake2b-512 over `r || data`, reduced modulo `prime`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Blake2bChallenge;

impl ChallengeFunction for Blake2bChallenge {
    fn challenge(&self, commitment: u64, data: i32, params: &GroupParams) -> u64 {
        let mut hasher = Blake2b512::new();
        Digest::update(&mut hasher, commitment.to_be_bytes());
        Digest::update(&mut hasher, data.to_be_bytes());
        digest_to_residue(&Digest::finalize(hasher), params.prime())
    }
}

// First 8 digest bytes, big-endian
fn digest_to_residue(digest: &[u8], modulus: u64) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes) % modulus
}

/// Challenge function selected by name in configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeKind {
    #[default]
    Additive,
    Sha256,
    Blake2b,
}

impl ChallengeFunction for ChallengeKind {
    fn challenge(&self, commitment: u64, data: i32, params: &GroupParams) -> u64 {
        match self {
            ChallengeKind::Additive => AdditiveChallenge.challenge(commitment, data, params),
            ChallengeKind::Sha256 => Sha256Challenge.challenge(commitment, data, params),
            ChallengeKind::Blake2b => Blake2bChallenge.challenge(commitment, data, params),
        }
    }
}
