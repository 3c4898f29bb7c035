//! Nonce sources
//!
//! The prover draws one nonce `k` in `[1, prime - 1]` per proof.
//!
//! `IdDerivedNonce` is the legacy formula `((id * 3 + 7) mod (prime - 1)) + 1`.
//! It is predictable and repeats for equal ids, which lets anyone holding two
//! proofs with the same id solve for the secret key. It stays the default
//! because existing proofs were produced with it.
//!
//! # Example
//!
//! ```rust
//! use compliance_fort::crypto::{IdDerivedNonce, NonceSource, SeededNonce};
//! use compliance_fort::params::GroupParams;
//!
//! let params = GroupParams::default();
//! assert_eq!(IdDerivedNonce.nonce(1, &params), 11);
//!
//! let seeded = SeededNonce::new(42);
//! let k = seeded.nonce(1, &params);
//! assert!((1..params.prime()).contains(&k));
//! ```

use crate::arith::reduce_signed;
use crate::params::GroupParams;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Supplies the per-proof nonce
pub trait NonceSource: Send + Sync {
    /// Nonce for the proof of message `id`, in `[1, prime - 1]`
    fn nonce(&self, id: i32, params: &GroupParams) -> u64;
}

impl<T: NonceSource + ?Sized> NonceSource for Box<T> {
    fn nonce(&self, id: i32, params: &GroupParams) -> u64 {
        (**self).nonce(id, params)
    }
}

/// Legacy deterministic nonce derived from the message id
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdDerivedNonce;

impl NonceSource for IdDerivedNonce {
    fn nonce(&self, id: i32, params: &GroupParams) -> u64 {
        reduce_signed(id as i64 * 3 + 7, params.order()) + 1
    }
}

/// Uniform nonce from the thread-local CSPRNG
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OsRandomNonce;

impl NonceSource for OsRandomNonce {
    fn nonce(&self, _id: i32, params: &GroupParams) -> u64 {
        rand::rng().random_range(1..params.prime())
    }
}

/// Reproducible nonce stream from a fixed seed
///
/// Successive calls advance one shared generator, so the sequence depends on
/// call order and not on the id.
#[derive(Debug)]
pub struct SeededNonce {
    rng: Mutex<StdRng>,
}

impl SeededNonce {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl NonceSource for SeededNonce {
    fn nonce(&self, _id: i32, params: &GroupParams) -> u64 {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.random_range(1..params.prime())
    }
}

/// Nonce source selected in configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NonceKind {
    #[default]
    IdDerived,
    OsRandom,
    Seeded { seed: u64 },
}

impl NonceKind {
    /// Instantiate the configured source
    pub fn build(&self) -> Box<dyn NonceSource> {
        match *self {
            NonceKind::IdDerived => Box::new(IdDerivedNonce),
            NonceKind::OsRandom => Box::new(OsRandomNonce),
            NonceKind::Seeded { seed } => Box::new(SeededNonce::new(seed)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_derived_nonce() {
        let params = GroupParams::default();
        // ((1 * 3 + 7) mod 22) + 1
        assert_eq!(IdDerivedNonce.nonce(1, &params), 11);
        assert_eq!(IdDerivedNonce.nonce(5, &params), 1);
        assert_eq!(IdDerivedNonce.nonce(0, &params), 8);
    }

    #[test]
    fn test_id_derived_nonce_in_range() {
        let params = GroupParams::default();
        for id in [-1_000_000, -7, -1, 0, 1, 22, 1_000, i32::MIN, i32::MAX] {
            let k = IdDerivedNonce.nonce(id, &params);
            assert!((1..params.prime()).contains(&k), "id {} gave k {}", id, k);
        }
    }

    #[test]
    fn test_random_nonce_in_range() {
        let params = GroupParams::default();
        for _ in 0..100 {
            let k = OsRandomNonce.nonce(0, &params);
            assert!((1..params.prime()).contains(&k));
        }
    }

    #[test]
    fn test_seeded_nonce_reproducible() {
        let params = GroupParams::default();
        let a = SeededNonce::new(7);
        let b = SeededNonce::new(7);
        let seq_a: Vec<u64> = (0..10).map(|id| a.nonce(id, &params)).collect();
        let seq_b: Vec<u64> = (0..10).map(|id| b.nonce(id, &params)).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn test_nonce_kind_build() {
        let params = GroupParams::default();
        let source = NonceKind::IdDerived.build();
        assert_eq!(source.nonce(1, &params), 11);

        let kind: NonceKind = serde_json::from_str(r#"{"kind": "seeded", "seed": 9}"#).unwrap();
        assert_eq!(kind, NonceKind::Seeded { seed: 9 });
    }
}
