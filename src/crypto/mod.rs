//! Cryptographic capabilities module
//!
//! This module provides the two pluggable pieces of the proof protocol:
//! - Challenge functions (legacy additive, SHA-256, Blake2b)
//! - Nonce sources (legacy id-derived, OS randomness, seeded)
//!
//! # Example
//!
//! ```rust
//! use compliance_fort::crypto::{ChallengeFunction, NonceSource, Sha256Challenge, OsRandomNonce};
//! use compliance_fort::params::GroupParams;
//!
//! let params = GroupParams::default();
//! let k = OsRandomNonce.nonce(1, &params);
//! let c = Sha256Challenge.challenge(k, 100, &params);
//! assert!(c < params.prime());
//! ```

pub mod challenge;
pub mod nonce;

// Re-export main types for convenience
pub use challenge::{
    AdditiveChallenge, Blake2bChallenge, ChallengeFunction, ChallengeKind, Sha256Challenge,
};
pub use nonce::{IdDerivedNonce, NonceKind, NonceSource, OsRandomNonce, SeededNonce};
