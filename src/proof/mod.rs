//! Proof generation and verification module
//!
//! This module provides the Schnorr-style identity proof engine over the
//! group described by `GroupParams`.
//!
//! The proof system consists of:
//! - `prover`: Key derivation and proof construction
//! - `verifier`: Single-proof verification
//! - `batch`: Order-preserving batch creation and verification
//!
//! # Workflow
//!
//! 1. **Key Derivation**: `public_key = g^secret_key mod p`
//! 2. **Proof Generation**: `(r, s)` from a nonce, a challenge and the secret key
//! 3. **Proof Verification**: `g^s * public_key^c mod p == r`
//!
//! The free functions at this level use the legacy parameters (`p = 23`,
//! `g = 5`), the id-derived nonce and the additive challenge.
//!
//! # Example
//!
//! ```rust
//! use compliance_fort::proof::{create_zk_proof, generate_public_key, verify_zk_proof};
//!
//! let pk = generate_public_key(7);
//! let msg = create_zk_proof(1, 100, 7, pk);
//! assert!(verify_zk_proof(&msg, pk));
//! ```

pub mod batch;
pub mod prover;
pub mod verifier;

// Re-export main types for convenience
pub use batch::{batch_create, batch_create_items, batch_verify, BatchVerification};
pub use prover::Prover;
pub use verifier::Verifier;

use crate::params::GroupParams;
use crate::types::{derive_public_key, Message};

/// Derive a public key under the legacy parameters
pub fn generate_public_key(secret_key: i32) -> i32 {
    derive_public_key(&GroupParams::default(), secret_key)
}

/// Create a legacy proof
pub fn create_zk_proof(id: i32, data: i32, secret_key: i32, public_key: i32) -> Message {
    Prover::default().create_proof(id, data, secret_key, public_key)
}

/// Verify a legacy proof
pub fn verify_zk_proof(message: &Message, public_key: i32) -> bool {
    Verifier::default().verify_proof(message, public_key)
}
