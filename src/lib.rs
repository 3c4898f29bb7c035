//! compliance_fort: batch Schnorr-style identity proofs and a partitioned broker
//!
//! This library proves knowledge of a secret exponent over a small cyclic
//! group, verifies those proofs one at a time or in batches, and routes
//! proof-bearing messages into hash-assigned, bounded partition queues.
//!
//! The default protocol (modulus 23, generator 5, id-derived nonce, additive
//! challenge) is reproduced exactly for interoperability. It is a
//! demonstration protocol, not a secure proof system: the group is tiny, the
//! nonce is predictable and the challenge is not a hash. Hardened nonce and
//! challenge choices are available through `crypto` and `config`.
//!
//! # Example
//!
//! ```rust
//! use compliance_fort::broker::{Broker, PartitionManager};
//! use compliance_fort::proof::{batch_create, batch_verify, Prover, Verifier};
//!
//! let prover = Prover::default();
//! let verifier = Verifier::default();
//! let keys = prover.keypair(7);
//!
//! let messages = batch_create(&prover, &[1, 2, 3], &[10, 20, 30], keys.secret_key, keys.public_key)?;
//! let outcome = batch_verify(&verifier, &messages, keys.public_key);
//! assert_eq!(outcome.valid_count, 3);
//!
//! let mut broker = Broker::new(PartitionManager::new(4, 128)?, verifier);
//! let report = broker.ingest(&messages, keys.public_key);
//! assert_eq!(report.accepted.len(), 3);
//! # Ok::<(), compliance_fort::Error>(())
//! ```

/// compliance_fort version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Main modules
pub mod arith;
pub mod error;
pub mod params;
pub mod types;

pub mod broker;
pub mod config;
pub mod crypto;
pub mod ffi;
pub mod proof;
pub mod utils;

#[cfg(feature = "api")]
pub mod api;

pub use error::{Error, Result};
pub use params::GroupParams;
pub use types::{BatchItem, KeyPair, Message};
