//! Batch proof creation and verification
//!
//! Every element is processed independently and results keep input order.
//! With the `parallel` feature the per-element work is spread over the rayon
//! thread pool; each element writes its own output slot.

use crate::crypto::{ChallengeFunction, NonceSource};
use crate::error::{Error, Result};
use crate::proof::{Prover, Verifier};
use crate::types::{BatchItem, Message};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Outcome of a batch verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchVerification {
    /// Number of `true` entries in `results`
    pub valid_count: usize,

    /// Per-message results, in input order
    pub results: Vec<bool>,
}

impl BatchVerification {
    /// Number of messages verified
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Number of messages that failed verification
    pub fn invalid_count(&self) -> usize {
        self.total() - self.valid_count
    }

    /// True when every message verified
    pub fn all_valid(&self) -> bool {
        self.valid_count == self.total()
    }
}

/// Verify every message against `public_key`
///
/// `results[i]` equals `verifier.verify_proof(&messages[i], public_key)`.
pub fn batch_verify<C: ChallengeFunction>(
    verifier: &Verifier<C>,
    messages: &[Message],
    public_key: i32,
) -> BatchVerification {
    #[cfg(feature = "parallel")]
    let results: Vec<bool> = messages
        .par_iter()
        .map(|m| verifier.verify_proof(m, public_key))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let results: Vec<bool> = messages
        .iter()
        .map(|m| verifier.verify_proof(m, public_key))
        .collect();

    let valid_count = results.iter().filter(|&&ok| ok).count();
    log::debug!(
        "batch verify: {} messages, {} valid",
        results.len(),
        valid_count
    );

    BatchVerification {
        valid_count,
        results,
    }
}

/// Create one proof per `(ids[i], data[i])` pair
///
/// # Returns
/// Messages in input order, or `Error::LengthMismatch` (before any proof is
/// computed) when the slices differ in length
pub fn batch_create<N: NonceSource, C: ChallengeFunction>(
    prover: &Prover<N, C>,
    ids: &[i32],
    data: &[i32],
    secret_key: i32,
    public_key: i32,
) -> Result<Vec<Message>> {
    if ids.len() != data.len() {
        return Err(Error::LengthMismatch {
            ids: ids.len(),
            data: data.len(),
        });
    }

    #[cfg(feature = "parallel")]
    let messages: Vec<Message> = ids
        .par_iter()
        .zip(data)
        .map(|(&id, &d)| prover.create_proof(id, d, secret_key, public_key))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let messages: Vec<Message> = ids
        .iter()
        .zip(data)
        .map(|(&id, &d)| prover.create_proof(id, d, secret_key, public_key))
        .collect();

    log::debug!("batch create: {} proofs", messages.len());
    Ok(messages)
}

/// Create one proof per item
pub fn batch_create_items<N: NonceSource, C: ChallengeFunction>(
    prover: &Prover<N, C>,
    items: &[BatchItem],
    secret_key: i32,
    public_key: i32,
) -> Vec<Message> {
    #[cfg(feature = "parallel")]
    let iter = items.par_iter();
    #[cfg(not(feature = "parallel"))]
    let iter = items.iter();

    iter.map(|item| prover.create_proof(item.id, item.data, secret_key, public_key))
        .collect()
}
