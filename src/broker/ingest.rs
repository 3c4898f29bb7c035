//! Verified ingestion into partitions
//!
//! A `Broker` verifies incoming messages in one batch and routes the valid
//! ones to their partitions. Invalid messages and messages hitting a full
//! partition are reported back, not stored.

use crate::broker::partition::PartitionManager;
use crate::crypto::{AdditiveChallenge, ChallengeFunction};
use crate::error::Result;
use crate::proof::{batch_verify, Verifier};
use crate::types::Message;
use serde::{Deserialize, Serialize};

/// Per-batch ingestion result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    /// `(message id, partition id)` for every stored message
    pub accepted: Vec<(i32, usize)>,

    /// Ids whose proof failed verification
    pub rejected_invalid: Vec<i32>,

    /// Ids whose partition was full
    pub rejected_full: Vec<i32>,
}

/// Partition manager fronted by a verifier
#[derive(Debug, Clone)]
pub struct Broker<C = AdditiveChallenge> {
    manager: PartitionManager,
    verifier: Verifier<C>,
}

impl<C: ChallengeFunction> Broker<C> {
    pub fn new(manager: PartitionManager, verifier: Verifier<C>) -> Self {
        Self { manager, verifier }
    }

    /// Verify `messages` against `public_key` and route the valid ones
    pub fn ingest(&mut self, messages: &[Message], public_key: i32) -> IngestReport {
        let outcome = batch_verify(&self.verifier, messages, public_key);
        let mut report = IngestReport::default();

        for (message, valid) in messages.iter().zip(outcome.results) {
            if !valid {
                report.rejected_invalid.push(message.id);
                continue;
            }
            match self.manager.add_message_to_partition(*message) {
                Ok(partition) => report.accepted.push((message.id, partition)),
                Err(_) => report.rejected_full.push(message.id),
            }
        }

        log::debug!(
            "ingested {} messages: {} accepted, {} invalid, {} rejected (full)",
            messages.len(),
            report.accepted.len(),
            report.rejected_invalid.len(),
            report.rejected_full.len()
        );
        report
    }

    /// Verify a single message and route it
    ///
    /// # Returns
    /// `Ok(Some(partition))` when stored, `Ok(None)` when the proof is
    /// invalid, `Err` when the partition is full
    pub fn ingest_one(&mut self, message: Message, public_key: i32) -> Result<Option<usize>> {
        if !self.verifier.verify_proof(&message, public_key) {
            return Ok(None);
        }
        self.manager.add_message_to_partition(message).map(Some)
    }

    /// Dequeue the oldest message of one partition
    pub fn dequeue_from(&mut self, partition_id: usize) -> Result<Message> {
        self.manager.dequeue_from(partition_id)
    }

    pub fn manager(&self) -> &PartitionManager {
        &self.manager
    }

    pub fn verifier(&self) -> &Verifier<C> {
        &self.verifier
    }
}
