//! Message broker module
//!
//! This module provides the log-broker layer that stores proof-bearing
//! messages:
//! - `queue`: Bounded FIFO queue
//! - `partition`: Hash-based partition assignment and the partition manager
//! - `ingest`: Verify-then-route ingestion
//!
//! # Example
//!
//! ```rust
//! use compliance_fort::broker::{Broker, PartitionManager};
//! use compliance_fort::proof::{Prover, Verifier};
//!
//! let prover = Prover::default();
//! let msg = prover.create_proof(1, 100, 7, 17);
//!
//! let mut broker = Broker::new(PartitionManager::new(4, 64)?, Verifier::default());
//! let report = broker.ingest(&[msg], 17);
//! assert_eq!(report.accepted, vec![(1, 0)]);
//! # Ok::<(), compliance_fort::Error>(())
//! ```

pub mod ingest;
pub mod partition;
pub mod queue;

// Re-export main types for convenience
pub use ingest::{Broker, IngestReport};
pub use partition::{
    check_layout, get_partition_id, Partition, PartitionManager, HASH_A, HASH_B,
    MAX_CAPACITY_PER_PARTITION, MAX_PARTITIONS,
};
pub use queue::MessageQueue;
