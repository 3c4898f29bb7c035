//! Error types for compliance_fort
//!
//! A failed proof verification is not an error: verifiers return `false`.
//! Everything in this enum is a rejected operation the caller must handle.

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("queue is full (capacity {capacity})")]
    QueueFull { capacity: usize },

    #[error("queue is empty")]
    QueueEmpty,

    #[error("batch length mismatch: {ids} ids, {data} data values")]
    LengthMismatch { ids: usize, data: usize },

    #[error("partition {partition} out of range (num_partitions = {num_partitions})")]
    PartitionOutOfRange {
        partition: usize,
        num_partitions: usize,
    },

    #[error("invalid group parameters: {0}")]
    InvalidParams(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
