//! Partition assignment and the partition manager
//!
//! A message key maps to a partition through the affine hash
//! `(key * HASH_A + HASH_B) mod num_partitions`. The hash is cheap and
//! deterministic but not uniform for patterned keys; keys that are equal
//! modulo `num_partitions` always share a partition.
//!
//! Assignments depend on `num_partitions`, so a manager's partition count is
//! fixed at construction.
//!
//! # Example
//!
//! ```rust
//! use compliance_fort::broker::{get_partition_id, PartitionManager};
//! use compliance_fort::types::Message;
//! use std::num::NonZeroUsize;
//!
//! let n = NonZeroUsize::new(4).unwrap();
//! assert_eq!(get_partition_id(1, n), 0);
//!
//! let mut manager = PartitionManager::new(4, 16)?;
//! let partition = manager.add_message_to_partition(Message { id: 1, ..Default::default() })?;
//! assert_eq!(partition, 0);
//! # Ok::<(), compliance_fort::Error>(())
//! ```

use crate::broker::queue::MessageQueue;
use crate::error::{Error, Result};
use crate::types::Message;
use std::num::NonZeroUsize;

/// Multiplier of the partition hash
pub const HASH_A: i64 = 7;

/// Offset of the partition hash
pub const HASH_B: i64 = 13;

/// Largest partition count a manager accepts
pub const MAX_PARTITIONS: usize = 65_536;

/// Largest per-partition queue capacity a manager accepts
pub const MAX_CAPACITY_PER_PARTITION: usize = 1 << 24;

/// Partition for `key` among `num_partitions`
///
/// Computed in `i64` with Euclidean reduction, so every `i32` key (including
/// negative keys) lands in `[0, num_partitions)`.
pub fn get_partition_id(key: i32, num_partitions: NonZeroUsize) -> usize {
    let n = num_partitions.get() as i128;
    ((key as i64 * HASH_A + HASH_B) as i128).rem_euclid(n) as usize
}

/// A queue tagged with its partition id
#[derive(Debug, Clone)]
pub struct Partition {
    id: usize,
    queue: MessageQueue,
}

impl Partition {
    fn new(id: usize, capacity: usize) -> Self {
        Self {
            id,
            queue: MessageQueue::new(capacity),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn queue(&self) -> &MessageQueue {
        &self.queue
    }
}

/// Check a partition layout against the manager's limits
pub fn check_layout(num_partitions: usize, capacity_per_partition: usize) -> Result<()> {
    if num_partitions == 0 || num_partitions > MAX_PARTITIONS {
        return Err(Error::InvalidConfig(format!(
            "num_partitions {} outside [1, {}]",
            num_partitions, MAX_PARTITIONS
        )));
    }
    if capacity_per_partition > MAX_CAPACITY_PER_PARTITION {
        return Err(Error::InvalidConfig(format!(
            "capacity_per_partition {} exceeds {}",
            capacity_per_partition, MAX_CAPACITY_PER_PARTITION
        )));
    }
    Ok(())
}

/// Fixed set of partitions with hash routing
#[derive(Debug, Clone)]
pub struct PartitionManager {
    partitions: Vec<Partition>,
    num_partitions: NonZeroUsize,
}

impl PartitionManager {
    /// Create a manager with `num_partitions` empty partitions
    ///
    /// # Arguments
    /// * `num_partitions` - Number of partitions; in `1..=MAX_PARTITIONS`
    /// * `capacity_per_partition` - Capacity of each partition's queue; at most
    ///   `MAX_CAPACITY_PER_PARTITION`
    ///
    /// # Returns
    /// `Ok(PartitionManager)`, or `Err(Error::InvalidConfig)` for an out-of-range layout
    pub fn new(num_partitions: usize, capacity_per_partition: usize) -> Result<Self> {
        check_layout(num_partitions, capacity_per_partition)?;
        let count = NonZeroUsize::new(num_partitions)
            .ok_or_else(|| Error::InvalidConfig("num_partitions must be at least 1".into()))?;

        let partitions = (0..num_partitions)
            .map(|id| Partition::new(id, capacity_per_partition))
            .collect();

        Ok(Self {
            partitions,
            num_partitions: count,
        })
    }

    /// Partition the message `id` routes to
    pub fn partition_for(&self, key: i32) -> usize {
        get_partition_id(key, self.num_partitions)
    }

    /// Route `message` by its id and enqueue it on that partition
    ///
    /// # Returns
    /// The partition id on success, or the partition's `Error::QueueFull`
    pub fn add_message_to_partition(&mut self, message: Message) -> Result<usize> {
        let partition_id = self.partition_for(message.id);
        self.partitions[partition_id].queue.enqueue(message)?;
        log::trace!("message {} -> partition {}", message.id, partition_id);
        Ok(partition_id)
    }

    /// Dequeue the oldest message of one partition
    pub fn dequeue_from(&mut self, partition_id: usize) -> Result<Message> {
        let num_partitions = self.num_partitions.get();
        self.partitions
            .get_mut(partition_id)
            .ok_or(Error::PartitionOutOfRange {
                partition: partition_id,
                num_partitions,
            })?
            .queue
            .dequeue()
    }

    pub fn partition(&self, partition_id: usize) -> Option<&Partition> {
        self.partitions.get(partition_id)
    }

    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }

    pub fn num_partitions(&self) -> usize {
        self.num_partitions.get()
    }

    /// Messages held across all partitions
    pub fn total_len(&self) -> usize {
        self.partitions.iter().map(|p| p.queue.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(value: usize) -> NonZeroUsize {
        NonZeroUsize::new(value).unwrap()
    }

    fn msg(id: i32) -> Message {
        Message::new(id, 0, 0, 0, 17)
    }

    #[test]
    fn test_partition_id_known_values() {
        // (1 * 7 + 13) mod 4 = 0
        assert_eq!(get_partition_id(1, n(4)), 0);
        assert_eq!(get_partition_id(2, n(4)), 3);
        assert_eq!(get_partition_id(0, n(4)), 1);
        assert_eq!(get_partition_id(5, n(1)), 0);
    }

    #[test]
    fn test_partition_id_deterministic() {
        for key in -100..100 {
            assert_eq!(get_partition_id(key, n(7)), get_partition_id(key, n(7)));
        }
    }

    #[test]
    fn test_partition_id_in_range_for_extreme_keys() {
        for key in [i32::MIN, -1, 0, i32::MAX] {
            for parts in 1..10 {
                assert!(get_partition_id(key, n(parts)) < parts);
            }
        }
        // -2 * 7 + 13 = -1, which wraps to the last partition
        assert_eq!(get_partition_id(-2, n(4)), 3);
    }

    #[test]
    fn test_manager_rejects_zero_partitions() {
        assert!(matches!(
            PartitionManager::new(0, 10),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_manager_rejects_oversized_layout() {
        assert!(matches!(
            PartitionManager::new(MAX_PARTITIONS + 1, 10),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            PartitionManager::new(4, usize::MAX),
            Err(Error::InvalidConfig(_))
        ));
        assert!(PartitionManager::new(4, MAX_CAPACITY_PER_PARTITION).is_ok());
    }

    #[test]
    fn test_manager_routing() {
        let mut manager = PartitionManager::new(4, 10).unwrap();
        assert_eq!(manager.num_partitions(), 4);

        for id in 1..=8 {
            let partition = manager.add_message_to_partition(msg(id)).unwrap();
            assert_eq!(partition, get_partition_id(id, n(4)));
        }
        assert_eq!(manager.total_len(), 8);

        // ids 1 and 5 share partition 0, in arrival order
        assert_eq!(manager.dequeue_from(0).unwrap().id, 1);
        assert_eq!(manager.dequeue_from(0).unwrap().id, 5);
        assert!(matches!(manager.dequeue_from(0), Err(Error::QueueEmpty)));
    }

    #[test]
    fn test_manager_partition_capacity() {
        let mut manager = PartitionManager::new(4, 1).unwrap();
        manager.add_message_to_partition(msg(1)).unwrap();

        let err = manager.add_message_to_partition(msg(5)).unwrap_err();
        assert!(matches!(err, Error::QueueFull { capacity: 1 }));

        // other partitions are unaffected
        manager.add_message_to_partition(msg(2)).unwrap();
        assert_eq!(manager.total_len(), 2);
    }

    #[test]
    fn test_dequeue_out_of_range() {
        let mut manager = PartitionManager::new(2, 1).unwrap();
        assert!(matches!(
            manager.dequeue_from(2),
            Err(Error::PartitionOutOfRange {
                partition: 2,
                num_partitions: 2
            })
        ));
    }

    #[test]
    fn test_partition_accessors() {
        let manager = PartitionManager::new(3, 5).unwrap();
        assert_eq!(manager.partitions().len(), 3);
        let partition = manager.partition(2).unwrap();
        assert_eq!(partition.id(), 2);
        assert_eq!(partition.queue().capacity(), 5);
        assert!(manager.partition(3).is_none());
    }
}
