//! Bounded FIFO message queue
//!
//! A queue never grows past the capacity it was created with: enqueueing into
//! a full queue is rejected with `Error::QueueFull`, never dropped silently.
//!
//! Not internally synchronised. Share a queue across threads behind a `Mutex`.
//!
//! # Example
//!
//! ```rust
//! use compliance_fort::broker::MessageQueue;
//! use compliance_fort::types::Message;
//!
//! let mut queue = MessageQueue::new(2);
//! queue.enqueue(Message { id: 1, ..Default::default() })?;
//! queue.enqueue(Message { id: 2, ..Default::default() })?;
//! assert!(queue.enqueue(Message { id: 3, ..Default::default() }).is_err());
//! assert_eq!(queue.dequeue()?.id, 1);
//! # Ok::<(), compliance_fort::Error>(())
//! ```

use crate::error::{Error, Result};
use crate::types::Message;
use std::collections::VecDeque;

/// Slots reserved up front; larger queues grow on demand
const INITIAL_RESERVE: usize = 1024;

/// Fixed-capacity FIFO of messages
///
/// Backed by a ring buffer, so dequeue is O(1).
#[derive(Debug, Clone)]
pub struct MessageQueue {
    capacity: usize,
    items: VecDeque<Message>,
}

impl MessageQueue {
    /// Create an empty queue holding at most `capacity` messages
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            items: VecDeque::with_capacity(capacity.min(INITIAL_RESERVE)),
        }
    }

    /// Append a message at the back
    ///
    /// # Returns
    /// `Ok(())` if stored, `Err(Error::QueueFull)` if the queue is at capacity
    pub fn enqueue(&mut self, message: Message) -> Result<()> {
        if self.is_full() {
            log::warn!(
                "queue full (capacity {}), rejecting message {}",
                self.capacity,
                message.id
            );
            return Err(Error::QueueFull {
                capacity: self.capacity,
            });
        }
        self.items.push_back(message);
        Ok(())
    }

    /// Remove and return the oldest message
    ///
    /// # Returns
    /// `Ok(Message)` or `Err(Error::QueueEmpty)`
    pub fn dequeue(&mut self) -> Result<Message> {
        self.items.pop_front().ok_or(Error::QueueEmpty)
    }

    /// Oldest message, without removing it
    pub fn peek(&self) -> Option<&Message> {
        self.items.front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Messages from front to back
    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.items.iter()
    }
}
