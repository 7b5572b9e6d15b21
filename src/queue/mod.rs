//! Durable queue abstraction
//!
//! The crawl pipeline consumes domain names from an opaque at-least-once
//! queue: `produce` on the submission side, blocking `receive` on the
//! worker side, `acknowledge` after the full pipeline attempt. Any
//! transport with at-least-once delivery and per-message acknowledgment
//! satisfies the [`DomainQueue`] trait; [`InMemoryQueue`] is the in-process
//! implementation used by the binary. Redelivery after a crash is tolerated
//! downstream by the dispatcher's dedup set, so duplicate delivery is never
//! corruption.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use thiserror::Error;
use tokio::sync::mpsc;

/// Queue error types
#[derive(Debug, Error)]
pub enum QueueError {
    /// The queue has been closed and accepts no further messages
    #[error("Queue closed")]
    Closed,
}

/// A message delivered to one worker
///
/// Each produced message is delivered to exactly one receiver. The payload
/// is the raw domain-name string as submitted.
#[derive(Debug)]
pub struct Delivery {
    /// The domain-name work item
    pub payload: String,
}

/// Trait for the inbound domain-name queue
#[async_trait]
pub trait DomainQueue: Send + Sync {
    /// Enqueues a domain-name message
    ///
    /// # Arguments
    ///
    /// * `message` - The raw domain string to enqueue
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The message was accepted by the transport
    /// * `Err(QueueError)` - The queue is closed
    async fn produce(&self, message: &str) -> Result<(), QueueError>;

    /// Receives the next available message, blocking until one arrives
    ///
    /// # Returns
    ///
    /// * `Some(Delivery)` - A message for this worker
    /// * `None` - The queue is closed and fully drained
    async fn receive(&self) -> Option<Delivery>;

    /// Acknowledges a delivery after the pipeline attempt completed
    /// (successfully or as a terminal drop)
    async fn acknowledge(&self, delivery: Delivery) -> Result<(), QueueError>;

    /// Closes the queue; pending messages still drain to receivers
    fn close(&self);
}

/// In-process queue backed by a bounded channel
///
/// The receiver half is shared behind an async mutex so a pool of workers
/// can pull from the same stream, each message going to exactly one of
/// them.
pub struct InMemoryQueue {
    sender: Mutex<Option<mpsc::Sender<String>>>,
    receiver: tokio::sync::Mutex<mpsc::Receiver<String>>,
    acknowledged: AtomicU64,
}

impl InMemoryQueue {
    /// Creates a queue with the given channel capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = mpsc::channel(capacity);
        Self {
            sender: Mutex::new(Some(sender)),
            receiver: tokio::sync::Mutex::new(receiver),
            acknowledged: AtomicU64::new(0),
        }
    }

    /// Number of deliveries acknowledged so far
    pub fn acknowledged(&self) -> u64 {
        self.acknowledged.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DomainQueue for InMemoryQueue {
    async fn produce(&self, message: &str) -> Result<(), QueueError> {
        // Clone the sender out of the lock so the send itself does not hold
        // a std mutex across an await point.
        let sender = self
            .sender
            .lock()
            .unwrap()
            .as_ref()
            .cloned()
            .ok_or(QueueError::Closed)?;

        sender
            .send(message.to_string())
            .await
            .map_err(|_| QueueError::Closed)
    }

    async fn receive(&self) -> Option<Delivery> {
        let mut receiver = self.receiver.lock().await;
        receiver.recv().await.map(|payload| Delivery { payload })
    }

    async fn acknowledge(&self, _delivery: Delivery) -> Result<(), QueueError> {
        self.acknowledged.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn close(&self) {
        self.sender.lock().unwrap().take();
    }
}
