//! Auto-buy signalling.
//!
//! A node may buy tickets automatically. The flag says whether it should,
//! and the bounded queue wakes whichever task does the buying. Both live in
//! one service object that the embedding node owns and passes around.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::mpsc::{self, error::TrySendError, Receiver, Sender};

use crate::error::{GateError, Result};

/// Default number of pending signals the queue holds.
pub const DEFAULT_QUEUE_CAPACITY: usize = 10;

/// A wake-up for the ticket buyer, carrying the block number that raised it.
pub type AutoBuySignal = u64;

/// Auto-buy flag plus the sending half of its notification queue.
#[derive(Debug)]
pub struct AutoBuy {
    enabled: AtomicBool,
    sender: Sender<AutoBuySignal>,
}

impl AutoBuy {
    /// Wrap an existing sender. Auto-buy starts disabled.
    pub fn new(sender: Sender<AutoBuySignal>) -> Self {
        Self {
            enabled: AtomicBool::new(false),
            sender,
        }
    }

    /// Create the service together with the receiving half of a new queue.
    ///
    /// A `capacity` of zero is raised to one, since tokio channels need room
    /// for at least one message.
    pub fn channel(capacity: usize) -> (Self, Receiver<AutoBuySignal>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self::new(tx), rx)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
        tracing::debug!(enabled, "auto-buy toggled");
    }

    /// Queue a signal without waiting.
    pub fn try_notify(&self, signal: AutoBuySignal) -> Result<()> {
        self.sender.try_send(signal).map_err(|e| match e {
            TrySendError::Full(_) => GateError::AutoBuyQueueFull,
            TrySendError::Closed(_) => GateError::AutoBuyClosed,
        })
    }

    /// Queue a signal, waiting for a free slot.
    pub async fn notify(&self, signal: AutoBuySignal) -> Result<()> {
        self.sender
            .send(signal)
            .await
            .map_err(|_| GateError::AutoBuyClosed)
    }

    /// Free slots left in the queue.
    pub fn remaining_capacity(&self) -> usize {
        self.sender.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_flag_defaults_off() {
        let (auto, _rx) = AutoBuy::channel(DEFAULT_QUEUE_CAPACITY);
        assert!(!auto.is_enabled());
        auto.set_enabled(true);
        assert!(auto.is_enabled());
        auto.set_enabled(false);
        assert!(!auto.is_enabled());
    }

    #[test]
    fn test_try_notify_full_queue() {
        let (auto, _rx) = AutoBuy::channel(2);
        auto.try_notify(1).unwrap();
        auto.try_notify(2).unwrap();
        assert!(matches!(auto.try_notify(3), Err(GateError::AutoBuyQueueFull)));
    }

    #[test]
    fn test_try_notify_closed_queue() {
        let (auto, rx) = AutoBuy::channel(2);
        drop(rx);
        assert!(matches!(auto.try_notify(1), Err(GateError::AutoBuyClosed)));
    }

    #[tokio::test]
    async fn test_signals_arrive_in_order() {
        let (auto, mut rx) = AutoBuy::channel(DEFAULT_QUEUE_CAPACITY);
        for block in 1..=3 {
            auto.notify(block).await.unwrap();
        }
        assert_eq!(auto.remaining_capacity(), DEFAULT_QUEUE_CAPACITY - 3);
        assert_eq!(rx.recv().await, Some(1));
        assert_eq!(rx.recv().await, Some(2));
        assert_eq!(rx.recv().await, Some(3));
    }

    #[tokio::test]
    async fn test_notify_waits_for_room() {
        let (auto, mut rx) = AutoBuy::channel(1);
        let auto = Arc::new(auto);
        auto.try_notify(10).unwrap();

        let sender = Arc::clone(&auto);
        let pending = tokio::spawn(async move { sender.notify(11).await });

        assert_eq!(rx.recv().await, Some(10));
        pending.await.unwrap().unwrap();
        assert_eq!(rx.recv().await, Some(11));
    }

    #[tokio::test]
    async fn test_shared_across_tasks() {
        let (auto, mut rx) = AutoBuy::channel(DEFAULT_QUEUE_CAPACITY);
        let auto = Arc::new(auto);
        let mut handles = Vec::new();
        for block in 0..5u64 {
            let auto = Arc::clone(&auto);
            handles.push(tokio::spawn(async move {
                auto.set_enabled(true);
                auto.notify(block).await
            }));
        }
        for h in handles {
            h.await.unwrap().unwrap();
        }
        assert!(auto.is_enabled());
        let mut got = Vec::new();
        for _ in 0..5 {
            got.push(rx.recv().await.unwrap());
        }
        got.sort_unstable();
        assert_eq!(got, vec![0, 1, 2, 3, 4]);
    }
}
