//! Fan-out of committed events to live subscribers

use crate::core::LoggedEvent;
use tokio::sync::broadcast;

/// Default number of events to buffer per subscriber
pub const DEFAULT_CAPACITY: usize = 100;

/// Broadcaster for committed events
#[derive(Debug)]
pub struct EventBroadcaster {
    sender: broadcast::Sender<LoggedEvent>,
}

impl EventBroadcaster {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Send an event to every subscriber
    pub fn publish(&self, event: LoggedEvent) {
        // No subscribers is not an error
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LoggedEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBroadcaster {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Event;
    use chrono::Utc;

    fn cleared(sequence: u64) -> LoggedEvent {
        LoggedEvent {
            sequence,
            event: Event::OperatorsCleared { size: 0 },
            recorded_at: Utc::now(),
        }
    }

    #[test]
    fn test_broadcaster_creation() {
        let broadcaster = EventBroadcaster::default();
        assert_eq!(broadcaster.subscriber_count(), 0);
    }

    #[test]
    fn test_publish_with_no_subscribers() {
        let broadcaster = EventBroadcaster::new(4);
        // Should not panic even with no subscribers
        broadcaster.publish(cleared(0));
    }

    #[tokio::test]
    async fn test_subscriber_receives_in_order() {
        let broadcaster = EventBroadcaster::new(4);
        let mut rx = broadcaster.subscribe();

        broadcaster.publish(cleared(0));
        broadcaster.publish(cleared(1));

        assert_eq!(rx.recv().await.unwrap().sequence, 0);
        assert_eq!(rx.recv().await.unwrap().sequence, 1);
    }
}
