use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::settings::Context;

/// Events emitted by services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceEvent {
    /// A service was marked live.
    ServiceSetLive {
        service_id: String,
        context: Context,
        live_start: DateTime<Utc>,
        /// Set by a manual override rather than detected by polling.
        forced: bool,
    },
    /// The live flag was cleared by the expiry guard.
    LiveExpired {
        service_id: String,
        context: Context,
        live_start: DateTime<Utc>,
        timestamp: DateTime<Utc>,
    },
    /// A poll resolved a video URL different from the stored one.
    VideoResolved {
        service_id: String,
        context: Context,
        video_url: String,
    },
}

impl ServiceEvent {
    /// Stable event name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ServiceSetLive { .. } => "service_set_live",
            Self::LiveExpired { .. } => "service_live_expired",
            Self::VideoResolved { .. } => "service_video_resolved",
        }
    }

    pub fn service_id(&self) -> &str {
        match self {
            Self::ServiceSetLive { service_id, .. }
            | Self::LiveExpired { service_id, .. }
            | Self::VideoResolved { service_id, .. } => service_id,
        }
    }

    /// Get a human-readable description of the event.
    pub fn description(&self) -> String {
        match self {
            Self::ServiceSetLive {
                service_id,
                context,
                forced,
                ..
            } => {
                if *forced {
                    format!("{service_id} ({context}) was manually set live")
                } else {
                    format!("{service_id} ({context}) is now live")
                }
            }
            Self::LiveExpired {
                service_id,
                context,
                ..
            } => format!("{service_id} ({context}) live status expired"),
            Self::VideoResolved {
                service_id,
                context,
                video_url,
            } => format!("{service_id} ({context}) resolved video {video_url}"),
        }
    }
}

/// Broadcaster for service events.
#[derive(Clone)]
pub struct ServiceEventBroadcaster {
    sender: broadcast::Sender<ServiceEvent>,
}

impl ServiceEventBroadcaster {
    /// Create a new broadcaster with default capacity (256).
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ServiceEvent> {
        self.sender.subscribe()
    }

    /// Publish an event. Returns the number of subscribers that received it.
    pub fn publish(&self, event: ServiceEvent) -> usize {
        // Err only means nobody is listening.
        self.sender.send(event).unwrap_or(0)
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ServiceEventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_live_event() -> ServiceEvent {
        ServiceEvent::ServiceSetLive {
            service_id: "youtube".to_string(),
            context: Context::Global,
            live_start: DateTime::UNIX_EPOCH,
            forced: false,
        }
    }

    #[test]
    fn event_names() {
        assert_eq!(set_live_event().name(), "service_set_live");
        assert_eq!(set_live_event().service_id(), "youtube");
        assert_eq!(set_live_event().description(), "youtube (global) is now live");
    }

    #[test]
    fn publish_without_subscribers_is_not_an_error() {
        let broadcaster = ServiceEventBroadcaster::new();
        assert_eq!(broadcaster.subscriber_count(), 0);
        assert_eq!(broadcaster.publish(set_live_event()), 0);
    }

    #[tokio::test]
    async fn subscribers_receive_events() {
        let broadcaster = ServiceEventBroadcaster::new();
        let mut rx = broadcaster.subscribe();

        assert_eq!(broadcaster.publish(set_live_event()), 1);
        assert_eq!(rx.recv().await.unwrap(), set_live_event());
    }
}
