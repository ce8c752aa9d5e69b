use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkStatus {
    Online,
    Offline,
}

/// Reachability of the outside world, as seen by the feed.
#[async_trait]
pub trait Connectivity: Send + Sync {
    async fn is_online(&self) -> bool;

    /// Transitions reported by the platform, for as long as the receiver lives.
    fn subscribe(&self) -> broadcast::Receiver<NetworkStatus>;
}

/// Holds the platform's online/offline signal and fans out transitions.
///
/// Until the platform reports anything the status is unknown, and
/// [`Connectivity::is_online`] on the monitor alone assumes online.
#[derive(Clone)]
pub struct NetworkMonitor {
    status: Arc<Mutex<Option<NetworkStatus>>>,
    events: broadcast::Sender<NetworkStatus>,
}

impl NetworkMonitor {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            status: Arc::new(Mutex::new(None)),
            events,
        }
    }

    /// Last status reported by the platform, if any.
    pub fn platform_status(&self) -> Option<NetworkStatus> {
        *self.status.lock()
    }

    /// Records a platform report; only changes are broadcast.
    pub fn set_status(&self, status: NetworkStatus) {
        let previous = self.status.lock().replace(status);
        if previous != Some(status) {
            tracing::info!(?status, "network status changed");
            // No subscribers is fine.
            let _ = self.events.send(status);
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NetworkStatus> {
        self.events.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.events.receiver_count()
    }
}

impl Default for NetworkMonitor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Connectivity for NetworkMonitor {
    async fn is_online(&self) -> bool {
        self.platform_status() != Some(NetworkStatus::Offline)
    }

    fn subscribe(&self) -> broadcast::Receiver<NetworkStatus> {
        NetworkMonitor::subscribe(self)
    }
}
