use agency_core::{Connectivity, NetworkMonitor, NetworkStatus};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tokio::sync::broadcast;

pub const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Prefers the platform's online/offline report and falls back to a short
/// HEAD probe when nothing has been reported yet.
pub struct HttpConnectivity {
    monitor: NetworkMonitor,
    client: Client,
    probe_url: Option<String>,
    timeout: Duration,
}

impl HttpConnectivity {
    pub fn new(monitor: NetworkMonitor, probe_url: Option<String>) -> Self {
        Self {
            monitor,
            client: Client::new(),
            probe_url,
            timeout: PROBE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Any response counts as reachable; failures and timeouts count as offline.
    async fn probe(&self, url: &str) -> bool {
        match self.client.head(url).timeout(self.timeout).send().await {
            Ok(_) => true,
            Err(error) => {
                tracing::debug!(url, error = %error, "network probe failed");
                false
            }
        }
    }
}

#[async_trait]
impl Connectivity for HttpConnectivity {
    async fn is_online(&self) -> bool {
        if let Some(status) = self.monitor.platform_status() {
            return status == NetworkStatus::Online;
        }
        match &self.probe_url {
            Some(url) => self.probe(url).await,
            None => true,
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<NetworkStatus> {
        self.monitor.subscribe()
    }
}
