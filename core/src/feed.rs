use crate::cache::{CacheStatus, SIMPLE_ARTISTS_KEY};
use crate::connectivity::{Connectivity, NetworkStatus};
use crate::error::FetchError;
use crate::feed_config::FeedConfig;
use crate::fetcher::ArtistService;
use crate::models::Artist;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};

#[derive(Debug, Clone, Default)]
pub struct FeedState {
    pub artists: Vec<Artist>,
    pub loading: bool,
    pub error: Option<FetchError>,
    pub retry_count: u32,
}

impl FeedState {
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(FetchError::user_message)
    }
}

enum Command {
    Refresh(oneshot::Sender<()>),
}

/// Live view of the public artist list that retries with exponential
/// backoff and reloads when the network comes back.
///
/// Dropping the feed stops its background task and its network
/// subscription.
pub struct ArtistFeed {
    state: watch::Receiver<FeedState>,
    commands: mpsc::UnboundedSender<Command>,
    driver: JoinHandle<()>,
}

impl ArtistFeed {
    pub fn subscribe(
        service: ArtistService,
        connectivity: Arc<dyn Connectivity>,
        config: FeedConfig,
    ) -> Self {
        let (state_tx, state) = watch::channel(FeedState {
            loading: true,
            ..FeedState::default()
        });
        let (commands, command_rx) = mpsc::unbounded_channel();
        let network = connectivity.subscribe();

        let driver = FeedDriver {
            service,
            connectivity,
            config,
            state: state_tx,
            retry_count: 0,
        };
        let driver = tokio::spawn(driver.run(command_rx, network));

        Self {
            state,
            commands,
            driver,
        }
    }

    pub fn snapshot(&self) -> FeedState {
        self.state.borrow().clone()
    }

    pub fn watch(&self) -> watch::Receiver<FeedState> {
        self.state.clone()
    }

    /// Forces a network fetch with a fresh retry budget and waits for it.
    pub async fn refresh(&self) -> FeedState {
        let (done, finished) = oneshot::channel();
        if self.commands.send(Command::Refresh(done)).is_ok() {
            let _ = finished.await;
        }
        self.snapshot()
    }

    /// Waits until no load is running.
    pub async fn settled(&self) -> FeedState {
        let mut state = self.state.clone();
        match state.wait_for(|state| !state.loading).await {
            Ok(settled) => (*settled).clone(),
            Err(_) => self.snapshot(),
        }
    }
}

impl Drop for ArtistFeed {
    fn drop(&mut self) {
        self.driver.abort();
    }
}

struct FeedDriver {
    service: ArtistService,
    connectivity: Arc<dyn Connectivity>,
    config: FeedConfig,
    state: watch::Sender<FeedState>,
    retry_count: u32,
}

impl FeedDriver {
    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<Command>,
        mut network: broadcast::Receiver<NetworkStatus>,
    ) {
        let mut network_open = true;
        let mut retry_at = self.load(false).await;

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(Command::Refresh(done)) => {
                        self.retry_count = 0;
                        retry_at = self.load(true).await;
                        let _ = done.send(());
                    }
                    None => break,
                },
                status = network.recv(), if network_open => match status {
                    Ok(NetworkStatus::Online) if self.has_network_error() => {
                        tracing::info!("network is back, reloading artists");
                        self.retry_count = 0;
                        retry_at = self.load(true).await;
                    }
                    Ok(_) | Err(RecvError::Lagged(_)) => {}
                    Err(RecvError::Closed) => network_open = false,
                },
                _ = wait_for_retry(retry_at) => {
                    retry_at = self.load(false).await;
                }
            }
        }
    }

    fn has_network_error(&self) -> bool {
        self.state
            .borrow()
            .error
            .as_ref()
            .is_some_and(FetchError::is_network)
    }

    /// Runs one load and returns when the next retry is due, if any.
    async fn load(&mut self, force: bool) -> Option<Instant> {
        self.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });

        if !self.connectivity.is_online().await {
            tracing::warn!("network unreachable, skipping artist fetch");
            self.state.send_modify(|state| {
                state.loading = false;
                state.error = Some(FetchError::Network("network unreachable".to_string()));
            });
            return None;
        }

        let cache = Arc::clone(self.service.cache());
        if !force && cache.cache_status(SIMPLE_ARTISTS_KEY) == CacheStatus::Valid {
            if let Some(artists) = cache.get(SIMPLE_ARTISTS_KEY) {
                self.publish(artists);
                return None;
            }
        }

        match self.service.fetch_artists(force).await {
            Ok(artists) => {
                self.publish(artists);
                None
            }
            Err(error) => {
                let retry_at = if self.retry_count < self.config.max_retries {
                    let delay = self.config.delay_for(self.retry_count);
                    self.retry_count += 1;
                    tracing::info!(
                        retry = self.retry_count,
                        delay_ms = delay.as_millis() as u64,
                        "scheduling artist fetch retry"
                    );
                    Some(Instant::now() + delay)
                } else {
                    None
                };

                let retry_count = self.retry_count;
                self.state.send_modify(|state| {
                    state.loading = false;
                    state.error = Some(error);
                    state.retry_count = retry_count;
                });
                retry_at
            }
        }
    }

    fn publish(&mut self, artists: Vec<Artist>) {
        self.retry_count = 0;
        self.state.send_modify(|state| {
            state.artists = artists;
            state.loading = false;
            state.error = None;
            state.retry_count = 0;
        });
    }
}

async fn wait_for_retry(retry_at: Option<Instant>) {
    match retry_at {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
