use crate::baas::BaasClient;
use crate::config::AppConfig;
use crate::connectivity::HttpConnectivity;
use crate::contact::ContactForwarder;
use agency_core::{
    ArtistCache, ArtistFeed, ArtistService, ArtistSource, CacheConfig, Connectivity, FeedConfig,
    NetworkMonitor,
};
use std::sync::Arc;

pub struct AppState {
    pub artists: ArtistService,
    pub network: NetworkMonitor,
    pub feed: ArtistFeed,
    pub contact: Option<ContactForwarder>,
}

impl AppState {
    /// Must run inside a tokio runtime: the feed starts loading immediately.
    pub fn new(config: &AppConfig) -> Self {
        let network = NetworkMonitor::new();
        let source = Arc::new(BaasClient::new(&config.baas_url, &config.baas_anon_key));
        let connectivity = Arc::new(HttpConnectivity::new(
            network.clone(),
            config.network_probe_url.clone(),
        ));
        let contact = config.form_endpoint_url.as_deref().map(ContactForwarder::new);

        if contact.is_none() {
            tracing::warn!("FORM_ENDPOINT_URL not set, contact inquiries will be refused");
        }

        Self::assemble(source, network, connectivity, config.cache.clone(), contact)
    }

    pub fn assemble(
        source: Arc<dyn ArtistSource>,
        network: NetworkMonitor,
        connectivity: Arc<dyn Connectivity>,
        cache: CacheConfig,
        contact: Option<ContactForwarder>,
    ) -> Self {
        let artists = ArtistService::new(source, Arc::new(ArtistCache::new(cache)));
        let feed = ArtistFeed::subscribe(artists.clone(), connectivity, FeedConfig::default());

        Self {
            artists,
            network,
            feed,
            contact,
        }
    }
}
