use std::time::Duration;

/// Retry policy of the artist feed.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Retries after the first failed attempt
    pub max_retries: u32,
    /// Delay before the first retry; doubles with every retry after it
    pub base_delay: Duration,
}

impl FeedConfig {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// Delay before the retry that follows `retry_count` earlier retries.
    pub fn delay_for(&self, retry_count: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(retry_count))
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_secs(1),
        }
    }
}
