//! Configuration shared by the OpenStreetMap-family clients.

use std::sync::Arc;
use std::time::Duration;

use crate::planner::RateLimiter;

/// Default maximum concurrent requests per service.
const DEFAULT_MAX_CONCURRENT: usize = 2;

/// Default User-Agent. Public OSM services reject anonymous clients.
pub const DEFAULT_USER_AGENT: &str = concat!("trip-planner/", env!("CARGO_PKG_VERSION"));

/// Configuration for one OSM-family service.
#[derive(Debug, Clone)]
pub struct OsmConfig {
    /// Base URL of the service, without a trailing slash
    pub base_url: String,
    /// User-Agent sent with every request
    pub user_agent: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Minimum delay between two requests to this service
    pub min_interval: Duration,
}

impl OsmConfig {
    /// Create a new config for the service at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 20,
            min_interval: Duration::from_secs(1),
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the minimum delay between requests.
    pub fn with_min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = interval;
        self
    }

    /// A fresh rate limiter honouring `min_interval`.
    pub fn limiter(&self) -> Arc<RateLimiter> {
        Arc::new(RateLimiter::new(self.min_interval))
    }
}

/// Configs for every service the planner talks to.
#[derive(Debug, Clone)]
pub struct OsmEndpoints {
    pub nominatim: OsmConfig,
    pub osrm: OsmConfig,
    pub overpass: OsmConfig,
    pub wikipedia: OsmConfig,
}

impl Default for OsmEndpoints {
    fn default() -> Self {
        Self {
            nominatim: OsmConfig::new(super::nominatim::DEFAULT_BASE_URL),
            osrm: OsmConfig::new(super::osrm::DEFAULT_BASE_URL),
            // Overpass queries are heavy; the public instance asks for fewer.
            overpass: OsmConfig::new(super::overpass::DEFAULT_BASE_URL)
                .with_max_concurrent(1)
                .with_min_interval(Duration::from_secs(2))
                .with_timeout(30),
            wikipedia: OsmConfig::new(super::wikipedia::DEFAULT_BASE_URL)
                .with_min_interval(Duration::from_millis(200)),
        }
    }
}

impl OsmEndpoints {
    /// Use the same User-Agent for every service.
    pub fn with_user_agent(mut self, agent: &str) -> Self {
        for config in self.all_mut() {
            config.user_agent = agent.to_string();
        }
        self
    }

    /// Apply the same minimum request interval everywhere (zero in tests).
    pub fn with_min_interval(mut self, interval: Duration) -> Self {
        for config in self.all_mut() {
            config.min_interval = interval;
        }
        self
    }

    /// Use the same timeout for every service.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        for config in self.all_mut() {
            config.timeout_secs = secs;
        }
        self
    }

    fn all_mut(&mut self) -> [&mut OsmConfig; 4] {
        [
            &mut self.nominatim,
            &mut self.osrm,
            &mut self.overpass,
            &mut self.wikipedia,
        ]
    }
}
