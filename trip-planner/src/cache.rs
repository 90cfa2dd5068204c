//! Caching layer for place lookups.
//!
//! Raw collaborator answers are cached, never itineraries. Keys round the
//! query point to about 11 m so that nearby candidates from repeated plans
//! of the same route share entries while distinct candidates do not.
//!
//! Only successful answers are stored: an error or an empty reverse geocode
//! is retried on the next call.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::{LatLon, LodgingOption, PointOfInterest};
use crate::planner::{
    LodgingProvider, PlaceName, PoiKind, PoiProvider, ProviderError, ReverseGeocoder, SearchArea,
};

/// Position rounded to 1e-4 degrees.
type PointKey = (i32, i32);

/// Cache key for area searches: (point, radius in metres, limit).
type AreaKey = (PointKey, u32, usize);

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries per lookup kind.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(30 * 60),
            max_capacity: 10_000,
        }
    }
}

fn point_key(at: LatLon) -> PointKey {
    ((at.lat * 1e4).round() as i32, (at.lon * 1e4).round() as i32)
}

fn area_key(area: &SearchArea) -> AreaKey {
    (
        point_key(area.center),
        area.radius_m.round() as u32,
        area.limit,
    )
}

/// A place provider with an in-memory TTL cache in front.
///
/// Wrap the rate-limited provider, so cache hits never wait for a slot.
pub struct Cached<P> {
    inner: P,
    lodging: MokaCache<AreaKey, Arc<Vec<LodgingOption>>>,
    pois: MokaCache<(AreaKey, PoiKind), Arc<Vec<PointOfInterest>>>,
    names: MokaCache<PointKey, PlaceName>,
}

impl<P> Cached<P> {
    /// Create a new cached provider with the given configuration.
    pub fn new(inner: P, config: &CacheConfig) -> Self {
        Self {
            inner,
            lodging: build(config),
            pois: build(config),
            names: build(config),
        }
    }

    /// Access the underlying provider for calls that bypass the cache.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Total cached entries across lookup kinds (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.lodging.entry_count() + self.pois.entry_count() + self.names.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.lodging.invalidate_all();
        self.pois.invalidate_all();
        self.names.invalidate_all();
    }

    /// Flush pending maintenance so counts are exact.
    pub async fn sync(&self) {
        self.lodging.run_pending_tasks().await;
        self.pois.run_pending_tasks().await;
        self.names.run_pending_tasks().await;
    }
}

fn build<K, V>(config: &CacheConfig) -> MokaCache<K, V>
where
    K: std::hash::Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    MokaCache::builder()
        .time_to_live(config.ttl)
        .max_capacity(config.max_capacity)
        .build()
}

impl<P: LodgingProvider + Send> LodgingProvider for Cached<P> {
    async fn search_lodging(&self, area: SearchArea) -> Result<Vec<LodgingOption>, ProviderError> {
        let key = area_key(&area);

        // Try cache first
        if let Some(cached) = self.lodging.get(&key).await {
            trace!(at = %area.center, radius = area.radius_m, "Lodging cache hit");
            return Ok(cached.as_ref().clone());
        }

        let found = self.inner.search_lodging(area).await?;
        self.lodging.insert(key, Arc::new(found.clone())).await;
        Ok(found)
    }
}

impl<P: PoiProvider + Send> PoiProvider for Cached<P> {
    async fn search_pois(
        &self,
        area: SearchArea,
        kind: PoiKind,
    ) -> Result<Vec<PointOfInterest>, ProviderError> {
        let key = (area_key(&area), kind);

        if let Some(cached) = self.pois.get(&key).await {
            trace!(at = %area.center, radius = area.radius_m, ?kind, "POI cache hit");
            return Ok(cached.as_ref().clone());
        }

        let found = self.inner.search_pois(area, kind).await?;
        self.pois.insert(key, Arc::new(found.clone())).await;
        Ok(found)
    }
}

impl<P: ReverseGeocoder + Send> ReverseGeocoder for Cached<P> {
    async fn lookup(&self, at: LatLon) -> Option<PlaceName> {
        let key = point_key(at);

        if let Some(cached) = self.names.get(&key).await {
            return Some(cached);
        }

        let found = self.inner.lookup(at).await?;
        self.names.insert(key, found.clone()).await;
        Some(found)
    }
}
