//! Per-provider request spacing.
//!
//! Public geodata services ask clients to keep a minimum delay between
//! requests. A [`RateLimiter`] is an explicit object owned by whoever builds
//! the collaborators; [`Throttled`] pairs one with a provider so every call
//! waits for its slot first.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::Instant;

use crate::domain::{LatLon, LodgingOption, PointOfInterest, Route};

use super::provider::{
    Geocoder, LodgingProvider, Place, PlaceName, PoiKind, PoiProvider, ProviderError,
    ReverseGeocoder, RouteProvider, SearchArea,
};

/// Hands out send slots at least `min_interval` apart.
///
/// The slot is reserved under a short synchronous lock and the caller sleeps
/// after releasing it, so concurrent callers queue up without holding the
/// lock across an await.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            next_slot: Mutex::new(None),
        }
    }

    /// A limiter that never waits.
    pub fn unlimited() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Reserve the next free slot and return when it starts.
    pub fn reserve(&self) -> Instant {
        let now = Instant::now();
        let mut next = self
            .next_slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let slot = match *next {
            Some(t) if t > now => t,
            _ => now,
        };
        *next = Some(slot + self.min_interval);
        slot
    }

    /// Wait until this caller may send.
    pub async fn acquire(&self) {
        let slot = self.reserve();
        tokio::time::sleep_until(slot).await;
    }
}

/// A provider whose calls are spaced by a shared [`RateLimiter`].
#[derive(Debug, Clone)]
pub struct Throttled<P> {
    inner: P,
    limiter: Arc<RateLimiter>,
}

impl<P> Throttled<P> {
    pub fn new(inner: P, limiter: Arc<RateLimiter>) -> Self {
        Self { inner, limiter }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }
}

impl<P: LodgingProvider + Send> LodgingProvider for Throttled<P> {
    async fn search_lodging(&self, area: SearchArea) -> Result<Vec<LodgingOption>, ProviderError> {
        self.limiter.acquire().await;
        self.inner.search_lodging(area).await
    }
}

impl<P: PoiProvider + Send> PoiProvider for Throttled<P> {
    async fn search_pois(
        &self,
        area: SearchArea,
        kind: PoiKind,
    ) -> Result<Vec<PointOfInterest>, ProviderError> {
        self.limiter.acquire().await;
        self.inner.search_pois(area, kind).await
    }
}

impl<P: ReverseGeocoder + Send> ReverseGeocoder for Throttled<P> {
    async fn lookup(&self, at: LatLon) -> Option<PlaceName> {
        self.limiter.acquire().await;
        self.inner.lookup(at).await
    }
}

impl<P: Geocoder + Send> Geocoder for Throttled<P> {
    async fn resolve(&self, text: &str) -> Result<Place, ProviderError> {
        self.limiter.acquire().await;
        self.inner.resolve(text).await
    }
}

impl<P: RouteProvider + Send> RouteProvider for Throttled<P> {
    async fn route(&self, from: LatLon, to: LatLon) -> Result<Route, ProviderError> {
        self.limiter.acquire().await;
        self.inner.route(from, to).await
    }
}
