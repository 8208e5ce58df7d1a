use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use axum::extract::FromRef;

use crate::config::Config;
use crate::services::geocoding::GeocodingCache;

#[derive(Clone, Debug)]
pub struct AppState {
    /// Geocoding results, bounded and TTL-expired. Held here and injected
    /// into lookups rather than living as a module-level singleton.
    pub geocoding_cache: Arc<RwLock<GeocodingCache>>,
    started_at: Instant,
}

impl AppState {
    pub fn new(cache_capacity: usize, cache_ttl: Duration) -> Self {
        Self {
            geocoding_cache: Arc::new(RwLock::new(GeocodingCache::new(
                cache_capacity,
                cache_ttl,
            ))),
            started_at: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub fn geocode_cache_entries(&self) -> usize {
        self.geocoding_cache.read().map(|c| c.len()).unwrap_or(0)
    }
}

/// Bundle handed to the router. Handlers extract `State<AppState>` and/or
/// `State<Config>` via `FromRef<SharedState>` — a single `.with_state(shared)`
/// covers both.
#[derive(Clone)]
pub struct SharedState {
    pub config: Config,
    pub app: AppState,
}

impl FromRef<SharedState> for Config {
    fn from_ref(shared: &SharedState) -> Config {
        shared.config.clone()
    }
}

impl FromRef<SharedState> for AppState {
    fn from_ref(shared: &SharedState) -> AppState {
        shared.app.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_starts_with_an_empty_cache() {
        let state = AppState::new(16, Duration::from_secs(60));
        assert_eq!(state.geocode_cache_entries(), 0);
    }
}
