//! Address geocoding against a Nominatim-style endpoint, fronted by an
//! explicit in-process cache.
//!
//! The cache is owned by `AppState` and injected into the lookup; entries
//! expire after a configured TTL and the least-recently-used entry is
//! evicted once the configured capacity is reached. Upstream geocoders
//! rate-limit aggressively, so repeated lookups for the same address must
//! not leave the process.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, info};

use crate::config::GeocodingConfig;
use crate::models::calc::{GeoCoordinate, GeocodingApiPlace};

// ─── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum GeocodingError {
    #[error("geocoding request failed: {0}")]
    Upstream(#[from] reqwest::Error),
    #[error("no match for query \"{0}\"")]
    NotFound(String),
    #[error("geocoder returned unparsable coordinates: {0}")]
    InvalidResponse(String),
}

// ─── Cache ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct CacheEntry {
    coordinate: GeoCoordinate,
    inserted_at: Instant,
    last_used: Instant,
}

/// Bounded TTL + least-recently-used cache for geocoding results.
#[derive(Debug)]
pub struct GeocodingCache {
    capacity: usize,
    ttl: Duration,
    entries: HashMap<String, CacheEntry>,
}

impl GeocodingCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            capacity: capacity.max(1),
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Fresh hit for the query, bumping its recency. Expired entries are
    /// dropped on access.
    pub fn get(&mut self, query: &str) -> Option<GeoCoordinate> {
        let now = Instant::now();
        match self.entries.get_mut(query) {
            Some(entry) if now.duration_since(entry.inserted_at) < self.ttl => {
                entry.last_used = now;
                Some(entry.coordinate)
            }
            Some(_) => {
                self.entries.remove(query);
                None
            }
            None => None,
        }
    }

    pub fn insert(&mut self, query: String, coordinate: GeoCoordinate) {
        let now = Instant::now();
        if !self.entries.contains_key(&query) && self.entries.len() >= self.capacity {
            if let Some(oldest) = self
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(key, _)| key.clone())
            {
                debug!("geocoding cache full, evicting \"{}\"", oldest);
                self.entries.remove(&oldest);
            }
        }
        self.entries.insert(
            query,
            CacheEntry {
                coordinate,
                inserted_at: now,
                last_used: now,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ─── Lookup ──────────────────────────────────────────────────────────────────

/// Resolve a free-form address to WGS84 coordinates. Returns the coordinate
/// and whether it was served from the cache.
pub async fn resolve(
    config: &GeocodingConfig,
    cache: &Arc<RwLock<GeocodingCache>>,
    query: &str,
) -> Result<(GeoCoordinate, bool), GeocodingError> {
    if let Ok(mut cache) = cache.write() {
        if let Some(coordinate) = cache.get(query) {
            debug!("geocoding cache hit for \"{}\"", query);
            return Ok((coordinate, true));
        }
    }

    let url = format!(
        "{}?q={}&format=json&limit=1",
        config.endpoint,
        urlencode(query)
    );
    let places: Vec<GeocodingApiPlace> = reqwest::Client::new()
        .get(&url)
        .header(reqwest::header::USER_AGENT, &config.user_agent)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let place = places
        .into_iter()
        .next()
        .ok_or_else(|| GeocodingError::NotFound(query.to_string()))?;
    let coordinate = GeoCoordinate {
        longitude: place
            .lon
            .parse()
            .map_err(|_| GeocodingError::InvalidResponse(place.lon.clone()))?,
        latitude: place
            .lat
            .parse()
            .map_err(|_| GeocodingError::InvalidResponse(place.lat.clone()))?,
    };

    if let Ok(mut cache) = cache.write() {
        cache.insert(query.to_string(), coordinate);
    }
    info!(
        "geocoded \"{}\" to ({:.5}, {:.5})",
        query, coordinate.longitude, coordinate.latitude
    );
    Ok((coordinate, false))
}

/// Percent-encode a query for the geocoder URL.
fn urlencode(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            other => out.push_str(&format!("%{other:02X}")),
        }
    }
    out
}
