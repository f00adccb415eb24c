//! Short-lived cache of directions responses.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use culturemap_core::{Directions, DirectionsRequest};

use super::kakao::lng_lat;

/// Cache key for `request`: `lng,lat->lng,lat`, followed by
/// `|wp=lng,lat;lng,lat;` when waypoints are present.
///
/// # Examples
/// ```
/// use culturemap_core::{DirectionsRequest, GeoPoint};
/// use culturemap_data::routing::cache_key;
///
/// let request = DirectionsRequest::new(GeoPoint::new(37.5, 127.0), GeoPoint::new(37.6, 127.1));
/// assert_eq!(cache_key(&request), "127.000000,37.500000->127.100000,37.600000");
/// ```
#[must_use]
pub fn cache_key(request: &DirectionsRequest) -> String {
    let mut key = format!(
        "{}->{}",
        lng_lat(&request.origin),
        lng_lat(&request.destination)
    );
    if !request.waypoints.is_empty() {
        key.push_str("|wp=");
        for waypoint in &request.waypoints {
            key.push_str(&lng_lat(waypoint));
            key.push(';');
        }
    }
    key
}

/// Size at which an insert first sweeps out expired entries.
const PRUNE_THRESHOLD: usize = 256;

#[derive(Debug, Clone)]
struct CacheEntry {
    directions: Directions,
    expires_at: Instant,
}

/// Thread-safe TTL cache of [`Directions`] keyed by [`cache_key`].
///
/// Expired entries are evicted when they are read, and swept on insert once
/// the map reaches a size bound. Callers pass the current
/// instant explicitly.
#[derive(Debug)]
pub struct DirectionsCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl DirectionsCache {
    /// Create an empty cache whose entries live for `ttl`.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Entry lifetime.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fetch a live entry, evicting it if it has expired.
    pub fn get(&self, key: &str, now: Instant) -> Option<Directions> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        match entries.get(key) {
            Some(entry) if now < entry.expires_at => Some(entry.directions.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store `directions` under `key`, replacing any previous entry.
    pub fn insert(&self, key: String, directions: Directions, now: Instant) {
        let expires_at = now.checked_add(self.ttl).unwrap_or(now);
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if entries.len() >= PRUNE_THRESHOLD {
            entries.retain(|_, entry| now < entry.expires_at);
        }
        entries.insert(
            key,
            CacheEntry {
                directions,
                expires_at,
            },
        );
    }

    /// Number of stored entries, live or not yet evicted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
