//! HTTP `DirectionsProvider` for the Kakao Mobility car directions API.
//!
//! The [`DirectionsProvider`] trait is synchronous to keep the core library
//! embeddable in synchronous contexts. This provider bridges the async HTTP
//! call to the sync interface by blocking on a Tokio runtime internally.
//!
//! Each call runs, in order: request validation, cache lookup, quota check,
//! the HTTP request, cache store and usage accounting. Cache hits never
//! touch the quota.

use std::fmt;
use std::future::Future;
use std::panic;
use std::thread;
use std::time::{Duration, Instant};

use culturemap_core::{
    Directions, DirectionsError, DirectionsProvider, DirectionsRequest, RateLimitScope,
};
use log::{debug, error, info};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;

use super::cache::{DirectionsCache, cache_key};
use super::kakao::{DirectionsResponse, lng_lat};
use super::limits::{RateLimiter, UsageCounter, UsageStats, current_utc_day};

/// Error type for [`HttpDirectionsProvider`] construction failures.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// The base URL could not be parsed.
    #[error("invalid directions base URL {url:?}: {source}")]
    InvalidBaseUrl {
        /// URL as configured.
        url: String,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Name reported in [`Directions::provider`].
pub const KAKAO_PROVIDER: &str = "kakao-mobility";

/// Default directions endpoint.
pub const DEFAULT_BASE_URL: &str = "https://apis-navi.kakaomobility.com/v1/directions";

/// Default user agent for directions requests.
pub const DEFAULT_USER_AGENT: &str = "culturemap-directions/0.1";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default lifetime of cached responses.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(10 * 60);

/// Default number of upstream calls per 60-second window.
pub const DEFAULT_PER_MINUTE_LIMIT: u32 = 60;

/// Default number of upstream calls per UTC day.
pub const DEFAULT_DAILY_LIMIT: u32 = 400;

/// Configuration for [`HttpDirectionsProvider`].
#[derive(Clone)]
pub struct HttpDirectionsProviderConfig {
    /// Directions endpoint, without query string.
    pub base_url: String,
    /// REST API key sent as `Authorization: KakaoAK {key}`.
    pub api_key: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
    /// Lifetime of cached responses.
    pub cache_ttl: Duration,
    /// Upstream calls allowed per 60-second window.
    pub per_minute_limit: u32,
    /// Upstream calls allowed per UTC day.
    pub daily_limit: u32,
}

impl fmt::Debug for HttpDirectionsProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpDirectionsProviderConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("cache_ttl", &self.cache_ttl)
            .field("per_minute_limit", &self.per_minute_limit)
            .field("daily_limit", &self.daily_limit)
            .finish()
    }
}

impl Default for HttpDirectionsProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: String::new(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            cache_ttl: DEFAULT_CACHE_TTL,
            per_minute_limit: DEFAULT_PER_MINUTE_LIMIT,
            daily_limit: DEFAULT_DAILY_LIMIT,
        }
    }
}

impl HttpDirectionsProviderConfig {
    /// Create a configuration for the default endpoint with `api_key`.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Whether an API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Set the directions endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the cache lifetime; zero disables caching.
    #[must_use]
    pub fn with_cache_ttl(mut self, cache_ttl: Duration) -> Self {
        self.cache_ttl = cache_ttl;
        self
    }

    /// Set both call quotas.
    #[must_use]
    pub fn with_limits(mut self, per_minute: u32, daily: u32) -> Self {
        self.per_minute_limit = per_minute;
        self.daily_limit = daily;
        self
    }
}

/// Directions provider backed by the Kakao Mobility HTTP API.
///
/// # Runtime behaviour
///
/// When called from outside any Tokio runtime, the provider uses its own
/// stored runtime. When called from within an existing multi-threaded Tokio
/// runtime (detected via [`Handle::try_current()`] and
/// [`RuntimeFlavor::MultiThread`]), it uses that runtime's handle with
/// [`tokio::task::block_in_place`] to avoid nested runtime panics.
///
/// When called from within a `current_thread` Tokio runtime, the request
/// runs on the provider's own runtime from a scoped helper thread.
pub struct HttpDirectionsProvider {
    client: Client,
    config: HttpDirectionsProviderConfig,
    base_url: Url,
    cache: DirectionsCache,
    limiter: RateLimiter,
    usage: UsageCounter,
    runtime: Runtime,
}

impl fmt::Debug for HttpDirectionsProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpDirectionsProvider")
            .field("config", &self.config)
            .field("cached_routes", &self.cache.len())
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish_non_exhaustive()
    }
}

impl HttpDirectionsProvider {
    /// Create a provider for the default endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpDirectionsProviderConfig::new(api_key))
    }

    /// Create a provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid, or if the HTTP client
    /// or Tokio runtime fails to build.
    pub fn with_config(config: HttpDirectionsProviderConfig) -> Result<Self, ProviderBuildError> {
        let base_url =
            Url::parse(&config.base_url).map_err(|source| ProviderBuildError::InvalidBaseUrl {
                url: config.base_url.clone(),
                source,
            })?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            cache: DirectionsCache::new(config.cache_ttl),
            limiter: RateLimiter::new(config.per_minute_limit, config.daily_limit),
            usage: UsageCounter::default(),
            config,
            base_url,
            runtime,
        })
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &HttpDirectionsProviderConfig {
        &self.config
    }

    /// Upstream calls made so far.
    #[must_use]
    pub fn usage(&self) -> UsageStats {
        self.usage.snapshot(current_utc_day())
    }

    /// Build the request URL.
    ///
    /// The query is `priority=RECOMMEND&car_fuel=GASOLINE&car_hipass=false`
    /// followed by `origin`, `destination` and, when present, `waypoints`
    /// joined by `|`. Points are `lng,lat` with six decimals.
    fn build_url(&self, request: &DirectionsRequest) -> Url {
        let mut query = format!(
            "priority=RECOMMEND&car_fuel=GASOLINE&car_hipass=false&origin={}&destination={}",
            lng_lat(&request.origin),
            lng_lat(&request.destination)
        );
        if !request.waypoints.is_empty() {
            let waypoints: Vec<String> = request.waypoints.iter().map(lng_lat).collect();
            query.push_str("&waypoints=");
            query.push_str(&waypoints.join("|"));
        }
        let mut url = self.base_url.clone();
        url.set_query(Some(&query));
        url
    }

    /// Run `future` to completion from synchronous code.
    fn block_on<F>(&self, future: F) -> F::Output
    where
        F: Future + Send,
        F::Output: Send,
    {
        // block_in_place requires a multi-threaded runtime.
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            Ok(_) => thread::scope(|scope| {
                scope
                    .spawn(|| self.runtime.block_on(future))
                    .join()
                    .unwrap_or_else(|payload| panic::resume_unwind(payload))
            }),
            Err(_) => self.runtime.block_on(future),
        }
    }

    /// Fetch and parse directions asynchronously.
    async fn fetch_async(&self, url: &Url) -> Result<Directions, DirectionsError> {
        debug!("requesting directions from {}", self.base_url);
        let response = self
            .client
            .get(url.clone())
            .header(AUTHORIZATION, format!("KakaoAK {}", self.config.api_key))
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url.as_str()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(convert_status(status, &body, url.as_str()));
        }

        let parsed: DirectionsResponse =
            response
                .json()
                .await
                .map_err(|err| DirectionsError::ParseError {
                    message: err.to_string(),
                })?;
        parsed.into_directions()
    }

    /// Convert a reqwest error to a `DirectionsError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> DirectionsError {
        if error.is_timeout() {
            return DirectionsError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return DirectionsError::HttpError {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        DirectionsError::NetworkError {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

/// Map a non-success status and its body to a `DirectionsError`.
fn convert_status(status: StatusCode, body: &str, url: &str) -> DirectionsError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN if body.contains("ip mismatched") => {
            DirectionsError::IpNotAllowed
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => DirectionsError::Unauthorized,
        StatusCode::TOO_MANY_REQUESTS => DirectionsError::RateLimited {
            scope: RateLimitScope::Upstream,
        },
        _ => {
            error!("directions call failed: status={status}, body={body}");
            let message = if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("unknown status").to_owned()
            } else {
                body.trim().to_owned()
            };
            DirectionsError::HttpError {
                url: url.to_owned(),
                status: status.as_u16(),
                message,
            }
        }
    }
}

impl DirectionsProvider for HttpDirectionsProvider {
    /// Fetch car directions for `request`.
    ///
    /// # Runtime requirements
    ///
    /// Safe to call from inside any Tokio runtime flavour; see the
    /// type-level docs.
    fn directions(&self, request: &DirectionsRequest) -> Result<Directions, DirectionsError> {
        request.validate()?;

        let key = cache_key(request);
        if let Some(mut cached) = self.cache.get(&key, Instant::now()) {
            info!("directions cache hit for key={key}");
            cached.from_cache = true;
            return Ok(cached);
        }

        self.limiter
            .try_acquire(Instant::now(), current_utc_day())
            .map_err(|scope| DirectionsError::RateLimited { scope })?;

        let url = self.build_url(request);
        let directions = self.block_on(self.fetch_async(&url))?;
        self.cache.insert(key, directions.clone(), Instant::now());
        self.usage.record(current_utc_day());
        Ok(directions)
    }
}
