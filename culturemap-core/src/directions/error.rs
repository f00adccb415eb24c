use std::fmt;

use thiserror::Error;

/// Which quota was exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitScope {
    /// The local per-minute budget.
    Minute,
    /// The local per-day budget.
    Day,
    /// The routing service rejected the call with HTTP 429.
    Upstream,
}

impl fmt::Display for RateLimitScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Minute => "per-minute",
            Self::Day => "daily",
            Self::Upstream => "upstream",
        })
    }
}

/// Errors from [`crate::DirectionsProvider::directions`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectionsError {
    /// Origin and destination are the same coordinate.
    #[error("origin and destination are identical")]
    SameOriginAndDestination,

    /// A coordinate in the request was non-finite or out of range.
    #[error("invalid coordinate: {message}")]
    InvalidCoordinate {
        /// Description of the offending coordinate.
        message: String,
    },

    /// The routing service found no route.
    #[error("no route found: {message}")]
    EmptyRoute {
        /// Explanation returned by the service, if any.
        message: String,
    },

    /// A call quota was exceeded.
    #[error("{scope} rate limit exceeded")]
    RateLimited {
        /// The exhausted quota.
        scope: RateLimitScope,
    },

    /// The routing service rejected the API key or its permissions.
    #[error("routing service rejected the API key or its permissions")]
    Unauthorized,

    /// The routing service rejected the caller's IP address.
    #[error("routing service rejected this server's IP address; register it in the allow list")]
    IpNotAllowed,

    /// The request timed out.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },

    /// The service returned a non-success status.
    #[error("HTTP {status} from {url}: {message}")]
    HttpError {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error detail.
        message: String,
    },

    /// The request could not be delivered.
    #[error("network error contacting {url}: {message}")]
    NetworkError {
        /// Requested URL.
        url: String,
        /// Error detail.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("failed to parse routing response: {message}")]
    ParseError {
        /// Error detail.
        message: String,
    },

    /// No routing backend is configured.
    #[error("directions are disabled; configure a routing API key")]
    Disabled,
}
