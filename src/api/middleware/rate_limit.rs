//! Per-client rate limiting using the token bucket algorithm.
//!
//! Two policies: [`Policy::Public`] for reads and [`Policy::Secure`] for
//! authenticated mutations. The client key is the peer socket address, or
//! the forwarded client IP when the service runs behind a trusted proxy.

use axum::Router;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// 2 requests per second, burst of 100.
    Public,
    /// 1 request per second, burst of 10.
    Secure,
}

impl Policy {
    fn quota(self) -> (u64, u32) {
        match self {
            Self::Public => (2, 100),
            Self::Secure => (1, 10),
        }
    }
}

/// Builds a governor layer keyed by `key_extractor`.
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
fn layer<K: KeyExtractor>(
    key_extractor: K,
    policy: Policy,
) -> GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let (per_second, burst) = policy.quota();

    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(per_second)
            .burst_size(burst)
            .key_extractor(key_extractor)
            .finish()
            .expect("rate limit quotas are non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

/// Applies `policy` to every route of `router`.
///
/// With `behind_proxy` the client IP is read from `X-Forwarded-For` /
/// `X-Real-IP` (falling back to the peer address); enable only behind a
/// trusted reverse proxy.
pub fn apply(router: Router<AppState>, policy: Policy, behind_proxy: bool) -> Router<AppState> {
    if behind_proxy {
        router.layer(layer(SmartIpKeyExtractor, policy))
    } else {
        router.layer(layer(PeerIpKeyExtractor, policy))
    }
}
