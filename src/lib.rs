pub mod api;
pub mod bootstrap;
pub mod config;
pub mod data_structures;

use crate::config::RateLimitConfig;
use crate::data_structures::SharedPage;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::trace::TraceLayer;

/// Build the dashboard router around an already rendered page.
///
/// The rate limiter keys on the peer address, so a router built with a
/// limit must be served with `into_make_service_with_connect_info`.
pub fn app(page: SharedPage, rate_limit: Option<&RateLimitConfig>) -> anyhow::Result<Router> {
    let mut router = Router::new().route("/", get(api::get_dashboard_handler));

    if let Some(limit) = rate_limit {
        let governor_conf = Arc::new(
            GovernorConfigBuilder::default()
                .per_millisecond(limit.replenish_interval_ms())
                .burst_size(limit.burst_size)
                .finish()
                .ok_or_else(|| anyhow::anyhow!("Invalid rate limit configuration: {:?}", limit))?,
        );
        router = router.layer(GovernorLayer::new(governor_conf));
    }

    Ok(router.layer(TraceLayer::new_for_http()).with_state(page))
}
