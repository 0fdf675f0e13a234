use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug, time::Duration};
use tracing::{info, warn};

use crate::{Config, error::RouteError, geo::GeoPoint, route::osrm::OsrmProvider};

pub mod osrm;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteProviderId {
    Osrm,
    Straight,
}

impl RouteProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteProviderId::Osrm => "osrm",
            RouteProviderId::Straight => "straight",
        }
    }

    pub const fn all() -> &'static [RouteProviderId] {
        &[RouteProviderId::Osrm, RouteProviderId::Straight]
    }
}

impl std::fmt::Display for RouteProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for RouteProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let wanted = value.trim();

        RouteProviderId::all()
            .iter()
            .copied()
            .find(|id| id.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let supported: Vec<&str> =
                    RouteProviderId::all().iter().map(|id| id.as_str()).collect();
                anyhow::anyhow!(
                    "Unknown route provider '{value}' in [routing]. Supported providers: {}.\n\
                     Hint: run `roadwx configure` to pick one.",
                    supported.join(", ")
                )
            })
    }
}

/// A service that turns waypoints into a road-following polyline.
#[async_trait]
pub trait RouteProvider: Send + Sync + Debug {
    async fn fetch_route(&self, waypoints: &[GeoPoint]) -> Result<Vec<GeoPoint>, RouteError>;
}

/// Connects the waypoints directly. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct StraightLineProvider;

#[async_trait]
impl RouteProvider for StraightLineProvider {
    async fn fetch_route(&self, waypoints: &[GeoPoint]) -> Result<Vec<GeoPoint>, RouteError> {
        Ok(waypoints.to_vec())
    }
}

/// How often and how patiently to ask the routing service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// Attempt `n` waits `base_delay * (n - 1)` before it starts.
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn delay_before(&self, attempt: u32) -> Duration {
        self.base_delay * attempt.saturating_sub(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
        }
    }
}

/// Fetches a route, retrying failed attempts. `None` once every attempt failed.
pub async fn get_route(
    provider: &dyn RouteProvider,
    waypoints: &[GeoPoint],
    policy: RetryPolicy,
) -> Option<Vec<GeoPoint>> {
    for attempt in 1..=policy.max_attempts {
        let delay = policy.delay_before(attempt);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match provider.fetch_route(waypoints).await {
            Ok(route) => return Some(route),
            Err(err) => warn!(
                attempt,
                max_attempts = policy.max_attempts,
                error = %err,
                "route attempt failed"
            ),
        }
    }

    None
}

/// Like [`get_route`], but falls back to the raw waypoints.
pub async fn route_or_straight_line(
    provider: &dyn RouteProvider,
    waypoints: &[GeoPoint],
    policy: RetryPolicy,
) -> Vec<GeoPoint> {
    match get_route(provider, waypoints, policy).await {
        Some(route) => route,
        None => {
            info!(
                waypoints = waypoints.len(),
                "routing unavailable, connecting waypoints directly"
            );
            waypoints.to_vec()
        }
    }
}

/// Construct a provider from config and explicit RouteProviderId.
pub fn provider_from_config(
    id: RouteProviderId,
    config: &Config,
) -> anyhow::Result<Box<dyn RouteProvider>> {
    let boxed: Box<dyn RouteProvider> = match id {
        RouteProviderId::Osrm => Box::new(OsrmProvider::new(
            config.routing.base_url.clone(),
            config.routing.timeout(),
        )?),
        RouteProviderId::Straight => Box::new(StraightLineProvider),
    };

    Ok(boxed)
}

/// Construct the configured provider, using the `routing.provider` field.
pub fn default_provider_from_config(config: &Config) -> anyhow::Result<Box<dyn RouteProvider>> {
    let id = config.routing.provider_id()?;
    provider_from_config(id, config)
}
