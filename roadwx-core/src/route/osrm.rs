use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::{error::RouteError, geo::GeoPoint};

use super::RouteProvider;

/// OSRM `route` service client (driving profile).
#[derive(Debug, Clone)]
pub struct OsrmProvider {
    base_url: String,
    http: Client,
}

impl OsrmProvider {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, RouteError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn route_url(&self, waypoints: &[GeoPoint]) -> String {
        let coords: Vec<String> = waypoints
            .iter()
            .map(|p| format!("{},{}", p.lon, p.lat))
            .collect();

        format!("{}/route/v1/driving/{}", self.base_url, coords.join(";"))
    }
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: OsrmGeometry,
}

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[async_trait]
impl RouteProvider for OsrmProvider {
    async fn fetch_route(&self, waypoints: &[GeoPoint]) -> Result<Vec<GeoPoint>, RouteError> {
        if waypoints.len() < 2 {
            return Err(RouteError::TooFewWaypoints(waypoints.len()));
        }

        let res = self
            .http
            .get(self.route_url(waypoints))
            .query(&[("overview", "full"), ("geometries", "geojson")])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(RouteError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        decode_route(&body)
    }
}

/// OSRM geometry is `[lon, lat]`; points come back as lat/lon.
fn decode_route(body: &str) -> Result<Vec<GeoPoint>, RouteError> {
    let parsed: OsrmResponse = serde_json::from_str(body)?;

    if parsed.code != "Ok" {
        let reason = parsed.message.unwrap_or(parsed.code);
        return Err(RouteError::NoRoute(reason));
    }

    let route = parsed
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| RouteError::NoRoute("empty route list".to_string()))?;

    Ok(route
        .geometry
        .coordinates
        .into_iter()
        .map(|[lon, lat]| GeoPoint { lat, lon })
        .collect())
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
