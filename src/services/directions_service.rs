//! Proveedor de trayectos por carretera
//!
//! Consulta el servicio público de OSRM (`/route/v1/driving`) y devuelve la
//! geometría del primer trayecto como pares `(lat, lon)`.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::utils::errors::{AppError, AppResult};

/// Coordenada `(latitud, longitud)`
pub type LatLng = (f64, f64);

#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    /// Trayecto por carretera que pasa por los puntos en orden
    async fn route(&self, waypoints: &[LatLng]) -> AppResult<Vec<LatLng>>;
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: Option<OsrmGeometry>,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>, // [longitude, latitude]
}

pub struct OsrmDirections {
    client: reqwest::Client,
    base_url: String,
}

impl OsrmDirections {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("geo-rota-admin")
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn route_url(&self, waypoints: &[LatLng]) -> String {
        let query = waypoints
            .iter()
            .map(|(lat, lon)| format!("{},{}", lon, lat))
            .collect::<Vec<_>>()
            .join(";");
        format!("{}/route/v1/driving/{}", self.base_url, query)
    }
}

#[async_trait]
impl DirectionsProvider for OsrmDirections {
    async fn route(&self, waypoints: &[LatLng]) -> AppResult<Vec<LatLng>> {
        let url = self.route_url(waypoints);
        debug!("🗺️ Consultando trayecto: {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("overview", "full"), ("geometries", "geojson")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Directions(format!(
                "Falha ao calcular rota no mapa ({})",
                response.status()
            )));
        }

        let body: OsrmRouteResponse = response.json().await?;
        let coordinates = body
            .routes
            .into_iter()
            .next()
            .and_then(|route| route.geometry)
            .map(|geometry| geometry.coordinates)
            .filter(|coordinates| !coordinates.is_empty())
            .ok_or_else(|| AppError::Directions("Trajeto indisponível para os pontos informados.".to_string()))?;

        Ok(coordinates.into_iter().map(|[lon, lat]| (lat, lon)).collect())
    }
}
