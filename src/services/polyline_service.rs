//! Enriquecimiento del trazado de una ruta
//!
//! Construye la secuencia de puntos (atribuciones con coordenadas y luego el
//! destino) y pide el trayecto por carretera. Si el proveedor falla se usan
//! líneas rectas entre los puntos y se devuelve un aviso no fatal.

use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::models::route::{AtribuicaoRota, DestinoResumo, Rota};
use crate::services::directions_service::{DirectionsProvider, LatLng, OsrmDirections};
use crate::utils::errors::AppResult;

pub const FALLBACK_ADVISORY: &str =
    "Não foi possível calcular o trajeto pela estrada. Exibindo linhas retas como fallback.";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoutePath {
    /// Puntos de paso en orden de embarque
    pub waypoints: Vec<LatLng>,
    /// Trayecto por carretera; vacío si no se pidió o falló
    pub road_path: Vec<LatLng>,
    pub advisory: Option<String>,
}

impl RoutePath {
    /// Línea a dibujar: el trayecto por carretera o, en su defecto, las rectas
    pub fn line(&self) -> &[LatLng] {
        if self.road_path.is_empty() {
            &self.waypoints
        } else {
            &self.road_path
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.advisory.is_some()
    }
}

/// Atribuciones con latitud y longitud, en el orden dado, y el destino al final
pub fn route_waypoints(atribuicoes: &[AtribuicaoRota], destino: Option<&DestinoResumo>) -> Vec<LatLng> {
    atribuicoes
        .iter()
        .filter_map(AtribuicaoRota::coordinates)
        .chain(destino.and_then(DestinoResumo::coordinates))
        .collect()
}

#[derive(Clone)]
pub struct PolylineService {
    provider: Arc<dyn DirectionsProvider>,
}

impl PolylineService {
    pub fn new(provider: Arc<dyn DirectionsProvider>) -> Self {
        Self { provider }
    }

    pub fn osrm(base_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        Ok(Self::new(Arc::new(OsrmDirections::new(base_url, timeout)?)))
    }

    /// `None` cuando se canceló antes de terminar
    pub async fn build(&self, waypoints: Vec<LatLng>, cancel: &CancellationToken) -> Option<RoutePath> {
        if cancel.is_cancelled() {
            return None;
        }

        if waypoints.len() < 2 {
            return Some(RoutePath {
                waypoints,
                ..Default::default()
            });
        }

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("⏹️ Trayecto cancelado");
                return None;
            }
            result = self.provider.route(&waypoints) => result,
        };

        match result {
            Ok(road_path) => Some(RoutePath {
                waypoints,
                road_path,
                advisory: None,
            }),
            Err(e) => {
                warn!("⚠️ Trayecto no disponible, usando líneas rectas: {}", e);
                Some(RoutePath {
                    waypoints,
                    road_path: Vec::new(),
                    advisory: Some(FALLBACK_ADVISORY.to_string()),
                })
            }
        }
    }

    pub async fn for_route(&self, rota: &Rota, cancel: &CancellationToken) -> Option<RoutePath> {
        let waypoints = route_waypoints(&rota.sorted_assignments(), rota.destino.as_ref());
        self.build(waypoints, cancel).await
    }
}

impl std::fmt::Debug for PolylineService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolylineService").finish_non_exhaustive()
    }
}
