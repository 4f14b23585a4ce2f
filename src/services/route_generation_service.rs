use crate::client::ApiClient;
use crate::dto::route_dto::GerarRotaPayload;
use crate::models::route::RotaGerada;
use crate::utils::errors::AppResult;

/// Generación automática de rutas. El optimizador corre en el servidor.
#[derive(Clone, Debug)]
pub struct RotaAutomaticaService {
    client: ApiClient,
}

impl RotaAutomaticaService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Una sola ruta: `POST /rotas/gerar`
    pub async fn generate_single(&self, payload: &GerarRotaPayload) -> AppResult<RotaGerada> {
        log::info!("🧮 Generando rota simple para grupo {}", payload.grupo_rota_id);
        self.client.post_json("/rotas/gerar", payload).await
    }

    /// Varias rutas vía VRP: `POST /rotas/gerar-vrp`
    pub async fn generate_vrp(&self, payload: &GerarRotaPayload) -> AppResult<Vec<RotaGerada>> {
        log::info!("🧮 Generando rotas VRP para grupo {}", payload.grupo_rota_id);
        self.client.post_json("/rotas/gerar-vrp", payload).await
    }
}
