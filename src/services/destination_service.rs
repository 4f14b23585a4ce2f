use crate::client::ApiClient;
use crate::dto::destination_dto::{DestinoCreatePayload, DestinoListParams, DestinoUpdatePayload};
use crate::models::destination::DestinoRota;
use crate::utils::errors::AppResult;

/// CRUD de destinos de rota
#[derive(Clone, Debug)]
pub struct DestinoService {
    client: ApiClient,
}

impl DestinoService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Por defecto sólo destinos activos
    pub async fn list(&self, params: &DestinoListParams) -> AppResult<Vec<DestinoRota>> {
        self.client.get_json_with_query("/destinos", &params.query()).await
    }

    pub async fn get(&self, id: i64) -> AppResult<DestinoRota> {
        self.client.get_json(&format!("/destinos/{}", id)).await
    }

    pub async fn create(&self, payload: &DestinoCreatePayload) -> AppResult<DestinoRota> {
        log::info!("📍 Creando destino: {}", payload.nome);
        self.client.post_json("/destinos", payload).await
    }

    pub async fn update(&self, id: i64, payload: &DestinoUpdatePayload) -> AppResult<DestinoRota> {
        self.client.put_json(&format!("/destinos/{}", id), payload).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        log::info!("🗑️ Eliminando destino {}", id);
        self.client.delete(&format!("/destinos/{}", id)).await
    }
}
