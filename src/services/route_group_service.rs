use crate::client::ApiClient;
use crate::dto::route_group_dto::{GrupoRotaCreatePayload, GrupoRotaUpdatePayload};
use crate::models::route_group::GrupoRota;
use crate::utils::errors::AppResult;

/// CRUD de grupos de rota
#[derive(Clone, Debug)]
pub struct GrupoRotaService {
    client: ApiClient,
}

impl GrupoRotaService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, empresa_id: Option<i64>) -> AppResult<Vec<GrupoRota>> {
        match empresa_id {
            Some(empresa_id) => {
                self.client
                    .get_json_with_query("/grupos-rota", &[("empresa_id", empresa_id)])
                    .await
            }
            None => self.client.get_json("/grupos-rota").await,
        }
    }

    pub async fn get(&self, id: i64) -> AppResult<GrupoRota> {
        self.client.get_json(&format!("/grupos-rota/{}", id)).await
    }

    pub async fn create(&self, payload: &GrupoRotaCreatePayload) -> AppResult<GrupoRota> {
        log::info!("🧭 Creando grupo de rota: {}", payload.nome);
        self.client.post_json("/grupos-rota", payload).await
    }

    pub async fn update(&self, id: i64, payload: &GrupoRotaUpdatePayload) -> AppResult<GrupoRota> {
        self.client.put_json(&format!("/grupos-rota/{}", id), payload).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        log::info!("🗑️ Eliminando grupo de rota {}", id);
        self.client.delete(&format!("/grupos-rota/{}", id)).await
    }
}
