use crate::client::ApiClient;
use crate::dto::vehicle_dto::{VeiculoCreatePayload, VeiculoListParams, VeiculoUpdatePayload};
use crate::models::vehicle::Veiculo;
use crate::utils::errors::AppResult;

/// CRUD de vehículos
#[derive(Clone, Debug)]
pub struct VeiculoService {
    client: ApiClient,
}

impl VeiculoService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Por defecto sólo vehículos activos
    pub async fn list(&self, params: &VeiculoListParams) -> AppResult<Vec<Veiculo>> {
        self.client.get_json_with_query("/veiculos", &params.query()).await
    }

    pub async fn get(&self, id: i64) -> AppResult<Veiculo> {
        self.client.get_json(&format!("/veiculos/{}", id)).await
    }

    pub async fn create(&self, payload: &VeiculoCreatePayload) -> AppResult<Veiculo> {
        log::info!("🚐 Creando vehículo: {}", payload.placa);
        self.client.post_json("/veiculos", payload).await
    }

    pub async fn update(&self, id: i64, payload: &VeiculoUpdatePayload) -> AppResult<Veiculo> {
        self.client.put_json(&format!("/veiculos/{}", id), payload).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        log::info!("🗑️ Eliminando vehículo {}", id);
        self.client.delete(&format!("/veiculos/{}", id)).await
    }
}
