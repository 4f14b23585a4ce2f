//! Servicio de rutas
//!
//! Todas las mutaciones son `POST /rotas/{id}/<acción>` y devuelven la ruta
//! completa actualizada.

use crate::client::ApiClient;
use crate::dto::route_dto::{
    AtualizarDataTurnoPayload, AtualizarDestinoPayload, AtualizarFuncionariosPayload, AtualizarMotoristaPayload,
    AtualizarStatusPayload, AtualizarVeiculoPayload, RecalcularRotaPayload, RemanejamentoPayload, RotaListParams,
};
use crate::models::route::Rota;
use crate::utils::errors::AppResult;

#[derive(Clone, Debug)]
pub struct RotaService {
    client: ApiClient,
}

impl RotaService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, params: &RotaListParams) -> AppResult<Vec<Rota>> {
        self.client.get_json_with_query("/rotas", &params.query()).await
    }

    pub async fn get(&self, id: i64) -> AppResult<Rota> {
        self.client.get_json(&format!("/rotas/{}", id)).await
    }

    pub async fn update_status(&self, id: i64, payload: &AtualizarStatusPayload) -> AppResult<Rota> {
        log::info!("🚦 Rota {} -> {}", id, payload.status.as_str());
        self.client.post_json(&format!("/rotas/{}/status", id), payload).await
    }

    pub async fn update_driver(&self, id: i64, payload: &AtualizarMotoristaPayload) -> AppResult<Rota> {
        self.client.post_json(&format!("/rotas/{}/motorista", id), payload).await
    }

    pub async fn update_vehicle(&self, id: i64, payload: &AtualizarVeiculoPayload) -> AppResult<Rota> {
        self.client.post_json(&format!("/rotas/{}/veiculo", id), payload).await
    }

    pub async fn update_destination(&self, id: i64, payload: &AtualizarDestinoPayload) -> AppResult<Rota> {
        self.client.post_json(&format!("/rotas/{}/destino", id), payload).await
    }

    pub async fn update_schedule(&self, id: i64, payload: &AtualizarDataTurnoPayload) -> AppResult<Rota> {
        self.client.post_json(&format!("/rotas/{}/data-turno", id), payload).await
    }

    /// Reemplaza la lista completa de atribuciones
    pub async fn update_assignments(&self, id: i64, payload: &AtualizarFuncionariosPayload) -> AppResult<Rota> {
        log::info!("👥 Rota {}: {} atribuciones", id, payload.atribuicoes.len());
        self.client.post_json(&format!("/rotas/{}/funcionarios", id), payload).await
    }

    /// Devuelve `[origem, destino]` actualizadas
    pub async fn reassign(&self, payload: &RemanejamentoPayload) -> AppResult<Vec<Rota>> {
        log::info!(
            "🔀 Remanejando {:?} de la rota {} a la rota {}",
            payload.funcionarios_ids,
            payload.rota_origem_id,
            payload.rota_destino_id
        );
        self.client.post_json("/rotas/remanejamentos", payload).await
    }

    pub async fn recalculate(&self, id: i64, payload: &RecalcularRotaPayload) -> AppResult<Rota> {
        log::info!("🔄 Recalculando rota {}", id);
        self.client.post_json(&format!("/rotas/{}/recalcular", id), payload).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        log::info!("🗑️ Eliminando rota {}", id);
        self.client.delete(&format!("/rotas/{}", id)).await
    }
}
