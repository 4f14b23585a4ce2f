//! Servicio de funcionarios
//!
//! Las escalas de trabajo y los vínculos con grupos se envían completos en
//! cada create/update; el servidor reemplaza la colección entera.

use crate::client::ApiClient;
use crate::dto::employee_dto::{FuncionarioCreatePayload, FuncionarioListParams, FuncionarioUpdatePayload};
use crate::models::employee::{Funcionario, FuncionarioDetalhado};
use crate::utils::errors::AppResult;

#[derive(Clone, Debug)]
pub struct FuncionarioService {
    client: ApiClient,
}

impl FuncionarioService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, params: &FuncionarioListParams) -> AppResult<Vec<Funcionario>> {
        match params.empresa_id {
            Some(empresa_id) => {
                self.client
                    .get_json_with_query("/funcionarios", &[("empresa_id", empresa_id)])
                    .await
            }
            None => self.client.get_json("/funcionarios").await,
        }
    }

    pub async fn get(&self, id: i64) -> AppResult<FuncionarioDetalhado> {
        self.client.get_json(&format!("/funcionarios/{}", id)).await
    }

    pub async fn create(&self, payload: &FuncionarioCreatePayload) -> AppResult<FuncionarioDetalhado> {
        log::info!("👤 Creando funcionario: {}", payload.nome_completo);
        self.client.post_json("/funcionarios", payload).await
    }

    pub async fn update(&self, id: i64, payload: &FuncionarioUpdatePayload) -> AppResult<FuncionarioDetalhado> {
        log::info!("👤 Actualizando funcionario {}", id);
        self.client.put_json(&format!("/funcionarios/{}", id), payload).await
    }

    /// El servidor marca el funcionario como inactivo; no se borra
    pub async fn deactivate(&self, id: i64) -> AppResult<()> {
        log::info!("🚫 Desactivando funcionario {}", id);
        self.client.delete(&format!("/funcionarios/{}", id)).await
    }
}
