use crate::client::ApiClient;
use crate::dto::company_dto::{EmpresaCreatePayload, EmpresaUpdatePayload};
use crate::models::company::Empresa;
use crate::utils::errors::AppResult;

/// CRUD de empresas
#[derive(Clone, Debug)]
pub struct EmpresaService {
    client: ApiClient,
}

impl EmpresaService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> AppResult<Vec<Empresa>> {
        log::debug!("🏢 Listando empresas");
        self.client.get_json("/empresas").await
    }

    pub async fn get(&self, id: i64) -> AppResult<Empresa> {
        self.client.get_json(&format!("/empresas/{}", id)).await
    }

    pub async fn create(&self, payload: &EmpresaCreatePayload) -> AppResult<Empresa> {
        log::info!("🏢 Creando empresa: {}", payload.codigo);
        self.client.post_json("/empresas", payload).await
    }

    pub async fn update(&self, id: i64, payload: &EmpresaUpdatePayload) -> AppResult<Empresa> {
        self.client.put_json(&format!("/empresas/{}", id), payload).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        log::info!("🗑️ Eliminando empresa {}", id);
        self.client.delete(&format!("/empresas/{}", id)).await
    }
}
