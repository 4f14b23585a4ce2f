use serde::Serialize;

use crate::models::vehicle::CategoriaCusto;

// Filtros del listado de vehículos
#[derive(Debug, Clone, Default)]
pub struct VeiculoListParams {
    pub empresa_id: Option<i64>,
    pub apenas_ativos: Option<bool>,
}

impl VeiculoListParams {
    pub fn for_company(empresa_id: i64) -> Self {
        Self {
            empresa_id: Some(empresa_id),
            apenas_ativos: None,
        }
    }

    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(empresa_id) = self.empresa_id {
            query.push(("empresa_id", empresa_id.to_string()));
        }
        query.push(("apenas_ativos", self.apenas_ativos.unwrap_or(true).to_string()));
        query
    }
}

// Request para crear un vehículo
#[derive(Debug, Clone, Serialize)]
pub struct VeiculoCreatePayload {
    pub empresa_id: i64,
    pub placa: String,
    pub tipo: String,
    pub capacidade_passageiros: i32,
    pub consumo_medio_km_l: f64,
    pub categoria_custo: CategoriaCusto,
    pub ativo: bool,
}

// Request para actualizar un vehículo
#[derive(Debug, Clone, Default, Serialize)]
pub struct VeiculoUpdatePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placa: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacidade_passageiros: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumo_medio_km_l: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoria_custo: Option<CategoriaCusto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ativo: Option<bool>,
}
