use serde::Serialize;

use crate::models::route_group::TipoRegime;

// Request para crear un grupo de rota
#[derive(Debug, Clone, Serialize)]
pub struct GrupoRotaCreatePayload {
    pub empresa_id: i64,
    pub nome: String,
    pub tipo_regime: TipoRegime,
    pub dias_semana_padrao: Vec<i32>,
    pub descricao: Option<String>,
}

// Request para actualizar un grupo de rota
#[derive(Debug, Clone, Default, Serialize)]
pub struct GrupoRotaUpdatePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo_regime: Option<TipoRegime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dias_semana_padrao: Option<Vec<i32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descricao: Option<Option<String>>,
}
