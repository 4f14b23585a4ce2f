//! Modelo de Grupo de rota

use serde::{Deserialize, Serialize};

/// Régimen de operación del grupo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipoRegime {
    Diario,
    Embarque,
}

impl TipoRegime {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoRegime::Diario => "diario",
            TipoRegime::Embarque => "embarque",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "diario" => Some(TipoRegime::Diario),
            "embarque" => Some(TipoRegime::Embarque),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrupoRota {
    pub id: i64,
    pub empresa_id: i64,
    pub nome: String,
    pub tipo_regime: TipoRegime,
    #[serde(default)]
    pub dias_semana_padrao: Vec<i32>,
    pub descricao: Option<String>,
}
