//! Modelo de Veículo

use serde::{Deserialize, Serialize};

/// Categoría de costo operativo del vehículo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoriaCusto {
    Baixo,
    Medio,
    Alto,
}

impl CategoriaCusto {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoriaCusto::Baixo => "baixo",
            CategoriaCusto::Medio => "medio",
            CategoriaCusto::Alto => "alto",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Veiculo {
    pub id: i64,
    pub empresa_id: i64,
    pub placa: String,
    pub tipo: String,
    pub capacidade_passageiros: i32,
    pub consumo_medio_km_l: f64,
    pub categoria_custo: CategoriaCusto,
    pub ativo: bool,
}

impl Veiculo {
    /// Etiqueta para selectores: "ABC1D23 - van (15 lugares)"
    pub fn label(&self) -> String {
        format!("{} - {} ({} lugares)", self.placa, self.tipo, self.capacidade_passageiros)
    }
}
