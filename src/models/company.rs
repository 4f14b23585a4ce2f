//! Modelo de Empresa
//!
//! La empresa es el tenant que agrupa funcionarios, vehículos, destinos y rutas.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Empresa {
    pub id: i64,
    pub codigo: String,
    pub nome: String,
    pub endereco_base: String,
    pub cidade: String,
    pub estado: String,
    pub cep: String,
}
