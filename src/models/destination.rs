//! Modelo de Destino de rota

use serde::{Deserialize, Serialize};

/// Destino registrado de una empresa
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestinoRota {
    pub id: i64,
    pub empresa_id: i64,
    pub nome: String,
    pub logradouro: String,
    pub numero: String,
    pub complemento: Option<String>,
    pub bairro: String,
    pub cidade: String,
    pub estado: String,
    pub cep: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default = "default_true")]
    pub ativo: bool,
}

impl DestinoRota {
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }

    pub fn full_address(&self) -> String {
        format_address(
            &self.logradouro,
            &self.numero,
            self.complemento.as_deref(),
            &self.bairro,
            &self.cidade,
            &self.estado,
            &self.cep,
        )
    }
}

fn default_true() -> bool {
    true
}

/// "Rua X, 10 - Sala 2, Centro, São Paulo/SP, 01000-000"
pub fn format_address(
    logradouro: &str,
    numero: &str,
    complemento: Option<&str>,
    bairro: &str,
    cidade: &str,
    estado: &str,
    cep: &str,
) -> String {
    let mut address = format!("{}, {}", logradouro, numero);
    if let Some(complemento) = complemento.filter(|c| !c.trim().is_empty()) {
        address.push_str(" - ");
        address.push_str(complemento);
    }
    format!("{}, {}, {}/{}, {}", address, bairro, cidade, estado, cep)
}
