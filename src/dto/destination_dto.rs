use serde::Serialize;

// Filtros del listado de destinos
#[derive(Debug, Clone, Default)]
pub struct DestinoListParams {
    pub empresa_id: Option<i64>,
    pub apenas_ativos: Option<bool>,
}

impl DestinoListParams {
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

// Request para crear un destino
#[derive(Debug, Clone, Serialize)]
pub struct DestinoCreatePayload {
    pub empresa_id: i64,
    pub nome: String,
    pub logradouro: String,
    pub numero: String,
    pub complemento: Option<String>,
    pub bairro: String,
    pub cidade: String,
    pub estado: String,
    pub cep: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub ativo: bool,
}

// Request para actualizar un destino
#[derive(Debug, Clone, Default, Serialize)]
pub struct DestinoUpdatePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logradouro: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numero: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complemento: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bairro: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cidade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estado: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cep: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ativo: Option<bool>,
}
