use serde::Serialize;

// Request para crear una empresa
#[derive(Debug, Clone, Serialize)]
pub struct EmpresaCreatePayload {
    pub codigo: String,
    pub nome: String,
    pub endereco_base: String,
    pub cidade: String,
    pub estado: String,
    pub cep: String,
}

// Request para actualizar una empresa
#[derive(Debug, Clone, Default, Serialize)]
pub struct EmpresaUpdatePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endereco_base: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cidade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estado: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cep: Option<String>,
}
