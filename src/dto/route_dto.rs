use serde::Serialize;

use crate::models::route::{ModoGeracao, PapelAtribuicao, StatusRota, TurnoTrabalho};

// Filtros del listado de rutas
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RotaListParams {
    pub empresa_id: Option<i64>,
    pub data_referencia: Option<String>,
}

impl RotaListParams {
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(empresa_id) = self.empresa_id {
            query.push(("empresa_id", empresa_id.to_string()));
        }
        if let Some(data) = self.data_referencia.as_ref().filter(|d| !d.trim().is_empty()) {
            query.push(("data_referencia", data.trim().to_string()));
        }
        query
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AtualizarStatusPayload {
    pub status: StatusRota,
}

// `None` pide al servidor que elija automáticamente
#[derive(Debug, Clone, Serialize)]
pub struct AtualizarMotoristaPayload {
    pub motorista_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AtualizarVeiculoPayload {
    pub veiculo_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disponibilidade_veiculo_id: Option<Option<i64>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AtualizarDestinoPayload {
    pub destino_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destino_nome: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destino_logradouro: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destino_numero: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destino_complemento: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destino_bairro: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destino_cidade: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destino_estado: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destino_cep: Option<Option<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AtualizarDataTurnoPayload {
    pub data_agendada: String,
    pub turno: TurnoTrabalho,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuncionarioRotaEdicaoPayload {
    pub funcionario_id: i64,
    pub papel: PapelAtribuicao,
    pub ordem_embarque: Option<i32>,
}

// Lista completa de atribuciones; reemplaza la existente
#[derive(Debug, Clone, Serialize)]
pub struct AtualizarFuncionariosPayload {
    pub atribuicoes: Vec<FuncionarioRotaEdicaoPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemanejamentoPayload {
    pub rota_origem_id: i64,
    pub rota_destino_id: i64,
    pub funcionarios_ids: Vec<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecalcularRotaPayload {
    pub motivo: Option<String>,
}

// Request de generación automática (simple o VRP)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GerarRotaPayload {
    pub empresa_id: i64,
    pub grupo_rota_id: i64,
    pub data_agendada: String,
    pub turno: TurnoTrabalho,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motorista_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub veiculo_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modo_geracao: Option<ModoGeracao>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destino_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destino_nome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destino_logradouro: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destino_numero: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destino_complemento: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destino_bairro: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destino_cidade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destino_estado: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destino_cep: Option<String>,
    // Opciones exclusivas del modo VRP
    #[serde(skip_serializing_if = "Option::is_none")]
    pub veiculos_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximo_veiculos: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usar_frota_terceirizada: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignorar_cache: Option<bool>,
}

impl GerarRotaPayload {
    pub fn new(empresa_id: i64, grupo_rota_id: i64, data_agendada: impl Into<String>, turno: TurnoTrabalho) -> Self {
        Self {
            empresa_id,
            grupo_rota_id,
            data_agendada: data_agendada.into(),
            turno,
            motorista_id: None,
            veiculo_id: None,
            modo_geracao: Some(ModoGeracao::Automatico),
            destino_id: None,
            destino_nome: None,
            destino_logradouro: None,
            destino_numero: None,
            destino_complemento: None,
            destino_bairro: None,
            destino_cidade: None,
            destino_estado: None,
            destino_cep: None,
            veiculos_ids: None,
            maximo_veiculos: None,
            usar_frota_terceirizada: None,
            ignorar_cache: None,
        }
    }
}
