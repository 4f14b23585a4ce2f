//! Modelo de Funcionário
//!
//! Incluye las escalas de trabajo, indisponibilidades y vínculos con grupos
//! de rota que devuelve la vista detallada.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Funcionario {
    pub id: i64,
    pub empresa_id: i64,
    pub nome_completo: String,
    pub cpf: String,
    pub email: Option<String>,
    pub telefone: Option<String>,
    pub logradouro: String,
    pub numero: String,
    pub complemento: Option<String>,
    pub bairro: String,
    pub cidade: String,
    pub estado: String,
    pub cep: String,
    pub possui_cnh: bool,
    pub categoria_cnh: Option<String>,
    pub cnh_valida_ate: Option<String>,
    pub apto_dirigir: bool,
    pub ativo: bool,
    #[serde(default)]
    pub grupos_rota: Option<Vec<FuncionarioGrupoRota>>,
}

impl Funcionario {
    /// Puede ser elegido como conductor
    pub fn is_eligible_driver(&self) -> bool {
        self.possui_cnh && self.apto_dirigir
    }
}

/// Vista detallada de `GET /funcionarios/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuncionarioDetalhado {
    #[serde(flatten)]
    pub funcionario: Funcionario,
    #[serde(default)]
    pub escalas_trabalho: Vec<EscalaTrabalho>,
    #[serde(default)]
    pub indisponibilidades: Vec<IndisponibilidadeFuncionario>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscalaTrabalho {
    pub id: i64,
    pub funcionario_id: i64,
    pub dia_semana: i32,
    pub turno: String,
    pub disponivel: bool,
    pub hora_inicio: Option<String>,
    pub hora_fim: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndisponibilidadeFuncionario {
    pub id: i64,
    pub funcionario_id: i64,
    pub tipo: String,
    pub motivo: Option<String>,
    pub data_inicio: String,
    pub data_fim: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuncionarioGrupoRota {
    pub id: i64,
    pub funcionario_id: i64,
    pub grupo_rota_id: i64,
    #[serde(default)]
    pub grupo_nome: Option<String>,
}
