use serde::Serialize;

// Filtros del listado de funcionarios
#[derive(Debug, Clone, Default)]
pub struct FuncionarioListParams {
    pub empresa_id: Option<i64>,
}

// Escala de trabajo enviada en create/update
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EscalaTrabalhoInput {
    pub dia_semana: i32,
    pub turno: String,
    pub disponivel: bool,
    pub hora_inicio: Option<String>,
    pub hora_fim: Option<String>,
}

// Vínculo con grupo de rota enviado en create/update
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuncionarioGrupoRotaInput {
    pub grupo_rota_id: i64,
}

// Request para crear un funcionario. Los opcionales viajan como `null`.
#[derive(Debug, Clone, Serialize)]
pub struct FuncionarioCreatePayload {
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
    pub escalas_trabalho: Vec<EscalaTrabalhoInput>,
    pub grupos_rota: Vec<FuncionarioGrupoRotaInput>,
}

// Request para actualizar un funcionario. Las colecciones anidadas se
// reemplazan enteras cuando están presentes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FuncionarioUpdatePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome_completo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefone: Option<Option<String>>,
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
    pub possui_cnh: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoria_cnh: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cnh_valida_ate: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apto_dirigir: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ativo: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escalas_trabalho: Option<Vec<EscalaTrabalhoInput>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grupos_rota: Option<Vec<FuncionarioGrupoRotaInput>>,
}
