//! Formulario y listado de funcionarios
//!
//! El formulario guarda los valores tal como los escribe el operador (CPF,
//! teléfono y CEP con máscara). Las máscaras se quitan recién al armar el
//! payload, y la escala de trabajo no admite dos entradas con el mismo día y
//! turno.

use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::dto::employee_dto::{
    EscalaTrabalhoInput, FuncionarioCreatePayload, FuncionarioGrupoRotaInput, FuncionarioListParams,
    FuncionarioUpdatePayload,
};
use crate::models::company::Empresa;
use crate::models::employee::{Funcionario, FuncionarioDetalhado};
use crate::models::route::TurnoTrabalho;
use crate::models::route_group::GrupoRota;
use crate::services::{EmpresaService, FuncionarioService, GrupoRotaService, NotificationCenter};
use crate::utils::errors::{validation_error, AppError, AppResult};
use crate::utils::masks::{mask_cep, mask_cpf, mask_phone, unmask};
use crate::utils::validation::{
    validate_cep, validate_cpf, validate_email, validate_time, validate_uf, validate_weekday, FormErrors,
};

pub const DEFAULT_SAVE_ERROR: &str = "Nao foi possivel concluir a operacao. Tente novamente.";

/// Una entrada de la escala semanal
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleSlot {
    pub dia_semana: i32,
    pub turno: TurnoTrabalho,
    pub disponivel: bool,
    pub hora_inicio: String,
    pub hora_fim: String,
}

impl ScheduleSlot {
    pub fn new(dia_semana: i32, turno: TurnoTrabalho) -> Self {
        Self {
            dia_semana,
            turno,
            disponivel: true,
            hora_inicio: String::new(),
            hora_fim: String::new(),
        }
    }

    fn same_slot(&self, other: &ScheduleSlot) -> bool {
        self.dia_semana == other.dia_semana && self.turno == other.turno
    }

    fn to_input(&self) -> EscalaTrabalhoInput {
        EscalaTrabalhoInput {
            dia_semana: self.dia_semana,
            turno: self.turno.as_str().to_string(),
            disponivel: self.disponivel,
            hora_inicio: non_empty(&self.hora_inicio),
            hora_fim: non_empty(&self.hora_fim),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeForm {
    pub empresa_id: Option<i64>,
    pub nome_completo: String,
    pub cpf: String,
    pub email: String,
    pub telefone: String,
    pub logradouro: String,
    pub numero: String,
    pub complemento: String,
    pub bairro: String,
    pub cidade: String,
    pub estado: String,
    pub cep: String,
    pub possui_cnh: bool,
    pub categoria_cnh: String,
    pub cnh_valida_ate: String,
    pub apto_dirigir: bool,
    pub ativo: bool,
    pub escalas: Vec<ScheduleSlot>,
    pub grupos_rota: Vec<i64>,
}

impl Default for EmployeeForm {
    fn default() -> Self {
        Self {
            empresa_id: None,
            nome_completo: String::new(),
            cpf: String::new(),
            email: String::new(),
            telefone: String::new(),
            logradouro: String::new(),
            numero: String::new(),
            complemento: String::new(),
            bairro: String::new(),
            cidade: String::new(),
            estado: String::new(),
            cep: String::new(),
            possui_cnh: false,
            categoria_cnh: String::new(),
            cnh_valida_ate: String::new(),
            apto_dirigir: false,
            ativo: true,
            escalas: Vec::new(),
            grupos_rota: Vec::new(),
        }
    }
}

impl EmployeeForm {
    /// Valores para edición, con las máscaras aplicadas
    pub fn from_detail(detail: &FuncionarioDetalhado) -> Self {
        let funcionario = &detail.funcionario;
        Self {
            empresa_id: Some(funcionario.empresa_id),
            nome_completo: funcionario.nome_completo.clone(),
            cpf: mask_cpf(&funcionario.cpf),
            email: funcionario.email.clone().unwrap_or_default(),
            telefone: funcionario.telefone.as_deref().map(mask_phone).unwrap_or_default(),
            logradouro: funcionario.logradouro.clone(),
            numero: funcionario.numero.clone(),
            complemento: funcionario.complemento.clone().unwrap_or_default(),
            bairro: funcionario.bairro.clone(),
            cidade: funcionario.cidade.clone(),
            estado: funcionario.estado.clone(),
            cep: mask_cep(&funcionario.cep),
            possui_cnh: funcionario.possui_cnh,
            categoria_cnh: funcionario.categoria_cnh.clone().unwrap_or_default(),
            cnh_valida_ate: funcionario.cnh_valida_ate.clone().unwrap_or_default(),
            apto_dirigir: funcionario.apto_dirigir,
            ativo: funcionario.ativo,
            escalas: detail
                .escalas_trabalho
                .iter()
                .map(|escala| ScheduleSlot {
                    dia_semana: escala.dia_semana,
                    turno: TurnoTrabalho::from_str(&escala.turno).unwrap_or_default(),
                    disponivel: escala.disponivel,
                    hora_inicio: escala.hora_inicio.clone().unwrap_or_default(),
                    hora_fim: escala.hora_fim.clone().unwrap_or_default(),
                })
                .collect(),
            grupos_rota: funcionario
                .grupos_rota
                .iter()
                .flatten()
                .map(|vinculo| vinculo.grupo_rota_id)
                .collect(),
        }
    }

    /// Agregar una entrada a la escala; rechaza día/turno repetido
    pub fn add_schedule(&mut self, slot: ScheduleSlot) -> AppResult<()> {
        if validate_weekday(slot.dia_semana).is_err() {
            return Err(validation_error("escalas", "Selecione o dia da semana e o turno."));
        }
        for hora in [&slot.hora_inicio, &slot.hora_fim] {
            if !hora.trim().is_empty() && validate_time(hora.trim()).is_err() {
                return Err(validation_error("escalas", "Horario invalido. Use HH:MM."));
            }
        }
        if self.escalas.iter().any(|existing| existing.same_slot(&slot)) {
            return Err(validation_error("escalas", "Já existe uma escala para esse dia e turno."));
        }

        self.escalas.push(ScheduleSlot {
            hora_inicio: slot.hora_inicio.trim().to_string(),
            hora_fim: slot.hora_fim.trim().to_string(),
            ..slot
        });
        Ok(())
    }

    pub fn remove_schedule(&mut self, index: usize) -> bool {
        if index >= self.escalas.len() {
            return false;
        }
        self.escalas.remove(index);
        true
    }

    /// Vincular un grupo de rota de la empresa elegida
    pub fn add_group_link(&mut self, grupo_rota_id: Option<i64>) -> AppResult<()> {
        if self.empresa_id.is_none() {
            return Err(validation_error(
                "grupos_rota",
                "Selecione uma empresa para carregar os grupos.",
            ));
        }
        let Some(grupo_rota_id) = grupo_rota_id else {
            return Err(validation_error("grupos_rota", "Selecione um grupo de rota."));
        };
        if self.grupos_rota.contains(&grupo_rota_id) {
            return Err(validation_error(
                "grupos_rota",
                "Este grupo já foi adicionado. Remova para editar.",
            ));
        }
        self.grupos_rota.push(grupo_rota_id);
        Ok(())
    }

    pub fn remove_group_link(&mut self, grupo_rota_id: i64) -> bool {
        let before = self.grupos_rota.len();
        self.grupos_rota.retain(|id| *id != grupo_rota_id);
        self.grupos_rota.len() != before
    }

    pub fn validate(&self) -> AppResult<()> {
        let mut errors = FormErrors::new();

        if self.empresa_id.is_none() {
            errors.add("empresa_id", "Selecione uma empresa.");
        }
        let required = [
            ("nome_completo", &self.nome_completo, "Informe o nome completo."),
            ("cpf", &self.cpf, "Informe o CPF."),
            ("logradouro", &self.logradouro, "Informe o logradouro."),
            ("numero", &self.numero, "Informe o numero."),
            ("bairro", &self.bairro, "Informe o bairro."),
            ("cidade", &self.cidade, "Informe a cidade."),
            ("cep", &self.cep, "Informe o CEP."),
        ];
        for (field, value, message) in required {
            if value.trim().is_empty() {
                errors.add(field, message);
            }
        }

        if !self.cpf.trim().is_empty() {
            errors.check("cpf", validate_cpf(&self.cpf));
        }
        if !self.cep.trim().is_empty() {
            errors.check("cep", validate_cep(&self.cep));
        }
        if !self.email.trim().is_empty() {
            errors.check("email", validate_email(&self.email));
        }
        if self.estado.trim().is_empty() {
            errors.add("estado", "Informe a UF.");
        } else {
            errors.check("estado", validate_uf(&self.estado));
        }

        if self.possui_cnh && self.categoria_cnh.trim().is_empty() {
            errors.add("categoria_cnh", "Informe a categoria da CNH.");
        }

        let repeated = self
            .escalas
            .iter()
            .enumerate()
            .any(|(i, slot)| self.escalas[..i].iter().any(|earlier| earlier.same_slot(slot)));
        if repeated {
            errors.add("escalas", "Não repita o mesmo dia e turno na escala.");
        }

        errors.into_result()
    }

    fn cnh_fields(&self) -> (Option<String>, Option<String>) {
        if self.possui_cnh {
            (non_empty(&self.categoria_cnh), non_empty(&self.cnh_valida_ate))
        } else {
            (None, None)
        }
    }

    fn escalas_input(&self) -> Vec<EscalaTrabalhoInput> {
        self.escalas.iter().map(ScheduleSlot::to_input).collect()
    }

    fn grupos_input(&self) -> Vec<FuncionarioGrupoRotaInput> {
        self.grupos_rota
            .iter()
            .map(|grupo_rota_id| FuncionarioGrupoRotaInput {
                grupo_rota_id: *grupo_rota_id,
            })
            .collect()
    }

    pub fn to_create_payload(&self) -> AppResult<FuncionarioCreatePayload> {
        self.validate()?;
        let empresa_id = self.empresa_id.ok_or(AppError::NoSelection)?;
        let (categoria_cnh, cnh_valida_ate) = self.cnh_fields();

        Ok(FuncionarioCreatePayload {
            empresa_id,
            nome_completo: self.nome_completo.trim().to_string(),
            cpf: unmask(&self.cpf),
            email: non_empty(&self.email),
            telefone: non_empty(&unmask(&self.telefone)),
            logradouro: self.logradouro.trim().to_string(),
            numero: self.numero.trim().to_string(),
            complemento: non_empty(&self.complemento),
            bairro: self.bairro.trim().to_string(),
            cidade: self.cidade.trim().to_string(),
            estado: self.estado.trim().to_uppercase(),
            cep: unmask(&self.cep),
            possui_cnh: self.possui_cnh,
            categoria_cnh,
            cnh_valida_ate,
            apto_dirigir: self.apto_dirigir,
            ativo: self.ativo,
            escalas_trabalho: self.escalas_input(),
            grupos_rota: self.grupos_input(),
        })
    }

    /// La empresa y el CPF no se editan
    pub fn to_update_payload(&self) -> AppResult<FuncionarioUpdatePayload> {
        self.validate()?;
        let (categoria_cnh, cnh_valida_ate) = self.cnh_fields();

        Ok(FuncionarioUpdatePayload {
            nome_completo: Some(self.nome_completo.trim().to_string()),
            email: Some(non_empty(&self.email)),
            telefone: Some(non_empty(&unmask(&self.telefone))),
            logradouro: Some(self.logradouro.trim().to_string()),
            numero: Some(self.numero.trim().to_string()),
            complemento: Some(non_empty(&self.complemento)),
            bairro: Some(self.bairro.trim().to_string()),
            cidade: Some(self.cidade.trim().to_string()),
            estado: Some(self.estado.trim().to_uppercase()),
            cep: Some(unmask(&self.cep)),
            possui_cnh: Some(self.possui_cnh),
            categoria_cnh: Some(categoria_cnh),
            cnh_valida_ate: Some(cnh_valida_ate),
            apto_dirigir: Some(self.apto_dirigir),
            ativo: Some(self.ativo),
            escalas_trabalho: Some(self.escalas_input()),
            grupos_rota: Some(self.grupos_input()),
        })
    }
}

pub struct EmployeeController {
    funcionarios: FuncionarioService,
    empresas: EmpresaService,
    grupos: GrupoRotaService,
    notifications: NotificationCenter,
    listed: RwLock<Vec<Funcionario>>,
}

impl EmployeeController {
    pub fn new(
        funcionarios: FuncionarioService,
        empresas: EmpresaService,
        grupos: GrupoRotaService,
        notifications: NotificationCenter,
    ) -> Self {
        Self {
            funcionarios,
            empresas,
            grupos,
            notifications,
            listed: RwLock::new(Vec::new()),
        }
    }

    pub async fn employees(&self) -> Vec<Funcionario> {
        self.listed.read().await.clone()
    }

    /// Empresas para el selector; sin empresas no se puede cadastrar
    pub async fn load_companies(&self) -> AppResult<Vec<Empresa>> {
        match self.empresas.list().await {
            Ok(empresas) => {
                if empresas.is_empty() {
                    self.notifications
                        .danger("Cadastre uma empresa antes de adicionar funcionarios.");
                }
                Ok(empresas)
            }
            Err(e) => {
                error!("❌ Error cargando empresas: {}", e);
                self.notifications.danger("Falha ao carregar empresas. Tente novamente.");
                Err(e)
            }
        }
    }

    pub async fn list(&self, empresa_id: Option<i64>) -> AppResult<Vec<Funcionario>> {
        match self.funcionarios.list(&FuncionarioListParams { empresa_id }).await {
            Ok(funcionarios) => {
                info!("👥 {} funcionarios cargados", funcionarios.len());
                *self.listed.write().await = funcionarios.clone();
                Ok(funcionarios)
            }
            Err(e) => {
                error!("❌ Error cargando funcionarios: {}", e);
                self.notifications
                    .danger("Falha ao carregar funcionarios. Tente novamente mais tarde.");
                Err(e)
            }
        }
    }

    pub async fn load_groups(&self, empresa_id: i64) -> AppResult<Vec<GrupoRota>> {
        self.grupos.list(Some(empresa_id)).await
    }

    /// Formulario de edición de un funcionario existente
    pub async fn load_form(&self, id: i64) -> AppResult<EmployeeForm> {
        match self.funcionarios.get(id).await {
            Ok(detail) => Ok(EmployeeForm::from_detail(&detail)),
            Err(e) => {
                error!("❌ Error cargando funcionario {}: {}", id, e);
                self.notifications
                    .danger("Nao foi possivel carregar os dados do formulario.");
                Err(e)
            }
        }
    }

    /// Crear (`id = None`) o actualizar. Un formulario inválido no llega a
    /// enviar nada ni genera aviso.
    pub async fn save(&self, id: Option<i64>, form: &EmployeeForm) -> AppResult<FuncionarioDetalhado> {
        let result = match id {
            None => {
                let payload = form.to_create_payload()?;
                self.funcionarios.create(&payload).await
            }
            Some(id) => {
                let payload = form.to_update_payload()?;
                self.funcionarios.update(id, &payload).await
            }
        };

        match result {
            Ok(saved) => {
                let message = if id.is_none() {
                    "Funcionario cadastrado com sucesso."
                } else {
                    "Funcionario atualizado com sucesso."
                };
                self.notifications.success(message);
                Ok(saved)
            }
            Err(e) => {
                error!("❌ Error guardando funcionario: {}", e);
                let message = e.server_message().unwrap_or(DEFAULT_SAVE_ERROR).to_string();
                self.notifications.danger(message);
                Err(e)
            }
        }
    }

    /// Desactivar si está activo, reactivar si no
    pub async fn toggle_status(&self, funcionario: &Funcionario) -> AppResult<bool> {
        let result = if funcionario.ativo {
            self.funcionarios.deactivate(funcionario.id).await.map(|_| false)
        } else {
            let payload = FuncionarioUpdatePayload {
                ativo: Some(true),
                ..Default::default()
            };
            self.funcionarios
                .update(funcionario.id, &payload)
                .await
                .map(|updated| updated.funcionario.ativo)
        };

        match result {
            Ok(ativo) => {
                if let Some(item) = self
                    .listed
                    .write()
                    .await
                    .iter_mut()
                    .find(|item| item.id == funcionario.id)
                {
                    item.ativo = ativo;
                }
                if ativo {
                    self.notifications.success("Funcionario reativado com sucesso.");
                } else {
                    self.notifications.info("Funcionario desativado.");
                }
                Ok(ativo)
            }
            Err(e) => {
                warn!("⚠️ No se pudo cambiar el estado del funcionario {}: {}", funcionario.id, e);
                self.notifications.danger("Falha ao alterar status do funcionario.");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::employee::{EscalaTrabalho, FuncionarioGrupoRota};

    fn filled_form() -> EmployeeForm {
        EmployeeForm {
            empresa_id: Some(3),
            nome_completo: "  Maria Souza ".to_string(),
            cpf: "123.456.789-01".to_string(),
            telefone: "(11) 98765-4321".to_string(),
            logradouro: "Rua A".to_string(),
            numero: "10".to_string(),
            bairro: "Centro".to_string(),
            cidade: "Campinas".to_string(),
            estado: "sp".to_string(),
            cep: "13010-000".to_string(),
            ..Default::default()
        }
    }

    fn field_names(result: AppResult<()>) -> Vec<String> {
        match result {
            Err(AppError::Validation(errors)) => {
                let mut names: Vec<String> = errors.field_errors().keys().map(|k| k.to_string()).collect();
                names.sort();
                names
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_form_reports_required_fields() {
        let names = field_names(EmployeeForm::default().validate());
        assert_eq!(
            names,
            vec!["bairro", "cep", "cidade", "cpf", "empresa_id", "estado", "logradouro", "nome_completo", "numero"]
        );
    }

    #[test]
    fn test_uf_and_cnh_rules() {
        let mut form = filled_form();
        form.estado = "SPX".to_string();
        form.possui_cnh = true;
        assert_eq!(field_names(form.validate()), vec!["categoria_cnh", "estado"]);
    }

    #[test]
    fn test_document_and_contact_formats() {
        let mut form = filled_form();
        form.cpf = "123.456.789".to_string();
        form.cep = "13010-00".to_string();
        form.email = "maria@".to_string();
        assert_eq!(field_names(form.validate()), vec!["cep", "cpf", "email"]);

        form.cpf = "123.456.789-01".to_string();
        form.cep = "13010-000".to_string();
        form.email = "maria@empresa.com.br".to_string();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_duplicate_schedule_rejected_on_add() {
        let mut form = filled_form();
        assert!(form.add_schedule(ScheduleSlot::new(1, TurnoTrabalho::Manha)).is_ok());
        assert!(form.add_schedule(ScheduleSlot::new(1, TurnoTrabalho::Tarde)).is_ok());
        assert!(form.add_schedule(ScheduleSlot::new(1, TurnoTrabalho::Manha)).is_err());
        assert_eq!(form.escalas.len(), 2);
    }

    #[test]
    fn test_duplicate_schedule_rejected_on_submit() {
        let mut form = filled_form();
        form.escalas = vec![
            ScheduleSlot::new(2, TurnoTrabalho::Noite),
            ScheduleSlot::new(2, TurnoTrabalho::Noite),
        ];
        assert_eq!(field_names(form.validate()), vec!["escalas"]);
    }

    #[test]
    fn test_group_link_rules() {
        let mut form = EmployeeForm::default();
        assert!(form.add_group_link(Some(7)).is_err());

        form.empresa_id = Some(1);
        assert!(form.add_group_link(None).is_err());
        assert!(form.add_group_link(Some(7)).is_ok());
        assert!(form.add_group_link(Some(7)).is_err());
        assert_eq!(form.grupos_rota, vec![7]);
        assert!(form.remove_group_link(7));
        assert!(form.grupos_rota.is_empty());
    }

    #[test]
    fn test_create_payload_unmasks_and_normalizes() {
        let mut form = filled_form();
        form.add_schedule(ScheduleSlot {
            hora_inicio: " 07:30 ".to_string(),
            ..ScheduleSlot::new(1, TurnoTrabalho::Manha)
        })
        .unwrap();
        form.categoria_cnh = "B".to_string();

        let payload = form.to_create_payload().unwrap();
        assert_eq!(payload.nome_completo, "Maria Souza");
        assert_eq!(payload.cpf, "12345678901");
        assert_eq!(payload.telefone.as_deref(), Some("11987654321"));
        assert_eq!(payload.cep, "13010000");
        assert_eq!(payload.estado, "SP");
        assert_eq!(payload.email, None);
        assert_eq!(payload.categoria_cnh, None);
        assert_eq!(payload.escalas_trabalho[0].turno, "manha");
        assert_eq!(payload.escalas_trabalho[0].hora_inicio.as_deref(), Some("07:30"));
        assert_eq!(payload.escalas_trabalho[0].hora_fim, None);
    }

    #[test]
    fn test_empty_phone_is_sent_as_null() {
        let mut form = filled_form();
        form.telefone = "(  )".to_string();
        let payload = form.to_update_payload().unwrap();
        assert_eq!(payload.telefone, Some(None));
        assert_eq!(payload.ativo, Some(true));
    }

    #[test]
    fn test_from_detail_applies_masks() {
        let detail = FuncionarioDetalhado {
            funcionario: Funcionario {
                id: 9,
                empresa_id: 3,
                nome_completo: "Maria Souza".to_string(),
                cpf: "12345678901".to_string(),
                email: None,
                telefone: Some("1133334444".to_string()),
                logradouro: "Rua A".to_string(),
                numero: "10".to_string(),
                complemento: None,
                bairro: "Centro".to_string(),
                cidade: "Campinas".to_string(),
                estado: "SP".to_string(),
                cep: "13010000".to_string(),
                possui_cnh: false,
                categoria_cnh: None,
                cnh_valida_ate: None,
                apto_dirigir: false,
                ativo: true,
                grupos_rota: Some(vec![FuncionarioGrupoRota {
                    id: 1,
                    funcionario_id: 9,
                    grupo_rota_id: 4,
                    grupo_nome: None,
                }]),
            },
            escalas_trabalho: vec![EscalaTrabalho {
                id: 1,
                funcionario_id: 9,
                dia_semana: 0,
                turno: "noite".to_string(),
                disponivel: true,
                hora_inicio: None,
                hora_fim: None,
            }],
            indisponibilidades: vec![],
        };

        let form = EmployeeForm::from_detail(&detail);
        assert_eq!(form.cpf, "123.456.789-01");
        assert_eq!(form.telefone, "(11) 3333-4444");
        assert_eq!(form.cep, "13010-000");
        assert_eq!(form.escalas[0].turno, TurnoTrabalho::Noite);
        assert_eq!(form.grupos_rota, vec![4]);
    }
}
