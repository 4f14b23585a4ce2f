//! Formulario y listado de grupos de rota

use tracing::error;

use crate::dto::route_group_dto::{GrupoRotaCreatePayload, GrupoRotaUpdatePayload};
use crate::models::company::Empresa;
use crate::models::route_group::{GrupoRota, TipoRegime};
use crate::services::{EmpresaService, GrupoRotaService, NotificationCenter};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::{validate_weekday, FormErrors};

const WEEKDAY_LABELS: [&str; 7] = ["Segunda", "Terça", "Quarta", "Quinta", "Sexta", "Sábado", "Domingo"];

/// Nombre corto de un día de la semana (0 = lunes)
pub fn weekday_label(dia: i32) -> String {
    usize::try_from(dia)
        .ok()
        .and_then(|index| WEEKDAY_LABELS.get(index))
        .map(|label| label.to_string())
        .unwrap_or_else(|| format!("Dia {}", dia))
}

/// Días ordenados separados por coma; vacío significa todos los días
pub fn format_weekdays(dias: &[i32]) -> String {
    if dias.is_empty() {
        return "Todos os dias".to_string();
    }
    let mut sorted = dias.to_vec();
    sorted.sort_unstable();
    sorted.into_iter().map(weekday_label).collect::<Vec<_>>().join(", ")
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteGroupForm {
    pub empresa_id: Option<i64>,
    pub nome: String,
    pub tipo_regime: Option<TipoRegime>,
    pub dias_semana_padrao: Vec<i32>,
    pub descricao: String,
}

impl RouteGroupForm {
    pub fn from_group(grupo: &GrupoRota) -> Self {
        Self {
            empresa_id: Some(grupo.empresa_id),
            nome: grupo.nome.clone(),
            tipo_regime: Some(grupo.tipo_regime),
            dias_semana_padrao: grupo.dias_semana_padrao.clone(),
            descricao: grupo.descricao.clone().unwrap_or_default(),
        }
    }

    /// Marcar o desmarcar un día
    pub fn toggle_weekday(&mut self, dia: i32) {
        if self.dias_semana_padrao.contains(&dia) {
            self.dias_semana_padrao.retain(|d| *d != dia);
        } else {
            self.dias_semana_padrao.push(dia);
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        let mut errors = FormErrors::new();
        if self.empresa_id.is_none() {
            errors.add("empresa_id", "Selecione uma empresa.");
        }
        if self.nome.trim().is_empty() {
            errors.add("nome", "Informe o nome do grupo.");
        }
        if self.tipo_regime.is_none() {
            errors.add("tipo_regime", "Selecione o regime.");
        }
        for dia in &self.dias_semana_padrao {
            errors.check("dias_semana_padrao", validate_weekday(*dia));
        }
        errors.into_result()
    }

    fn sorted_days(&self) -> Vec<i32> {
        let mut dias = self.dias_semana_padrao.clone();
        dias.sort_unstable();
        dias.dedup();
        dias
    }

    fn descricao(&self) -> Option<String> {
        let trimmed = self.descricao.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    pub fn to_create_payload(&self) -> AppResult<GrupoRotaCreatePayload> {
        self.validate()?;
        let (Some(empresa_id), Some(tipo_regime)) = (self.empresa_id, self.tipo_regime) else {
            return Err(AppError::NoSelection);
        };
        Ok(GrupoRotaCreatePayload {
            empresa_id,
            nome: self.nome.trim().to_string(),
            tipo_regime,
            dias_semana_padrao: self.sorted_days(),
            descricao: self.descricao(),
        })
    }

    pub fn to_update_payload(&self) -> AppResult<GrupoRotaUpdatePayload> {
        self.validate()?;
        Ok(GrupoRotaUpdatePayload {
            nome: Some(self.nome.trim().to_string()),
            tipo_regime: self.tipo_regime,
            dias_semana_padrao: Some(self.sorted_days()),
            descricao: Some(self.descricao()),
        })
    }
}

pub struct RouteGroupController {
    grupos: GrupoRotaService,
    empresas: EmpresaService,
    notifications: NotificationCenter,
}

impl RouteGroupController {
    pub fn new(grupos: GrupoRotaService, empresas: EmpresaService, notifications: NotificationCenter) -> Self {
        Self {
            grupos,
            empresas,
            notifications,
        }
    }

    pub async fn load_companies(&self) -> AppResult<Vec<Empresa>> {
        let empresas = self.empresas.list().await.map_err(|e| {
            error!("❌ Error cargando empresas: {}", e);
            self.notifications.danger("Não foi possível carregar os dados do formulário.");
            e
        })?;
        if empresas.is_empty() {
            self.notifications
                .danger("Cadastre uma empresa antes de adicionar grupos de rota.");
        }
        Ok(empresas)
    }

    pub async fn list(&self, empresa_id: Option<i64>) -> AppResult<Vec<GrupoRota>> {
        self.grupos.list(empresa_id).await.map_err(|e| {
            error!("❌ Error cargando grupos de rota: {}", e);
            self.notifications
                .danger("Falha ao carregar os grupos de rota. Tente novamente.");
            e
        })
    }

    pub async fn load_form(&self, id: i64) -> AppResult<RouteGroupForm> {
        match self.grupos.get(id).await {
            Ok(grupo) => Ok(RouteGroupForm::from_group(&grupo)),
            Err(e) => {
                error!("❌ Grupo de rota {} no disponible: {}", id, e);
                let message = if e.status() == Some(http::StatusCode::NOT_FOUND) {
                    "Grupo de rota não encontrado."
                } else {
                    "Não foi possível carregar os dados do formulário."
                };
                self.notifications.danger(message);
                Err(e)
            }
        }
    }

    pub async fn save(&self, id: Option<i64>, form: &RouteGroupForm) -> AppResult<GrupoRota> {
        let result = match id {
            None => {
                let payload = form.to_create_payload()?;
                self.grupos.create(&payload).await
            }
            Some(id) => {
                let payload = form.to_update_payload()?;
                self.grupos.update(id, &payload).await
            }
        };

        match result {
            Ok(grupo) => {
                self.notifications.success(if id.is_none() {
                    "Grupo cadastrado com sucesso."
                } else {
                    "Grupo atualizado com sucesso."
                });
                Ok(grupo)
            }
            Err(e) => {
                error!("❌ Error guardando grupo de rota: {}", e);
                self.notifications
                    .danger("Não foi possível concluir a operação. Tente novamente.");
                Err(e)
            }
        }
    }

    pub async fn remove(&self, id: i64) -> AppResult<()> {
        match self.grupos.delete(id).await {
            Ok(()) => {
                self.notifications.success("Grupo removido com sucesso.");
                Ok(())
            }
            Err(e) => {
                error!("❌ Error eliminando grupo de rota {}: {}", id, e);
                self.notifications
                    .danger("Não foi possível remover o grupo de rota. Tente novamente.");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_company_name_and_regime() {
        let result = RouteGroupForm::default().validate();
        let Err(AppError::Validation(errors)) = result else {
            panic!("expected validation error");
        };
        let fields = errors.field_errors();
        assert!(fields.contains_key("empresa_id"));
        assert!(fields.contains_key("nome"));
        assert!(fields.contains_key("tipo_regime"));
    }

    #[test]
    fn test_invalid_weekday_rejected() {
        let form = RouteGroupForm {
            empresa_id: Some(1),
            nome: "Turno A".to_string(),
            tipo_regime: Some(TipoRegime::Diario),
            dias_semana_padrao: vec![0, 9],
            descricao: String::new(),
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_payload_sorts_days_and_nulls_blank_description() {
        let mut form = RouteGroupForm {
            empresa_id: Some(1),
            nome: " Turno A ".to_string(),
            tipo_regime: Some(TipoRegime::Embarque),
            dias_semana_padrao: vec![4, 0],
            descricao: "   ".to_string(),
        };
        form.toggle_weekday(2);
        form.toggle_weekday(4);

        let payload = form.to_create_payload().unwrap();
        assert_eq!(payload.nome, "Turno A");
        assert_eq!(payload.dias_semana_padrao, vec![0, 2]);
        assert_eq!(payload.descricao, None);

        let update = form.to_update_payload().unwrap();
        assert_eq!(update.descricao, Some(None));
    }

    #[test]
    fn test_format_weekdays() {
        assert_eq!(format_weekdays(&[]), "Todos os dias");
        assert_eq!(format_weekdays(&[4, 0]), "Segunda, Sexta");
        assert_eq!(weekday_label(12), "Dia 12");
    }
}
