//! Generación automática de rutas
//!
//! Valida el formulario, arma el payload y llama a `/rotas/gerar` (una ruta)
//! o `/rotas/gerar-vrp` (varias). Los fallos del motor no son errores de la
//! llamada: se devuelven como `GenerationOutcome::Failed` con el mensaje del
//! servidor y sus sugerencias de vehículos extra.

use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info};

use crate::dto::destination_dto::DestinoListParams;
use crate::dto::employee_dto::FuncionarioListParams;
use crate::dto::route_dto::GerarRotaPayload;
use crate::dto::vehicle_dto::VeiculoListParams;
use crate::models::company::Empresa;
use crate::models::destination::DestinoRota;
use crate::models::employee::Funcionario;
use crate::models::route::{RotaGerada, SugestaoVeiculoExtra, TurnoTrabalho};
use crate::models::route_group::GrupoRota;
use crate::models::vehicle::Veiculo;
use crate::services::{
    DestinoService, EmpresaService, FuncionarioService, GrupoRotaService, NotificationCenter, RotaAutomaticaService,
    VeiculoService,
};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::{validate_date, validate_uf, FormErrors};

pub const DEFAULT_GENERATION_ERROR: &str = "Nao foi possivel gerar a rota automaticamente.";
pub const EMPTY_GENERATION_MESSAGE: &str = "Nenhuma rota foi retornada pelo motor de roteirização.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationMode {
    /// Una sola ruta
    Simples,
    /// Varias rutas con el motor VRP
    #[default]
    Vrp,
}

impl GenerationMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "simples" => Some(GenerationMode::Simples),
            "vrp" => Some(GenerationMode::Vrp),
            _ => None,
        }
    }
}

/// Dirección de destino cargada a mano
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManualDestination {
    pub nome: String,
    pub logradouro: String,
    pub numero: String,
    pub complemento: String,
    pub bairro: String,
    pub cidade: String,
    pub estado: String,
    pub cep: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationForm {
    pub empresa_id: Option<i64>,
    pub grupo_rota_id: Option<i64>,
    pub data_agendada: String,
    pub turno: TurnoTrabalho,
    pub modo: GenerationMode,
    pub motorista_id: Option<i64>,
    pub veiculo_id: Option<i64>,
    pub usar_destino_manual: bool,
    pub destino_id: Option<i64>,
    pub destino: ManualDestination,
    pub veiculos_ids: Vec<i64>,
    pub maximo_veiculos: Option<i32>,
    pub usar_frota_terceirizada: Option<bool>,
    pub ignorar_cache: Option<bool>,
}

impl GenerationForm {
    pub fn validate(&self) -> AppResult<()> {
        let mut errors = FormErrors::new();

        if self.empresa_id.is_none() {
            errors.add("empresa_id", "Selecione a empresa.");
        }
        if self.grupo_rota_id.is_none() {
            errors.add("grupo_rota_id", "Selecione o grupo de rota.");
        }
        if self.data_agendada.trim().is_empty() {
            errors.add("data_agendada", "Informe a data desejada.");
        } else {
            errors.check("data_agendada", validate_date(&self.data_agendada));
        }

        if self.usar_destino_manual {
            let destino = &self.destino;
            if destino.nome.trim().is_empty() {
                errors.add("destino_nome", "Informe o nome do destino.");
            }
            if destino.logradouro.trim().is_empty() {
                errors.add("destino_logradouro", "Informe o logradouro.");
            }
            if destino.numero.trim().is_empty() {
                errors.add("destino_numero", "Informe o número.");
            }
            if destino.bairro.trim().is_empty() {
                errors.add("destino_bairro", "Informe o bairro.");
            }
            if destino.cidade.trim().is_empty() {
                errors.add("destino_cidade", "Informe a cidade.");
            }
            errors.check("destino_estado", validate_uf(&destino.estado));
            if destino.cep.trim().chars().count() < 8 {
                errors.add("destino_cep", "CEP inválido.");
            }
        } else if self.destino_id.is_none() {
            errors.add("destino_id", "Selecione um destino ou marque a opção manual.");
        }

        errors.into_result()
    }

    /// Validar y convertir en payload. `modo_geracao` siempre es automático.
    pub fn to_payload(&self) -> AppResult<GerarRotaPayload> {
        self.validate()?;

        let (Some(empresa_id), Some(grupo_rota_id)) = (self.empresa_id, self.grupo_rota_id) else {
            return Err(AppError::NoSelection);
        };

        let mut payload = GerarRotaPayload::new(empresa_id, grupo_rota_id, self.data_agendada.trim(), self.turno);
        payload.motorista_id = self.motorista_id;
        payload.veiculo_id = self.veiculo_id;

        if self.usar_destino_manual {
            let destino = &self.destino;
            let complemento = destino.complemento.trim();
            payload.destino_nome = Some(destino.nome.trim().to_string());
            payload.destino_logradouro = Some(destino.logradouro.trim().to_string());
            payload.destino_numero = Some(destino.numero.trim().to_string());
            payload.destino_complemento = Some((!complemento.is_empty()).then(|| complemento.to_string()));
            payload.destino_bairro = Some(destino.bairro.trim().to_string());
            payload.destino_cidade = Some(destino.cidade.trim().to_string());
            payload.destino_estado = Some(destino.estado.trim().to_uppercase());
            payload.destino_cep = Some(destino.cep.trim().to_string());
        } else {
            payload.destino_id = self.destino_id;
        }

        if self.modo == GenerationMode::Vrp {
            payload.veiculos_ids = (!self.veiculos_ids.is_empty()).then(|| self.veiculos_ids.clone());
            payload.maximo_veiculos = self.maximo_veiculos;
            payload.usar_frota_terceirizada = self.usar_frota_terceirizada;
            payload.ignorar_cache = self.ignorar_cache;
        }

        Ok(payload)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    Generated(Vec<RotaGerada>),
    /// El motor respondió sin rutas
    Empty,
    Failed {
        message: String,
        suggestions: Vec<SugestaoVeiculoExtra>,
    },
}

/// Opciones de los selectores del formulario para una empresa
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationOptions {
    pub grupos: Vec<GrupoRota>,
    pub motoristas: Vec<Funcionario>,
    pub veiculos: Vec<Veiculo>,
    pub destinos: Vec<DestinoRota>,
}

/// Libera el flag de envío aunque el futuro se cancele a mitad de la request
struct SubmittingGuard<'a>(&'a AtomicBool);

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct RouteGenerationController {
    geracao: RotaAutomaticaService,
    empresas: EmpresaService,
    grupos: GrupoRotaService,
    funcionarios: FuncionarioService,
    veiculos: VeiculoService,
    destinos: DestinoService,
    notifications: NotificationCenter,
    submitting: AtomicBool,
}

impl RouteGenerationController {
    pub fn new(
        geracao: RotaAutomaticaService,
        empresas: EmpresaService,
        grupos: GrupoRotaService,
        funcionarios: FuncionarioService,
        veiculos: VeiculoService,
        destinos: DestinoService,
        notifications: NotificationCenter,
    ) -> Self {
        Self {
            geracao,
            empresas,
            grupos,
            funcionarios,
            veiculos,
            destinos,
            notifications,
            submitting: AtomicBool::new(false),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    pub async fn load_companies(&self) -> AppResult<Vec<Empresa>> {
        self.empresas.list().await.map_err(|e| {
            error!("❌ Error cargando empresas: {}", e);
            self.notifications.danger("Não foi possível carregar as empresas.");
            e
        })
    }

    /// Grupos, conductores habilitados, vehículos y destinos de la empresa
    pub async fn load_options(&self, empresa_id: i64) -> AppResult<GenerationOptions> {
        let funcionarios_params = FuncionarioListParams {
            empresa_id: Some(empresa_id),
        };
        let veiculos_params = VeiculoListParams::for_company(empresa_id);
        let destinos_params = DestinoListParams::for_company(empresa_id);

        let result = futures::try_join!(
            self.grupos.list(Some(empresa_id)),
            self.funcionarios.list(&funcionarios_params),
            self.veiculos.list(&veiculos_params),
            self.destinos.list(&destinos_params),
        );

        match result {
            Ok((grupos, funcionarios, veiculos, destinos)) => Ok(GenerationOptions {
                grupos,
                motoristas: funcionarios.into_iter().filter(Funcionario::is_eligible_driver).collect(),
                veiculos,
                destinos,
            }),
            Err(e) => {
                error!("❌ Error cargando datos de la empresa {}: {}", empresa_id, e);
                self.notifications.danger("Falha ao carregar os dados da empresa selecionada.");
                Err(e)
            }
        }
    }

    /// Sólo devuelve `Err` si el formulario es inválido o ya hay una
    /// generación en curso; los fallos del servidor van en el resultado.
    pub async fn generate(&self, form: &GenerationForm) -> AppResult<GenerationOutcome> {
        let payload = form.to_payload()?;

        if self.submitting.swap(true, Ordering::SeqCst) {
            return Err(AppError::ActionInFlight("generate"));
        }
        let _guard = SubmittingGuard(&self.submitting);

        let result = match form.modo {
            GenerationMode::Simples => self.geracao.generate_single(&payload).await.map(|rota| vec![rota]),
            GenerationMode::Vrp => self.geracao.generate_vrp(&payload).await,
        };

        let outcome = match result {
            Ok(routes) if routes.is_empty() => {
                self.notifications.danger(EMPTY_GENERATION_MESSAGE);
                GenerationOutcome::Empty
            }
            Ok(routes) => {
                let message = if routes.len() > 1 {
                    format!("{} rotas geradas com sucesso!", routes.len())
                } else {
                    "Rota gerada com sucesso!".to_string()
                };
                info!("✅ {}", message);
                self.notifications.success(message);
                GenerationOutcome::Generated(routes)
            }
            Err(e) => {
                error!("❌ Falha na geração: {}", e);
                let message = e
                    .server_message()
                    .map(str::to_string)
                    .unwrap_or_else(|| DEFAULT_GENERATION_ERROR.to_string());
                self.notifications.danger(message.clone());
                GenerationOutcome::Failed {
                    message,
                    suggestions: e.suggestions().to_vec(),
                }
            }
        };

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_form() -> GenerationForm {
        GenerationForm {
            empresa_id: Some(1),
            grupo_rota_id: Some(2),
            data_agendada: "2025-03-10".to_string(),
            destino_id: Some(9),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let form = GenerationForm::default();
        assert_eq!(form.turno, TurnoTrabalho::Manha);
        assert_eq!(form.modo, GenerationMode::Vrp);
    }

    #[test]
    fn test_requires_destination_choice() {
        let form = GenerationForm {
            destino_id: None,
            ..base_form()
        };
        match form.validate() {
            Err(AppError::Validation(errors)) => assert!(errors.field_errors().contains_key("destino_id")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_manual_destination_rules() {
        let form = GenerationForm {
            usar_destino_manual: true,
            destino: ManualDestination {
                nome: "Fábrica".to_string(),
                logradouro: "Rua A".to_string(),
                numero: "10".to_string(),
                bairro: "Centro".to_string(),
                cidade: "Campinas".to_string(),
                estado: "s".to_string(),
                cep: "1234".to_string(),
                ..Default::default()
            },
            ..base_form()
        };

        match form.validate() {
            Err(AppError::Validation(errors)) => {
                let fields = errors.field_errors();
                assert!(fields.contains_key("destino_estado"));
                assert!(fields.contains_key("destino_cep"));
                assert!(!fields.contains_key("destino_nome"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_manual_payload_is_sanitized() {
        let form = GenerationForm {
            usar_destino_manual: true,
            destino_id: Some(9),
            destino: ManualDestination {
                nome: " Fábrica ".to_string(),
                logradouro: "Rua A".to_string(),
                numero: "10".to_string(),
                complemento: "  ".to_string(),
                bairro: "Centro".to_string(),
                cidade: "Campinas".to_string(),
                estado: "sp".to_string(),
                cep: "13010-000".to_string(),
            },
            ..base_form()
        };

        let payload = form.to_payload().unwrap();
        assert_eq!(payload.destino_id, None);
        assert_eq!(payload.destino_nome.as_deref(), Some("Fábrica"));
        assert_eq!(payload.destino_estado.as_deref(), Some("SP"));
        assert_eq!(payload.destino_complemento, Some(None));
    }

    #[test]
    fn test_vrp_extras_only_in_vrp_mode() {
        let mut form = GenerationForm {
            veiculos_ids: vec![3, 4],
            maximo_veiculos: Some(2),
            ..base_form()
        };
        assert_eq!(form.to_payload().unwrap().veiculos_ids, Some(vec![3, 4]));

        form.modo = GenerationMode::Simples;
        let payload = form.to_payload().unwrap();
        assert_eq!(payload.veiculos_ids, None);
        assert_eq!(payload.maximo_veiculos, None);
    }
}
