//! Gestión de rutas generadas
//!
//! Máquina de estados `sin selección -> seleccionada(ruta)`. Cada acción
//! espera la confirmación del servidor antes de tocar el estado local, avisa
//! el resultado con una notificación y tiene su propia marca "en curso": una
//! segunda llamada a la misma acción mientras la primera no terminó se
//! rechaza sin enviar nada.

use std::collections::HashSet;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use crate::controllers::assignment_editor::AssignmentEditor;
use crate::dto::destination_dto::DestinoListParams;
use crate::dto::employee_dto::FuncionarioListParams;
use crate::dto::route_dto::{
    AtualizarDataTurnoPayload, AtualizarDestinoPayload, AtualizarFuncionariosPayload, AtualizarMotoristaPayload,
    AtualizarStatusPayload, AtualizarVeiculoPayload, FuncionarioRotaEdicaoPayload, RecalcularRotaPayload,
    RemanejamentoPayload, RotaListParams,
};
use crate::dto::vehicle_dto::VeiculoListParams;
use crate::models::destination::DestinoRota;
use crate::models::employee::Funcionario;
use crate::models::route::{Rota, StatusRota, TurnoTrabalho};
use crate::models::vehicle::Veiculo;
use crate::services::{DestinoService, FuncionarioService, NotificationCenter, RotaService, VeiculoService};
use crate::utils::errors::{validation_error, AppError, AppResult};
use crate::utils::validation::validate_date;

pub const DEFAULT_RECALCULATION_REASON: &str = "Recalculo manual pelo painel";

/// Acciones con marca "en curso" propia
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteAction {
    LoadRoutes,
    Status,
    Recalculate,
    Driver,
    Vehicle,
    Destination,
    Schedule,
    Assignments,
    Reassign,
    Remove,
}

impl RouteAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteAction::LoadRoutes => "load_routes",
            RouteAction::Status => "status",
            RouteAction::Recalculate => "recalculate",
            RouteAction::Driver => "driver",
            RouteAction::Vehicle => "vehicle",
            RouteAction::Destination => "destination",
            RouteAction::Schedule => "schedule",
            RouteAction::Assignments => "assignments",
            RouteAction::Reassign => "reassign",
            RouteAction::Remove => "remove",
        }
    }
}

/// Datos de la empresa de la ruta seleccionada (selectores y nombres)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyResources {
    pub empresa_id: i64,
    pub funcionarios: Vec<Funcionario>,
    pub veiculos: Vec<Veiculo>,
    pub destinos: Vec<DestinoRota>,
}

impl CompanyResources {
    pub fn funcionario(&self, id: i64) -> Option<&Funcionario> {
        self.funcionarios.iter().find(|f| f.id == id)
    }

    pub fn veiculo(&self, id: i64) -> Option<&Veiculo> {
        self.veiculos.iter().find(|v| v.id == id)
    }

    pub fn destino(&self, id: i64) -> Option<&DestinoRota> {
        self.destinos.iter().find(|d| d.id == id)
    }

    /// Funcionarios que pueden conducir
    pub fn driver_candidates(&self) -> Vec<&Funcionario> {
        self.funcionarios.iter().filter(|f| f.is_eligible_driver()).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteManagementState {
    pub filter: RotaListParams,
    pub routes: Vec<Rota>,
    pub selected: Option<Rota>,
    pub resources: Option<CompanyResources>,
}

impl RouteManagementState {
    /// Rutas con la misma fecha y turno que la seleccionada, sin ella
    pub fn reassignment_candidates(&self) -> Vec<&Rota> {
        match &self.selected {
            Some(selected) => self
                .routes
                .iter()
                .filter(|rota| rota.id != selected.id && rota.shares_schedule_with(selected))
                .collect(),
            None => Vec::new(),
        }
    }

    fn replace_route(&mut self, updated: Rota) {
        if let Some(slot) = self.routes.iter_mut().find(|rota| rota.id == updated.id) {
            *slot = updated.clone();
        }
        if self.selected.as_ref().map(|rota| rota.id) == Some(updated.id) {
            self.selected = Some(updated);
        }
    }
}

struct InFlightGuard<'a> {
    in_flight: &'a Mutex<HashSet<RouteAction>>,
    action: RouteAction,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.action);
    }
}

pub struct RouteManagementController {
    rotas: RotaService,
    funcionarios: FuncionarioService,
    veiculos: VeiculoService,
    destinos: DestinoService,
    notifications: NotificationCenter,
    state: Arc<RwLock<RouteManagementState>>,
    in_flight: Mutex<HashSet<RouteAction>>,
}

impl RouteManagementController {
    pub fn new(
        rotas: RotaService,
        funcionarios: FuncionarioService,
        veiculos: VeiculoService,
        destinos: DestinoService,
        notifications: NotificationCenter,
    ) -> Self {
        Self {
            rotas,
            funcionarios,
            veiculos,
            destinos,
            notifications,
            state: Arc::new(RwLock::new(RouteManagementState::default())),
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    pub async fn state(&self) -> RouteManagementState {
        self.state.read().await.clone()
    }

    pub async fn selected(&self) -> Option<Rota> {
        self.state.read().await.selected.clone()
    }

    pub fn is_loading(&self, action: RouteAction) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&action)
    }

    fn begin(&self, action: RouteAction) -> AppResult<InFlightGuard<'_>> {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if !in_flight.insert(action) {
            warn!("⏳ Acción {} ya en curso", action.as_str());
            return Err(AppError::ActionInFlight(action.as_str()));
        }
        Ok(InFlightGuard {
            in_flight: &self.in_flight,
            action,
        })
    }

    async fn selected_id(&self) -> AppResult<i64> {
        self.state
            .read()
            .await
            .selected
            .as_ref()
            .map(|rota| rota.id)
            .ok_or(AppError::NoSelection)
    }

    /// Listar rutas con el filtro dado. Si hay una ruta seleccionada se
    /// reemplaza por su versión nueva o se deselecciona si ya no está.
    pub async fn load_routes(&self, filter: RotaListParams) -> AppResult<Vec<Rota>> {
        let _guard = self.begin(RouteAction::LoadRoutes)?;

        match self.rotas.list(&filter).await {
            Ok(routes) => {
                info!("📋 {} rotas cargadas", routes.len());
                let mut state = self.state.write().await;
                state.filter = filter;
                if let Some(selected_id) = state.selected.as_ref().map(|rota| rota.id) {
                    state.selected = routes.iter().find(|rota| rota.id == selected_id).cloned();
                    if state.selected.is_none() {
                        state.resources = None;
                    }
                }
                state.routes = routes.clone();
                Ok(routes)
            }
            Err(e) => {
                error!("❌ Error cargando rotas: {}", e);
                self.notifications.danger("Não foi possível carregar as rotas.");
                Err(e)
            }
        }
    }

    /// Repetir el último listado
    pub async fn refresh(&self) -> AppResult<Vec<Rota>> {
        let filter = self.state.read().await.filter.clone();
        self.load_routes(filter).await
    }

    /// Seleccionar una ruta y cargar en paralelo los datos de su empresa
    pub async fn select(&self, rota: Rota) -> AppResult<()> {
        let empresa_id = rota.empresa_id;
        let rota_id = rota.id;
        {
            let mut state = self.state.write().await;
            state.selected = Some(rota);
            state.resources = None;
        }

        match self.load_company_resources(empresa_id).await {
            Ok(resources) => {
                let mut state = self.state.write().await;
                // Otra selección llegó mientras se cargaba esta
                if state.selected.as_ref().map(|selected| selected.id) == Some(rota_id) {
                    state.resources = Some(resources);
                } else {
                    debug!("⏭️ Recursos de la empresa {} descartados, la selección cambió", empresa_id);
                }
                Ok(())
            }
            Err(e) => {
                error!("❌ Error cargando datos de la empresa {}: {}", empresa_id, e);
                self.notifications
                    .danger("Não foi possível carregar dados complementares da empresa selecionada.");
                Err(e)
            }
        }
    }

    /// Seleccionar por id; si la ruta no está en la lista se pide al servidor
    pub async fn select_by_id(&self, rota_id: i64) -> AppResult<()> {
        let cached = self
            .state
            .read()
            .await
            .routes
            .iter()
            .find(|rota| rota.id == rota_id)
            .cloned();

        let rota = match cached {
            Some(rota) => rota,
            None => self.rotas.get(rota_id).await?,
        };
        self.select(rota).await
    }

    pub async fn deselect(&self) {
        let mut state = self.state.write().await;
        state.selected = None;
        state.resources = None;
    }

    async fn load_company_resources(&self, empresa_id: i64) -> AppResult<CompanyResources> {
        let funcionarios_params = FuncionarioListParams {
            empresa_id: Some(empresa_id),
        };
        let veiculos_params = VeiculoListParams::for_company(empresa_id);
        let destinos_params = DestinoListParams::for_company(empresa_id);

        let (funcionarios, veiculos, destinos) = futures::try_join!(
            self.funcionarios.list(&funcionarios_params),
            self.veiculos.list(&veiculos_params),
            self.destinos.list(&destinos_params),
        )?;

        Ok(CompanyResources {
            empresa_id,
            funcionarios,
            veiculos,
            destinos,
        })
    }

    /// Ejecutar una mutación sobre la ruta seleccionada y reemplazarla con la
    /// respuesta del servidor
    async fn mutate<F, Fut>(&self, action: RouteAction, success: &str, failure: &str, op: F) -> AppResult<Rota>
    where
        F: FnOnce(i64) -> Fut,
        Fut: Future<Output = AppResult<Rota>>,
    {
        let rota_id = self.selected_id().await?;
        let _guard = self.begin(action)?;

        match op(rota_id).await {
            Ok(updated) => {
                self.state.write().await.replace_route(updated.clone());
                self.notifications.success(success);
                Ok(updated)
            }
            Err(e) => {
                error!("❌ Rota {}: {} falló: {}", rota_id, action.as_str(), e);
                self.notifications.danger(failure);
                Err(e)
            }
        }
    }

    pub async fn set_status(&self, status: StatusRota) -> AppResult<Rota> {
        let rotas = self.rotas.clone();
        let payload = AtualizarStatusPayload { status };
        self.mutate(
            RouteAction::Status,
            "Status atualizado com sucesso.",
            "Não foi possível atualizar o status.",
            move |id| async move { rotas.update_status(id, &payload).await },
        )
        .await
    }

    pub async fn recalculate(&self, reason: Option<String>) -> AppResult<Rota> {
        let rotas = self.rotas.clone();
        let payload = RecalcularRotaPayload {
            motivo: Some(reason.unwrap_or_else(|| DEFAULT_RECALCULATION_REASON.to_string())),
        };
        self.mutate(
            RouteAction::Recalculate,
            "Recalculo concluído.",
            "Falha ao recalcular a rota.",
            move |id| async move { rotas.recalculate(id, &payload).await },
        )
        .await
    }

    /// `None` deja que el servidor elija
    pub async fn set_driver(&self, motorista_id: Option<i64>) -> AppResult<Rota> {
        let rotas = self.rotas.clone();
        let payload = AtualizarMotoristaPayload { motorista_id };
        self.mutate(
            RouteAction::Driver,
            "Motorista atualizado.",
            "Falha ao atualizar o motorista.",
            move |id| async move { rotas.update_driver(id, &payload).await },
        )
        .await
    }

    /// `None` deja que el servidor elija
    pub async fn set_vehicle(&self, veiculo_id: Option<i64>) -> AppResult<Rota> {
        let rotas = self.rotas.clone();
        let payload = AtualizarVeiculoPayload {
            veiculo_id,
            disponibilidade_veiculo_id: None,
        };
        self.mutate(
            RouteAction::Vehicle,
            "Veículo atualizado.",
            "Falha ao atualizar o veículo.",
            move |id| async move { rotas.update_vehicle(id, &payload).await },
        )
        .await
    }

    pub async fn set_destination(&self, payload: AtualizarDestinoPayload) -> AppResult<Rota> {
        let rotas = self.rotas.clone();
        self.mutate(
            RouteAction::Destination,
            "Destino atualizado.",
            "Falha ao atualizar o destino.",
            move |id| async move { rotas.update_destination(id, &payload).await },
        )
        .await
    }

    pub async fn set_schedule(&self, data_agendada: &str, turno: TurnoTrabalho) -> AppResult<Rota> {
        if let Err(e) = validate_date(data_agendada) {
            let mut errors = validator::ValidationErrors::new();
            errors.add("data_agendada", e);
            return Err(AppError::Validation(errors));
        }

        let rotas = self.rotas.clone();
        let payload = AtualizarDataTurnoPayload {
            data_agendada: data_agendada.trim().to_string(),
            turno,
        };
        self.mutate(
            RouteAction::Schedule,
            "Data e turno atualizados.",
            "Falha ao atualizar data e turno.",
            move |id| async move { rotas.update_schedule(id, &payload).await },
        )
        .await
    }

    /// Envía la lista completa de atribuciones
    pub async fn set_assignments(&self, atribuicoes: Vec<FuncionarioRotaEdicaoPayload>) -> AppResult<Rota> {
        let rotas = self.rotas.clone();
        let payload = AtualizarFuncionariosPayload { atribuicoes };
        self.mutate(
            RouteAction::Assignments,
            "Atribuições atualizadas.",
            "Falha ao atualizar atribuições.",
            move |id| async move { rotas.update_assignments(id, &payload).await },
        )
        .await
    }

    pub async fn save_editor(&self, editor: &AssignmentEditor) -> AppResult<Rota> {
        self.set_assignments(editor.payload()).await
    }

    /// Editor inicializado con las atribuciones de la ruta seleccionada
    pub async fn editor(&self) -> Option<AssignmentEditor> {
        self.state
            .read()
            .await
            .selected
            .as_ref()
            .map(|rota| AssignmentEditor::from_assignments(&rota.atribuicoes))
    }

    /// Mover funcionarios de la ruta seleccionada a otra con la misma fecha y
    /// turno. Después se vuelve a listar para reflejar la ruta de origen.
    pub async fn reassign(&self, funcionarios_ids: Vec<i64>, rota_destino_id: i64) -> AppResult<Rota> {
        let rota_origem_id = self.selected_id().await?;

        if funcionarios_ids.is_empty() {
            return Err(validation_error("funcionarios_ids", "Selecione ao menos um funcionário."));
        }
        let is_candidate = self
            .state
            .read()
            .await
            .reassignment_candidates()
            .iter()
            .any(|rota| rota.id == rota_destino_id);
        if !is_candidate {
            return Err(validation_error(
                "rota_destino_id",
                "A rota de destino deve ter a mesma data e turno da rota atual.",
            ));
        }

        let updated = {
            let _guard = self.begin(RouteAction::Reassign)?;
            let payload = RemanejamentoPayload {
                rota_origem_id,
                rota_destino_id,
                funcionarios_ids,
            };

            match self.rotas.reassign(&payload).await {
                Ok(routes) => {
                    let mut state = self.state.write().await;
                    let current = routes
                        .iter()
                        .find(|rota| rota.id == rota_origem_id)
                        .or_else(|| routes.first())
                        .cloned()
                        .ok_or_else(|| AppError::Decode("remanejamento sem rotas na resposta".to_string()))?;
                    for rota in routes {
                        state.replace_route(rota);
                    }
                    state.selected = Some(current.clone());
                    drop(state);

                    self.notifications.success("Funcionários remanejados.");
                    current
                }
                Err(e) => {
                    error!("❌ Falha ao remanejar: {}", e);
                    self.notifications.danger("Falha ao remanejar funcionários.");
                    return Err(e);
                }
            }
        };

        if let Err(e) = self.refresh().await {
            warn!("⚠️ No se pudo refrescar la lista tras remanejar: {}", e);
        }
        Ok(updated)
    }

    /// Eliminar la ruta seleccionada
    pub async fn remove_selected(&self) -> AppResult<()> {
        let rota_id = self.selected_id().await?;
        let _guard = self.begin(RouteAction::Remove)?;

        match self.rotas.delete(rota_id).await {
            Ok(()) => {
                let mut state = self.state.write().await;
                state.routes.retain(|rota| rota.id != rota_id);
                state.selected = None;
                state.resources = None;
                drop(state);
                self.notifications.success("Rota removida.");
                Ok(())
            }
            Err(e) => {
                error!("❌ Falha ao remover rota {}: {}", rota_id, e);
                self.notifications.danger("Falha ao remover a rota.");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::route::ModoGeracao;

    fn rota(id: i64, data: &str, turno: TurnoTrabalho) -> Rota {
        Rota {
            id,
            empresa_id: 1,
            grupo_rota_id: 1,
            data_agendada: data.to_string(),
            turno,
            status: StatusRota::Rascunho,
            modo_geracao: ModoGeracao::Automatico,
            motorista_id: None,
            veiculo_id: None,
            destino_id: None,
            destino: None,
            atribuicoes: Vec::new(),
            observacoes: None,
            sugestoes_veiculos: Vec::new(),
            distancia_total_km: None,
            custo_operacional_total: None,
        }
    }

    #[test]
    fn test_candidates_share_date_and_shift() {
        let state = RouteManagementState {
            routes: vec![
                rota(1, "2025-03-10", TurnoTrabalho::Manha),
                rota(2, "2025-03-10", TurnoTrabalho::Manha),
                rota(3, "2025-03-10", TurnoTrabalho::Tarde),
                rota(4, "2025-03-11", TurnoTrabalho::Manha),
            ],
            selected: Some(rota(1, "2025-03-10", TurnoTrabalho::Manha)),
            ..Default::default()
        };

        let ids: Vec<i64> = state.reassignment_candidates().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_replace_route_updates_list_and_selection() {
        let mut state = RouteManagementState {
            routes: vec![rota(1, "2025-03-10", TurnoTrabalho::Manha), rota(2, "2025-03-10", TurnoTrabalho::Manha)],
            selected: Some(rota(1, "2025-03-10", TurnoTrabalho::Manha)),
            ..Default::default()
        };

        let mut updated = rota(1, "2025-03-10", TurnoTrabalho::Manha);
        updated.status = StatusRota::Agendada;
        state.replace_route(updated);

        assert_eq!(state.routes[0].status, StatusRota::Agendada);
        assert_eq!(state.selected.as_ref().map(|r| r.status), Some(StatusRota::Agendada));

        let mut other = rota(2, "2025-03-10", TurnoTrabalho::Manha);
        other.status = StatusRota::Cancelada;
        state.replace_route(other);
        assert_eq!(state.selected.as_ref().map(|r| r.status), Some(StatusRota::Agendada));
    }
}
