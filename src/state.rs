//! Estado compartido de la aplicación
//!
//! Raíz de composición: un único `ApiClient`, una única sesión y un único
//! centro de notificaciones, pasados explícitamente a cada servicio y
//! controlador.

use std::sync::Arc;
use tracing::info;

use crate::cache::{FileStorage, TokenStore};
use crate::client::ApiClient;
use crate::config::environment::EnvironmentConfig;
use crate::controllers::{
    AuthSession, EmployeeController, RouteGenerationController, RouteGroupController, RouteManagementController,
};
use crate::services::{
    AuthService, DestinoService, EmpresaService, FuncionarioService, GrupoRotaService, NotificationCenter,
    PolylineService, RotaAutomaticaService, RotaService, VeiculoService,
};
use crate::utils::errors::AppResult;

/// Servicios de recursos, todos sobre el mismo cliente
#[derive(Clone, Debug)]
pub struct Services {
    pub auth: AuthService,
    pub empresas: EmpresaService,
    pub funcionarios: FuncionarioService,
    pub grupos: GrupoRotaService,
    pub veiculos: VeiculoService,
    pub destinos: DestinoService,
    pub rotas: RotaService,
    pub geracao: RotaAutomaticaService,
}

impl Services {
    pub fn new(client: &ApiClient) -> Self {
        Self {
            auth: AuthService::new(client.clone()),
            empresas: EmpresaService::new(client.clone()),
            funcionarios: FuncionarioService::new(client.clone()),
            grupos: GrupoRotaService::new(client.clone()),
            veiculos: VeiculoService::new(client.clone()),
            destinos: DestinoService::new(client.clone()),
            rotas: RotaService::new(client.clone()),
            geracao: RotaAutomaticaService::new(client.clone()),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub client: ApiClient,
    pub services: Services,
    pub session: Arc<AuthSession>,
    pub notifications: NotificationCenter,
    pub polylines: PolylineService,
    pub routes: Arc<RouteManagementController>,
    pub generation: Arc<RouteGenerationController>,
    pub employees: Arc<EmployeeController>,
    pub route_groups: Arc<RouteGroupController>,
}

impl AppState {
    /// Estado con el token persistido en `config.storage_dir`
    pub fn new(config: EnvironmentConfig) -> AppResult<Self> {
        let storage = FileStorage::new(config.storage_dir.clone());
        Self::with_token_store(config, TokenStore::new(Arc::new(storage)))
    }

    pub fn with_token_store(config: EnvironmentConfig, token_store: TokenStore) -> AppResult<Self> {
        let client = ApiClient::from_config(&config, token_store)?;
        let services = Services::new(&client);
        let notifications = NotificationCenter::new(config.notification_duration_ms);
        let session = Arc::new(AuthSession::new(client.clone(), services.auth.clone()));
        let polylines = PolylineService::osrm(config.osrm_base_url.clone(), config.request_timeout())?;

        let routes = Arc::new(RouteManagementController::new(
            services.rotas.clone(),
            services.funcionarios.clone(),
            services.veiculos.clone(),
            services.destinos.clone(),
            notifications.clone(),
        ));
        let generation = Arc::new(RouteGenerationController::new(
            services.geracao.clone(),
            services.empresas.clone(),
            services.grupos.clone(),
            services.funcionarios.clone(),
            services.veiculos.clone(),
            services.destinos.clone(),
            notifications.clone(),
        ));
        let employees = Arc::new(EmployeeController::new(
            services.funcionarios.clone(),
            services.empresas.clone(),
            services.grupos.clone(),
            notifications.clone(),
        ));
        let route_groups = Arc::new(RouteGroupController::new(
            services.grupos.clone(),
            services.empresas.clone(),
            notifications.clone(),
        ));

        info!("🔧 Estado inicializado contra {}", client.base_url());

        Ok(Self {
            config,
            client,
            services,
            session,
            notifications,
            polylines,
            routes,
            generation,
            employees,
            route_groups,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> EnvironmentConfig {
        EnvironmentConfig::from_lookup(|key| match key {
            "GEO_ROTA_API_URL" => Some("http://127.0.0.1:9/".to_string()),
            _ => None,
        })
        .unwrap()
    }

    #[test]
    fn test_session_owns_the_unauthorized_handler() {
        let state = AppState::with_token_store(config(), TokenStore::in_memory()).unwrap();
        assert_eq!(state.client.base_url(), "http://127.0.0.1:9");
        assert!(state.client.has_unauthorized_handler());
        assert!(!state.session.is_authenticated());
    }
}
