//! Sesión de autenticación
//!
//! Mantiene usuario, token y error de login. Mientras vive, la sesión es el
//! manejador de 401 del `ApiClient`: cualquier 401 la deja deslogueada.

use std::sync::{Arc, PoisonError, RwLock, Weak};
use tracing::{error, info, warn};
use validator::Validate;

use crate::client::{ApiClient, UnauthorizedHandler};
use crate::dto::auth_dto::LoginRequest;
use crate::models::auth::AuthUser;
use crate::services::auth_service::AuthService;
use crate::utils::errors::{AppError, AppResult};

pub const DEFAULT_LOGIN_ERROR: &str = "Falha ao autenticar. Verifique suas credenciais e tente novamente.";

/// Estado observable de la sesión
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub is_initializing: bool,
    pub is_authenticating: bool,
    pub user: Option<AuthUser>,
    pub token: Option<String>,
    pub error: Option<String>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }

    fn clear_session(&mut self) {
        self.user = None;
        self.token = None;
        self.error = None;
    }
}

pub struct AuthSession {
    state: Arc<RwLock<AuthState>>,
    client: ApiClient,
    auth_service: AuthService,
    handler: UnauthorizedHandler,
}

impl AuthSession {
    pub fn new(client: ApiClient, auth_service: AuthService) -> Self {
        let token = client.token_store().get();
        let state = Arc::new(RwLock::new(AuthState {
            is_initializing: token.is_some(),
            token,
            ..Default::default()
        }));

        let weak: Weak<RwLock<AuthState>> = Arc::downgrade(&state);
        let handler: UnauthorizedHandler = Arc::new(move || {
            if let Some(state) = weak.upgrade() {
                warn!("🔒 Sesión expirada, cerrando sesión");
                state.write().unwrap_or_else(PoisonError::into_inner).clear_session();
            }
        });
        client.set_unauthorized_handler(Some(handler.clone()));

        Self {
            state,
            client,
            auth_service,
            handler,
        }
    }

    fn update<R>(&self, f: impl FnOnce(&mut AuthState) -> R) -> R {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    pub fn snapshot(&self) -> AuthState {
        self.state.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().unwrap_or_else(PoisonError::into_inner).is_authenticated()
    }

    pub fn user(&self) -> Option<AuthUser> {
        self.snapshot().user
    }

    pub fn token(&self) -> Option<String> {
        self.snapshot().token
    }

    pub fn error(&self) -> Option<String> {
        self.snapshot().error
    }

    /// Recuperar la sesión persistida. Siempre termina con
    /// `is_initializing = false`.
    pub async fn initialize(&self) {
        if self.token().is_some() {
            match self.auth_service.current_user().await {
                Ok(user) => {
                    info!("✅ Sesión restaurada para {}", user.email);
                    self.update(|state| state.user = Some(user));
                }
                Err(e) => {
                    warn!("⚠️ No se pudo restaurar la sesión: {}", e);
                    self.logout();
                }
            }
        }
        self.update(|state| state.is_initializing = false);
    }

    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthUser> {
        let request = LoginRequest::new(email, password);
        if let Err(errors) = request.validate() {
            return Err(AppError::Validation(errors));
        }

        self.update(|state| {
            state.is_authenticating = true;
            state.error = None;
        });

        let result = self.authenticate(&request).await;

        match result {
            Ok(user) => {
                info!("✅ Login exitoso: {}", user.email);
                self.update(|state| {
                    state.user = Some(user.clone());
                    state.is_authenticating = false;
                });
                Ok(user)
            }
            Err(e) => {
                error!("❌ Login fallido: {}", e);
                let message = e
                    .server_message()
                    .map(str::to_string)
                    .unwrap_or_else(|| DEFAULT_LOGIN_ERROR.to_string());

                self.client.token_store().clear();
                self.update(|state| {
                    state.clear_session();
                    state.error = Some(message.clone());
                    state.is_authenticating = false;
                });
                Err(AppError::Authentication(message))
            }
        }
    }

    async fn authenticate(&self, request: &LoginRequest) -> AppResult<AuthUser> {
        let response = self.auth_service.login(request).await?;
        self.client.token_store().set(&response.access_token);
        self.update(|state| state.token = Some(response.access_token.clone()));
        self.auth_service.current_user().await
    }

    /// Idempotente
    pub fn logout(&self) {
        self.client.token_store().clear();
        self.update(AuthState::clear_session);
    }

    pub async fn refresh_user(&self) -> AppResult<()> {
        if self.token().is_none() {
            self.update(|state| state.user = None);
            return Ok(());
        }

        match self.auth_service.current_user().await {
            Ok(user) => {
                self.update(|state| state.user = Some(user));
                Ok(())
            }
            Err(e) => {
                warn!("⚠️ Falha ao atualizar perfil: {}", e);
                self.logout();
                Err(e)
            }
        }
    }
}

impl Drop for AuthSession {
    fn drop(&mut self) {
        self.client.clear_unauthorized_handler_if(&self.handler);
    }
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession").field("state", &self.snapshot()).finish()
    }
}
