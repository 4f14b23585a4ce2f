//! Servicio de autenticación
//!
//! Intercambio de credenciales por token y consulta del perfil del usuario
//! autenticado. No guarda estado: la sesión vive en `AuthSession`.

use crate::client::ApiClient;
use crate::dto::auth_dto::LoginRequest;
use crate::models::auth::{AuthUser, LoginResponse};
use crate::utils::errors::AppResult;

#[derive(Clone, Debug)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `POST /auth/token` con cuerpo form-encoded
    pub async fn login(&self, request: &LoginRequest) -> AppResult<LoginResponse> {
        log::info!("🔐 Solicitando token para: {}", request.email);
        self.client.post_form("/auth/token", &request.form_fields()).await
    }

    /// `GET /usuarios/me`
    pub async fn current_user(&self) -> AppResult<AuthUser> {
        self.client.get_json("/usuarios/me").await
    }
}
