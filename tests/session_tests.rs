mod common;

use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde_json::json;
use std::collections::HashMap;

use geo_rota_admin::cache::TokenStore;
use geo_rota_admin::controllers::session_controller::DEFAULT_LOGIN_ERROR;
use geo_rota_admin::controllers::AuthSession;
use geo_rota_admin::services::{AuthService, EmpresaService};
use geo_rota_admin::{ApiClient, AppError};

use common::{client, spawn_api, user_json};

const VALID_TOKEN: &str = "token-valido";

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// API que acepta `ana@georota.com` / `segredo` y sólo reconoce `VALID_TOKEN`
async fn auth_api() -> String {
    let router = Router::new()
        .route(
            "/auth/token",
            post(|Form(form): Form<HashMap<String, String>>| async move {
                let username = form.get("username").cloned().unwrap_or_default();
                let password = form.get("password").cloned().unwrap_or_default();
                if username == "ana@georota.com" && password == "segredo" {
                    Json(json!({ "access_token": VALID_TOKEN, "token_type": "bearer" })).into_response()
                } else if username == "sem-detalhe@georota.com" {
                    StatusCode::INTERNAL_SERVER_ERROR.into_response()
                } else {
                    (StatusCode::UNAUTHORIZED, Json(json!({ "detail": "Credenciais inválidas" }))).into_response()
                }
            }),
        )
        .route(
            "/usuarios/me",
            get(|headers: HeaderMap| async move { authorized(&headers, Json(user_json()).into_response()) }),
        )
        .route(
            "/empresas",
            get(|headers: HeaderMap| async move { authorized(&headers, Json(json!([])).into_response()) }),
        );
    spawn_api(router).await
}

fn authorized(headers: &HeaderMap, ok: Response) -> Response {
    if bearer(headers).as_deref() == Some(&format!("Bearer {}", VALID_TOKEN)) {
        ok
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({}))).into_response()
    }
}

fn session(base_url: &str, store: TokenStore) -> (ApiClient, AuthSession) {
    let api = client(base_url, store);
    let session = AuthSession::new(api.clone(), AuthService::new(api.clone()));
    (api, session)
}

#[tokio::test]
async fn test_login_persists_token_and_loads_profile() {
    let base_url = auth_api().await;
    let store = TokenStore::in_memory();
    let (_, session) = session(&base_url, store.clone());

    let user = session.login("  ana@georota.com ", "segredo").await.unwrap();

    assert_eq!(user.email, "ana@georota.com");
    assert!(session.is_authenticated());
    assert_eq!(session.token().as_deref(), Some(VALID_TOKEN));
    assert_eq!(store.get().as_deref(), Some(VALID_TOKEN));

    let state = session.snapshot();
    assert!(!state.is_authenticating);
    assert_eq!(state.error, None);
}

#[tokio::test]
async fn test_login_failure_shows_server_detail() {
    let base_url = auth_api().await;
    let store = TokenStore::in_memory();
    let (_, session) = session(&base_url, store.clone());

    let err = session.login("ana@georota.com", "errada").await.unwrap_err();

    assert!(matches!(&err, AppError::Authentication(message) if message == "Credenciais inválidas"));
    assert_eq!(session.error().as_deref(), Some("Credenciais inválidas"));
    assert!(!session.is_authenticated());
    assert_eq!(store.get(), None);
}

#[tokio::test]
async fn test_login_failure_without_detail_uses_default_message() {
    let base_url = auth_api().await;
    let (_, session) = session(&base_url, TokenStore::in_memory());

    let err = session.login("sem-detalhe@georota.com", "x").await.unwrap_err();

    assert_eq!(err.to_string(), DEFAULT_LOGIN_ERROR);
    assert_eq!(session.error().as_deref(), Some(DEFAULT_LOGIN_ERROR));
}

#[tokio::test]
async fn test_invalid_form_is_rejected_before_any_request() {
    let (_, session) = session("http://127.0.0.1:9", TokenStore::in_memory());

    let result = session.login("   ", "").await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert!(!session.snapshot().is_authenticating);
}

#[tokio::test]
async fn test_initialize_restores_a_valid_session() {
    let base_url = auth_api().await;
    let store = TokenStore::in_memory();
    store.set(VALID_TOKEN);
    let (_, session) = session(&base_url, store);

    assert!(session.snapshot().is_initializing);
    session.initialize().await;

    assert!(!session.snapshot().is_initializing);
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn test_initialize_with_stale_token_logs_out() {
    let base_url = auth_api().await;
    let store = TokenStore::in_memory();
    store.set("velho");
    let (_, session) = session(&base_url, store.clone());

    session.initialize().await;

    let state = session.snapshot();
    assert!(!state.is_initializing);
    assert!(!state.is_authenticated());
    assert_eq!(state.token, None);
    assert_eq!(store.get(), None);
}

#[tokio::test]
async fn test_unauthorized_anywhere_forces_logout() {
    let base_url = auth_api().await;
    let store = TokenStore::in_memory();
    let (api, session) = session(&base_url, store.clone());
    session.login("ana@georota.com", "segredo").await.unwrap();

    let empresas = EmpresaService::new(api);
    assert!(empresas.list().await.is_ok());

    // El servidor deja de aceptar el token
    store.set("revogado");
    let err = empresas.list().await.unwrap_err();

    assert!(matches!(err, AppError::Unauthorized));
    assert!(!session.is_authenticated());
    assert_eq!(session.user(), None);
    assert_eq!(session.token(), None);
    assert_eq!(store.get(), None);

    // Sin nuevo login ninguna request autenticada vuelve a funcionar
    assert!(empresas.list().await.is_err());
}

#[tokio::test]
async fn test_refresh_user_failure_logs_out() {
    let base_url = auth_api().await;
    let store = TokenStore::in_memory();
    let (_, session) = session(&base_url, store.clone());
    session.login("ana@georota.com", "segredo").await.unwrap();

    store.set("revogado");
    assert!(session.refresh_user().await.is_err());
    assert!(!session.is_authenticated());
}
