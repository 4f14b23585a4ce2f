//! Cliente HTTP para la API de Geo-Rota
//!
//! Un único `reqwest::Client` con URL base, cookies y token bearer tomado del
//! `TokenStore` en cada request. Cualquier 401 limpia el token persistido y
//! dispara el manejador de "no autorizado" registrado (si lo hay).

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tracing::{debug, warn};

use crate::cache::TokenStore;
use crate::config::environment::EnvironmentConfig;
use crate::utils::errors::{api_error_from_body, decode_error, AppError, AppResult};

/// Callback invocado tras un 401
pub type UnauthorizedHandler = Arc<dyn Fn() + Send + Sync>;

struct ApiClientInner {
    http: Client,
    base_url: String,
    token_store: TokenStore,
    unauthorized_handler: RwLock<Option<UnauthorizedHandler>>,
}

/// Cliente de la API. Clonar es barato: todas las copias comparten el mismo
/// `reqwest::Client`, el mismo token y el mismo manejador de 401.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

impl ApiClient {
    /// Crear nuevo cliente HTTP con URL base configurable
    pub fn new(base_url: impl Into<String>, token_store: TokenStore, timeout: Duration) -> AppResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .timeout(timeout)
            .cookie_store(true)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                base_url: base_url.into().trim_end_matches('/').to_string(),
                token_store,
                unauthorized_handler: RwLock::new(None),
            }),
        })
    }

    pub fn from_config(config: &EnvironmentConfig, token_store: TokenStore) -> AppResult<Self> {
        Self::new(config.api_base_url.clone(), token_store, config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub fn token_store(&self) -> &TokenStore {
        &self.inner.token_store
    }

    /// Registrar (o quitar con `None`) el manejador de 401. Cada registro
    /// reemplaza al anterior.
    pub fn set_unauthorized_handler(&self, handler: Option<UnauthorizedHandler>) {
        let mut slot = self
            .inner
            .unauthorized_handler
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *slot = handler;
    }

    /// Quitar el manejador sólo si sigue siendo `handler`; un registro
    /// posterior de otro dueño se conserva.
    pub fn clear_unauthorized_handler_if(&self, handler: &UnauthorizedHandler) -> bool {
        let mut slot = self
            .inner
            .unauthorized_handler
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        match slot.as_ref() {
            Some(current) if Arc::ptr_eq(current, handler) => {
                *slot = None;
                true
            }
            _ => false,
        }
    }

    pub fn has_unauthorized_handler(&self) -> bool {
        self.inner
            .unauthorized_handler
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.inner.base_url, path.trim_start_matches('/'))
    }

    /// Adjuntar el token bearer si hay uno persistido
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.inner.token_store.get() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn handle_unauthorized(&self) {
        warn!("🔒 401 recibido, limpiando sesión");
        self.inner.token_store.clear();

        let handler = self
            .inner
            .unauthorized_handler
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        if let Some(handler) = handler {
            handler();
        }
    }

    /// Enviar la request y convertir los estados no exitosos en `AppError`
    async fn send(&self, request: RequestBuilder) -> AppResult<Response> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        debug!("📡 {} {}", status, response.url().path());

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();

        if status == StatusCode::UNAUTHORIZED {
            self.handle_unauthorized();
            return Err(match api_error_from_body(status, &body) {
                error @ AppError::Api { .. } if error.server_message().is_some() => error,
                _ => AppError::Unauthorized,
            });
        }

        warn!("❌ API respondió {}: {}", status, body);
        Err(api_error_from_body(status, &body))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> AppResult<T> {
        let path = response.url().path().to_string();
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| decode_error(&path, e))
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let response = self.send(self.inner.http.get(self.url(path))).await?;
        Self::decode(response).await
    }

    pub async fn get_json_with_query<T, Q>(&self, path: &str, query: &Q) -> AppResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self.send(self.inner.http.get(self.url(path)).query(query)).await?;
        Self::decode(response).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(self.inner.http.post(self.url(path)).json(body)).await?;
        Self::decode(response).await
    }

    /// POST `application/x-www-form-urlencoded`
    pub async fn post_form<F, T>(&self, path: &str, form: &F) -> AppResult<T>
    where
        F: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(self.inner.http.post(self.url(path)).form(form)).await?;
        Self::decode(response).await
    }

    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(self.inner.http.put(self.url(path)).json(body)).await?;
        Self::decode(response).await
    }

    /// DELETE; el cuerpo de la respuesta (normalmente 204) se descarta
    pub async fn delete(&self, path: &str) -> AppResult<()> {
        self.send(self.inner.http.delete(self.url(path))).await?;
        Ok(())
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url)
            .field("has_unauthorized_handler", &self.has_unauthorized_handler())
            .finish()
    }
}
