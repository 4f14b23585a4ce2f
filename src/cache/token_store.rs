//! Almacén del token de acceso
//!
//! Nunca falla: cualquier error del backend se registra y se trata como
//! "no hay token".

use std::sync::Arc;
use tracing::warn;

use super::storage_backend::{MemoryStorage, StorageBackend};

pub const TOKEN_KEY: &str = "geo-rota:access-token";

#[derive(Clone)]
pub struct TokenStore {
    backend: Arc<dyn StorageBackend>,
}

impl TokenStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    pub fn get(&self) -> Option<String> {
        match self.backend.get_item(TOKEN_KEY) {
            Ok(Some(token)) if !token.is_empty() => Some(token),
            Ok(_) => None,
            Err(e) => {
                warn!("⚠️ No se pudo leer el token persistido: {}", e);
                None
            }
        }
    }

    pub fn set(&self, token: &str) {
        if let Err(e) = self.backend.set_item(TOKEN_KEY, token) {
            warn!("⚠️ No se pudo persistir el token: {}", e);
        }
    }

    pub fn clear(&self) {
        if let Err(e) = self.backend.remove_item(TOKEN_KEY) {
            warn!("⚠️ No se pudo borrar el token persistido: {}", e);
        }
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    struct BrokenStorage;

    impl StorageBackend for BrokenStorage {
        fn get_item(&self, _key: &str) -> io::Result<Option<String>> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "private mode"))
        }

        fn set_item(&self, _key: &str, _value: &str) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::Other, "quota exceeded"))
        }

        fn remove_item(&self, _key: &str) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::Other, "quota exceeded"))
        }
    }

    #[test]
    fn test_set_get_clear() {
        let store = TokenStore::in_memory();
        assert_eq!(store.get(), None);

        store.set("token-1");
        assert_eq!(store.get().as_deref(), Some("token-1"));

        store.clear();
        assert_eq!(store.get(), None);
        store.clear();
    }

    #[test]
    fn test_broken_backend_never_fails() {
        let store = TokenStore::new(Arc::new(BrokenStorage));
        store.set("token-1");
        assert_eq!(store.get(), None);
        store.clear();
    }
}
