//! Backends de almacenamiento clave/valor
//!
//! Equivalente al `localStorage` del navegador: operaciones síncronas que
//! pueden fallar (disco lleno, permisos, directorio inexistente).

use std::collections::HashMap;
use std::io;
use std::sync::{Mutex, PoisonError};

/// Operaciones de almacenamiento
pub trait StorageBackend: Send + Sync {
    fn get_item(&self, key: &str) -> io::Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> io::Result<()>;
    fn remove_item(&self, key: &str) -> io::Result<()>;
}

/// Backend en memoria, usado en tests y cuando no hay directorio configurado
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, key: &str) -> io::Result<Option<String>> {
        let items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> io::Result<()> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> io::Result<()> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        items.remove(key);
        Ok(())
    }
}
