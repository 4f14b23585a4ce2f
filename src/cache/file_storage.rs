//! Backend de almacenamiento en disco
//!
//! Un archivo por clave dentro de un directorio de datos.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::storage_backend::StorageBackend;

#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Crear backend sobre un directorio; se crea en la primera escritura
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Generar ruta de archivo a partir de la clave
    fn key_path(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '.' { c } else { '_' })
            .collect();
        self.root.join(file_name)
    }
}

impl StorageBackend for FileStorage {
    fn get_item(&self, key: &str) -> io::Result<Option<String>> {
        let path = self.key_path(key);
        match fs::read_to_string(&path) {
            Ok(value) => {
                debug!("📥 Storage HIT para clave: {}", key);
                Ok(Some(value.trim_end().to_string()))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("❌ Storage MISS para clave: {}", key);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.key_path(key), value)
    }

    fn remove_item(&self, key: &str) -> io::Result<()> {
        match fs::remove_file(self.key_path(key)) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}
