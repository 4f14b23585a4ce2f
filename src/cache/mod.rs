//! Cache
//!
//! Almacenamiento persistente del lado del cliente. Lo único que se persiste
//! es el token de acceso.

pub mod file_storage;
pub mod storage_backend;
pub mod token_store;

pub use file_storage::FileStorage;
pub use storage_backend::{MemoryStorage, StorageBackend};
pub use token_store::{TokenStore, TOKEN_KEY};
