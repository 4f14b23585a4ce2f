//! Utilidades
//!
//! Errores, validación de formularios, máscaras de documentos y paginación.

pub mod errors;
pub mod masks;
pub mod pagination;
pub mod validation;

pub use errors::{AppError, AppResult};
