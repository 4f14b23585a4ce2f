//! Configuración del proyecto
//!
//! Este módulo contiene las variables de entorno del cliente: URL de la API,
//! proveedor de trayectos, directorio de almacenamiento y tiempos.

pub mod environment;

pub use environment::*;
