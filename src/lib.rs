//! Geo-Rota Admin
//!
//! Cliente administrativo de la API de Geo-Rota: sesión, cadastros,
//! generación automática de rutas y gestión de las rutas generadas.

pub mod cache;
pub mod client;
pub mod config;
pub mod controllers;
pub mod dto;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

pub use client::ApiClient;
pub use state::AppState;
pub use utils::errors::{AppError, AppResult};
