//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos tal como los devuelve la API de
//! Geo-Rota. Los nombres de campo son los del esquema remoto.

pub mod auth;
pub mod company;
pub mod destination;
pub mod employee;
pub mod route;
pub mod route_group;
pub mod vehicle;
