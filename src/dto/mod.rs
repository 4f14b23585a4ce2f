//! DTOs
//!
//! Payloads de request enviados a la API. Los campos de los payloads de
//! actualización son parciales: `None` se omite y `Some(None)` viaja como
//! `null` para limpiar el valor en el servidor.

pub mod auth_dto;
pub mod company_dto;
pub mod destination_dto;
pub mod employee_dto;
pub mod route_dto;
pub mod route_group_dto;
pub mod vehicle_dto;
