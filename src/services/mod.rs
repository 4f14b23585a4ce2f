//! Services module
//!
//! Este módulo contiene los servicios de la aplicación. Cada servicio de
//! recurso traduce una operación de dominio a una llamada REST; el resto
//! (notificaciones, trayectos) son integraciones auxiliares.

pub mod auth_service;
pub mod company_service;
pub mod destination_service;
pub mod directions_service;
pub mod employee_service;
pub mod notification_service;
pub mod polyline_service;
pub mod route_generation_service;
pub mod route_group_service;
pub mod route_service;
pub mod vehicle_service;

pub use auth_service::AuthService;
pub use company_service::EmpresaService;
pub use destination_service::DestinoService;
pub use directions_service::{DirectionsProvider, LatLng, OsrmDirections};
pub use employee_service::FuncionarioService;
pub use notification_service::{DismissAfter, Notification, NotificationCenter, NotificationEvent, NotificationOptions, Severity};
pub use polyline_service::{PolylineService, RoutePath};
pub use route_generation_service::RotaAutomaticaService;
pub use route_group_service::GrupoRotaService;
pub use route_service::RotaService;
pub use vehicle_service::VeiculoService;
