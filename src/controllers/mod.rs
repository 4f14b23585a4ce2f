//! Controladores
//!
//! Flujos de trabajo del panel: sesión, formularios de cadastro, generación
//! y gestión de rutas. Cada controlador recibe sus servicios ya construidos.

pub mod assignment_editor;
pub mod employee_controller;
pub mod route_generation_controller;
pub mod route_group_controller;
pub mod route_management_controller;
pub mod session_controller;

pub use assignment_editor::AssignmentEditor;
pub use employee_controller::{EmployeeController, EmployeeForm, ScheduleSlot};
pub use route_generation_controller::{GenerationForm, GenerationMode, GenerationOutcome, RouteGenerationController};
pub use route_group_controller::{RouteGroupController, RouteGroupForm};
pub use route_management_controller::{RouteAction, RouteManagementController, RouteManagementState};
pub use session_controller::{AuthSession, AuthState};
