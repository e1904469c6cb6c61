//! Report validation for administrators.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/validacionReportes` | Every report with its status, newest first |
//! | PUT | `/api/validacionReportes/{id}/estado` | Approve or reject a pending report |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::AdminService;
