//! Citizen reports, their votes and their comments.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/reporte` | - | Active reports, newest first |
//! | GET | `/api/reporte/{id}` | - | One active report |
//! | POST | `/api/reporte` | token | Submit a report (multipart) |
//! | POST | `/api/reporte/{id}/votar` | token | Toggle the caller's vote |
//! | GET | `/api/reporte/{id}/votos/{user_id}` | - | Vote count and whether the user voted |
//! | GET | `/api/reporte/{id}/comentarios` | - | Comments, oldest first |
//! | POST | `/api/reporte/{id}/comentarios` | token | Comment as the caller |
//! | GET | `/api/MisReportes` | token | Caller's active reports |
//! | PUT | `/api/MisReportes/{id}` | token | Edit one's own report |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use handlers::ReportState;
pub use services::{CommentService, ReportService, VoteService};
