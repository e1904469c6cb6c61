//! User accounts and profiles.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/usuario` | List registered users |
//! | PUT | `/api/usuario/{id}` | Rename own profile |
//! | PUT | `/api/usuario/{id}/foto` | Upload own profile photo |
//! | DELETE | `/api/usuario/{id}/foto` | Remove own profile photo |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::UserService;
