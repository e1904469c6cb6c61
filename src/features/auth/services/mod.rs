mod auth_service;
mod password_service;
mod token_service;

pub use auth_service::AuthService;
pub use password_service::PasswordService;
pub use token_service::{IssuedToken, TokenService};
