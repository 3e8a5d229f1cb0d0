pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod views;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use routes::{create_router, AppState};
