pub mod assets;
pub mod auth;
pub mod config;
pub mod db;
pub mod middleware;
pub mod observability;
pub mod routes;
pub mod template;

pub use db::{create_pool, create_read_pool, create_write_pool, migrate};
pub use routes::{AppState, router};
