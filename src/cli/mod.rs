pub mod category;
pub mod migrate;
pub mod server;
pub mod user;
