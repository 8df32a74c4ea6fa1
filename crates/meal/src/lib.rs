pub mod category;
pub mod cook;
pub mod media;
pub mod meal;
mod types;

pub use types::*;
