pub mod config;
pub mod errors;
pub mod events;
pub mod kernel;
pub mod traits;
pub mod types;
