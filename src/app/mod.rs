//! Application wiring
//!
//! - `config`: Configuration types
//! - `loader`: Layered configuration loading
//! - `engine`: Builds the routing engine from configuration

pub mod config;
pub mod engine;
pub mod loader;

pub use config::AppConfig;
pub use engine::{build_router, Engine};
pub use loader::load_config;
