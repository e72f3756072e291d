pub mod config;
pub mod constants;
pub mod error;
pub mod types;
pub mod vector;

pub use config::SimConfig;
pub use constants::*;
pub use error::{ConfigError, ConfigLoadError};
pub use types::*;
pub use vector::Vec3;
