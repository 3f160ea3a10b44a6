pub mod config;
pub mod error;

pub use config::{load_config, ReactorConfig};
pub use error::{PulseError, PulseResult};
