pub mod catalog;
pub mod config;
pub mod error;
pub mod locale;
pub mod prompt;
pub mod types;

pub use config::BosquesConfig;
pub use error::{BosquesError, Result};
pub use types::*;
