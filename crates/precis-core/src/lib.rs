//! Precis Core — error taxonomy, configuration, summary length selection.

pub mod config;
pub mod error;
pub mod length;

pub use config::PrecisConfig;
pub use error::{Error, Result};
pub use length::SummaryLength;
