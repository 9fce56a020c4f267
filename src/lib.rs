pub mod client;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod runner;

pub use client::ImageClient;
pub use config::{LogSettings, RunnerConfig, DEFAULT_ENDPOINT};
pub use error::{GenerateError, Result};
pub use models::*;
pub use runner::{fatal_line, interpret, RequestRunner};
