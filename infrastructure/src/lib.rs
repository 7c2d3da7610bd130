pub mod config;
pub mod http_client;

pub use config::{Config, ConfigError};
pub use http_client::HttpTransport;
