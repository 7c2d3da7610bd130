pub mod prompt;
pub mod telemetry;
pub mod types;
