pub mod audit;
pub mod config;
pub mod error;
pub mod telemetry;
