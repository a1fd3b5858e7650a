pub mod completions;
pub mod config;
pub mod estimate;
pub mod export;
pub mod input;
pub mod profile;
pub mod sim;
pub mod telemetry;
