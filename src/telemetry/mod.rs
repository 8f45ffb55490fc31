pub mod event;
pub mod telemetry;
pub mod telemetry_climb;
