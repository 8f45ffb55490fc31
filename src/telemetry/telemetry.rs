use serde_json::Value;

use crate::telemetry::telemetry_climb::TelemetryClimb;

#[derive(Clone)]
pub struct Telemetry {
    // Telemetry of the climb control loop.
    pub climb: Option<TelemetryClimb>,
    // Command execution result.
    pub command_result: Option<Value>,
    // Events to publish.
    pub events: Option<Vec<Value>>,
}

impl Telemetry {
    /// Create a new telemetry object.
    ///
    /// # Arguments
    /// * `climb` - Telemetry of the climb control loop.
    /// * `command_result` - Command execution result.
    /// * `events` - Events to publish.
    ///
    /// # Returns
    /// A new telemetry object.
    pub fn new(
        climb: Option<TelemetryClimb>,
        command_result: Option<Value>,
        events: Option<Vec<Value>>,
    ) -> Self {
        Self {
            climb: climb,
            command_result: command_result,
            events: events,
        }
    }
}
