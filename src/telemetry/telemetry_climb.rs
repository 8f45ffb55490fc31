use serde_json::{json, Value};

use crate::constants::NUM_ACTUATOR;
use crate::enums::ClimbState;

#[derive(Clone)]
pub struct TelemetryClimb {
    // Measured positions in rotation. The index is the actuator side.
    pub positions: Vec<f64>,
    // Carried setpoint positions in rotation.
    pub setpoint_positions: Vec<f64>,
    // Carried setpoint velocities in rotation per second.
    pub setpoint_velocities: Vec<f64>,
    // Reverse limit switches.
    pub at_hard_stop: Vec<bool>,
    // State of the climb lifecycle.
    pub state: ClimbState,
    // Both sides track their setpoint with a small error or not.
    pub is_settled: bool,
    // Summary of the faults status.
    pub summary_faults_status: u64,
    // Cycle time in second.
    pub cycle_time: f64,
}

impl TelemetryClimb {
    /// Create a new climb telemetry object.
    pub fn new() -> Self {
        Self {
            positions: vec![0.0; NUM_ACTUATOR],
            setpoint_positions: vec![0.0; NUM_ACTUATOR],
            setpoint_velocities: vec![0.0; NUM_ACTUATOR],
            at_hard_stop: vec![false; NUM_ACTUATOR],
            state: ClimbState::Idle,
            is_settled: false,
            summary_faults_status: 0,
            cycle_time: 0.0,
        }
    }

    /// Get the telemetry messages.
    ///
    /// # Arguments
    /// * `digit` - The number of digits after the decimal point.
    ///
    /// # Returns
    /// The telemetry messages.
    pub fn get_messages(&self, digit: i32) -> Vec<Value> {
        vec![
            self.get_message_position(digit),
            self.get_message_setpoint(digit),
            self.get_message_limit_switch(),
            self.get_message_state(),
            self.get_message_cycle_time(digit),
        ]
    }

    /// Get the message of the measured positions.
    ///
    /// # Arguments
    /// * `digit` - The number of digits after the decimal point.
    ///
    /// # Returns
    /// The message of the measured positions.
    fn get_message_position(&self, digit: i32) -> Value {
        json!({
            "id": "climberPosition",
            "left": self.round(self.positions[0], digit),
            "right": self.round(self.positions[1], digit),
        })
    }

    /// Get the message of the carried setpoints.
    ///
    /// # Arguments
    /// * `digit` - The number of digits after the decimal point.
    ///
    /// # Returns
    /// The message of the carried setpoints.
    fn get_message_setpoint(&self, digit: i32) -> Value {
        json!({
            "id": "climberSetpoint",
            "leftPosition": self.round(self.setpoint_positions[0], digit),
            "leftVelocity": self.round(self.setpoint_velocities[0], digit),
            "rightPosition": self.round(self.setpoint_positions[1], digit),
            "rightVelocity": self.round(self.setpoint_velocities[1], digit),
        })
    }

    /// Get the message of the reverse limit switches.
    ///
    /// # Returns
    /// The message of the reverse limit switches.
    fn get_message_limit_switch(&self) -> Value {
        json!({
            "id": "climberLimitSwitch",
            "left": self.at_hard_stop[0],
            "right": self.at_hard_stop[1],
        })
    }

    /// Get the message of the lifecycle state.
    ///
    /// # Returns
    /// The message of the lifecycle state.
    fn get_message_state(&self) -> Value {
        json!({
            "id": "climberState",
            "state": self.state as u8,
            "isSettled": self.is_settled,
            "summaryFaultsStatus": self.summary_faults_status,
        })
    }

    /// Get the message of the cycle time.
    ///
    /// # Arguments
    /// * `digit` - The number of digits after the decimal point.
    ///
    /// # Returns
    /// The message of the cycle time.
    fn get_message_cycle_time(&self, digit: i32) -> Value {
        json!({
            "id": "cycleTime",
            "cycleTime": self.round(self.cycle_time, digit),
        })
    }

    /// Round a value to a specific digit.
    ///
    /// # Arguments
    /// * `value` - The value to be rounded.
    /// * `digit` - The number of digits after the decimal point.
    ///
    /// # Returns
    /// The rounded value.
    fn round(&self, value: f64, digit: i32) -> f64 {
        let scale = 10.0_f64.powi(digit);
        (value * scale).round() / scale
    }
}
