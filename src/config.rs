// This file is part of run_climber_controller.
//
// Developed for the robot's dual-arm climber control system.
// See the COPYRIGHT file at the top-level directory of this distribution
// for details of code ownership.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::control::kinematics::MotionConstraints;
use crate::control::travel_bounds::TravelBounds;
use crate::utility::get_parameter;

/// Closed-loop gains consumed opaquely by the actuator driver's
/// position-tracking command path.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub struct ControlGains {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    // Velocity feedforward in volt per (rotation per second).
    pub kv: f64,
    // Static friction feedforward in volt.
    pub ks: f64,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Config {
    // Configuration filename.
    pub filename: String,
    // Control frequency in Hz.
    pub control_frequency: f64,
    // Motion constraints of the trapezoidal profile.
    pub constraints: MotionConstraints,
    // Travel bounds with the safety margin applied.
    pub bounds: TravelBounds,
    // Closed-loop gains of both actuators.
    pub gains: ControlGains,
    // Window size in second of the settle detection.
    pub settle_window: f64,
    // Root-mean-square threshold in rotation of the settle detection.
    pub settle_threshold: f64,
    // Position reading in rotation above which a re-zero at the hard stop is
    // reported as a limit-switch contradiction.
    pub contradiction_threshold: f64,
    // Enabled faults mask.
    pub enabled_faults_mask: u64,
}

impl Config {
    /// Create a new config object.
    ///
    /// # Arguments
    /// * `filepath_parameters_control` - The path to the control parameters
    /// file.
    ///
    /// # Returns
    /// A new config object.
    pub fn new(filepath_parameters_control: &Path) -> Self {
        let constraints = MotionConstraints::new(
            get_parameter(filepath_parameters_control, "max_velocity"),
            get_parameter(filepath_parameters_control, "max_acceleration"),
        );
        let bounds = TravelBounds::new(
            get_parameter(filepath_parameters_control, "max_extension"),
            get_parameter(filepath_parameters_control, "safety_margin"),
        );

        Self {
            filename: String::from(filepath_parameters_control.to_str().expect(&format!(
                "Should be able to convert {:?} to a string",
                filepath_parameters_control
            ))),

            control_frequency: get_parameter(filepath_parameters_control, "control_frequency"),

            constraints: constraints,
            bounds: bounds,

            gains: ControlGains {
                kp: get_parameter(filepath_parameters_control, "kp"),
                ki: get_parameter(filepath_parameters_control, "ki"),
                kd: get_parameter(filepath_parameters_control, "kd"),
                kv: get_parameter(filepath_parameters_control, "kv"),
                ks: get_parameter(filepath_parameters_control, "ks"),
            },

            settle_window: get_parameter(filepath_parameters_control, "settle_window"),
            settle_threshold: get_parameter(filepath_parameters_control, "settle_threshold"),

            contradiction_threshold: get_parameter(
                filepath_parameters_control,
                "contradiction_threshold",
            ),

            enabled_faults_mask: get_parameter(filepath_parameters_control, "enabled_faults_mask"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let config = Config::new(Path::new("config/parameters_control.yaml"));

        assert_eq!(config.filename, "config/parameters_control.yaml");
        assert_eq!(config.control_frequency, 50.0);

        assert_eq!(config.constraints.max_velocity, 80.0);
        assert_eq!(config.constraints.max_acceleration, 100.0);

        assert_eq!(config.bounds.min, 0.0);
        assert_eq!(config.bounds.max, 43.5);
        assert_eq!(config.bounds.safety_margin, 5.0);

        assert_eq!(config.gains.kp, 6.0);
        assert_eq!(config.gains.ki, 0.0);
        assert_eq!(config.gains.kd, 0.1);
        assert_eq!(config.gains.kv, 0.12);
        assert_eq!(config.gains.ks, 0.25);

        assert_eq!(config.settle_window, 0.2);
        assert_eq!(config.settle_threshold, 0.1);

        assert_eq!(config.contradiction_threshold, 1.0);

        assert_eq!(config.enabled_faults_mask, 0xFF);
    }
}
