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

use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::ControlGains;
use crate::control::travel_bounds::TravelBounds;
use crate::driver::{ActuatorDriver, DriveCommand};
use crate::mock::mock_constants::{
    PLANT_HARD_STOP, PLANT_LIMIT_SWITCH_BAND, PLANT_TRACKING_GAIN, PLANT_TRAVEL_LIMIT,
};

struct MockActuatorState {
    // Mechanical position in rotation referenced to the hard stop.
    mechanical_position: f64,
    // Offset in rotation between the mechanical and the sensed position.
    sensor_offset: f64,
    // Configured gains. The drive is disabled until the configuration is
    // done, as the real inner-loop controller behaves.
    gains: Option<ControlGains>,
    // Last drive command.
    last_command: Option<DriveCommand>,
    // Reject the configuration (fault-path testing).
    is_config_rejected: bool,
}

/// Mock actuator to simulate the driver and the plant: the brake holds the
/// position on a stop command, the inner loop tracks a commanded setpoint
/// with a one-pole lag, and the reverse limit switch engages at the hard
/// stop. Clones share the plant state, so a test can keep a handle to the
/// plant after the pipeline took the driver.
#[derive(Clone)]
pub struct MockActuator {
    _state: Arc<Mutex<MockActuatorState>>,
}

impl MockActuator {
    /// Create a new mock actuator.
    ///
    /// # Arguments
    /// * `position` - Initial mechanical position in rotation referenced to
    /// the hard stop.
    ///
    /// # Returns
    /// A new mock actuator.
    pub fn new(position: f64) -> Self {
        Self {
            _state: Arc::new(Mutex::new(MockActuatorState {
                mechanical_position: position,
                sensor_offset: 0.0,
                gains: None,
                last_command: None,
                is_config_rejected: false,
            })),
        }
    }

    /// Lock the plant state.
    ///
    /// # Returns
    /// Guard of the plant state.
    fn lock(&self) -> MutexGuard<MockActuatorState> {
        self._state.lock().expect("Should lock the mock actuator")
    }

    /// Drift the sensed position away from the mechanical truth, as a power
    /// cycle with the arm off the stop would.
    ///
    /// # Arguments
    /// * `offset` - Drift in rotation to add to the sensed position.
    pub fn drift_reference(&mut self, offset: f64) {
        self.lock().sensor_offset += offset;
    }

    /// Reject the coming configuration.
    pub fn reject_configuration(&mut self) {
        self.lock().is_config_rejected = true;
    }

    /// Get the last drive command.
    ///
    /// # Returns
    /// Last drive command.
    pub fn get_last_command(&self) -> Option<DriveCommand> {
        self.lock().last_command
    }

    /// Get the mechanical position.
    ///
    /// # Returns
    /// Mechanical position in rotation referenced to the hard stop.
    pub fn get_mechanical_position(&self) -> f64 {
        self.lock().mechanical_position
    }
}

impl ActuatorDriver for MockActuator {
    fn configure(
        &mut self,
        gains: &ControlGains,
        _bounds: &TravelBounds,
    ) -> Result<(), &'static str> {
        let mut state = self.lock();
        if state.is_config_rejected {
            return Err("The driver rejected the configuration.");
        }

        state.gains = Some(*gains);

        Ok(())
    }

    fn read_position(&self) -> f64 {
        let state = self.lock();
        state.mechanical_position + state.sensor_offset
    }

    fn read_limit_switch(&self) -> bool {
        self.lock().mechanical_position <= (PLANT_HARD_STOP + PLANT_LIMIT_SWITCH_BAND)
    }

    fn reset_position(&mut self, position: f64) {
        let mut state = self.lock();
        state.sensor_offset = position - state.mechanical_position;
    }

    fn command(&mut self, command: &DriveCommand) {
        let mut state = self.lock();
        state.last_command = Some(*command);

        if let DriveCommand::Track {
            position,
            velocity: _,
        } = command
        {
            // The drive stays disabled with unknown gains.
            if state.gains.is_none() {
                return;
            }

            // One-pole inner-loop lag toward the commanded setpoint. The
            // mechanics bottom out at the hard stop and top out at the
            // travel limit.
            let error = position - (state.mechanical_position + state.sensor_offset);
            state.mechanical_position = (state.mechanical_position
                + error * PLANT_TRACKING_GAIN)
                .clamp(PLANT_HARD_STOP, PLANT_TRAVEL_LIMIT);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    const EPSILON: f64 = 1e-7;

    fn create_mock_actuator(position: f64) -> MockActuator {
        let mut mock_actuator = MockActuator::new(position);
        mock_actuator
            .configure(&create_control_gains(), &TravelBounds::new(48.5, 5.0))
            .expect("Should configure the mock actuator");

        mock_actuator
    }

    fn create_control_gains() -> ControlGains {
        ControlGains {
            kp: 6.0,
            ki: 0.0,
            kd: 0.1,
            kv: 0.12,
            ks: 0.25,
        }
    }

    #[test]
    fn test_configure_rejected() {
        let mut mock_actuator = MockActuator::new(0.0);
        mock_actuator.reject_configuration();

        assert_eq!(
            mock_actuator.configure(&create_control_gains(), &TravelBounds::new(48.5, 5.0)),
            Err("The driver rejected the configuration.")
        );
    }

    #[test]
    fn test_read_limit_switch() {
        assert!(create_mock_actuator(0.0).read_limit_switch());
        assert!(create_mock_actuator(0.04).read_limit_switch());
        assert!(!create_mock_actuator(0.06).read_limit_switch());
        assert!(!create_mock_actuator(20.0).read_limit_switch());
    }

    #[test]
    fn test_reset_position() {
        let mut mock_actuator = create_mock_actuator(0.0);
        mock_actuator.drift_reference(20.0);

        assert_eq!(mock_actuator.read_position(), 20.0);

        mock_actuator.reset_position(0.0);

        assert_eq!(mock_actuator.read_position(), 0.0);
        assert_eq!(mock_actuator.get_mechanical_position(), 0.0);
    }

    #[test]
    fn test_command_track() {
        let mut mock_actuator = create_mock_actuator(10.0);

        let command = DriveCommand::Track {
            position: 11.0,
            velocity: 2.0,
        };
        mock_actuator.command(&command);

        assert_eq!(mock_actuator.get_last_command(), Some(command));
        assert_relative_eq!(mock_actuator.read_position(), 10.6, epsilon = EPSILON);

        // Repeated commands converge to the setpoint.
        for _ in 0..50 {
            mock_actuator.command(&command);
        }
        assert_relative_eq!(mock_actuator.read_position(), 11.0, epsilon = EPSILON);
    }

    #[test]
    fn test_command_track_unconfigured() {
        let mut mock_actuator = MockActuator::new(10.0);

        mock_actuator.command(&DriveCommand::Track {
            position: 11.0,
            velocity: 2.0,
        });

        assert_eq!(mock_actuator.read_position(), 10.0);
    }

    #[test]
    fn test_command_track_hard_stop() {
        let mut mock_actuator = create_mock_actuator(0.5);

        // The mechanics bottom out at the hard stop.
        for _ in 0..50 {
            mock_actuator.command(&DriveCommand::Track {
                position: -5.0,
                velocity: 0.0,
            });
        }

        assert_eq!(mock_actuator.get_mechanical_position(), 0.0);
        assert!(mock_actuator.read_limit_switch());
    }

    #[test]
    fn test_command_stop() {
        let mut mock_actuator = create_mock_actuator(10.0);

        // The brake holds the position.
        mock_actuator.command(&DriveCommand::Stop);

        assert_eq!(mock_actuator.get_last_command(), Some(DriveCommand::Stop));
        assert_eq!(mock_actuator.read_position(), 10.0);
    }

    #[test]
    fn test_clone_shares_the_plant() {
        let mut mock_actuator = create_mock_actuator(10.0);
        let handle = mock_actuator.clone();

        mock_actuator.command(&DriveCommand::Track {
            position: 11.0,
            velocity: 2.0,
        });

        assert_relative_eq!(handle.read_position(), 10.6, epsilon = EPSILON);
    }
}
