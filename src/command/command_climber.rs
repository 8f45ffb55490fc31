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

use log::error;
use serde_json::Value;

use crate::command::command_schema::Command;
use crate::control::climb_control::ClimbControl;
use crate::enums::MotionIntent;

/// Command to extend the climber toward the maximum legal extension. The
/// motion runs until the request is released.
pub struct CommandExtendClimber;
impl Command for CommandExtendClimber {
    fn name(&self) -> &str {
        "cmd_extendClimber"
    }

    fn execute(&self, _message: &Value, climb_control: Option<&mut ClimbControl>) -> Option<()> {
        let climb = climb_control?;
        match climb.handle_request(MotionIntent::ExtendToMax) {
            Ok(_) => Some(()),
            Err(err) => {
                error!("Failed to extend the climber: {err}");

                None
            }
        }
    }
}

/// Command to retract the climber toward the homed zero.
pub struct CommandRetractClimber;
impl Command for CommandRetractClimber {
    fn name(&self) -> &str {
        "cmd_retractClimber"
    }

    fn execute(&self, _message: &Value, climb_control: Option<&mut ClimbControl>) -> Option<()> {
        let climb = climb_control?;
        match climb.handle_request(MotionIntent::RetractToZero) {
            Ok(_) => Some(()),
            Err(err) => {
                error!("Failed to retract the climber: {err}");

                None
            }
        }
    }
}

/// Command to release the active directional request. The climber holds the
/// frozen setpoint so the arm cannot fall under gravity.
pub struct CommandReleaseClimber;
impl Command for CommandReleaseClimber {
    fn name(&self) -> &str {
        "cmd_releaseClimber"
    }

    fn execute(&self, _message: &Value, climb_control: Option<&mut ClimbControl>) -> Option<()> {
        let climb = climb_control?;
        climb.release();

        Some(())
    }
}

/// Command to stop the drive and return to the idle state.
pub struct CommandStopClimber;
impl Command for CommandStopClimber {
    fn name(&self) -> &str {
        "cmd_stopClimber"
    }

    fn execute(&self, _message: &Value, climb_control: Option<&mut ClimbControl>) -> Option<()> {
        let climb = climb_control?;
        climb.stop();

        Some(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::Path;

    use serde_json::json;

    use crate::config::Config;
    use crate::driver::ActuatorDriver;
    use crate::enums::ClimbState;
    use crate::mock::mock_actuator::MockActuator;

    fn create_climb_control() -> ClimbControl {
        let config = Config::new(Path::new("config/parameters_control.yaml"));

        let drivers: Vec<Box<dyn ActuatorDriver + Send>> = vec![
            Box::new(MockActuator::new(10.0)),
            Box::new(MockActuator::new(10.0)),
        ];

        ClimbControl::new(&config, drivers)
    }

    #[test]
    fn test_command_extend_climber() {
        let mut climb_control = create_climb_control();

        let command = CommandExtendClimber;
        assert_eq!(command.name(), "cmd_extendClimber");

        assert!(command.execute(&json!({}), None).is_none());
        assert!(command
            .execute(&json!({}), Some(&mut climb_control))
            .is_some());
        assert_eq!(climb_control.state(), ClimbState::Extending);
    }

    #[test]
    fn test_command_retract_climber() {
        let mut climb_control = create_climb_control();

        let command = CommandRetractClimber;
        assert!(command
            .execute(&json!({}), Some(&mut climb_control))
            .is_some());
        assert_eq!(climb_control.state(), ClimbState::Retracting);
    }

    #[test]
    fn test_command_release_climber() {
        let mut climb_control = create_climb_control();
        let _ = climb_control.handle_request(MotionIntent::ExtendToMax);

        let command = CommandReleaseClimber;
        assert!(command
            .execute(&json!({}), Some(&mut climb_control))
            .is_some());
        assert_eq!(climb_control.state(), ClimbState::Holding);
    }

    #[test]
    fn test_command_stop_climber() {
        let mut climb_control = create_climb_control();
        let _ = climb_control.handle_request(MotionIntent::ExtendToMax);

        let command = CommandStopClimber;
        assert!(command
            .execute(&json!({}), Some(&mut climb_control))
            .is_some());
        assert_eq!(climb_control.state(), ClimbState::Idle);
    }
}
