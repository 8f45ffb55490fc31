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

use serde_json::{json, Value};

use crate::enums::{ActuatorSide, ClimbState};

pub struct Event;
impl Event {
    /// Get the message of the climb state.
    ///
    /// # Arguments
    /// * `state` - State of the climb lifecycle.
    ///
    /// # Returns
    /// The message of the climb state.
    pub fn get_message_climb_state(state: ClimbState) -> Value {
        json!({
            "id": "climbStateChanged",
            "state": state as u8,
        })
    }

    /// Get the message that an actuator homed at the hard stop.
    ///
    /// # Arguments
    /// * `side` - Side of the climber.
    ///
    /// # Returns
    /// The message that an actuator homed at the hard stop.
    pub fn get_message_homed(side: ActuatorSide) -> Value {
        json!({
            "id": "climberHomed",
            "side": side.as_ref(),
        })
    }

    /// Get the message that the climber is settled on its setpoint or not.
    ///
    /// # Arguments
    /// * `is_settled` - True if the climber is settled, false otherwise.
    ///
    /// # Returns
    /// The message that the climber is settled or not.
    pub fn get_message_settled(is_settled: bool) -> Value {
        json!({
            "id": "climberInPosition",
            "inPosition": is_settled,
        })
    }

    /// Get the message of the summary of the faults status.
    ///
    /// # Arguments
    /// * `summary_faults_status` - Summary of the faults status.
    ///
    /// # Returns
    /// The message of the summary of the faults status.
    pub fn get_message_summary_faults_status(summary_faults_status: u64) -> Value {
        json!({
            "id": "summaryFaultsStatus",
            "status": summary_faults_status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_message_climb_state() {
        assert_eq!(
            Event::get_message_climb_state(ClimbState::Extending),
            json!({
                "id": "climbStateChanged",
                "state": 2,
            })
        );
    }

    #[test]
    fn test_get_message_homed() {
        assert_eq!(
            Event::get_message_homed(ActuatorSide::Left),
            json!({
                "id": "climberHomed",
                "side": "Left",
            })
        );
    }

    #[test]
    fn test_get_message_settled() {
        assert_eq!(
            Event::get_message_settled(true),
            json!({
                "id": "climberInPosition",
                "inPosition": true,
            })
        );
    }

    #[test]
    fn test_get_message_summary_faults_status() {
        assert_eq!(
            Event::get_message_summary_faults_status(9),
            json!({
                "id": "summaryFaultsStatus",
                "status": 9,
            })
        );
    }
}
