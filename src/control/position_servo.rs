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

use crate::control::kinematics::KinematicState;
use crate::driver::DriveCommand;

/// Position control loop. Stateless; it converts whatever setpoint it is
/// given into the closed-loop drive command and leaves the control law to
/// the driver. Holding position is the same path with an unchanging
/// setpoint, which is what counteracts gravity without net motion.
pub struct PositionServo;

impl PositionServo {
    /// Track a profile setpoint.
    ///
    /// # Arguments
    /// * `setpoint` - Setpoint of this tick.
    ///
    /// # Returns
    /// Drive command.
    pub fn track(setpoint: &KinematicState) -> DriveCommand {
        DriveCommand::Track {
            position: setpoint.position,
            velocity: setpoint.velocity,
        }
    }

    /// Track a frozen setpoint with zero velocity.
    ///
    /// # Arguments
    /// * `setpoint` - Frozen setpoint.
    ///
    /// # Returns
    /// Drive command.
    pub fn hold(setpoint: &KinematicState) -> DriveCommand {
        DriveCommand::Track {
            position: setpoint.position,
            velocity: 0.0,
        }
    }
}
