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

use crate::config::ControlGains;
use crate::control::travel_bounds::TravelBounds;

/// Drive command issued to an actuator for one tick. An immutable value so
/// the control pipeline can be exercised without hardware.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum DriveCommand {
    // Track a position setpoint with the driver's closed-loop controller.
    // The driver applies the proportional/integral/derivative correction and
    // the velocity and static-friction feedforward terms from its configured
    // gains. The units are rotation and rotation per second.
    Track { position: f64, velocity: f64 },
    // Cut the drive output. The actuator brakes at its current position.
    Stop,
}

/// The low-level actuator driver. The control pipeline treats this as an
/// opaque capability; the closed-loop law behind `DriveCommand::Track` is the
/// driver's business.
pub trait ActuatorDriver {
    /// Configure the closed-loop gains and the travel limit thresholds.
    /// Called once at startup before any drive command.
    ///
    /// # Arguments
    /// * `gains` - Closed-loop gains.
    /// * `bounds` - Travel bounds to derive the limit thresholds.
    ///
    /// # Returns
    /// Result of the configuration.
    ///
    /// # Errors
    /// If the driver rejects the configuration. Operating a closed-loop
    /// controller with unknown gains is unsafe, so the caller must keep the
    /// actuator stopped.
    fn configure(&mut self, gains: &ControlGains, bounds: &TravelBounds)
        -> Result<(), &'static str>;

    /// Read the sensed position in rotation.
    ///
    /// # Returns
    /// Position in rotation referenced to the last re-zero.
    fn read_position(&self) -> f64;

    /// Read the reverse limit switch.
    ///
    /// # Returns
    /// True if the switch is closed to ground (the arm is at the hard stop).
    /// Otherwise, false.
    fn read_limit_switch(&self) -> bool;

    /// Reset the position reference of the sensor.
    ///
    /// # Arguments
    /// * `position` - New position in rotation of the current location.
    fn reset_position(&mut self, position: f64);

    /// Issue the drive command of this tick.
    ///
    /// # Arguments
    /// * `command` - Drive command.
    fn command(&mut self, command: &DriveCommand);
}
