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

use log::warn;

use crate::driver::ActuatorDriver;
use crate::enums::ActuatorSide;

pub struct Homing {
    // Position reading in rotation above which a re-zero is reported as a
    // limit-switch contradiction.
    _contradiction_threshold: f64,
}

impl Homing {
    /// Homing of the actuator position reference. The reverse limit switch
    /// at the hard stop is the only absolute position reference; the sensor
    /// is re-derived from it on every power cycle instead of persisted.
    ///
    /// # Arguments
    /// * `contradiction_threshold` - Position reading in rotation above
    /// which a re-zero is reported as a limit-switch contradiction.
    ///
    /// # Returns
    /// A new Homing object.
    pub fn new(contradiction_threshold: f64) -> Self {
        Self {
            _contradiction_threshold: contradiction_threshold,
        }
    }

    /// Re-zero the position reference if the reverse limit switch is closed.
    /// Repeated re-zeros while sitting at the stop are harmless, so a
    /// bouncing switch needs no debouncing.
    ///
    /// # Notes
    /// Run this before anything else reads the position on a tick, so a
    /// freshly homed actuator is treated as position zero immediately.
    ///
    /// # Arguments
    /// * `side` - Side of the climber.
    /// * `driver` - Driver of the actuator.
    ///
    /// # Returns
    /// True if the actuator is at the hard stop. Otherwise, false.
    pub fn rezero_at_hard_stop(&self, side: ActuatorSide, driver: &mut dyn ActuatorDriver) -> bool {
        if !driver.read_limit_switch() {
            return false;
        }

        // The switch contradicts the sensor. The switch wins; it is the only
        // absolute reference.
        let position = driver.read_position();
        if position.abs() > self._contradiction_threshold {
            warn!(
                "{} climber reads {position:.3} rotation at the hard stop. Reset the reference.",
                side.as_ref()
            );
        }

        driver.reset_position(0.0);

        true
    }
}
