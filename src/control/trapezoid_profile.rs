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

use crate::control::kinematics::{KinematicState, MotionConstraints};

pub struct TrapezoidProfile {
    _constraints: MotionConstraints,
}

impl TrapezoidProfile {
    /// Trapezoidal profile generator. Each call moves a carried setpoint one
    /// tick closer to the goal: it accelerates toward the goal, cruises at
    /// the maximum velocity if the distance permits, and decelerates to
    /// arrive with zero velocity and zero overshoot.
    ///
    /// # Arguments
    /// * `constraints` - Motion constraints.
    ///
    /// # Returns
    /// A new TrapezoidProfile object.
    pub fn new(constraints: &MotionConstraints) -> Self {
        Self {
            _constraints: *constraints,
        }
    }

    /// Advance the carried setpoint by one tick.
    ///
    /// # Notes
    /// The output velocity never exceeds the maximum velocity in magnitude
    /// and never differs from the input velocity by more than the maximum
    /// acceleration times `dt`. Once the setpoint reaches the goal at rest,
    /// repeated calls keep emitting the goal.
    ///
    /// # Arguments
    /// * `dt` - Actual elapsed time in second since the previous call.
    /// * `current` - Carried setpoint of the previous tick.
    /// * `goal_position` - Goal position in rotation.
    ///
    /// # Returns
    /// Setpoint of this tick.
    ///
    /// # Panics
    /// If `dt` is not positive.
    pub fn advance(&self, dt: f64, current: &KinematicState, goal_position: f64) -> KinematicState {
        assert!(dt > 0.0, "Time step should be positive.");

        let max_velocity = self._constraints.max_velocity;
        let max_acceleration = self._constraints.max_acceleration;
        let delta_velocity = max_acceleration * dt;

        let error = goal_position - current.position;

        // Land exactly on the goal once it is reachable within this tick at
        // a velocity that the next tick can still bring to zero.
        let velocity_land = error / dt;
        if (velocity_land.abs() <= delta_velocity.min(max_velocity))
            && ((velocity_land - current.velocity).abs() <= delta_velocity)
        {
            return KinematicState::new(goal_position, velocity_land);
        }

        // Largest speed toward the goal from which the discrete deceleration
        // steps still cover at most the remaining distance. Solves
        // v * (v + dv) / (2 * a) = |error| for v.
        let speed_stop = 0.5
            * ((delta_velocity.powi(2) + 8.0 * max_acceleration * error.abs()).sqrt()
                - delta_velocity);

        let speed_desired = speed_stop.min(max_velocity);
        let velocity_desired = if error < 0.0 {
            -speed_desired
        } else {
            speed_desired
        };

        let velocity = velocity_desired.clamp(
            current.velocity - delta_velocity,
            current.velocity + delta_velocity,
        );

        KinematicState::new(current.position + velocity * dt, velocity)
    }
}
