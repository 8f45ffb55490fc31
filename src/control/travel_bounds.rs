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

/// Legal travel range of an actuator. The minimum is always the homed zero.
/// The maximum is the maximum legal extension minus the safety margin, so a
/// goal at the maximum still leaves the margin to the mechanical limit.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub struct TravelBounds {
    // Minimum legal position in rotation.
    pub min: f64,
    // Maximum legal position in rotation with the safety margin applied.
    pub max: f64,
    // Safety margin in rotation.
    pub safety_margin: f64,
}

impl TravelBounds {
    /// Create new travel bounds.
    ///
    /// # Arguments
    /// * `max_extension` - Maximum legal extension in rotation.
    /// * `safety_margin` - Safety margin in rotation (>= 0).
    ///
    /// # Returns
    /// New travel bounds.
    ///
    /// # Panics
    /// If the safety margin is negative or is not smaller than the maximum
    /// extension.
    pub fn new(max_extension: f64, safety_margin: f64) -> Self {
        assert!(safety_margin >= 0.0, "Safety margin should be >= 0.");
        assert!(
            max_extension > safety_margin,
            "Maximum extension should be bigger than the safety margin."
        );

        Self {
            min: 0.0,
            max: max_extension - safety_margin,
            safety_margin: safety_margin,
        }
    }

    /// Clamp a requested goal into the legal travel range. This is the sole
    /// defense against commanding an actuator past its safe travel; the
    /// downstream components trust their goal input unconditionally.
    ///
    /// # Arguments
    /// * `goal` - Requested goal position in rotation.
    ///
    /// # Returns
    /// Clamped goal position in rotation.
    pub fn clamp(&self, goal: f64) -> f64 {
        goal.clamp(self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_travel_bounds() -> TravelBounds {
        TravelBounds::new(48.5, 5.0)
    }

    #[test]
    fn test_new() {
        let bounds = create_travel_bounds();

        assert_eq!(bounds.min, 0.0);
        assert_eq!(bounds.max, 43.5);
        assert_eq!(bounds.safety_margin, 5.0);
    }

    #[test]
    #[should_panic(expected = "Safety margin should be >= 0.")]
    fn test_new_panic_margin() {
        TravelBounds::new(48.5, -1.0);
    }

    #[test]
    #[should_panic(expected = "Maximum extension should be bigger than the safety margin.")]
    fn test_new_panic_extension() {
        TravelBounds::new(4.0, 5.0);
    }

    #[test]
    fn test_clamp() {
        let bounds = create_travel_bounds();

        // In range
        assert_eq!(bounds.clamp(20.0), 20.0);
        assert_eq!(bounds.clamp(0.0), 0.0);
        assert_eq!(bounds.clamp(43.5), 43.5);

        // Out of range
        assert_eq!(bounds.clamp(100.0), 43.5);
        assert_eq!(bounds.clamp(-3.2), 0.0);
    }

    #[test]
    fn test_clamp_idempotent() {
        let bounds = create_travel_bounds();

        for goal in [-10.0, 0.0, 21.7, 43.5, 100.0] {
            assert_eq!(bounds.clamp(bounds.clamp(goal)), bounds.clamp(goal));
        }
    }

    #[test]
    fn test_clamp_monotonic() {
        let bounds = create_travel_bounds();

        let goals = [-10.0, -0.1, 0.0, 12.3, 43.5, 43.6, 100.0];
        for pair in goals.windows(2) {
            assert!(bounds.clamp(pair[0]) <= bounds.clamp(pair[1]));
        }
    }
}
