use serde::{Deserialize, Serialize};

/// Instantaneous position and velocity pair. Depending on the context, this
/// is either an actuator's estimated true state or a profile's carried
/// setpoint. The unit of the position is the shaft rotation.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub struct KinematicState {
    // Position in rotation.
    pub position: f64,
    // Velocity in rotation per second.
    pub velocity: f64,
}

impl KinematicState {
    /// Create a new kinematic state.
    ///
    /// # Arguments
    /// * `position` - Position in rotation.
    /// * `velocity` - Velocity in rotation per second.
    ///
    /// # Returns
    /// A new kinematic state.
    pub fn new(position: f64, velocity: f64) -> Self {
        Self {
            position: position,
            velocity: velocity,
        }
    }

    /// Create a new kinematic state at rest.
    ///
    /// # Arguments
    /// * `position` - Position in rotation.
    ///
    /// # Returns
    /// A new kinematic state with zero velocity.
    pub fn at_rest(position: f64) -> Self {
        Self::new(position, 0.0)
    }
}

/// Velocity and acceleration bounds imposed by the profile generator between
/// consecutive setpoints. Immutable, configured once.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub struct MotionConstraints {
    // Maximum velocity magnitude in rotation per second.
    pub max_velocity: f64,
    // Maximum acceleration magnitude in rotation per second squared.
    pub max_acceleration: f64,
}

impl MotionConstraints {
    /// Create new motion constraints.
    ///
    /// # Arguments
    /// * `max_velocity` - Maximum velocity magnitude in rotation per second.
    /// * `max_acceleration` - Maximum acceleration magnitude in rotation per
    /// second squared.
    ///
    /// # Returns
    /// New motion constraints.
    ///
    /// # Panics
    /// If the maximum velocity or acceleration is not positive.
    pub fn new(max_velocity: f64, max_acceleration: f64) -> Self {
        assert!(max_velocity > 0.0, "Maximum velocity should be positive.");
        assert!(
            max_acceleration > 0.0,
            "Maximum acceleration should be positive."
        );

        Self {
            max_velocity: max_velocity,
            max_acceleration: max_acceleration,
        }
    }
}
