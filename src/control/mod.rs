pub mod climb_control;
pub mod climb_process;
pub mod homing;
pub mod kinematics;
pub mod position_servo;
pub mod settle_detector;
pub mod trapezoid_profile;
pub mod travel_bounds;
