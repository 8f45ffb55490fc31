// Left and right climbing arms.
pub const NUM_ACTUATOR: usize = 2;

// Nominal tick period in second of the scheduler. The control loop always
// passes the actual elapsed time to the profile generator; this value only
// seeds the first tick.
pub const NOMINAL_TICK_PERIOD: f64 = 0.02;

pub const BOUND_SYNC_CHANNEL: usize = 100;
