// Fraction of the tracking error that the plant's inner loop closes in one
// tick.
pub const PLANT_TRACKING_GAIN: f64 = 0.6;

// Mechanical position in rotation of the hard stop at the retracted end.
pub const PLANT_HARD_STOP: f64 = 0.0;

// Band in rotation above the hard stop where the reverse limit switch reads
// closed to ground.
pub const PLANT_LIMIT_SWITCH_BAND: f64 = 0.05;

// Mechanical travel limit in rotation at the extended end.
pub const PLANT_TRAVEL_LIMIT: f64 = 50.0;
