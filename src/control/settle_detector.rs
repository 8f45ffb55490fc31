use std::collections::VecDeque;

use crate::constants::NUM_ACTUATOR;

pub struct SettleDetector {
    _queue: VecDeque<Vec<f64>>,
    _running_sum: Vec<f64>,
    // Squared threshold of the tracking error in square rotation.
    pub threshold_squared: f64,
}

impl SettleDetector {
    /// SettleDetector class to determine if the climber tracks its setpoint
    /// with a small error over a window of ticks. Diagnostics only; the
    /// lifecycle never consumes this flag.
    ///
    /// # Arguments
    /// * `window_size` - Window size in second.
    /// * `control_frequency` - Control frequency in Hz.
    /// * `threshold` - Threshold of the tracking error in rotation.
    ///
    /// # Returns
    /// A new SettleDetector object.
    pub fn new(window_size: f64, control_frequency: f64, threshold: f64) -> Self {
        let num_row = (window_size * control_frequency) as usize;

        let mut queue: VecDeque<Vec<f64>> = VecDeque::with_capacity(num_row);
        for _ in 0..num_row {
            queue.push_back(Vec::with_capacity(NUM_ACTUATOR));
        }

        Self {
            _queue: queue,
            _running_sum: vec![0.0; NUM_ACTUATOR],
            threshold_squared: threshold.powi(2),
        }
    }

    /// Climber is settled or not based on the threshold of the tracking
    /// error of both sides.
    ///
    /// # Arguments
    /// * `tracking_error` - Tracking error of the two actuators in rotation.
    ///
    /// # Returns
    /// Return true if the climber is settled. Otherwise, false.
    ///
    /// # Panics
    /// If the size of tracking error is not 2.
    pub fn is_settled(&mut self, tracking_error: &[f64]) -> bool {
        assert!(
            tracking_error.len() == NUM_ACTUATOR,
            "Size of tracking error should be {NUM_ACTUATOR}."
        );

        // Pop out the earliest value and remove it from the running sum if
        // it is not the initial empty row.
        if let Some(earliest) = self._queue.pop_front() {
            if !earliest.is_empty() {
                self._running_sum
                    .iter_mut()
                    .zip(earliest.iter())
                    .for_each(|(sum, val)| *sum -= val);
            }
        }

        let error_square: Vec<f64> = tracking_error.iter().map(|val| val.powi(2)).collect();

        self._queue.push_back(error_square.clone());
        self._running_sum
            .iter_mut()
            .zip(error_square.iter())
            .for_each(|(sum, val)| *sum += val);

        let num_queue = self._queue.len();

        self._running_sum
            .iter()
            .all(|&val| val < self.threshold_squared * (num_queue as f64))
    }

    /// Reset the internal data.
    pub fn reset(&mut self) {
        self._queue.iter_mut().for_each(|vector| vector.clear());
        self._running_sum = vec![0.0; NUM_ACTUATOR];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_settle_detector() -> SettleDetector {
        SettleDetector::new(1.0, 2.0, 2.0)
    }

    #[test]
    fn test_new() {
        let settle_detector = create_settle_detector();

        assert_eq!(settle_detector._queue.len(), 2);
        assert_eq!(settle_detector.threshold_squared, 4.0);
    }

    #[test]
    #[should_panic(expected = "Size of tracking error should be 2.")]
    fn test_is_settled_panic() {
        let mut settle_detector = create_settle_detector();
        settle_detector.is_settled(&vec![1.0; 3]);
    }

    #[test]
    fn test_is_settled() {
        let mut settle_detector = create_settle_detector();

        // Small errors keep the climber settled.
        assert!(settle_detector.is_settled(&[0.0, 0.0]));
        assert!(settle_detector.is_settled(&[1.0, -1.0]));
        assert_eq!(settle_detector._running_sum, vec![1.0, 1.0]);

        // A big error on one side breaks the settled state.
        assert!(!settle_detector.is_settled(&[0.1, 4.0]));
        assert_eq!(settle_detector._running_sum[1], 17.0);

        // The big error needs to leave the window again.
        assert!(!settle_detector.is_settled(&[0.1, 0.2]));
        assert!(settle_detector.is_settled(&[0.1, 0.2]));
    }

    #[test]
    fn test_reset() {
        let mut settle_detector = create_settle_detector();
        settle_detector.is_settled(&[1.0, 1.0]);

        settle_detector.reset();

        assert_eq!(settle_detector._queue.len(), 2);
        assert_eq!(settle_detector._running_sum, vec![0.0; NUM_ACTUATOR]);
    }
}
