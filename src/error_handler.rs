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

use strum::IntoEnumIterator;

use crate::enums::{BitEnum, ErrorCode};

pub struct ErrorHandler {
    // Summary of the faults status.
    pub summary_faults_status: u64,
    _faults_mask: u64,
}

impl ErrorHandler {
    /// Create a new error handler. Routine control conditions (switch state,
    /// bound clamping) are normal inputs and never reach here; only the
    /// warnings and faults of the error codes do.
    ///
    /// # Arguments
    /// * `enabled_faults_mask` - Enabled faults mask.
    ///
    /// # Returns
    /// A new error handler.
    pub fn new(enabled_faults_mask: u64) -> Self {
        Self {
            summary_faults_status: 0,
            _faults_mask: enabled_faults_mask & Self::get_faults_mask(),
        }
    }

    /// Get the mask of all the defined error codes.
    ///
    /// # Returns
    /// Mask of all the defined error codes.
    fn get_faults_mask() -> u64 {
        ErrorCode::iter().fold(0, |mask, error_code| mask | error_code.bit_value())
    }

    /// Add an error to the summary of the faults status.
    ///
    /// # Arguments
    /// * `error_code` - Error code.
    ///
    /// # Returns
    /// True if the error is newly added. Otherwise, false (already present
    /// or masked out).
    pub fn add_error(&mut self, error_code: ErrorCode) -> bool {
        let bit = error_code.bit_value() & self._faults_mask;
        let is_new = (bit != 0) && (self.summary_faults_status & bit == 0);

        self.summary_faults_status |= bit;

        is_new
    }

    /// Check if there is any fault. The warnings do not count.
    ///
    /// # Returns
    /// True if there is any fault. Otherwise, false.
    pub fn has_fault(&self) -> bool {
        ErrorCode::iter().any(|error_code| {
            error_code.as_ref().starts_with("Fault")
                && (self.summary_faults_status & error_code.bit_value() != 0)
        })
    }

    /// Clear the summary of the faults status.
    pub fn clear(&mut self) {
        self.summary_faults_status = 0;
    }
}
