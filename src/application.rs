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

use log::info;
use signal_hook::{
    consts::{SIGINT, SIGTERM},
    flag::register,
};
use std::sync::atomic::Ordering;

use crate::model::Model;

/// Run the application.
///
/// # Arguments
/// * `is_simulation_mode` - Is the simulation mode or not.
pub fn run(is_simulation_mode: bool) {
    // Log the running mode
    let mode = if is_simulation_mode {
        "simulation mode"
    } else {
        "hardware mode"
    };
    info!("Run the climber control system in {mode}.");

    // Create the model
    let mut model = Model::new(is_simulation_mode);

    // Register the signals that stop the application
    for signal in [SIGTERM, SIGINT].iter() {
        let _ = register(*signal, model.stop.clone());
    }

    // Run the processes
    model.run_processes();

    // Run the main loop
    while !model.stop.load(Ordering::Relaxed) {
        model.step();
    }

    info!("Stopping the climber control system...");

    // Wait for the control loop to stop
    model.stop();

    info!("Climber control system should be stopped.");
}
