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

use log::{debug, info};
use serde_json::Value;
use std::{
    path::Path,
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::{sync_channel, Receiver, SyncSender},
        Arc,
    },
    thread::{sleep, spawn, JoinHandle},
    time::Duration,
};

use crate::config::Config;
use crate::constants::BOUND_SYNC_CHANNEL;
use crate::control::climb_process::ClimbProcess;
use crate::telemetry::telemetry::Telemetry;
use crate::utility::get_parameter;

pub struct Model {
    // Is the simulation mode or not.
    _is_simulation_mode: bool,
    // The digit of the telemetry.
    _telemetry_digit: i32,
    // Period in millisecond to drain the telemetry in the main loop.
    _period_main_loop: u64,
    // Receiver of the telemetry to the model.
    _receiver_to_model: Receiver<Telemetry>,
    // Sender of the telemetry to the model (handed to the processes).
    _sender_to_model: SyncSender<Telemetry>,
    // Sender of the messages to the climb loop.
    _sender_to_climb_loop: Option<SyncSender<Value>>,
    // Summary of the faults status.
    pub summary_faults_status: u64,
    // An Arc instance that holds the AtomicBool instance to stop the
    // threads.
    pub stop: Arc<AtomicBool>,
    // Handles of the threads.
    _handles: Vec<JoinHandle<()>>,
}

impl Model {
    /// Create a new model.
    ///
    /// # Arguments
    /// * `is_simulation_mode` - Is the simulation mode or not.
    ///
    /// # Returns
    /// A new model.
    pub fn new(is_simulation_mode: bool) -> Self {
        let config_file = Path::new("config/parameters_app.yaml");

        let (sender_to_model, receiver_to_model) = sync_channel(BOUND_SYNC_CHANNEL);

        Self {
            _is_simulation_mode: is_simulation_mode,

            _telemetry_digit: get_parameter(config_file, "telemetry_digit"),
            _period_main_loop: get_parameter::<usize>(config_file, "period_main_loop") as u64,

            _receiver_to_model: receiver_to_model,
            _sender_to_model: sender_to_model,

            _sender_to_climb_loop: None,

            summary_faults_status: 0,

            stop: Arc::new(AtomicBool::new(false)),

            _handles: Vec::new(),
        }
    }

    /// Run the processes.
    pub fn run_processes(&mut self) {
        let config = Config::new(Path::new("config/parameters_control.yaml"));

        let mut climb_process = ClimbProcess::new(
            &config,
            self._is_simulation_mode,
            &self._sender_to_model,
            &self.stop,
        );
        self._sender_to_climb_loop = Some(climb_process.get_sender_to_climb_loop());

        self._handles.push(spawn(move || {
            climb_process.run();
        }));
    }

    /// Get the sender to the climb loop.
    ///
    /// # Returns
    /// The sender to the climb loop.
    ///
    /// # Panics
    /// If the processes are not running.
    pub fn get_sender_to_climb_loop(&self) -> SyncSender<Value> {
        self._sender_to_climb_loop
            .clone()
            .expect("The processes should be running.")
    }

    /// Drain the telemetry and publish it. The publication is best-effort
    /// and never affects the control correctness; a reader that wants the
    /// data follows the log sink.
    pub fn step(&mut self) {
        while let Ok(telemetry) = self._receiver_to_model.try_recv() {
            if let Some(events) = telemetry.events {
                for event in events {
                    info!("Event: {event}");
                }
            }

            if let Some(command_result) = telemetry.command_result {
                debug!("Command result: {command_result}");
            }

            if let Some(climb) = telemetry.climb {
                self.summary_faults_status = climb.summary_faults_status;

                for message in climb.get_messages(self._telemetry_digit) {
                    debug!("Telemetry: {message}");
                }
            }
        }

        sleep(Duration::from_millis(self._period_main_loop));
    }

    /// Stop the processes.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);

        for handle in self._handles.drain(..) {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    use crate::enums::{BitEnum, ErrorCode};

    fn create_model() -> Model {
        Model::new(true)
    }

    #[test]
    fn test_new() {
        let model = create_model();

        assert_eq!(model._telemetry_digit, 4);
        assert_eq!(model._period_main_loop, 10);
        assert_eq!(model.summary_faults_status, 0);
        assert!(model._sender_to_climb_loop.is_none());
    }

    #[test]
    #[should_panic(expected = "The processes should be running.")]
    fn test_get_sender_to_climb_loop_panic() {
        let model = create_model();
        model.get_sender_to_climb_loop();
    }

    #[test]
    fn test_step() {
        let mut model = create_model();

        // Pre-load a telemetry message and drain it.
        let _ = model._sender_to_model.try_send(Telemetry::new(
            None,
            Some(json!({"id": "success", "sequence_id": 1})),
            None,
        ));

        model.step();

        assert!(model._receiver_to_model.try_recv().is_err());
    }

    #[test]
    fn test_run_processes() {
        let mut model = create_model();

        model.run_processes();

        let _ = model.get_sender_to_climb_loop().try_send(json!({
            "id": "cmd_extendClimber",
            "sequence_id": 1,
        }));

        sleep(Duration::from_millis(200));
        model.step();

        // No fault in the simulation mode.
        assert_eq!(
            model.summary_faults_status & ErrorCode::FaultDriverConfig.bit_value(),
            0
        );

        model.stop();
    }
}
