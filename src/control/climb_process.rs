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

use log::{info, warn};
use serde_json::Value;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    mpsc::{sync_channel, Receiver, SyncSender},
    Arc,
};
use std::thread::sleep;
use std::time::{Duration, Instant};

use crate::command::{
    command_climber::{
        CommandExtendClimber, CommandReleaseClimber, CommandRetractClimber, CommandStopClimber,
    },
    command_schema::CommandSchema,
};
use crate::config::Config;
use crate::constants::{BOUND_SYNC_CHANNEL, NUM_ACTUATOR};
use crate::control::climb_control::ClimbControl;
use crate::driver::ActuatorDriver;
use crate::enums::ErrorCode;
use crate::mock::mock_actuator::MockActuator;
use crate::telemetry::telemetry::Telemetry;

pub struct ClimbProcess {
    // Climb control
    pub climb_control: ClimbControl,
    // Command schema
    _command_schema: CommandSchema,
    // Sender of the telemetry to the model.
    _sender_to_model: SyncSender<Telemetry>,
    // Sender of the message to the climb loop.
    _sender_to_climb_loop: SyncSender<Value>,
    // Receiver of the message to the climb loop.
    _receiver_to_climb_loop: Receiver<Value>,
    // Stop the loop.
    _stop: Arc<AtomicBool>,
}

impl ClimbProcess {
    /// Create a new instance of the climb process. This is the scheduler of
    /// the climb control: it ticks the pipeline at the control frequency and
    /// feeds it the operator requests.
    ///
    /// # Arguments
    /// * `config` - The configuration.
    /// * `is_simulation_mode` - Is the simulation mode or not.
    /// * `sender_to_model` - The sender to the model.
    /// * `stop` - An Arc instance that holds the AtomicBool instance to stop
    /// the loop.
    ///
    /// # Returns
    /// New instance of the climb process.
    pub fn new(
        config: &Config,
        is_simulation_mode: bool,
        sender_to_model: &SyncSender<Telemetry>,
        stop: &Arc<AtomicBool>,
    ) -> Self {
        // Sender and receiver to the climb loop
        let (sender_to_climb_loop, receiver_to_climb_loop) = sync_channel(BOUND_SYNC_CHANNEL);

        let drivers: Vec<Box<dyn ActuatorDriver + Send>> = if is_simulation_mode {
            (0..NUM_ACTUATOR)
                .map(|_| Box::new(MockActuator::new(0.0)) as Box<dyn ActuatorDriver + Send>)
                .collect()
        } else {
            panic!("Not implemented yet.");
        };

        Self {
            climb_control: ClimbControl::new(config, drivers),

            _command_schema: Self::create_command_schema(),

            _sender_to_model: sender_to_model.clone(),

            _sender_to_climb_loop: sender_to_climb_loop,
            _receiver_to_climb_loop: receiver_to_climb_loop,

            _stop: stop.clone(),
        }
    }

    /// Create the command schema.
    ///
    /// # Returns
    /// Command schema.
    fn create_command_schema() -> CommandSchema {
        let mut command_schema = CommandSchema::new();
        command_schema.add_command(Box::new(CommandExtendClimber));
        command_schema.add_command(Box::new(CommandRetractClimber));
        command_schema.add_command(Box::new(CommandReleaseClimber));
        command_schema.add_command(Box::new(CommandStopClimber));

        command_schema
    }

    /// Get the sender to the climb loop.
    ///
    /// # Returns
    /// The sender to the climb loop.
    pub fn get_sender_to_climb_loop(&self) -> SyncSender<Value> {
        self._sender_to_climb_loop.clone()
    }

    /// Run the climb loop.
    pub fn run(&mut self) {
        info!("Climb control loop is running.");

        let period = (1000.0 / self.climb_control.config.control_frequency) as u64;
        let nominal_dt = 1.0 / self.climb_control.config.control_frequency;

        let mut previous_tick: Option<Instant> = None;
        while !self._stop.load(Ordering::Relaxed) {
            // Time the control loop. The pipeline integrates the actual
            // elapsed time, so a late tick degrades smoothness only.
            let now = Instant::now();
            let mut dt = match previous_tick {
                Some(tick) => now.duration_since(tick).as_secs_f64(),
                None => nominal_dt,
            };
            if dt <= 0.0 {
                dt = nominal_dt;
            }
            previous_tick = Some(now);

            // Process the messages.
            let mut command_result = None;
            if let Ok(message) = self._receiver_to_climb_loop.try_recv() {
                command_result = Some(
                    self._command_schema
                        .execute(&message, Some(&mut self.climb_control)),
                );
            }

            // Run the control loop
            self.climb_control.step(dt);

            // Send the telemetry and event data to the model and ignore the
            // error.
            let mut telemetry = self.climb_control.telemetry.clone();

            let events = if self.climb_control.has_event() {
                Some(self.climb_control.get_events_and_clear())
            } else {
                None
            };

            let cycle_time = now.elapsed().as_millis() as u64;
            telemetry.cycle_time = (cycle_time as f64) / 1000.0;

            let _ = self._sender_to_model.try_send(Telemetry::new(
                Some(telemetry),
                command_result,
                events,
            ));

            // Sleep with the remaining time
            if period > cycle_time {
                sleep(Duration::from_millis(period - cycle_time));
            } else if self
                .climb_control
                .error_handler
                .add_error(ErrorCode::WarnCycleTime)
            {
                warn!("Control cycle took {cycle_time} ms, over the {period} ms period.");
            }
        }

        info!("Climb control loop is stopped.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::Path;
    use std::thread::spawn;

    use crate::enums::ClimbState;

    fn create_climb_process() -> (ClimbProcess, Receiver<Telemetry>) {
        let config = Config::new(Path::new("config/parameters_control.yaml"));

        let stop = Arc::new(AtomicBool::new(false));

        let (sender_to_model, receiver_to_model) = sync_channel(BOUND_SYNC_CHANNEL);

        (
            ClimbProcess::new(&config, true, &sender_to_model, &stop),
            receiver_to_model,
        )
    }

    #[test]
    fn test_new() {
        let climb_process = create_climb_process().0;

        assert_eq!(climb_process._command_schema.number_of_commands(), 4);
    }

    #[test]
    fn test_run() {
        let (mut climb_process, receiver_to_model) = create_climb_process();
        let stop = climb_process._stop.clone();

        let sender_to_climb_loop = climb_process.get_sender_to_climb_loop();

        let handle = spawn(move || {
            climb_process.run();
        });

        sleep(Duration::from_millis(200));

        // Extend the climber.
        let _ = sender_to_climb_loop.try_send(json!({
            "id": "cmd_extendClimber",
            "sequence_id": 2,
        }));

        // Check the telemetry data.
        sleep(Duration::from_millis(200));

        let mut latest_telemetry = Telemetry::new(None, None, None);
        loop {
            match receiver_to_model.try_recv() {
                Ok(telemetry) => {
                    if let Some(_result) = &telemetry.command_result {
                        latest_telemetry = telemetry;
                        break;
                    }
                }
                Err(_) => {
                    break;
                }
            }
        }

        assert_eq!(
            latest_telemetry.command_result.unwrap(),
            json!({
                "id": "success",
                "sequence_id": 2,
            })
        );
        assert_eq!(
            latest_telemetry.events.unwrap(),
            vec![json!({
                "id": "climbStateChanged",
                "state": ClimbState::Extending as u8,
            })]
        );
        assert_eq!(
            latest_telemetry.climb.unwrap().state,
            ClimbState::Extending
        );

        // Close the loop.
        stop.store(true, Ordering::Relaxed);

        assert!(handle.join().is_ok());
    }
}
