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

use log::{error, info, warn};
use serde_json::Value;
use strum::IntoEnumIterator;

use crate::config::Config;
use crate::constants::NUM_ACTUATOR;
use crate::control::homing::Homing;
use crate::control::kinematics::KinematicState;
use crate::control::position_servo::PositionServo;
use crate::control::settle_detector::SettleDetector;
use crate::control::trapezoid_profile::TrapezoidProfile;
use crate::driver::{ActuatorDriver, DriveCommand};
use crate::enums::{ActuatorSide, ClimbState, ErrorCode, MotionIntent};
use crate::error_handler::ErrorHandler;
use crate::telemetry::{event::Event, telemetry_climb::TelemetryClimb};

pub struct ActuatorChannel {
    // Side of the climber.
    pub side: ActuatorSide,
    // Driver of the actuator (opaque hardware capability).
    pub driver: Box<dyn ActuatorDriver + Send>,
    // Carried setpoint of the profile. It lives as long as the subsystem.
    pub setpoint: KinematicState,
    // The driver accepted the configuration or not. A channel without the
    // configured gains is kept stopped.
    pub is_operational: bool,
}

pub struct ClimbControl {
    // State of the climb lifecycle.
    _state: ClimbState,
    // Profile generator shared by both sides.
    _profile: TrapezoidProfile,
    // Homing of the position reference.
    _homing: Homing,
    // Settle detection on the tracking error.
    _settle_detector: SettleDetector,
    // Per-side channels. The index is the actuator side. Both sides track
    // the same commanded goal but evolve independently from their own
    // sensor feedback.
    pub channels: Vec<ActuatorChannel>,
    // Configuration.
    pub config: Config,
    // Telemetry.
    pub telemetry: TelemetryClimb,
    // Error handler.
    pub error_handler: ErrorHandler,
    // Events to publish.
    _events: Vec<Value>,
}

impl ClimbControl {
    /// Create a new climb control.
    ///
    /// # Arguments
    /// * `config` - The configuration.
    /// * `drivers` - Drivers of the left and right actuators (in this
    /// order).
    ///
    /// # Returns
    /// A new climb control.
    ///
    /// # Panics
    /// If the number of drivers is not 2.
    pub fn new(config: &Config, drivers: Vec<Box<dyn ActuatorDriver + Send>>) -> Self {
        assert!(
            drivers.len() == NUM_ACTUATOR,
            "Number of drivers should be {NUM_ACTUATOR}."
        );

        let mut error_handler = ErrorHandler::new(config.enabled_faults_mask);
        let mut events = Vec::new();

        let mut channels = Vec::new();
        for (side, mut driver) in ActuatorSide::iter().zip(drivers.into_iter()) {
            // A driver without the configured gains is unsafe to close the
            // loop on. Keep it stopped and surface the fault.
            let is_operational = match driver.configure(&config.gains, &config.bounds) {
                Ok(()) => true,
                Err(message) => {
                    error!(
                        "Failed to configure the {} climber driver: {message}",
                        side.as_ref()
                    );

                    if error_handler.add_error(ErrorCode::FaultDriverConfig) {
                        events.push(Event::get_message_summary_faults_status(
                            error_handler.summary_faults_status,
                        ));
                    }
                    driver.command(&DriveCommand::Stop);

                    false
                }
            };

            // Seed the carried setpoint from the sensor at rest.
            let setpoint = KinematicState::at_rest(driver.read_position());

            channels.push(ActuatorChannel {
                side: side,
                driver: driver,
                setpoint: setpoint,
                is_operational: is_operational,
            });
        }

        Self {
            _state: ClimbState::Idle,
            _profile: TrapezoidProfile::new(&config.constraints),
            _homing: Homing::new(config.contradiction_threshold),
            _settle_detector: SettleDetector::new(
                config.settle_window,
                config.control_frequency,
                config.settle_threshold,
            ),
            channels: channels,
            config: config.clone(),
            telemetry: TelemetryClimb::new(),
            error_handler: error_handler,
            _events: events,
        }
    }

    /// Get the state of the climb lifecycle.
    ///
    /// # Returns
    /// State of the climb lifecycle.
    pub fn state(&self) -> ClimbState {
        self._state
    }

    /// Handle a motion request.
    ///
    /// # Arguments
    /// * `intent` - Motion intent.
    ///
    /// # Returns
    /// Result of the request.
    ///
    /// # Errors
    /// If a directional request arrives while the climber has a fault.
    pub fn handle_request(&mut self, intent: MotionIntent) -> Result<(), &'static str> {
        match intent {
            MotionIntent::ExtendToMax => self.start_directional(ClimbState::Extending),
            MotionIntent::RetractToZero => self.start_directional(ClimbState::Retracting),
            MotionIntent::HoldCurrent => {
                self.release();
                Ok(())
            }
        }
    }

    /// Start a directional motion.
    ///
    /// # Arguments
    /// * `state` - Directional state to enter.
    ///
    /// # Returns
    /// Result of the request.
    ///
    /// # Errors
    /// If the climber has a fault.
    fn start_directional(&mut self, state: ClimbState) -> Result<(), &'static str> {
        if self.error_handler.has_fault() {
            return Err("The climber has a fault.");
        }

        if self._state == state {
            return Ok(());
        }

        // Re-anchor the carried setpoint to the sensor so the profile
        // continues from where the arm really is instead of a stale value.
        // A setpoint that was advancing keeps its velocity; the profile may
        // not command a velocity discontinuity. A frozen one restarts from
        // rest.
        let is_moving = matches!(self._state, ClimbState::Extending | ClimbState::Retracting);
        for channel in self.channels.iter_mut() {
            let velocity = if is_moving { channel.setpoint.velocity } else { 0.0 };
            channel.setpoint = KinematicState::new(channel.driver.read_position(), velocity);
        }

        self._settle_detector.reset();
        self.update_state(state);

        Ok(())
    }

    /// Release the active directional request. The climber freezes the
    /// carried setpoint and holds it, so the arm cannot fall under its
    /// load; the drive of the same tick is already a holding command.
    pub fn release(&mut self) {
        if !matches!(self._state, ClimbState::Extending | ClimbState::Retracting) {
            return;
        }

        for channel in self.channels.iter_mut() {
            channel.setpoint = KinematicState::at_rest(channel.setpoint.position);
        }

        self.update_state(ClimbState::Holding);
    }

    /// Stop the drive and return to the idle state. This is an explicit
    /// operator action, not the normal end of a request; releasing a
    /// request holds the position instead.
    pub fn stop(&mut self) {
        for channel in self.channels.iter_mut() {
            channel.setpoint = KinematicState::at_rest(channel.setpoint.position);
            channel.driver.command(&DriveCommand::Stop);
        }

        self.update_state(ClimbState::Idle);
    }

    /// Run one control tick. The scheduler invokes this at the fixed rate;
    /// a late tick degrades smoothness but not safety because the actual
    /// elapsed time is integrated.
    ///
    /// # Arguments
    /// * `dt` - Actual elapsed time in second since the previous tick.
    pub fn step(&mut self, dt: f64) {
        // Homing runs first, so everything below reads a freshly homed
        // sensor as position zero.
        for channel in self.channels.iter_mut() {
            let position_before = channel.driver.read_position();
            let was_at_stop = self.telemetry.at_hard_stop[channel.side.index()];

            let at_stop = self
                ._homing
                .rezero_at_hard_stop(channel.side, channel.driver.as_mut());

            if at_stop {
                // The re-zero shifted the sensor frame. Carry the setpoint
                // into the new frame, or the tracking command would yank
                // the arm toward a location that no longer exists.
                channel.setpoint.position -= position_before;
            }

            if at_stop && !was_at_stop {
                info!("{} climber homed at the hard stop.", channel.side.as_ref());
                self._events.push(Event::get_message_homed(channel.side));

                if (position_before.abs() > self.config.contradiction_threshold)
                    && self
                        .error_handler
                        .add_error(ErrorCode::WarnLimitSwitchContradiction)
                {
                    self._events.push(Event::get_message_summary_faults_status(
                        self.error_handler.summary_faults_status,
                    ));
                }
            }

            self.telemetry.at_hard_stop[channel.side.index()] = at_stop;
        }

        // An implausible reading is a warning only. The goals are clamped
        // on every command, so the robot stays controllable.
        for channel in self.channels.iter() {
            let position = channel.driver.read_position();
            self.telemetry.positions[channel.side.index()] = position;

            let bounds = &self.config.bounds;
            if ((position < bounds.min - bounds.safety_margin)
                || (position > bounds.max + bounds.safety_margin))
                && self.error_handler.add_error(ErrorCode::WarnSensorRange)
            {
                warn!(
                    "{} climber reads {position:.3} rotation, outside the plausible travel.",
                    channel.side.as_ref()
                );
                self._events.push(Event::get_message_summary_faults_status(
                    self.error_handler.summary_faults_status,
                ));
            }
        }

        // Exactly one drive command per side per tick.
        match self._state {
            ClimbState::Idle => {
                for channel in self.channels.iter_mut() {
                    channel.driver.command(&DriveCommand::Stop);
                }
            }
            ClimbState::Extending | ClimbState::Retracting => {
                let bounds = self.config.bounds;
                let requested = if self._state == ClimbState::Extending {
                    bounds.max
                } else {
                    bounds.min
                };
                self.track_goal(dt, bounds.clamp(requested));
            }
            ClimbState::Holding => {
                for channel in self.channels.iter_mut() {
                    if channel.is_operational {
                        channel.driver.command(&PositionServo::hold(&channel.setpoint));
                    } else {
                        channel.driver.command(&DriveCommand::Stop);
                    }
                }
            }
        }

        self.update_settled();
        self.update_telemetry();
    }

    /// Advance the carried setpoints toward the goal and track them.
    ///
    /// # Arguments
    /// * `dt` - Actual elapsed time in second since the previous tick.
    /// * `goal` - Clamped goal position in rotation.
    fn track_goal(&mut self, dt: f64, goal: f64) {
        for channel in self.channels.iter_mut() {
            if !channel.is_operational {
                channel.driver.command(&DriveCommand::Stop);
                continue;
            }

            channel.setpoint = self._profile.advance(dt, &channel.setpoint, goal);
            channel.driver.command(&PositionServo::track(&channel.setpoint));
        }
    }

    /// Update the settled flag from the tracking error of both sides. The
    /// climber is settled when the carried setpoints are at rest and both
    /// sides track them with a small error over the window.
    fn update_settled(&mut self) {
        let tracking_error: Vec<f64> = self
            .channels
            .iter()
            .map(|channel| {
                self.telemetry.positions[channel.side.index()] - channel.setpoint.position
            })
            .collect();

        let is_tracking = self._settle_detector.is_settled(&tracking_error);

        let is_settled = is_tracking
            && (self._state != ClimbState::Idle)
            && self
                .channels
                .iter()
                .all(|channel| channel.setpoint.velocity == 0.0);

        if is_settled != self.telemetry.is_settled {
            self._events.push(Event::get_message_settled(is_settled));
        }
        self.telemetry.is_settled = is_settled;
    }

    /// Update the telemetry data.
    fn update_telemetry(&mut self) {
        for channel in self.channels.iter() {
            self.telemetry.setpoint_positions[channel.side.index()] = channel.setpoint.position;
            self.telemetry.setpoint_velocities[channel.side.index()] = channel.setpoint.velocity;
        }

        self.telemetry.state = self._state;
        self.telemetry.summary_faults_status = self.error_handler.summary_faults_status;
    }

    /// Update the state of the climb lifecycle.
    ///
    /// # Arguments
    /// * `state` - New state.
    fn update_state(&mut self, state: ClimbState) {
        if self._state != state {
            info!("Climb state changes from {:?} to {state:?}.", self._state);

            self._state = state;
            self._events.push(Event::get_message_climb_state(state));
        }
    }

    /// Check if there are any events to publish.
    ///
    /// # Returns
    /// True if there are events to publish, false otherwise.
    pub fn has_event(&self) -> bool {
        !self._events.is_empty()
    }

    /// Get the events to publish and clear the internal events.
    ///
    /// # Returns
    /// Events.
    pub fn get_events_and_clear(&mut self) -> Vec<Value> {
        let events = self._events.clone();
        self._events.clear();

        events
    }
}
