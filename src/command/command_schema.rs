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

use log::error;
use serde_json::Value;

use crate::control::climb_control::ClimbControl;
use crate::enums::CommandStatus;
use crate::utility::get_message_name;
use crate::utility::{acknowledge_command, get_message_sequence_id};

pub trait Command {
    /// Get the name of the command.
    ///
    /// # Returns
    /// Command name.
    fn name(&self) -> &str;

    /// Execute the command.
    ///
    /// # Arguments
    /// * `message` - Command message to execute.
    /// * `climb_control` - Climb control to execute the command.
    ///
    /// # Returns
    /// Command execution result.
    fn execute(&self, message: &Value, climb_control: Option<&mut ClimbControl>) -> Option<()>;
}

pub struct CommandSchema {
    // List of commands.
    pub commands: Vec<Box<dyn Command + Send>>,
}

impl CommandSchema {
    /// Create a new command schema.
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Add a command to the schema.
    pub fn add_command(&mut self, command: Box<dyn Command + Send>) {
        self.commands.push(command);
    }

    /// Execute a command.
    ///
    /// # Arguments
    /// * `message` - Command message to execute.
    /// * `climb_control` - Climb control to execute the command.
    ///
    /// # Returns
    /// Command execution result.
    pub fn execute(&self, message: &Value, climb_control: Option<&mut ClimbControl>) -> Value {
        let name = get_message_name(message);
        let sequence_id = get_message_sequence_id(message);

        let command_status: CommandStatus;
        for cmd in &self.commands {
            if cmd.name() == name {
                match cmd.execute(message, climb_control) {
                    Some(_) => {
                        command_status = CommandStatus::Success;
                    }
                    None => {
                        error!("Command execution failed: {message}");

                        command_status = CommandStatus::Fail;
                    }
                }

                return acknowledge_command(command_status, sequence_id);
            }
        }

        error!("Unknown command: {message}");

        acknowledge_command(CommandStatus::Fail, sequence_id)
    }

    /// Get the number of commands.
    ///
    /// # Returns
    /// Number of commands.
    pub fn number_of_commands(&self) -> usize {
        self.commands.len()
    }
}
