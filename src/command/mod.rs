pub mod command_climber;
pub mod command_schema;
