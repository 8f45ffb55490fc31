use config::Config;
use serde_json::{json, Value};
use std::path::Path;

use crate::enums::CommandStatus;

/// Trait for parsing the configuration value.
///
/// # Parameters
/// * `Self` - Type of the configuration value.
pub trait ConfigValue: Sized {
    /// Parse the configuration value.
    ///
    /// # Parameters
    /// * `s` - String to parse.
    ///
    /// # Returns
    /// The parsed configuration value.
    fn parse_value(s: &str) -> Self;
}

/// Implement the trait ConfigValue for String.
///
/// # Parameters
/// * `String` - Type of the configuration value.
impl ConfigValue for String {
    fn parse_value(s: &str) -> Self {
        s.to_string()
    }
}

/// Implement the trait ConfigValue for f64.
///
/// # Parameters
/// * `f64` - Type of the configuration value.
impl ConfigValue for f64 {
    fn parse_value(s: &str) -> Self {
        s.parse::<f64>().expect(&format!("{s} should parse as f64"))
    }
}

/// Implement the trait ConfigValue for usize.
///
/// # Parameters
/// * `usize` - Type of the configuration value.
impl ConfigValue for usize {
    fn parse_value(s: &str) -> Self {
        s.parse::<usize>()
            .expect(&format!("{s} should parse as usize"))
    }
}

/// Implement the trait ConfigValue for i32.
///
/// # Parameters
/// * `i32` - Type of the configuration value.
impl ConfigValue for i32 {
    fn parse_value(s: &str) -> Self {
        s.parse::<i32>().expect(&format!("{s} should parse as i32"))
    }
}

/// Implement the trait ConfigValue for u64.
///
/// # Parameters
/// * `u64` - Type of the configuration value.
///
/// # Panics
/// If the hex string does not start with 0x or 0X.
impl ConfigValue for u64 {
    fn parse_value(s: &str) -> Self {
        if !s.starts_with("0x") && !s.starts_with("0X") {
            panic!("Hex string {s} should start with 0x or 0X");
        }

        u64::from_str_radix(&s[2..], 16).expect(&format!("Hex string {s} should parse as u64"))
    }
}

/// Implement the trait ConfigValue for bool.
///
/// # Parameters
/// * `bool` - Type of the configuration value.
impl ConfigValue for bool {
    fn parse_value(s: &str) -> Self {
        s.parse::<bool>()
            .expect(&format!("{s} should parse as bool"))
    }
}

/// Get the configuation from the file.
///
/// # Parameters
/// * `filepath` - Path to the config file.
///
/// # Returns
/// The configuration.
pub fn get_config(filepath: &Path) -> Config {
    let name = filepath
        .to_str()
        .expect(&format!("Should have the file name in the {:?}", filepath));

    Config::builder()
        .add_source(config::File::with_name(name))
        .build()
        .expect(&format!("Should be able to read the {name}"))
}

/// Get the parameter from the file.
///
/// # Parameters
/// * `filepath` - Path to the config file.
/// * `key` - Key to find the parameter in the config file.
///
/// # Returns
/// The parameter.
pub fn get_parameter<T: ConfigValue>(filepath: &Path, key: &str) -> T {
    let config = get_config(filepath);

    config
        .get_string(key)
        .map(|v| T::parse_value(&v))
        .expect(&format!("Should find the {key} in the {:?}", filepath))
}

/// Acknowledge the command.
///
/// # Arguments
/// * `command_status` - Command status.
/// * `sequence_id` - Command sequence ID.
///
/// # Returns
/// Acknowledgement message.
pub fn acknowledge_command(command_status: CommandStatus, sequence_id: i64) -> Value {
    json!({"id": command_status.as_ref().to_lowercase(), "sequence_id": sequence_id})
}

/// Get the message name.
///
/// # Arguments
/// * `message` - Message that should have the "id" field.
///
/// # Returns
/// Message name. Return an empty string if the name is not found.
pub fn get_message_name(message: &Value) -> String {
    match message["id"].as_str() {
        Some(id) => String::from(id),
        None => String::new(),
    }
}

/// Get the message sequence ID.
///
/// # Arguments
/// * `message` - Message.
///
/// # Returns
/// Message sequence ID. Return -1 if the sequence ID is not found.
pub fn get_message_sequence_id(message: &Value) -> i64 {
    match message["sequence_id"].as_i64() {
        Some(sequence_id) => sequence_id,
        None => -1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use tempfile::NamedTempFile;

    fn create_parameter_file() -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .expect("Should create the temporary file");
        writeln!(
            file,
            "frequency: 50.0\ncount: 3\nenabled: true\nmask: \"0xFF\"\nname: climber"
        )
        .expect("Should write the temporary file");

        file
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(String::parse_value("climber"), "climber");
        assert_eq!(f64::parse_value("48.5"), 48.5);
        assert_eq!(usize::parse_value("2"), 2);
        assert_eq!(i32::parse_value("-1"), -1);
        assert_eq!(u64::parse_value("0xFF"), 255);
        assert_eq!(bool::parse_value("true"), true);
    }

    #[test]
    #[should_panic(expected = "Hex string 255 should start with 0x or 0X")]
    fn test_parse_value_panic() {
        u64::parse_value("255");
    }

    #[test]
    fn test_get_parameter() {
        let file = create_parameter_file();
        let filepath = file.path();

        assert_eq!(get_parameter::<f64>(filepath, "frequency"), 50.0);
        assert_eq!(get_parameter::<usize>(filepath, "count"), 3);
        assert_eq!(get_parameter::<bool>(filepath, "enabled"), true);
        assert_eq!(get_parameter::<u64>(filepath, "mask"), 255);
        assert_eq!(get_parameter::<String>(filepath, "name"), "climber");
    }

    #[test]
    fn test_acknowledge_command() {
        assert_eq!(
            acknowledge_command(CommandStatus::Success, 1),
            json!({"id": "success", "sequence_id": 1})
        );
        assert_eq!(
            acknowledge_command(CommandStatus::Fail, 2),
            json!({"id": "fail", "sequence_id": 2})
        );
    }

    #[test]
    fn test_get_message_name() {
        assert_eq!(
            get_message_name(&json!({"id": "cmd_extendClimber"})),
            "cmd_extendClimber"
        );
        assert_eq!(get_message_name(&json!({"sequence_id": 1})), "");
    }

    #[test]
    fn test_get_message_sequence_id() {
        assert_eq!(get_message_sequence_id(&json!({"sequence_id": 3})), 3);
        assert_eq!(get_message_sequence_id(&json!({"id": "cmd"})), -1);
    }
}
