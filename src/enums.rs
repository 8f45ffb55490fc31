use num_traits::PrimInt;
use strum_macros::{AsRefStr, EnumIter, FromRepr, VariantNames};

/// A trait to provide value and bit value methods for the bit enum.
pub trait BitEnum<T: PrimInt> {
    /// Get the value.
    ///
    /// # Returns
    /// Value.
    fn value(&self) -> T;

    /// Get the bit value.
    ///
    /// # Returns
    /// Bit value. If the value is not defined, it returns 0.
    fn bit_value(&self) -> T {
        match self.value().to_usize() {
            Some(value) => T::one() << value,
            None => T::zero(),
        }
    }
}

impl BitEnum<u64> for ErrorCode {
    fn value(&self) -> u64 {
        *self as u64
    }
}

/// Side of the climber.
#[derive(FromRepr, Debug, PartialEq, Clone, Copy, Hash, Eq, EnumIter, VariantNames, AsRefStr)]
#[repr(u8)]
pub enum ActuatorSide {
    Left,
    Right,
}

impl ActuatorSide {
    /// Get the 0-based index of the side.
    ///
    /// # Returns
    /// Index.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Command status.
#[derive(Debug, VariantNames, AsRefStr)]
pub enum CommandStatus {
    Success,
    Fail,
    Ack,
    NoAck,
}

/// State of the climb lifecycle. There is no terminal state; the subsystem
/// cycles among these states for its whole lifetime.
#[derive(FromRepr, Debug, PartialEq, Clone, Copy)]
#[repr(u8)]
pub enum ClimbState {
    Idle = 1,
    Extending = 2,
    Retracting = 3,
    Holding = 4,
}

/// Motion intent of the operator request.
#[derive(FromRepr, Debug, PartialEq, Clone, Copy)]
#[repr(u8)]
pub enum MotionIntent {
    ExtendToMax = 1,
    RetractToZero = 2,
    HoldCurrent = 3,
}

/// Error code. If the name begins from the `Warn`, it is a warning. If the
/// name begins from the `Fault`, it is a fault.
#[derive(Debug, PartialEq, Clone, Copy, EnumIter, AsRefStr)]
pub enum ErrorCode {
    WarnSensorRange,
    WarnLimitSwitchContradiction,
    WarnCycleTime,
    FaultDriverConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_status() {
        assert_eq!(CommandStatus::Success.as_ref().to_lowercase(), "success");
        assert_eq!(CommandStatus::Fail.as_ref().to_lowercase(), "fail");
        assert_eq!(CommandStatus::Ack.as_ref().to_lowercase(), "ack");
        assert_eq!(CommandStatus::NoAck.as_ref().to_lowercase(), "noack");
    }

    #[test]
    fn test_actuator_side() {
        assert_eq!(ActuatorSide::Left.index(), 0);
        assert_eq!(ActuatorSide::Right.index(), 1);

        assert_eq!(ActuatorSide::from_repr(1).unwrap(), ActuatorSide::Right);
        assert_eq!(ActuatorSide::Left.as_ref(), "Left");
    }

    #[test]
    fn test_climb_state_value() {
        // Get the enum from the repr.
        assert_eq!(ClimbState::from_repr(1).unwrap(), ClimbState::Idle);
        assert_eq!(ClimbState::from_repr(4).unwrap(), ClimbState::Holding);

        // Get the enum value.
        assert_eq!(ClimbState::Extending as u8, 2);
        assert_eq!(ClimbState::Retracting as u8, 3);
    }

    #[test]
    fn test_motion_intent_value() {
        assert_eq!(
            MotionIntent::from_repr(1).unwrap(),
            MotionIntent::ExtendToMax
        );
        assert_eq!(
            MotionIntent::from_repr(3).unwrap(),
            MotionIntent::HoldCurrent
        );
    }

    #[test]
    fn test_error_code_value() {
        assert_eq!(ErrorCode::WarnSensorRange.value(), 0);
        assert_eq!(ErrorCode::FaultDriverConfig.value(), 3);
    }

    #[test]
    fn test_error_code_bit_value() {
        assert_eq!(ErrorCode::WarnSensorRange.bit_value(), 1);
        assert_eq!(ErrorCode::WarnLimitSwitchContradiction.bit_value(), 2);
        assert_eq!(ErrorCode::FaultDriverConfig.bit_value(), 8);
    }
}
