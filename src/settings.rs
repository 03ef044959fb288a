//! ## Encoder Settings
//!
//! Knobs shared by every encoding call. The defaults match what gradient-boosting
//! dataset constructors expect: 64-bit integer category codes.

use arrow::datatypes::DataType;

/// Environment variable that turns on debug logging (see [`crate::logging`]).
pub const DEBUG_ENV_VAR: &str = "DEBUG_RULE_ENCODER";

/// Integer type of the encoded columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodeType {
    Int32,
    #[default]
    Int64,
}

impl CodeType {
    /// The Arrow data type of an encoded column.
    pub fn data_type(&self) -> DataType {
        match self {
            CodeType::Int32 => DataType::Int32,
            CodeType::Int64 => DataType::Int64,
        }
    }

    /// Largest code representable by this type.
    pub fn max_code(&self) -> i64 {
        match self {
            CodeType::Int32 => i32::MAX as i64,
            CodeType::Int64 => i64::MAX,
        }
    }
}

/// Settings applied when rules are written into a DataFrame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncoderSettings {
    pub code_type: CodeType,
}

impl EncoderSettings {
    pub fn new(code_type: CodeType) -> Self {
        Self { code_type }
    }
}
