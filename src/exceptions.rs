//! ## Custom Errors for Rule Encoder
//!
//! This module defines the error types returned by the Rule Encoder library.
//! It uses the `thiserror` crate to derive the `Error` trait for custom error types.
//! The `RuleEncoderError` enum covers failures raised by DataFusion and Arrow as well as
//! the encoder's own input checks (unsupported containers, missing columns, bad rules).
//!
//! The `RuleEncoderResult` type alias simplifies error handling by providing a convenient
//! alias for results returned by the library.
//!
//! ### Example
//!
//! ```rust
//! use rule_encoder::exceptions::{RuleEncoderError, RuleEncoderResult};
//!
//! fn check_input() -> RuleEncoderResult<()> {
//!     Err(RuleEncoderError::UnsupportedInput("array of Int64".into()))
//! }
//! ```

use thiserror::Error;

/// Errors specific to the Rule Encoder library.
#[derive(Debug, Error)]
pub enum RuleEncoderError {
    /// Wraps errors from DataFusion.
    #[error("DataFusion error: {0}")]
    DataFusionError(#[from] datafusion::error::DataFusionError),

    /// Wraps errors from Arrow.
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    /// The input is not a recognized tabular container. The message names the type found.
    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),

    /// Indicates that an invalid parameter was provided (e.g., a non-positive rule code).
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Indicates that a column named by a rule does not exist in the DataFrame.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// Indicates the transform method was called before any rules were derived or supplied.
    #[error("Transform called before fit for stateful transformer")]
    FitNotCalled,
}

/// A convenient result type for Rule Encoder operations.
pub type RuleEncoderResult<T> = std::result::Result<T, RuleEncoderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datafusion_error() {
        let df_err = datafusion::error::DataFusionError::Plan("test plan error".into());
        let err: RuleEncoderError = df_err.into();
        let err_msg = format!("{}", err);
        assert!(err_msg.contains("DataFusion error:"));
        assert!(err_msg.contains("test plan error"));
    }

    #[test]
    fn test_arrow_error() {
        let arrow_err = arrow::error::ArrowError::ComputeError("test compute error".into());
        let err: RuleEncoderError = arrow_err.into();
        let err_msg = format!("{}", err);
        assert!(err_msg.contains("Arrow error:"));
        assert!(err_msg.contains("test compute error"));
    }

    #[test]
    fn test_unsupported_input_error() {
        let err = RuleEncoderError::UnsupportedInput("array of Int64".into());
        let err_msg = format!("{}", err);
        assert!(err_msg.contains("Unsupported input:"));
        assert!(err_msg.contains("Int64"));
    }

    #[test]
    fn test_invalid_parameter_error() {
        let err = RuleEncoderError::InvalidParameter("bad code".into());
        let err_msg = format!("{}", err);
        assert!(err_msg.contains("Invalid parameter:"));
        assert!(err_msg.contains("bad code"));
    }

    #[test]
    fn test_missing_column_error() {
        let err = RuleEncoderError::MissingColumn("color".into());
        let err_msg = format!("{}", err);
        assert!(err_msg.contains("Missing column:"));
        assert!(err_msg.contains("color"));
    }

    #[test]
    fn test_fit_not_called_error() {
        let err = RuleEncoderError::FitNotCalled;
        let err_msg = format!("{}", err);
        assert!(err_msg.contains("Transform called before fit for stateful transformer"));
    }
}
