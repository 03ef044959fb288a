//! ## Logging Configuration
//!
//! This module sets up logging automatically at program startup using the `ctor` crate.
//! Logging behavior is controlled by the `DEBUG_RULE_ENCODER` environment variable:
//!
//! - **Disabled** (default): If the variable is unset, empty, or explicitly set to `"0"` or `"false"`,
//!   no logging will be initialized.
//! - **Enabled**: Any other value enables logging with a maximum log level of `DEBUG`, which
//!   reports every derived and applied column rule.
//!
//! ### Usage Example
//!
//! ```sh
//! export DEBUG_RULE_ENCODER=true
//! ```

use crate::settings::DEBUG_ENV_VAR;
use ctor::ctor;
use tracing::Level;

/// Returns true when the given value of the debug variable switches logging on.
fn logging_enabled(value: Option<&str>) -> bool {
    !matches!(value, None | Some("") | Some("0") | Some("false"))
}

#[ctor]
fn set_debug_level() {
    let value = std::env::var(DEBUG_ENV_VAR).ok();
    if logging_enabled(value.as_deref()) {
        if let Err(e) = tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .try_init()
        {
            eprintln!("{} set but logging was not initialized: {}", DEBUG_ENV_VAR, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::logging_enabled;

    #[test]
    fn test_logging_switch() {
        assert!(!logging_enabled(None));
        assert!(!logging_enabled(Some("")));
        assert!(!logging_enabled(Some("0")));
        assert!(!logging_enabled(Some("false")));
        assert!(logging_enabled(Some("1")));
        assert!(logging_enabled(Some("true")));
    }
}
