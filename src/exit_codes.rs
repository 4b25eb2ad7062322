//! Exit code constants for the trayrun CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unknown shortcut)
//! - 2: Config failure (file not found, parse error, invalid values)
//! - 3: Command failure (spawn error, non-zero exit, timeout, cancellation, charset)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or unknown shortcut id.
pub const USER_ERROR: i32 = 1;

/// Config failure: file not found, parse error, or invalid values.
pub const CONFIG_FAILURE: i32 = 2;

/// Command failure: spawn error, non-zero exit, timeout, cancellation, or
/// charset resolution/decode failure.
pub const RUN_FAILURE: i32 = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [SUCCESS, USER_ERROR, CONFIG_FAILURE, RUN_FAILURE];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn success_is_zero() {
        assert_eq!(SUCCESS, 0);
    }
}
