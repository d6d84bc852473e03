// Copyright 2020 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::{ExitCode, SysCode};
use thiserror::Error;

/// The error type that gets returned by actor method calls and runtime
/// operations. Carried back up the dispatch chain as a structured unwind and
/// converted into a receipt at the invocation boundary.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("ActorError(fatal: {fatal}, exit_code: {exit_code:?}, msg: {msg})")]
pub struct ActorError {
    /// Is this a fatal error.
    fatal: bool,
    /// The exit code for this invocation, must not be `Ok`.
    exit_code: ExitCode,
    /// Message for debugging purposes,
    msg: String,
}

impl ActorError {
    pub fn new(exit_code: ExitCode, msg: String) -> Self {
        Self {
            fatal: false,
            exit_code,
            msg,
        }
    }

    pub fn new_fatal(msg: String) -> Self {
        Self {
            fatal: true,
            exit_code: ExitCode::SystemError(SysCode::RuntimeAssertFailure),
            msg,
        }
    }

    /// Returns true if error is fatal.
    pub fn is_fatal(&self) -> bool {
        self.fatal
    }

    /// Returns the exit code of the error.
    pub fn exit_code(&self) -> ExitCode {
        self.exit_code
    }

    /// Error message of the actor error.
    pub fn msg(&self) -> &str {
        &self.msg
    }

    /// Prefix error message with a string message.
    pub fn wrap(mut self, msg: &str) -> Self {
        self.msg = format!("{}: {}", msg, self.msg);
        self
    }
}

/// Convenience macro for generating Actor Errors
#[macro_export]
macro_rules! actor_error {
    // Fatal Errors
    ( fatal($msg:expr) ) => { $crate::ActorError::new_fatal($msg.to_string()) };
    ( fatal($msg:literal $(, $ex:expr)+) ) => {
        $crate::ActorError::new_fatal(format!($msg, $($ex,)*))
    };

    // System error with only one stringable expression
    ( sys $code:ident; $msg:expr ) => {
        $crate::ActorError::new(
            $crate::ExitCode::SystemError($crate::SysCode::$code),
            $msg.to_string(),
        )
    };

    // System error with positional arguments
    ( sys $code:ident; $msg:literal $(, $ex:expr)+ ) => {
        $crate::ActorError::new(
            $crate::ExitCode::SystemError($crate::SysCode::$code),
            format!($msg, $($ex,)*),
        )
    };

    // User defined error with only one stringable expression
    ( user $code:ident; $msg:expr ) => {
        $crate::ActorError::new(
            $crate::ExitCode::UserDefinedError($crate::UserCode::$code),
            $msg.to_string(),
        )
    };

    // User defined error with positional arguments
    ( user $code:ident; $msg:literal $(, $ex:expr)+ ) => {
        $crate::ActorError::new(
            $crate::ExitCode::UserDefinedError($crate::UserCode::$code),
            format!($msg, $($ex,)*),
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UserCode;

    #[test]
    fn error_macro_generation() {
        assert_eq!(
            actor_error!(sys OutOfGas; "test"),
            ActorError::new(
                ExitCode::SystemError(SysCode::OutOfGas),
                "test".to_owned()
            )
        );
        assert_eq!(
            actor_error!(sys RuntimeAPIError; "test {}, {}", 8, 10),
            ActorError::new(
                ExitCode::SystemError(SysCode::RuntimeAPIError),
                format!("test {}, {}", 8, 10)
            )
        );
        assert_eq!(
            actor_error!(user InconsistentState; "bad state"),
            ActorError::new(
                ExitCode::UserDefinedError(UserCode::InconsistentState),
                "bad state".to_owned()
            )
        );
        assert_eq!(
            actor_error!(fatal("test {}, {}", 8, 10)),
            ActorError::new_fatal(format!("test {}, {}", 8, 10))
        );
        assert!(actor_error!(fatal("test")).is_fatal());
        assert!(!actor_error!(sys OutOfGas; "test").is_fatal());
    }
}
