//! Exit codes for the heredity CLI.
//!
//! Exit codes communicate operation outcome without requiring output parsing.

use hd_common::Error;

/// Exit codes for heredity operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Clean = 0,

    /// Model could not be resolved or failed validation
    ConfigError = 10,

    /// Population file unreadable or structurally invalid
    InputError = 11,

    /// Inference error
    InferenceError = 12,

    /// I/O error
    IoError = 13,

    /// Internal/unknown error
    InternalError = 99,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Check if this exit code indicates success.
    pub fn is_success(self) -> bool {
        matches!(self, ExitCode::Clean)
    }

    /// Check if this exit code indicates an error requiring attention.
    pub fn is_error(self) -> bool {
        (self as i32) >= 10
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::Config(_) | Error::InvalidModel(_) => ExitCode::ConfigError,
            // Structural problems in the family file are the input's fault.
            Error::DuplicatePerson { .. }
            | Error::SingleParent { .. }
            | Error::UnknownParent { .. }
            | Error::Input(_) => ExitCode::InputError,
            Error::Inference(_)
            | Error::DegeneratePosterior { .. }
            | Error::HypothesisSpaceTooLarge { .. } => ExitCode::InferenceError,
            Error::Io(_) => ExitCode::IoError,
            Error::Json(_) => ExitCode::InternalError,
        }
    }
}
