// src/exit.rs
//! Standardized process exit codes for `seamcheck`.
//!
//! Provides a stable contract for CI scripts: non-zero means the
//! interface graph has at least one error-severity issue, or the run
//! could not start.

use std::process::Termination;

use crate::types::Summary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum SeamExit {
    /// Analysis completed with zero errors.
    Success = 0,
    /// Analysis completed and reported at least one error.
    CheckFailed = 1,
    /// Unexpected failure (I/O, output write).
    Error = 2,
    /// Configuration missing or malformed; analysis never started.
    InvalidConfig = 3,
}

impl SeamExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Exit status as a pure function of the final error count.
    #[must_use]
    pub fn from_summary(summary: &Summary) -> Self {
        if summary.errors > 0 {
            Self::CheckFailed
        } else {
            Self::Success
        }
    }
}

impl Termination for SeamExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}
