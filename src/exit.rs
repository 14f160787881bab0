// src/exit.rs
//! Standardized process exit codes for `placerank`.
//!
//! Provides a stable contract for scripts chaining pipeline stages.

use std::process::Termination;

use crate::error::PlaceRankError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum PlaceRankExit {
    /// Operation completed successfully.
    Success = 0,
    /// Generic error (I/O, pipeline thread failure).
    Error = 1,
    /// Input could not be decoded (malformed record, dump or config).
    InvalidInput = 2,
}

impl PlaceRankExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn exit(self) -> ! {
        std::process::exit(self.code())
    }

    /// Maps a failed run to its exit code.
    #[must_use]
    pub fn from_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<PlaceRankError>() {
            Some(e) if e.is_invalid_input() => Self::InvalidInput,
            _ => Self::Error,
        }
    }
}

impl Termination for PlaceRankExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn decode_errors_map_to_invalid_input() {
        let err = anyhow::Error::new(PlaceRankError::decode(Path::new("g.bin"), "truncated"));
        assert_eq!(PlaceRankExit::from_error(&err), PlaceRankExit::InvalidInput);
    }

    #[test]
    fn io_errors_map_to_generic_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = anyhow::Error::new(PlaceRankError::io(Path::new("g.bin"), io));
        assert_eq!(PlaceRankExit::from_error(&err), PlaceRankExit::Error);
        assert_eq!(PlaceRankExit::Error.code(), 1);
    }
}
