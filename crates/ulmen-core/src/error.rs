use thiserror::Error;

use crate::runtime::Phase;

/// Misuse of a runtime handle. Failures inside user code are not wrapped here:
/// they unwind straight through the runtime to whoever triggered them.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("runtime cannot be started: it is already {phase}")]
    AlreadyStarted { phase: Phase },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
