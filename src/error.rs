//! Failure taxonomy of a single match.

use std::process::ExitStatus;

use crate::protocol::Placement;

/// Why a seat forfeited its match.
///
/// Player faults never abort the tournament; each variant converts into a
/// `FAIL` outcome for the offending seat.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    /// The reply line was not a placement token.
    #[error("unparseable move line {line:?}")]
    Protocol {
        /// The rejected line, already trimmed.
        line: String,
    },
    /// The reply parsed but names a placement the board rejects.
    #[error("illegal placement {placement}")]
    IllegalMove {
        /// The rejected placement.
        placement: Placement,
    },
    /// The seat's process exited with a nonzero status.
    #[error("process exited with {status}")]
    ProcessExit {
        /// The reported exit status.
        status: ExitStatus,
    },
    /// The seat's pipe failed or closed before the protocol finished.
    #[error("pipe closed before the match finished")]
    PipeClosed,
}
