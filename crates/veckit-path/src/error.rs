//! Error types for the path geometry kernel.
//!
//! A malformed path description is the only recoverable failure in this
//! kernel. Degenerate geometry (zero-length or zero-radius arcs) is normal
//! control flow handled by the arc converter, never an error.

use thiserror::Error;

/// Path mini-language parse failure.
///
/// No partially built atom list ever escapes a failed parse; the caller gets
/// either a complete list or one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The token stream is too short to describe any path.
    #[error("Path description too short: need at least an instruction and one coordinate pair")]
    TooShort,

    /// The first instruction must establish a current point.
    #[error("Path must begin with a moveto (M or m), found '{found}'")]
    MustStartWithMove {
        /// The first token encountered instead.
        found: String,
    },

    /// An instruction letter outside the supported set.
    #[error("Unknown path instruction '{letter}'")]
    UnknownCommand {
        /// The offending letter.
        letter: char,
    },

    /// An instruction ran out of numeric arguments.
    #[error("Instruction '{command}' expects {expected} arguments, found {found}")]
    MissingArgument {
        /// The instruction letter.
        command: char,
        /// How many numeric arguments the instruction requires.
        expected: usize,
        /// How many were available.
        found: usize,
    },

    /// A token could not be read as a real number.
    #[error("Expected a number, found '{token}'")]
    InvalidNumber {
        /// The unparsable token.
        token: String,
    },

    /// An arc flag argument was neither 0 nor 1.
    #[error("Arc flag must be 0 or 1, found '{token}'")]
    InvalidFlag {
        /// The offending token.
        token: String,
    },

    /// A bare number where no repeatable instruction is active (e.g. right
    /// after a closepath).
    #[error("Unexpected token '{token}': no instruction to repeat")]
    UnexpectedToken {
        /// The offending token.
        token: String,
    },
}

/// Result alias for parser operations.
pub type Result<T> = std::result::Result<T, ParseError>;
