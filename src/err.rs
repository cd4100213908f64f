//! Error interfaces for this crate.
//!
//! Parsing failures are ordinary [`Result`] values inside the library; only
//! the command line tool turns them into process termination, using the
//! reserved exit codes defined here. The toolchain's test harness
//! distinguishes failure classes purely by exit status, so these codes are
//! part of the external contract and must not change.

use std::borrow::Cow;
use std::ops::Range;

pub use crate::parse::{ParseErr, ParseErrKind};

/// Exit code for command line misuse (unrecognized arguments).
pub const CLI_MISUSE: u8 = 10;
/// Exit code for a missing or malformed language header.
pub const MISSING_HEADER: u8 = 21;
/// Exit code for an unknown instruction mnemonic.
pub const UNKNOWN_OPCODE: u8 = 22;
/// Exit code for any other lexical or syntactic instruction error
/// (wrong operand count, unclassifiable operand).
pub const BAD_SYNTAX: u8 = 23;

/// Unified error interface for all errors in this crate.
///
/// Note that the [`Display`] implementation is used for a brief message,
/// whereas [`Error::help`] is used for any clarifying messages.
///
/// [`Display`]: std::fmt::Display
pub trait Error: std::error::Error {
    /// The range where this error occurs in source.
    ///
    /// If this is not known, this can be set to `None`.
    fn span(&self) -> Option<Range<usize>> {
        None
    }

    /// A clarifying message to help aid someone in how to fix the error.
    ///
    /// If there is none to add, this can be set to `None`.
    fn help(&self) -> Option<Cow<str>>;
}
