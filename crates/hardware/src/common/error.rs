//! Error definitions.
//!
//! Configuration problems are detected before a cache is built, and once a
//! [`Config`] exists, processing an access cannot fail. The only other errors
//! come from decoding trace text into accesses.
//!
//! [`Config`]: crate::config::Config

use thiserror::Error;

/// Reasons a cache configuration is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A geometry parameter is zero or not a power of two.
    #[error("{field} must be a positive power of 2 (got {value})")]
    NotPowerOfTwo {
        /// Name of the offending parameter.
        field: &'static str,
        /// The rejected value.
        value: u64,
    },

    /// The block is smaller than one 4-byte word.
    #[error("block size must be >= 4 bytes (got {0})")]
    BlockTooSmall(u64),

    /// The block is so large that one block transfer would overflow the cycle counter.
    #[error("block size {0} is too large: block transfer cost overflows 64 bits")]
    BlockTooLarge(u64),

    /// No-write-allocate has no cached copy to mark dirty, so it cannot be
    /// paired with write-back.
    #[error("no-write-allocate cannot be used with write-back")]
    NoAllocateWithWriteBack,
}

/// An unrecognized policy name.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}' (expected {expected})")]
pub struct ParsePolicyError {
    /// Which policy was being parsed.
    pub kind: &'static str,
    /// The text that failed to parse.
    pub value: String,
    /// The accepted spellings.
    pub expected: &'static str,
}

/// Failures while decoding a trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// A line is not of the form `<l|s> <hex address> <size>`.
    #[error("trace line {line}: {reason} in '{text}'")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// What is wrong with the line.
        reason: &'static str,
        /// The offending line, trimmed.
        text: String,
    },

    /// The underlying reader failed.
    #[error("failed to read trace: {0}")]
    Io(#[from] std::io::Error),
}
