//! Error types for the transformation engine
//!
//! The taxonomy distinguishes malformed input (`ValidationError`), upstream
//! token-structure problems (`ParseError`), payload ceilings (`LimitError`)
//! and unsafe external content (`SecurityError`). All of them abort the
//! current transform call; there is no partial-result mode.

use thiserror::Error;

/// Top-level error surfaced by [`crate::to_blocks`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Limit(#[from] LimitError),

    #[error(transparent)]
    Security(#[from] SecurityError),
}

/// Malformed or out-of-range input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Input markdown was empty
    #[error("input markdown must not be empty")]
    EmptyInput,

    /// Input markdown is longer than the accepted maximum
    #[error("input length {length} exceeds maximum of {max} characters")]
    InputTooLong { length: usize, max: usize },

    /// A required text field was empty
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    /// Inline/list/quote nesting went past the recursion ceiling
    #[error("nesting depth {depth} exceeds the maximum of {max}")]
    DepthExceeded { depth: usize, max: usize },

    /// A table has more rows than the platform accepts
    #[error("table has {count} rows, the maximum is {max}")]
    TooManyRows { count: usize, max: usize },

    /// A table row has more cells than the platform accepts
    #[error("table row has {count} cells, the maximum is {max}")]
    TooManyCells { count: usize, max: usize },

    /// A table carries more column settings than the platform accepts
    #[error("table has {count} column settings, the maximum is {max}")]
    TooManyColumnSettings { count: usize, max: usize },

    /// A table cell does not match its declared shape
    #[error("invalid table cell: {reason}")]
    InvalidCell { reason: &'static str },

    /// An absolute URL on a required field failed validation
    #[error("invalid url for {field}: {url}")]
    InvalidUrl { field: &'static str, url: String },
}

/// Upstream token structure the engine cannot interpret.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A closing event arrived without its matching opening event
    #[error("unbalanced token stream: closing {kind} without a matching start")]
    UnbalancedEvent { kind: &'static str },
}

/// Payload-level ceilings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LimitError {
    /// The transform would emit more blocks than one message may carry
    #[error("Block count {count} exceeds the maximum of {max}")]
    BlockCount { count: usize, max: usize },
}

/// Unsafe external content.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SecurityError {
    /// A URL used a scheme the platform refuses to deliver
    #[error("disallowed url scheme in {url}")]
    DisallowedScheme { url: String },
}
