//! Error types for sequence construction, polynomial parsing and generator setup.

use thiserror::Error;

/// Errors produced when building or transforming a [crate::sequence::BitSequence].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    /// Bit source is empty.
    #[error("input bits cannot be empty")]
    InvalidInput,
    /// An element of the bit source cannot be read as an integer.
    #[error("element {index} cannot be read as an integer")]
    TypeConversion { index: usize },
    /// A converted value is neither 0 nor 1.
    #[error("element {index} has value {value}, bits must be 0 or 1")]
    InvalidBit { index: usize, value: i128 },
    /// Non-positive length or step count, or an unknown shift direction.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Errors produced when parsing a feedback polynomial such as `x^3+x+1`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolynomialError {
    /// Text does not follow the `x^m+x^k+...+1` grammar.
    #[error("{text:?} is malformed, expected a form like 'x^m+x^k+...+1'")]
    MalformedExpression { text: String },
    /// A degree appears more than once.
    #[error("polynomial has a duplicate term of degree {0}")]
    DuplicateTerm(u32),
    /// Degrees are not strictly descending.
    #[error("polynomial terms must be in descending degree order, got {0:?}")]
    OrderViolation(Vec<u32>),
    /// Top degree is below 2.
    #[error("polynomial degree must be >= 2, got {0}")]
    DegreeTooSmall(u32),
    /// A degree does not fit in 32 bits.
    #[error("polynomial degree {0} does not fit in 32 bits")]
    DegreeTooLarge(String),
    /// No `+1` term.
    #[error("polynomial must include the constant term '+1'")]
    MissingConstantTerm,
    /// Only `x^m` and `1` were given.
    #[error("polynomial must include at least one tap term besides x^m and 1")]
    InsufficientTaps,
}

/// Errors produced when validating an initial register fill.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FillError {
    #[error("initial fill {0:?} must be a non-empty binary string")]
    NonBinaryFill(String),
    #[error("initial fill must not be all zeros")]
    AllZeroFill,
    #[error("initial fill length must be exactly {expected}, got {got}")]
    FillLengthMismatch { expected: usize, got: usize },
}

/// Errors produced when building or driving a [crate::m_sequence::MSequence].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MSequenceError {
    #[error(transparent)]
    Polynomial(#[from] PolynomialError),
    #[error(transparent)]
    Fill(#[from] FillError),
    #[error(transparent)]
    Sequence(#[from] SequenceError),
    /// A full period is too long to collect in memory.
    #[error("full period of a degree-{degree} generator is too long to collect, max degree is {max}")]
    PeriodTooLong { degree: u32, max: u32 },
}
