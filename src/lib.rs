//! # bseqgen
//!
//! Immutable binary sequences and LFSR-based maximal-length sequence
//! (m-sequence) generation for signal-processing and spread-spectrum work.
//!
//! A [BitSequence] is a validated, non-empty run of bits with derived views
//! (digit string, big-endian bytes, hex, ±1 mapping, ones/zeros, balance,
//! entropy) and transformations (circular shift, resize). An [MSequence]
//! parses a feedback polynomial such as `x^3+x+1`, loads an initial fill into
//! its register and steps it to emit bits.
//!
//! ## Example
//!
//! ```
//! use bseqgen::{Direction, MSequence};
//!
//! let mut generator = MSequence::new("x^3+x+1", "001").unwrap();
//! let seq = generator.generate_sequence().unwrap();
//!
//! assert_eq!(seq.bit_string(), "0010111");
//! assert_eq!(seq.hex_string(), "17");
//! assert_eq!(seq.ones(), 4);
//! assert_eq!(seq.shift(1, Direction::Left).bit_string(), "0101110");
//! assert_eq!(generator.current_register().bit_string(), "001");
//! ```
//!
//! ## Features
//!
//! - `serde`: `Serialize`/`Deserialize` for [BitSequence] and a
//!   configuration type, `serde::MSequenceDef`, convertible into an
//!   [MSequence].

pub mod bits;
pub mod errors;
pub mod m_sequence;
pub mod polynomial;
pub mod sequence;

#[cfg(feature = "serde")]
pub mod serde;

pub use errors::{FillError, MSequenceError, PolynomialError, SequenceError};
pub use m_sequence::{MAX_PERIOD_DEGREE, MSequence};
pub use polynomial::{Polynomial, validate_fill};
pub use sequence::{BitSequence, Direction, Preview};
