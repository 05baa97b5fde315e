//! Immutable, validated binary sequences.
//!
//! A [BitSequence] is a non-empty ordered run of 0/1 values. It is built once
//! from a bit source (integers, one-character digit strings, or a string of
//! binary digits) and never changes afterwards: every transformation returns a
//! new sequence.

use std::{fmt, ops::Index, slice::SliceIndex, str::FromStr};

use crate::{bits, errors::SequenceError};

/// A single element of a bit source.
///
/// Integers are taken as-is; strings and characters are parsed as decimal
/// integers. Whether the value is actually 0 or 1 is checked by the caller.
pub trait BitElement {
    /// Reads the element as an integer, or `None` if it is not one.
    fn to_integer(&self) -> Option<i128>;
}

macro_rules! impl_bit_element_int {
    ($($t:ty),*) => {
        $(
            impl BitElement for $t {
                fn to_integer(&self) -> Option<i128> {
                    Some(*self as i128)
                }
            }
        )*
    };
}

impl_bit_element_int!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl BitElement for bool {
    fn to_integer(&self) -> Option<i128> {
        Some(i128::from(*self))
    }
}

impl BitElement for char {
    fn to_integer(&self) -> Option<i128> {
        self.to_digit(10).map(i128::from)
    }
}

impl BitElement for str {
    fn to_integer(&self) -> Option<i128> {
        self.trim().parse().ok()
    }
}

impl BitElement for String {
    fn to_integer(&self) -> Option<i128> {
        self.as_str().to_integer()
    }
}

impl<T: BitElement + ?Sized> BitElement for &T {
    fn to_integer(&self) -> Option<i128> {
        (**self).to_integer()
    }
}

/// Direction of a circular [BitSequence::shift].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Left,
    Right,
}

impl Direction {
    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl FromStr for Direction {
    type Err = SequenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            other => Err(SequenceError::InvalidArgument(format!(
                "{other:?} is not a valid direction, expected 'left' or 'right'"
            ))),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => f.write_str("left"),
            Direction::Right => f.write_str("right"),
        }
    }
}

/// Display policy for long sequences.
///
/// Sequences longer than `threshold` bits render as the first `edge` digits,
/// `...`, and the last `edge` digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preview {
    pub threshold: usize,
    pub edge: usize,
}

impl Default for Preview {
    fn default() -> Self {
        Preview {
            threshold: 64,
            edge: 32,
        }
    }
}

impl Preview {
    /// A policy that never truncates.
    pub const fn full() -> Self {
        Preview {
            threshold: usize::MAX,
            edge: 0,
        }
    }

    /// Applies the policy to a digit string.
    pub fn render(&self, digits: &str) -> String {
        if digits.len() <= self.threshold {
            return digits.to_string();
        }

        let edge = self.edge.min(digits.len());
        format!("{}...{}", &digits[..edge], &digits[digits.len() - edge..])
    }
}

/// Immutable, non-empty ordered sequence of bits.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitSequence {
    bits: Vec<u8>,
}

impl BitSequence {
    /// Builds a sequence from any bit source.
    ///
    /// Fails with [SequenceError::InvalidInput] if the source is empty,
    /// [SequenceError::TypeConversion] if an element is not an integer, and
    /// [SequenceError::InvalidBit] if an integer is neither 0 nor 1.
    pub fn from_elements<I>(elements: I) -> Result<Self, SequenceError>
    where
        I: IntoIterator,
        I::Item: BitElement,
    {
        let values = elements
            .into_iter()
            .enumerate()
            .map(|(index, element)| {
                element
                    .to_integer()
                    .ok_or(SequenceError::TypeConversion { index })
            })
            .collect::<Result<Vec<i128>, _>>()?;

        if values.is_empty() {
            return Err(SequenceError::InvalidInput);
        }

        let bits = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| match value {
                0 => Ok(0),
                1 => Ok(1),
                _ => Err(SequenceError::InvalidBit { index, value }),
            })
            .collect::<Result<Vec<u8>, _>>()?;

        Ok(Self { bits })
    }

    /// Wraps bits already known to be non-empty and 0/1 only.
    pub(crate) fn from_valid_bits(bits: Vec<u8>) -> Self {
        debug_assert!(!bits.is_empty() && bits.iter().all(|&bit| bit <= 1));
        Self { bits }
    }

    /// Rebuilds a sequence from the trailing `len` bits of a big-endian buffer,
    /// the inverse of [BitSequence::as_bytes].
    pub fn from_bytes(data: &[u8], len: usize) -> Result<Self, SequenceError> {
        if len == 0 {
            return Err(SequenceError::InvalidInput);
        }

        let bits = bits::bytes_to_bits(data, len).ok_or_else(|| {
            SequenceError::InvalidArgument(format!(
                "cannot read {len} bits from {} bytes",
                data.len()
            ))
        })?;

        Ok(Self { bits })
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Always `false`; construction rejects empty sources.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Bit at `index`, or `None` past the end.
    pub fn bit(&self, index: usize) -> Option<u8> {
        self.bits.get(index).copied()
    }

    /// New sequence covering `range`.
    pub fn slice<R>(&self, range: R) -> Result<Self, SequenceError>
    where
        R: SliceIndex<[u8], Output = [u8]>,
    {
        let bits = self.bits.get(range).ok_or_else(|| {
            SequenceError::InvalidArgument(format!(
                "slice range out of bounds for sequence of length {}",
                self.len()
            ))
        })?;

        Self::from_elements(bits)
    }

    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, u8>> {
        self.bits.iter().copied()
    }

    pub fn as_bits(&self) -> &[u8] {
        &self.bits
    }

    pub fn into_bits(self) -> Vec<u8> {
        self.bits
    }

    /// Canonical digit string, no padding.
    pub fn bit_string(&self) -> String {
        self.bits
            .iter()
            .map(|&bit| if bit == 1 { '1' } else { '0' })
            .collect()
    }

    /// Digit string rendered with the given display policy.
    pub fn preview(&self, policy: &Preview) -> String {
        policy.render(&self.bit_string())
    }

    /// Big-endian byte packing, left-zero-padded to a whole number of bytes.
    pub fn as_bytes(&self) -> Vec<u8> {
        bits::bits_to_bytes(&self.bits)
    }

    /// Lowercase hex of [BitSequence::as_bytes].
    pub fn hex_string(&self) -> String {
        hex::encode(self.as_bytes())
    }

    /// Maps 1 to +1 and 0 to -1.
    pub fn signed(&self) -> Vec<i8> {
        self.bits
            .iter()
            .map(|&bit| if bit == 1 { 1 } else { -1 })
            .collect()
    }

    pub fn ones(&self) -> usize {
        self.bits.iter().filter(|&&bit| bit == 1).count()
    }

    pub fn zeros(&self) -> usize {
        self.len() - self.ones()
    }

    /// Proportion of ones, rounded to 3 decimals.
    pub fn balance(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }

        bits::round_to(self.ones() as f64 / self.len() as f64, 3)
    }

    /// Shannon entropy of the 1/0 proportion in bits per symbol, rounded to 5 decimals.
    ///
    /// 0.0 for an all-zero or all-one sequence, 1.0 for a perfectly balanced one.
    pub fn entropy(&self) -> f64 {
        bits::round_to(bits::binary_entropy(self.ones(), self.len()), 5)
    }

    /// Repeats the sequence circularly and truncates it to exactly `n` bits.
    pub fn to_length(&self, n: usize) -> Result<Self, SequenceError> {
        if n == 0 {
            return Err(SequenceError::InvalidArgument(
                "target length must be positive".to_string(),
            ));
        }

        let bits = self.bits.iter().copied().cycle().take(n).collect();
        Ok(Self { bits })
    }

    /// Circular shift by `n` positions.
    ///
    /// A negative `n` shifts the other way by `|n|`.
    pub fn shift(&self, n: i64, direction: Direction) -> Self {
        if self.is_empty() {
            return self.clone();
        }

        let (n, direction) = if n < 0 {
            (n.unsigned_abs(), direction.reversed())
        } else {
            (n.unsigned_abs(), direction)
        };
        let n = (n % self.len() as u64) as usize;

        let mut bits = self.bits.clone();
        match direction {
            Direction::Left => bits.rotate_left(n),
            Direction::Right => bits.rotate_right(n),
        }

        Self { bits }
    }
}

impl Index<usize> for BitSequence {
    type Output = u8;

    fn index(&self, index: usize) -> &Self::Output {
        &self.bits[index]
    }
}

impl<'a> IntoIterator for &'a BitSequence {
    type Item = u8;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, u8>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromStr for BitSequence {
    type Err = SequenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_elements(s.chars())
    }
}

impl TryFrom<&str> for BitSequence {
    type Error = SequenceError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl<T: BitElement> TryFrom<&[T]> for BitSequence {
    type Error = SequenceError;

    fn try_from(value: &[T]) -> Result<Self, Self::Error> {
        Self::from_elements(value)
    }
}

impl<T: BitElement> TryFrom<Vec<T>> for BitSequence {
    type Error = SequenceError;

    fn try_from(value: Vec<T>) -> Result<Self, Self::Error> {
        Self::from_elements(value)
    }
}

impl<T: BitElement, const N: usize> TryFrom<[T; N]> for BitSequence {
    type Error = SequenceError;

    fn try_from(value: [T; N]) -> Result<Self, Self::Error> {
        Self::from_elements(value)
    }
}

impl fmt::Display for BitSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.preview(&Preview::default()))
    }
}

impl fmt::Debug for BitSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitSequence(length={}, preview='{}')", self.len(), self)
    }
}
