//! Maximal-length sequence generation with a linear-feedback shift register.
//!
//! The register is stored MSB-first: index 0 holds the bit that is emitted
//! next. On every step the tap for degree `k` is read from index `m - k - 1`,
//! XORed with the emitted bit, and fed in at the tail while the register
//! shifts left by one.

use log::{debug, trace};

use crate::{
    errors::{MSequenceError, SequenceError},
    polynomial::{Polynomial, validate_fill},
    sequence::BitSequence,
};

/// Largest degree whose full period [MSequence::generate_sequence] will
/// collect: `2^30 - 1` bits, one byte each. Larger generators can still be
/// driven with [MSequence::step] or [MSequence::generate_k_bits].
pub const MAX_PERIOD_DEGREE: u32 = 30;

/// LFSR-backed m-sequence generator.
///
/// Holds mutable state (the register and the log of emitted bits). Build or
/// clone one generator per independent stream.
#[derive(Debug, Clone)]
pub struct MSequence {
    polynomial: Polynomial,
    initial_fill: BitSequence,
    register: BitSequence,
    output: Vec<u8>,
}

impl MSequence {
    /// Builds a generator from polynomial text such as `"x^3+x+1"` and a
    /// binary fill such as `"001"` whose length equals the polynomial degree.
    pub fn new(polynomial: &str, initial_fill: &str) -> Result<Self, MSequenceError> {
        Self::with_polynomial(Polynomial::parse(polynomial)?, initial_fill)
    }

    /// Builds a generator from an already parsed polynomial.
    pub fn with_polynomial(
        polynomial: Polynomial,
        initial_fill: &str,
    ) -> Result<Self, MSequenceError> {
        let fill = validate_fill(polynomial.degree() as usize, initial_fill)?;
        let initial_fill: BitSequence = fill.parse()?;

        debug!(
            "m-sequence generator for {} (m={}, taps={:?}) with fill {}",
            polynomial,
            polynomial.degree(),
            polynomial.taps(),
            initial_fill.bit_string()
        );

        let mut generator = Self {
            register: initial_fill.clone(),
            polynomial,
            initial_fill,
            output: Vec::new(),
        };
        generator.reset();

        Ok(generator)
    }

    pub fn polynomial(&self) -> &Polynomial {
        &self.polynomial
    }

    /// Register length `m`.
    pub fn degree(&self) -> u32 {
        self.polynomial.degree()
    }

    pub fn tap_degrees(&self) -> &[u32] {
        self.polynomial.taps()
    }

    pub fn initial_fill(&self) -> &BitSequence {
        &self.initial_fill
    }

    /// Period of a maximal-length sequence, `2^m - 1`, or `None` when it
    /// does not fit in a `u64`.
    pub fn max_sequence_length(&self) -> Option<u64> {
        1u64.checked_shl(self.degree()).map(|p| p - 1)
    }

    pub fn current_register(&self) -> &BitSequence {
        &self.register
    }

    /// Every bit emitted since the last reset.
    pub fn running_output(&self) -> &[u8] {
        &self.output
    }

    /// Restores the initial fill and clears the output log.
    pub fn reset(&mut self) {
        trace!("reset register to {}", self.initial_fill.bit_string());
        self.register = self.initial_fill.clone();
        self.output.clear();
    }

    /// Advances the register by one position and returns the emitted bit.
    pub fn step(&mut self) -> u8 {
        let register = self.register.as_bits();
        let m = register.len();
        let out_bit = register[0];

        let feedback = self
            .polynomial
            .taps()
            .iter()
            .fold(out_bit, |fb, &k| fb ^ register[m - k as usize - 1]);

        let mut next = Vec::with_capacity(m);
        next.extend_from_slice(&register[1..]);
        next.push(feedback);

        self.register = BitSequence::from_valid_bits(next);
        self.output.push(out_bit);

        out_bit
    }

    /// Resets and generates one full period of `2^m - 1` bits.
    ///
    /// For a primitive polynomial the register ends back at the initial fill.
    /// Fails with [MSequenceError::PeriodTooLong] above [MAX_PERIOD_DEGREE],
    /// leaving the generator untouched.
    pub fn generate_sequence(&mut self) -> Result<BitSequence, MSequenceError> {
        let degree = self.degree();
        if degree > MAX_PERIOD_DEGREE {
            return Err(MSequenceError::PeriodTooLong {
                degree,
                max: MAX_PERIOD_DEGREE,
            });
        }

        self.reset();

        let period = (1u64 << degree) - 1;
        debug!("generating {} bits for {}", period, self.polynomial);

        let bits = (0..period).map(|_| self.step()).collect();
        Ok(BitSequence::from_valid_bits(bits))
    }

    /// Steps `n` times from the current register state.
    ///
    /// With `reset_on_finish` the register and output log are restored to the
    /// initial state afterwards; otherwise they stay advanced.
    pub fn generate_k_bits(
        &mut self,
        n: usize,
        reset_on_finish: bool,
    ) -> Result<BitSequence, SequenceError> {
        if n == 0 {
            return Err(SequenceError::InvalidArgument(
                "bit count must be positive".to_string(),
            ));
        }

        let bits = (0..n).map(|_| self.step()).collect();

        if reset_on_finish {
            self.reset();
        }

        Ok(BitSequence::from_valid_bits(bits))
    }

    /// Endless stream of output bits, driving [MSequence::step].
    pub fn bits(&mut self) -> Bits<'_> {
        Bits { generator: self }
    }
}

/// Iterator returned by [MSequence::bits].
pub struct Bits<'a> {
    generator: &'a mut MSequence,
}

impl Iterator for Bits<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generator.step())
    }
}
