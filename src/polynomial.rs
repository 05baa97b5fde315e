//! Feedback polynomials over GF(2) and initial register fills.
//!
//! Polynomials are written as `x^m + x^k1 + ... + 1`: terms in strictly
//! descending degree, `x` standing for degree 1, and the constant term
//! spelled `1` (never `x^0`). Whitespace is ignored.

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use crate::errors::{FillError, PolynomialError};

/// A validated feedback polynomial.
///
/// Equality and hashing look at the degrees only, so `x^3+x+1` and
/// `x^3 + x + 1` are the same polynomial.
#[derive(Debug, Clone)]
pub struct Polynomial {
    text: String,
    /// Strictly descending, ending in 0.
    degrees: Vec<u32>,
}

enum Term<'a> {
    Power(u32),
    /// Well-formed power whose degree overflows `u32`.
    Oversized(&'a str),
    Constant,
}

fn parse_term(token: &str) -> Option<Term<'_>> {
    if token == "1" {
        return Some(Term::Constant);
    }

    let rest = token.strip_prefix('x')?;
    if rest.is_empty() {
        return Some(Term::Power(1));
    }

    let digits = rest.strip_prefix('^')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    Some(digits.parse().map_or(Term::Oversized(digits), Term::Power))
}

impl Polynomial {
    /// Parses and validates `text`.
    ///
    /// Checks run in a fixed order: grammar, duplicate degrees, descending
    /// order, degree bounds, constant term, and finally the
    /// presence of at least one tap.
    pub fn parse(text: &str) -> Result<Self, PolynomialError> {
        let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        let malformed = || PolynomialError::MalformedExpression {
            text: text.to_string(),
        };

        let tokens: Vec<&str> = compact.split('+').collect();
        let (last, powers) = tokens.split_last().ok_or_else(malformed)?;

        let mut degrees = Vec::with_capacity(tokens.len());
        let mut oversized = None;
        for token in powers {
            match parse_term(token) {
                Some(Term::Power(degree)) => degrees.push(degree),
                Some(Term::Oversized(digits)) => {
                    oversized.get_or_insert(digits);
                }
                _ => return Err(malformed()),
            }
        }

        let has_constant = match parse_term(last) {
            Some(Term::Constant) if !powers.is_empty() => true,
            Some(Term::Power(degree)) => {
                degrees.push(degree);
                false
            }
            Some(Term::Oversized(digits)) => {
                oversized.get_or_insert(digits);
                false
            }
            _ => return Err(malformed()),
        };

        if let Some(digits) = oversized {
            return Err(PolynomialError::DegreeTooLarge(digits.to_string()));
        }

        if degrees.contains(&0) {
            return Err(malformed());
        }

        if has_constant {
            degrees.push(0);
        }

        for (i, degree) in degrees.iter().enumerate() {
            if degrees[..i].contains(degree) {
                return Err(PolynomialError::DuplicateTerm(*degree));
            }
        }

        if degrees.windows(2).any(|pair| pair[0] < pair[1]) {
            return Err(PolynomialError::OrderViolation(degrees));
        }

        let m = degrees[0];
        if m < 2 {
            return Err(PolynomialError::DegreeTooSmall(m));
        }

        if !has_constant {
            return Err(PolynomialError::MissingConstantTerm);
        }

        if degrees.len() < 3 {
            return Err(PolynomialError::InsufficientTaps);
        }

        Ok(Self {
            text: text.to_string(),
            degrees,
        })
    }

    /// The text this polynomial was parsed from, unchanged.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// All degrees, descending, ending with the constant term's 0.
    pub fn degrees(&self) -> &[u32] {
        &self.degrees
    }

    /// Top degree `m`, which is also the register length.
    pub fn degree(&self) -> u32 {
        self.degrees[0]
    }

    /// Degrees strictly between the top degree and the constant term.
    pub fn taps(&self) -> &[u32] {
        &self.degrees[1..self.degrees.len() - 1]
    }
}

impl PartialEq for Polynomial {
    fn eq(&self, other: &Self) -> bool {
        self.degrees == other.degrees
    }
}

impl Eq for Polynomial {}

impl Hash for Polynomial {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.degrees.hash(state);
    }
}

impl FromStr for Polynomial {
    type Err = PolynomialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, degree) in self.degrees.iter().enumerate() {
            if i > 0 {
                f.write_str("+")?;
            }
            match degree {
                0 => f.write_str("1")?,
                1 => f.write_str("x")?,
                d => write!(f, "x^{d}")?,
            }
        }

        Ok(())
    }
}

/// Checks an initial register fill against register length `m`.
pub fn validate_fill(m: usize, fill: &str) -> Result<&str, FillError> {
    if fill.is_empty() || !fill.bytes().all(|b| b == b'0' || b == b'1') {
        return Err(FillError::NonBinaryFill(fill.to_string()));
    }

    if fill.bytes().all(|b| b == b'0') {
        return Err(FillError::AllZeroFill);
    }

    if fill.len() != m {
        return Err(FillError::FillLengthMismatch {
            expected: m,
            got: fill.len(),
        });
    }

    Ok(fill)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_parse_degrees() {
        let cases: [(&str, &[u32]); 4] = [
            ("x^5 + x^3 + x + 1", &[5, 3, 1, 0]),
            ("x^3+x+1", &[3, 1, 0]),
            ("x^2+x+1", &[2, 1, 0]),
            ("x^4+x^2+1", &[4, 2, 0]),
        ];

        for (text, expected) in cases {
            let poly = Polynomial::parse(text).unwrap();
            assert_eq!(poly.degrees(), expected, "{text}");
        }
    }

    #[test]
    fn test_degree_and_taps() {
        let poly = Polynomial::parse("x^5 + x^3 + x + 1").unwrap();
        assert_eq!(poly.degree(), 5);
        assert_eq!(poly.taps(), &[3, 1]);
    }

    #[test]
    fn test_keeps_text() {
        let poly: Polynomial = "x^5 + x^3 + x + 1".parse().unwrap();
        assert_eq!(poly.text(), "x^5 + x^3 + x + 1");
        assert_eq!(poly.to_string(), "x^5+x^3+x+1");
    }

    #[test]
    fn test_whitespace_ignored() {
        let poly = Polynomial::parse(" x ^ 4\t+ x^3 +\n1 ").unwrap();
        assert_eq!(poly.degrees(), &[4, 3, 0]);
    }

    #[test]
    fn test_malformed() {
        for text in ["x^3+x4+1", "x^3+x-1", "", "+x^3+x+1", "x^3++x+1", "x^+x+1", "y^3+y+1", "1", "x^3+1+1"] {
            assert!(
                matches!(
                    Polynomial::parse(text),
                    Err(PolynomialError::MalformedExpression { .. })
                ),
                "{text:?}"
            );
        }
    }

    #[test]
    fn test_x_zero_rejected() {
        assert!(matches!(
            Polynomial::parse("x^3+x^0+1"),
            Err(PolynomialError::MalformedExpression { .. })
        ));
    }

    #[test]
    fn test_duplicate() {
        assert_eq!(
            Polynomial::parse("x^3+x^3+1").unwrap_err(),
            PolynomialError::DuplicateTerm(3)
        );
        assert_eq!(
            Polynomial::parse("x^1+x+1").unwrap_err(),
            PolynomialError::DuplicateTerm(1)
        );
    }

    #[test]
    fn test_order() {
        assert_eq!(
            Polynomial::parse("x+x^3+1").unwrap_err(),
            PolynomialError::OrderViolation(vec![1, 3, 0])
        );
    }

    #[test]
    fn test_degree_too_small() {
        assert_eq!(
            Polynomial::parse("x+1").unwrap_err(),
            PolynomialError::DegreeTooSmall(1)
        );
    }

    #[test]
    fn test_large_degree_accepted() {
        let poly = Polynomial::parse("x^64+x+1").unwrap();
        assert_eq!(poly.degrees(), &[64, 1, 0]);
    }

    #[test]
    fn test_degree_overflow() {
        assert_eq!(
            Polynomial::parse("x^4294967296+x+1").unwrap_err(),
            PolynomialError::DegreeTooLarge("4294967296".to_string())
        );
        assert_eq!(
            Polynomial::parse("x^5+x^4294967296").unwrap_err(),
            PolynomialError::DegreeTooLarge("4294967296".to_string())
        );
    }

    #[test]
    fn test_degree_overflow_after_grammar() {
        assert!(matches!(
            Polynomial::parse("x^4294967296+y+1"),
            Err(PolynomialError::MalformedExpression { .. })
        ));
    }

    #[test]
    fn test_eq_ignores_spelling() {
        let compact = Polynomial::parse("x^3+x+1").unwrap();
        let spaced = Polynomial::parse("x^3 + x^1 + 1").unwrap();
        assert_eq!(compact, spaced);
        assert_ne!(compact.text(), spaced.text());
        assert_ne!(compact, Polynomial::parse("x^3+x^2+1").unwrap());

        let set: HashSet<Polynomial> = [compact, spaced].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_missing_constant() {
        assert_eq!(
            Polynomial::parse("x^3+x").unwrap_err(),
            PolynomialError::MissingConstantTerm
        );
    }

    #[test]
    fn test_insufficient_taps() {
        assert_eq!(
            Polynomial::parse("x^3+1").unwrap_err(),
            PolynomialError::InsufficientTaps
        );
    }

    #[test]
    fn test_validate_fill() {
        assert_eq!(validate_fill(3, "001"), Ok("001"));
    }

    #[test]
    fn test_validate_fill_non_binary() {
        assert_eq!(
            validate_fill(3, "0a1"),
            Err(FillError::NonBinaryFill("0a1".to_string()))
        );
        assert_eq!(
            validate_fill(3, ""),
            Err(FillError::NonBinaryFill(String::new()))
        );
    }

    #[test]
    fn test_validate_fill_all_zero() {
        assert_eq!(validate_fill(3, "000"), Err(FillError::AllZeroFill));
    }

    #[test]
    fn test_validate_fill_length() {
        assert_eq!(
            validate_fill(3, "01"),
            Err(FillError::FillLengthMismatch {
                expected: 3,
                got: 2
            })
        );
    }
}
