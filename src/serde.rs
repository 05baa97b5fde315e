//! Serializable generator descriptions.
//!
//! These types describe a generator in data rather than code. They are
//! intended to be read from configuration (for example a JSON file listing
//! the polynomials used by an experiment) and then converted into core
//! `bseqgen` types.
//!
//! [BitSequence] serializes as its digit string and deserializes through the
//! validating constructor.

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::{errors::MSequenceError, m_sequence::MSequence, sequence::BitSequence};

/// Description of a single m-sequence generator.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct MSequenceDef {
    /// Feedback polynomial, e.g. `"x^5+x^3+x+1"`.
    pub polynomial: String,
    /// Initial register fill; length must equal the polynomial degree.
    pub initial_fill: String,
}

impl TryFrom<MSequenceDef> for MSequence {
    type Error = MSequenceError;

    fn try_from(value: MSequenceDef) -> Result<Self, Self::Error> {
        MSequence::new(&value.polynomial, &value.initial_fill)
    }
}

impl TryFrom<&MSequenceDef> for MSequence {
    type Error = MSequenceError;

    fn try_from(value: &MSequenceDef) -> Result<Self, Self::Error> {
        MSequence::new(&value.polynomial, &value.initial_fill)
    }
}

impl From<&MSequence> for MSequenceDef {
    fn from(value: &MSequence) -> Self {
        MSequenceDef {
            polynomial: value.polynomial().text().to_string(),
            initial_fill: value.initial_fill().bit_string(),
        }
    }
}

impl Serialize for BitSequence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.bit_string())
    }
}

impl<'de> Deserialize<'de> for BitSequence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let digits = String::deserialize(deserializer)?;
        digits.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_def_from_json() {
        let def: MSequenceDef =
            serde_json::from_str(r#"{"polynomial": "x^3+x+1", "initial_fill": "001"}"#).unwrap();
        let mut generator = MSequence::try_from(def).unwrap();
        assert_eq!(generator.generate_sequence().unwrap().bit_string(), "0010111");
    }

    #[test]
    fn test_def_invalid() {
        let def = MSequenceDef {
            polynomial: "x^3+1".to_string(),
            initial_fill: "001".to_string(),
        };
        assert!(MSequence::try_from(&def).is_err());
    }

    #[test]
    fn test_def_from_generator() {
        let generator = MSequence::new("x^5 + x^3 + x + 1", "00001").unwrap();
        let def = MSequenceDef::from(&generator);
        assert_eq!(def.polynomial, "x^5 + x^3 + x + 1");
        assert_eq!(def.initial_fill, "00001");
    }

    #[test]
    fn test_bit_sequence_serde() {
        let seq: BitSequence = "0010111".parse().unwrap();
        let json = serde_json::to_string(&seq).unwrap();
        assert_eq!(json, r#""0010111""#);
        assert_eq!(serde_json::from_str::<BitSequence>(&json).unwrap(), seq);
    }

    #[test]
    fn test_bit_sequence_deserialize_rejects_invalid() {
        assert!(serde_json::from_str::<BitSequence>(r#""0120""#).is_err());
        assert!(serde_json::from_str::<BitSequence>(r#""""#).is_err());
    }
}
