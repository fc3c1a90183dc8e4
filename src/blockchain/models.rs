// src/blockchain/models.rs
use std::fmt;
use std::str::FromStr;

use ethers_core::types::U256;
use serde::{ser::Error as _, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

// --- Error types for the contract query client ---

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("request to Stacks API failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Stacks API returned {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("invalid JSON from Stacks API: {0}")]
    InvalidBody(#[from] serde_json::Error),
}

// --- Decoder models ---

/// Decoded, non-negative value of a read-only contract call.
///
/// Backed by a 256-bit integer so any numeric literal the API can send is
/// held without precision loss.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct CanonicalCount(pub U256);

impl CanonicalCount {
    pub fn zero() -> Self {
        Self(U256::zero())
    }

    /// Parses a run of ASCII decimal digits. `None` when it does not fit in 256 bits.
    pub fn from_decimal(digits: &str) -> Option<Self> {
        U256::from_dec_str(digits).ok().map(Self)
    }

    pub fn as_u64(&self) -> Option<u64> {
        if self.0 <= U256::from(u64::MAX) {
            Some(self.0.low_u64())
        } else {
            None
        }
    }
}

impl From<u64> for CanonicalCount {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl From<u128> for CanonicalCount {
    fn from(value: u128) -> Self {
        Self(U256::from(value))
    }
}

impl fmt::Display for CanonicalCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Always a JSON number, never the hex string ethers uses for U256.
impl Serialize for CanonicalCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 <= U256::from(u128::MAX) {
            serializer.serialize_u128(self.0.as_u128())
        } else {
            serde_json::Number::from_str(&self.0.to_string())
                .map_err(S::Error::custom)?
                .serialize(serializer)
        }
    }
}

/// Which interpretation of the raw result produced the canonical value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Encoding {
    PrefixedInt,
    HexEncoded,
    BareNumeric,
    Unparseable,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Encoding::PrefixedInt => "prefixed-int",
            Encoding::HexEncoded => "hex-encoded",
            Encoding::BareNumeric => "bare-numeric",
            Encoding::Unparseable => "unparseable",
        };
        f.write_str(tag)
    }
}

/// Branch of the hex magnitude chain that produced a `HexEncoded` value.
/// Anything other than `Exact` is a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HexHeuristic {
    Exact,
    Low64Bits,
    Modulo1000,
}

/// Result of decoding one raw `result` field.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeOutcome {
    pub count: CanonicalCount,
    pub encoding: Encoding,
    /// The untouched upstream value, kept for audit.
    pub raw: Value,
    pub heuristic: Option<HexHeuristic>,
    /// Set when the value came from the known-sentinel table.
    pub sentinel: bool,
}

impl DecodeOutcome {
    pub fn new(count: CanonicalCount, encoding: Encoding, raw: Value) -> Self {
        Self {
            count,
            encoding,
            raw,
            heuristic: None,
            sentinel: false,
        }
    }

    pub fn unparseable(raw: Value) -> Self {
        Self::new(CanonicalCount::zero(), Encoding::Unparseable, raw)
    }

    /// True when the count cannot be trusted blindly.
    pub fn is_suspect(&self) -> bool {
        self.encoding == Encoding::Unparseable
            || matches!(
                self.heuristic,
                Some(HexHeuristic::Low64Bits) | Some(HexHeuristic::Modulo1000)
            )
    }
}

// --- API response models ---

/// Body returned by `GET /get-count`.
#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: CanonicalCount,
    pub raw_debug: Value,
    pub encoding: Encoding,
}

impl From<DecodeOutcome> for CountResponse {
    fn from(outcome: DecodeOutcome) -> Self {
        Self {
            count: outcome.count,
            raw_debug: outcome.raw,
            encoding: outcome.encoding,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn count_serializes_as_json_number() {
        let body = serde_json::to_value(CountResponse {
            count: CanonicalCount::from(42u64),
            raw_debug: json!("u42"),
            encoding: Encoding::PrefixedInt,
        })
        .unwrap();
        assert_eq!(body, json!({"count": 42, "raw_debug": "u42", "encoding": "prefixed-int"}));
    }

    #[test]
    fn wide_count_keeps_every_digit() {
        let digits = "610126283889242664989830671125160403140615";
        let count = CanonicalCount::from_decimal(digits).unwrap();
        assert_eq!(serde_json::to_string(&count).unwrap(), digits);
        assert_eq!(count.as_u64(), None);
    }

    #[test]
    fn suspect_flags_guessed_hex_and_unparseable() {
        let mut outcome = DecodeOutcome::new(
            CanonicalCount::from(7u64),
            Encoding::HexEncoded,
            json!("0x01"),
        );
        outcome.heuristic = Some(HexHeuristic::Exact);
        assert!(!outcome.is_suspect());
        outcome.heuristic = Some(HexHeuristic::Modulo1000);
        assert!(outcome.is_suspect());
        assert!(DecodeOutcome::unparseable(json!("")).is_suspect());
    }
}
