//! Serde helper modules for amounts.
//!
//! Amounts routinely exceed the range of TOML integers, so they are written
//! as strings, either decimal or `0x`-prefixed hex.  Small plain integers are
//! accepted too.
//!
//! `U256`'s own serde impl reads those forms as well.  These helpers exist
//! for two things it does not do: reading `_` digit separators in wei
//! amounts, and writing amounts back as decimal rather than hex.

use std::{fmt, str::FromStr};

use serde::{
    de::{Error, Visitor},
    Deserializer, Serializer,
};
use tandem_primitives::U256;

/// Serialize/deserialize [`U256`] as a decimal string.
pub mod serde_u256 {
    use super::*;

    pub fn serialize<S: Serializer>(v: &U256, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&v.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<U256, D::Error> {
        d.deserialize_any(U256Visitor)
    }
}

struct U256Visitor;

impl<'de> Visitor<'de> for U256Visitor {
    type Value = U256;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal or 0x-prefixed hex string, or a non-negative integer")
    }

    fn visit_u64<E: Error>(self, v: u64) -> Result<U256, E> {
        Ok(U256::from(v))
    }

    fn visit_i64<E: Error>(self, v: i64) -> Result<U256, E> {
        u64::try_from(v)
            .map(U256::from)
            .map_err(|_| E::custom(format!("negative amount {v}")))
    }

    fn visit_str<E: Error>(self, v: &str) -> Result<U256, E> {
        parse_u256(v).map_err(E::custom)
    }
}

/// Parses a decimal or `0x`-prefixed hex amount, ignoring `_` separators.
pub fn parse_u256(s: &str) -> Result<U256, String> {
    let cleaned: String = s.trim().chars().filter(|c| *c != '_').collect();
    let res = match cleaned.strip_prefix("0x") {
        Some(hex) => U256::from_str_radix(hex, 16),
        None => U256::from_str(&cleaned),
    };
    res.map_err(|e| format!("invalid amount {s:?}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        assert_eq!(parse_u256("1000").unwrap(), U256::from(1000));
        assert_eq!(parse_u256("0x10").unwrap(), U256::from(16));
        assert_eq!(
            parse_u256("1_000_000_000_000_000_000_000_000").unwrap(),
            U256::from(10u64).pow(U256::from(24))
        );
        assert!(parse_u256("-3").is_err());
        assert!(parse_u256("ten").is_err());
    }
}
