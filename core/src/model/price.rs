// panier/src/model/price.rs

//! Serde adapter for `BigDecimal` prices.
//!
//! Prices are written as plain JSON numbers carrying the exact decimal text,
//! so what is read back equals what was written. On read both numbers and
//! numeric strings are accepted, since catalog payloads are not consistent
//! about it.
//!
//! Exactness relies on serde_json's `arbitrary_precision` feature; without it
//! numbers would pass through `f64`.

use bigdecimal::BigDecimal;
use serde::{de, ser, Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPrice {
  Number(serde_json::Number),
  Text(String),
}

pub fn serialize<S>(value: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error>
where
  S: Serializer,
{
  let number = serde_json::Number::from_str(&value.to_string())
    .map_err(|e| ser::Error::custom(format!("price {} is not representable as a JSON number: {}", value, e)))?;
  number.serialize(serializer)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
where
  D: Deserializer<'de>,
{
  let text = match RawPrice::deserialize(deserializer)? {
    RawPrice::Number(n) => n.to_string(),
    RawPrice::Text(s) => s,
  };
  BigDecimal::from_str(text.trim()).map_err(|e| de::Error::custom(format!("invalid price '{}': {}", text, e)))
}
