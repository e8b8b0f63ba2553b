//! Keystore record shape.
//!
//! A [`Keystore`] bundles a public key, a signature, and the message that was
//! signed. The field encodings are decided by whoever produces the record,
//! so each field is a [`FieldValue`] that carries strings, raw bytes, or any
//! other JSON value through unchanged. Nothing here checks lengths, encodings,
//! or signatures.

use crate::error::{AccountStateError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One loosely typed keystore field.
///
/// Serialized untagged: a JSON string is `Text`, an array of numbers in
/// `0..=255` is `Bytes`, and anything else is kept verbatim as `Json`.
/// Every JSON value maps to exactly one variant, including values built with
/// `FieldValue::from(Value)`, so a field equals itself after a JSON round
/// trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Text such as an address or a hex string.
    Text(String),

    /// Raw bytes.
    Bytes(Vec<u8>),

    /// Any other JSON shape.
    Json(JsonValue),
}

/// A JSON value that is neither a string nor a byte array.
///
/// Only obtainable through `FieldValue::from(Value)` or deserialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct JsonValue(Value);

impl JsonValue {
    /// The wrapped JSON.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

/// Bytes if `items` are all integers in `0..=255`. An empty array counts.
fn byte_array(items: &[Value]) -> Option<Vec<u8>> {
    items
        .iter()
        .map(|item| item.as_u64().and_then(|n| u8::try_from(n).ok()))
        .collect()
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(FieldValue::from)
    }
}

impl FieldValue {
    /// Build a `Text` field holding `0x`-prefixed lowercase hex.
    ///
    /// # Example
    ///
    /// ```
    /// use account_state::account::keystore::FieldValue;
    ///
    /// let field = FieldValue::from_hex_bytes(&[0xde, 0xad]);
    /// assert_eq!(field.as_text(), Some("0xdead"));
    /// ```
    pub fn from_hex_bytes(bytes: &[u8]) -> Self {
        FieldValue::Text(format!("0x{}", hex::encode(bytes)))
    }

    /// The text, if this field is `Text`.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The bytes, if this field is `Bytes`.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            FieldValue::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Whether the field carries no content.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(text) => text.is_empty(),
            FieldValue::Bytes(bytes) => bytes.is_empty(),
            FieldValue::Json(value) => value.as_value().is_null(),
        }
    }

    /// Decode the field as bytes.
    ///
    /// `Text` is read as hex with an optional `0x` prefix; `Bytes` is copied.
    ///
    /// # Errors
    ///
    /// Returns [`AccountStateError::ParseError`] for text that is not hex and
    /// for `Json` fields.
    ///
    /// # Example
    ///
    /// ```
    /// use account_state::account::keystore::FieldValue;
    ///
    /// let field = FieldValue::from("0x0102");
    /// assert_eq!(field.decode_hex().unwrap(), vec![1, 2]);
    /// ```
    pub fn decode_hex(&self) -> Result<Vec<u8>> {
        match self {
            FieldValue::Text(text) => {
                let digits = text
                    .strip_prefix("0x")
                    .or_else(|| text.strip_prefix("0X"))
                    .unwrap_or(text.as_str());
                hex::decode(digits)
                    .map_err(|e| AccountStateError::ParseError(format!("Invalid hex string: {}", e)))
            }
            FieldValue::Bytes(bytes) => Ok(bytes.clone()),
            FieldValue::Json(value) => Err(AccountStateError::ParseError(format!(
                "Cannot read {} as hex",
                value.as_value()
            ))),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        FieldValue::Text(text.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        FieldValue::Text(text)
    }
}

impl From<Vec<u8>> for FieldValue {
    fn from(bytes: Vec<u8>) -> Self {
        FieldValue::Bytes(bytes)
    }
}

impl From<&[u8]> for FieldValue {
    fn from(bytes: &[u8]) -> Self {
        FieldValue::Bytes(bytes.to_vec())
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => FieldValue::Text(text),
            Value::Array(items) => match byte_array(&items) {
                Some(bytes) => FieldValue::Bytes(bytes),
                None => FieldValue::Json(JsonValue(Value::Array(items))),
            },
            other => FieldValue::Json(JsonValue(other)),
        }
    }
}

/// A public key, a signature, and the signed message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keystore {
    /// Public key material.
    pub public_key: FieldValue,

    /// Signature over `message`.
    pub signature: FieldValue,

    /// The signed message.
    pub message: FieldValue,
}

impl Keystore {
    /// Create a keystore record.
    ///
    /// # Example
    ///
    /// ```
    /// use account_state::account::keystore::Keystore;
    ///
    /// let keystore = Keystore::new("pk1", "sig1", b"hello".to_vec());
    /// assert_eq!(keystore.public_key.as_text(), Some("pk1"));
    /// assert_eq!(keystore.message.as_bytes(), Some(&b"hello"[..]));
    /// ```
    pub fn new(
        public_key: impl Into<FieldValue>,
        signature: impl Into<FieldValue>,
        message: impl Into<FieldValue>,
    ) -> Self {
        Self {
            public_key: public_key.into(),
            signature: signature.into(),
            message: message.into(),
        }
    }

    /// Split into `(public_key, signature, message)`.
    pub fn into_parts(self) -> (FieldValue, FieldValue, FieldValue) {
        (self.public_key, self.signature, self.message)
    }

    /// Parse a record from JSON. Unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AccountStateError::JsonError`] when the input is not JSON or
    /// a field is missing.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(AccountStateError::JsonError)
    }

    /// Serialize to compact JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(AccountStateError::JsonError)
    }

    /// Serialize to indented JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(AccountStateError::JsonError)
    }
}
