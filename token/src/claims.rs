//! Token claims: a closed set of scalar values keyed by name.

use crate::error::{TokenError, TokenResult};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Issued-at claim, epoch seconds. Written by the encoder.
pub const ISSUED_AT: &str = "iat";

/// Expiration claim, epoch seconds. Written by the encoder.
pub const EXPIRATION: &str = "exp";

/// Claims the encoder owns; caller-supplied values under these keys are replaced.
pub const RESERVED_CLAIMS: [&str; 2] = [ISSUED_AT, EXPIRATION];

/// A single claim value.
///
/// Only JSON scalars travel in a token. Arrays, objects and `null` are
/// rejected when a payload is decoded.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub enum ClaimValue {
    /// JSON integer
    Int(i64),
    /// JSON number with a fractional part or outside the `i64` range
    Float(f64),
    /// JSON boolean
    Bool(bool),
    /// JSON string
    Str(String),
}

impl ClaimValue {
    /// Integer value, if this is an integer
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ClaimValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric value as `f64`; integers are widened
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ClaimValue::Float(v) => Some(*v),
            ClaimValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Boolean value, if this is a boolean
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ClaimValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// String value, if this is a string
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ClaimValue::Str(v) => Some(v),
            _ => None,
        }
    }

    /// Reject values JSON cannot carry. `serde_json` would silently write
    /// NaN and the infinities as `null`.
    pub(crate) fn ensure_encodable(&self, key: &str) -> TokenResult<()> {
        match self {
            ClaimValue::Float(v) if !v.is_finite() => Err(TokenError::invalid_claim(&format!(
                "claim '{key}' is not a finite number"
            ))),
            _ => Ok(()),
        }
    }
}

impl TryFrom<Value> for ClaimValue {
    type Error = TokenError;

    fn try_from(value: Value) -> TokenResult<Self> {
        match value {
            Value::Bool(b) => Ok(ClaimValue::Bool(b)),
            Value::String(s) => Ok(ClaimValue::Str(s)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(ClaimValue::Int(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(ClaimValue::Float(f))
                } else {
                    Err(TokenError::structure("unrepresentable number"))
                }
            }
            Value::Null => Err(TokenError::structure("null claim value")),
            Value::Array(_) => Err(TokenError::structure("array claim value")),
            Value::Object(_) => Err(TokenError::structure("object claim value")),
        }
    }
}

impl Serialize for ClaimValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ClaimValue::Int(v) => serializer.serialize_i64(*v),
            ClaimValue::Float(v) => serializer.serialize_f64(*v),
            ClaimValue::Bool(v) => serializer.serialize_bool(*v),
            ClaimValue::Str(v) => serializer.serialize_str(v),
        }
    }
}

impl fmt::Display for ClaimValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClaimValue::Int(v) => write!(f, "{v}"),
            ClaimValue::Float(v) => write!(f, "{v}"),
            ClaimValue::Bool(v) => write!(f, "{v}"),
            ClaimValue::Str(v) => f.write_str(v),
        }
    }
}

impl From<i64> for ClaimValue {
    fn from(v: i64) -> Self {
        ClaimValue::Int(v)
    }
}

impl From<i32> for ClaimValue {
    fn from(v: i32) -> Self {
        ClaimValue::Int(i64::from(v))
    }
}

impl From<u32> for ClaimValue {
    fn from(v: u32) -> Self {
        ClaimValue::Int(i64::from(v))
    }
}

impl From<f64> for ClaimValue {
    fn from(v: f64) -> Self {
        ClaimValue::Float(v)
    }
}

impl From<bool> for ClaimValue {
    fn from(v: bool) -> Self {
        ClaimValue::Bool(v)
    }
}

impl From<&str> for ClaimValue {
    fn from(v: &str) -> Self {
        ClaimValue::Str(v.to_string())
    }
}

impl From<String> for ClaimValue {
    fn from(v: String) -> Self {
        ClaimValue::Str(v)
    }
}

/// Claim set carried in a token payload.
///
/// Backed by a sorted map, so the encoded payload is deterministic for a
/// given set of claims. Key order is still not part of the wire contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(BTreeMap<String, ClaimValue>);

impl Claims {
    /// Empty claim set
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Add a claim, builder style
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ClaimValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a claim, returning the previous value
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ClaimValue>,
    ) -> Option<ClaimValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Remove a claim
    pub fn remove(&mut self, key: &str) -> Option<ClaimValue> {
        self.0.remove(key)
    }

    /// Look up a claim
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ClaimValue> {
        self.0.get(key)
    }

    /// Whether a claim is present
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of claims
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over claims in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ClaimValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Copy of these claims without `iat` and `exp`
    #[must_use]
    pub fn without_reserved(&self) -> Claims {
        self.iter()
            .filter(|(k, _)| !RESERVED_CLAIMS.contains(k))
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    /// Build a claim set from a decoded JSON object, rejecting non-scalar values
    pub(crate) fn from_json_object(object: serde_json::Map<String, Value>) -> TokenResult<Self> {
        let mut claims = BTreeMap::new();
        for (key, value) in object {
            let value = ClaimValue::try_from(value).map_err(|e| match e {
                TokenError::Structure(msg) => {
                    TokenError::Structure(format!("claim '{key}': {msg}"))
                }
                other => other,
            })?;
            claims.insert(key, value);
        }
        Ok(Self(claims))
    }
}

impl From<BTreeMap<String, ClaimValue>> for Claims {
    fn from(map: BTreeMap<String, ClaimValue>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<ClaimValue>> FromIterator<(K, V)> for Claims {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl IntoIterator for Claims {
    type Item = (String, ClaimValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, ClaimValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
