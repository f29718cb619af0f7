//! Structured metadata attached to log records.
//!
//! [`DetailValue`] is a closed JSON-shaped tree. Maps are [`BTreeMap`]s, so
//! keys come out sorted and re-encoding the same logical map always yields the
//! same bytes.
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Text substituted for detail inputs of an unrecognised type.
pub const UNSUPPORTED_DETAIL: &str = "<unsupported log detail type>";

/// Detail map attached to a record.
pub type Details = BTreeMap<String, DetailValue>;

/// A JSON-serializable detail value.
///
/// Encoding is total: every variant has a JSON form. Non-finite floats encode
/// as `null`, which is what [`serde_json`] does for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DetailValue {
    /// JSON `null`.
    Null,
    /// JSON boolean.
    Boolean(bool),
    /// JSON integer.
    Integer(i64),
    /// JSON number with a fractional part.
    Float(f64),
    /// JSON string.
    String(String),
    /// JSON array.
    List(Vec<DetailValue>),
    /// JSON object.
    Map(Details),
}

impl DetailValue {
    /// Build a value from an untyped source.
    ///
    /// Only `String` and `&'static str` are recognised; an absent source
    /// becomes [`DetailValue::Null`]. Anything else is replaced by the
    /// [`UNSUPPORTED_DETAIL`] string instead of failing, so the record is
    /// still written. Use the typed `From` conversions for other shapes.
    #[must_use]
    pub fn from_any(source: Option<&dyn Any>) -> Self {
        let Some(value) = source else {
            return Self::Null;
        };
        if let Some(s) = value.downcast_ref::<String>() {
            Self::String(s.clone())
        } else if let Some(s) = value.downcast_ref::<&'static str>() {
            Self::String((*s).to_string())
        } else {
            Self::String(UNSUPPORTED_DETAIL.to_string())
        }
    }

    /// Encode as compact JSON bytes.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        // Every variant maps onto a JSON value and map keys are strings, so
        // the serializer has no failure path here.
        serde_json::to_vec(self).unwrap_or_else(|_| b"null".to_vec())
    }
}

impl From<&str> for DetailValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for DetailValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for DetailValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

macro_rules! from_integer {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for DetailValue {
                fn from(value: $ty) -> Self {
                    Self::Integer(i64::from(value))
                }
            }
        )+
    };
}

from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for DetailValue {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for DetailValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for DetailValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Self>> From<Vec<T>> for DetailValue {
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

impl From<Details> for DetailValue {
    fn from(value: Details) -> Self {
        Self::Map(value)
    }
}

impl From<serde_json::Value> for DetailValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Boolean(b),
            Value::Number(n) => n
                .as_i64()
                .map_or_else(|| n.as_f64().map_or(Self::Null, Self::Float), Self::Integer),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::List(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => Self::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect()),
        }
    }
}

/// Well-known detail keys.
///
/// Using these keeps the same piece of information under the same key across
/// components, while arbitrary string keys stay available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetailKey {
    /// Identifier of an account.
    Account,
    /// Identifier of the managed domain.
    Domain,
    /// HTTP entity tag.
    ETag,
    /// Local item identifier.
    Item,
    /// Name of a file or directory.
    Name,
    /// Server-side item identifier.
    OcId,
    /// Any relevant URL, e.g. of a network request.
    Url,
}

impl DetailKey {
    /// Key text as written into the record.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Account => "account",
            Self::Domain => "domain",
            Self::ETag => "eTag",
            Self::Item => "item",
            Self::Name => "name",
            Self::OcId => "ocId",
            Self::Url => "url",
        }
    }
}

impl fmt::Display for DetailKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<DetailKey> for String {
    fn from(key: DetailKey) -> Self {
        key.as_str().to_string()
    }
}

/// Build a [`Details`] map.
///
/// Keys may be anything convertible into `String` (including
/// [`DetailKey`]); values anything convertible into [`DetailValue`].
///
/// ```
/// use domainlog::details;
/// use domainlog::logging::DetailKey;
///
/// let d = details! { DetailKey::Domain => "abc", "attempt" => 3 };
/// assert_eq!(d.len(), 2);
/// ```
#[macro_export]
macro_rules! details {
    () => {
        $crate::logging::Details::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::logging::Details::new();
        $(
            map.insert(
                ::std::string::String::from($key),
                $crate::logging::DetailValue::from($value),
            );
        )+
        map
    }};
}
