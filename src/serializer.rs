//! The structured serializer used for bodies that are not text, bytes, streams or files.
//!
//! Structured values travel through [`serde_json::Value`], serde's self-describing data model,
//! so a [`Serializer`] only deals with the text format. Converting between `Value` and the
//! caller's Rust types happens in the facade, which keeps the trait dyn compatible and lets
//! one client instance serve every body type.

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::BoxError;

/// A text format for structured request and response bodies.
///
/// Implementations are shared by every in-flight request of a client, so both operations may
/// run concurrently.
///
/// Values cross this trait as [`serde_json::Value`], so every format is limited to that data
/// model even when the format itself is not JSON. Byte strings arrive as arrays of numbers,
/// map keys are always strings, integers beyond `i64`/`u64` lose precision, and format-specific
/// types such as YAML tags or CBOR tags have no representation. Formats that need those are
/// better sent as [`crate::Body::bytes`] and decoded from `Vec<u8>` by the caller.
///
/// ```
/// use easyquest::{BoxError, Serializer};
/// use serde_json::{Map, Value};
///
/// /// Flat `key=value` lines. Nested values are rejected.
/// #[derive(Debug)]
/// struct Lines;
///
/// impl Serializer for Lines {
///     fn serialize(&self, value: &Value) -> Result<String, BoxError> {
///         let map = value.as_object().ok_or("expected an object")?;
///         let mut out = String::new();
///         for (key, value) in map {
///             let value = value.as_str().ok_or("expected string values")?;
///             out.push_str(&format!("{key}={value}\n"));
///         }
///         Ok(out)
///     }
///
///     fn deserialize(&self, data: &str) -> Result<Value, BoxError> {
///         let mut map = Map::new();
///         for line in data.lines() {
///             let (key, value) = line.split_once('=').ok_or("missing '='")?;
///             map.insert(key.to_owned(), Value::String(value.to_owned()));
///         }
///         Ok(Value::Object(map))
///     }
/// }
///
/// let value = Lines.deserialize("user=john\n").unwrap();
/// assert_eq!(value["user"], "john");
/// assert_eq!(Lines.serialize(&value).unwrap(), "user=john\n");
/// assert!(Lines.serialize(&Value::Bool(true)).is_err());
/// ```
pub trait Serializer: Debug + Send + Sync + 'static {
    /// Renders a structured value as text.
    fn serialize(&self, value: &Value) -> Result<String, BoxError>;

    /// Parses text into a structured value.
    fn deserialize(&self, data: &str) -> Result<Value, BoxError>;
}

/// The default serializer, backed by `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl Serializer for JsonSerializer {
    fn serialize(&self, value: &Value) -> Result<String, BoxError> {
        Ok(serde_json::to_string(value)?)
    }

    fn deserialize(&self, data: &str) -> Result<Value, BoxError> {
        Ok(serde_json::from_str(data)?)
    }
}

/// Serializes any `Serialize` type through `serializer`.
pub fn to_text<T: Serialize + ?Sized>(
    serializer: &dyn Serializer,
    value: &T,
) -> Result<String, BoxError> {
    let value = serde_json::to_value(value)?;
    serializer.serialize(&value)
}

/// Deserializes text produced by `serializer` into `T`.
pub fn from_text<T: DeserializeOwned>(
    serializer: &dyn Serializer,
    data: &str,
) -> Result<T, BoxError> {
    let value = serializer.deserialize(data)?;
    Ok(serde_json::from_value(value)?)
}
