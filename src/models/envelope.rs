//! Response envelope shared by every backend endpoint.
//!
//! The backend wraps each payload as `{status, message, data}` where `status`
//! is `Success` or `fail`. The envelope is decoded exactly once here so the
//! rest of the crate pattern-matches on [`Envelope`] instead of probing fields.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;

use crate::gateway::errors::{GatewayError, GatewayResult};

/// Tagged backend response.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(tag = "status")]
pub enum Envelope<T> {
    #[serde(rename = "Success", alias = "success")]
    Success {
        #[serde(default)]
        message: String,
        #[serde(default = "Option::default")]
        data: Option<T>,
    },
    #[serde(rename = "fail", alias = "Fail", alias = "error")]
    Fail {
        #[serde(default)]
        message: String,
        #[serde(
            rename = "errorCode",
            default,
            deserialize_with = "opt_string_or_number"
        )]
        error_code: Option<String>,
    },
}

impl<T> Envelope<T> {
    /// Converts the envelope into the payload, or a rejection for `fail`.
    pub fn into_result(self) -> GatewayResult<Option<T>> {
        match self {
            Envelope::Success { data, .. } => Ok(data),
            Envelope::Fail {
                message,
                error_code,
            } => Err(GatewayError::Rejected {
                message,
                code: error_code,
            }),
        }
    }
}

/// Parses a response body into its payload.
pub fn decode<T: DeserializeOwned>(body: &str) -> GatewayResult<Option<T>> {
    let envelope: Envelope<T> =
        serde_json::from_str(body).map_err(|e| GatewayError::Decode(e.to_string()))?;
    envelope.into_result()
}

/// Payload the backend sends either as a list or, for single matches, as one object.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        match value {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

/// Decodes a listing payload; `null` or missing data is an empty listing.
pub fn decode_listing<T: DeserializeOwned>(body: &str) -> GatewayResult<Vec<T>> {
    Ok(decode::<OneOrMany<T>>(body)?
        .map(Vec::from)
        .unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Integer(i64),
    Float(f64),
}

impl From<StringOrNumber> for String {
    fn from(value: StringOrNumber) -> Self {
        match value {
            StringOrNumber::String(s) => s,
            StringOrNumber::Integer(i) => i.to_string(),
            StringOrNumber::Float(f) => f.to_string(),
        }
    }
}

/// Accepts identifiers and years sent either as JSON strings or numbers.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer).map(String::from)
}

pub(crate) fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<StringOrNumber>::deserialize(deserializer)?.map(String::from))
}
