use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

pub mod customer;
pub mod invoice;
pub mod location;
pub mod money;
pub mod order;

/// A postal address as Square represents it on locations and customers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line_1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line_2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub administrative_district_level_1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Fields Square returned that this crate does not model, kept so a
/// re-serialized object matches what the API sent.
pub type Extra = serde_json::Map<String, serde_json::Value>;

/// A response body kept exactly as Square sent it, next to its typed view.
///
/// Serializing writes `raw` back out unchanged, so fields the typed model
/// skips, explicit nulls and timestamp precision all survive.
#[derive(Debug, Clone, PartialEq)]
pub struct Verbatim<T> {
    pub value: T,
    pub raw: Value,
}

impl<T: Default> Default for Verbatim<T> {
    fn default() -> Self {
        Self {
            value: T::default(),
            raw: Value::Object(Extra::new()),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Verbatim<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        let value = T::deserialize(&raw).map_err(serde::de::Error::custom)?;
        Ok(Self { value, raw })
    }
}

impl<T> Serialize for Verbatim<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}
