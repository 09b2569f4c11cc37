use serde::{Deserialize, Deserializer};

/// Deserializes a value, treating an explicit `null` as `T::default()`.
/// Square sends `null` for empty lists on several objects (e.g. an order's
/// `tenders`), where `#[serde(default)]` alone only covers a missing key.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
