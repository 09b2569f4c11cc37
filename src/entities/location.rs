use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{Address, Extra};
use crate::{
    endpoints::SquareEndpoint,
    error::{Error, Result},
    utils::serde_helpers::null_as_default,
    Client,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Active,
    Inactive,
    #[serde(untagged)]
    Other(String),
}

/// A merchant's registered place of business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub created_at: Option<OffsetDateTime>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Location {
    /// One-line `<id> • <name>` summary used by the smoke test output.
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{} • {}", self.id, self.name.as_deref().unwrap_or_default())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub locations: Vec<Location>,
}

#[derive(Deserialize)]
struct GetResponse {
    location: Option<Location>,
}

/// Retrieve every location of the merchant that owns the access token.
#[instrument(skip(client))]
pub async fn list(client: &Client) -> Result<ListResponse> {
    client.get_endpoint(SquareEndpoint::Locations, &()).await
}

/// Retrieve a single location by its id.
#[instrument(skip(client))]
pub async fn get(client: &Client, location_id: &str) -> Result<Location> {
    let endpoint = SquareEndpoint::Location(location_id.to_string());
    let response: GetResponse = client.get_endpoint(endpoint.clone(), &()).await?;
    response.location.ok_or_else(|| Error::NotFound {
        entity: "Location".to_string(),
        url: endpoint.to_string(),
    })
}
