use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::Address;
use crate::{
    endpoints::SquareEndpoint,
    error::{Error, Result},
    Client,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub created_at: Option<OffsetDateTime>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub updated_at: Option<OffsetDateTime>,
}

impl Customer {
    /// `given family`, skipping whichever part is missing.
    #[must_use]
    pub fn display_name(&self) -> String {
        [self.given_name.as_deref(), self.family_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Deserialize)]
struct GetResponse {
    customer: Option<Customer>,
}

/// Retrieve a single customer profile by its id.
#[instrument(skip(client))]
pub async fn get(client: &Client, customer_id: &str) -> Result<Customer> {
    let endpoint = SquareEndpoint::Customer(customer_id.to_string());
    let response: GetResponse = client.get_endpoint(endpoint.clone(), &()).await?;
    response.customer.ok_or_else(|| Error::NotFound {
        entity: "Customer".to_string(),
        url: endpoint.to_string(),
    })
}
