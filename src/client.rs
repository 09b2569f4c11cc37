use core::fmt;

use reqwest::{header, Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing_error::SpanTrace;

use crate::config::AccessToken;
use crate::endpoints::{Environment, SquareEndpoint};
use crate::entities::{
    customer::{self, Customer},
    invoice,
    location::{self, Location},
    order::{self, Order},
    Verbatim,
};
use crate::error::{self, Error, Result};

/// The API version every request is pinned to.
pub const SQUARE_VERSION: &str = "2025-01-23";
const HEADER_SQUARE_VERSION: &str = "Square-Version";

#[derive(Clone, Debug)]
/// This is the client that is used for interacting with the Square API. It holds the
/// bearer token and the deployment every request is sent to.
pub struct Client {
    access_token: AccessToken,
    environment: Environment,
    http_client: reqwest::Client,
}

impl Client {
    /// Creates a client for `environment` authenticating with `access_token`.
    ///
    /// No timeout, pooling or retry policy is configured; reqwest's defaults apply.
    #[must_use]
    pub fn new(access_token: AccessToken, environment: Environment) -> Self {
        Self {
            access_token,
            environment,
            http_client: reqwest::Client::new(),
        }
    }

    /// The deployment this client sends requests to.
    #[must_use]
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Build a request object with authentication headers.
    pub(crate) fn build_request(
        &self,
        method: Method,
        endpoint: &SquareEndpoint,
    ) -> Result<RequestBuilder> {
        let url = endpoint.to_url(&self.environment)?;
        Ok(self
            .http_client
            .request(method, url)
            .bearer_auth(self.access_token.secret())
            .header(header::ACCEPT, "application/json")
            .header(HEADER_SQUARE_VERSION, SQUARE_VERSION))
    }

    /// Perform a `GET` request against the API using a typed `SquareEndpoint`.
    #[instrument(skip(self, query))]
    pub async fn get_endpoint<R: DeserializeOwned, T: Serialize + ?Sized + fmt::Debug>(
        &self,
        endpoint: SquareEndpoint,
        query: &T,
    ) -> Result<R> {
        trace!(?query, endpoint = ?endpoint, "making GET request with endpoint");
        let response = self
            .build_request(Method::GET, &endpoint)?
            .query(query)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Perform a `POST` request against the API using a typed `SquareEndpoint`.
    #[instrument(skip(self, data))]
    pub async fn post_endpoint<R: DeserializeOwned, T: Serialize + ?Sized + fmt::Debug>(
        &self,
        endpoint: SquareEndpoint,
        data: &T,
    ) -> Result<R> {
        trace!(?data, endpoint = ?endpoint, "making POST request with endpoint");
        let response = self
            .build_request(Method::POST, &endpoint)?
            .json(data)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    #[instrument(skip(response))]
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let url = response.url().to_string();
        let text = response.text().await?;

        parse_response(status, url, text)
    }

    /// Access the locations API
    #[must_use]
    pub fn locations(&self) -> LocationsApi<'_> {
        LocationsApi { client: self }
    }

    /// Access the invoices API
    #[must_use]
    pub fn invoices(&self) -> InvoicesApi<'_> {
        InvoicesApi { client: self }
    }

    /// Access the orders API
    #[must_use]
    pub fn orders(&self) -> OrdersApi<'_> {
        OrdersApi { client: self }
    }

    /// Access the customers API
    #[must_use]
    pub fn customers(&self) -> CustomersApi<'_> {
        CustomersApi { client: self }
    }
}

/// Turns a status and body into either the requested type or a Square error.
///
/// Every non-2xx status is a Square API error. Its `errors` array is empty
/// when the body is not an error document (e.g. a proxy's HTML page).
fn parse_response<T: DeserializeOwned>(
    status: StatusCode,
    url: String,
    text: String,
) -> Result<T> {
    let entity_type = std::any::type_name::<T>()
        .rsplit("::")
        .next()
        .unwrap_or("Unknown");
    debug!(%url, %status, entity_type, "response received");
    debug!("Response body size: {} bytes", text.len());
    trace!("Response text:\n{}", text);

    if !status.is_success() {
        error!("Unexpected status code: {}", status);
        let errors = serde_json::from_str::<error::Response>(&text)
            .map(|response| response.errors)
            .unwrap_or_default();
        return Err(Error::API {
            status_code: status,
            errors,
            url,
            response_body: Some(text),
            span_trace: SpanTrace::capture(),
        });
    }

    serde_json::from_str(&text).map_err(|e| {
        error!(
            "Deserialization error: {}, near position: {} - response text around that position: {}",
            e,
            e.column(),
            text.chars()
                .skip(e.column().saturating_sub(30))
                .take(100)
                .collect::<String>()
        );
        Error::DeserializationError(e, Some(text))
    })
}

/// API handler for Locations endpoints
#[derive(Debug)]
pub struct LocationsApi<'a> {
    client: &'a Client,
}

impl LocationsApi<'_> {
    /// Retrieve every location of the merchant
    pub async fn list(&self) -> Result<location::ListResponse> {
        location::list(self.client).await
    }

    /// Retrieve a single location by ID
    pub async fn get(&self, location_id: &str) -> Result<Location> {
        location::get(self.client, location_id).await
    }
}

/// API handler for Invoices endpoints
#[derive(Debug)]
pub struct InvoicesApi<'a> {
    client: &'a Client,
}

impl InvoicesApi<'_> {
    /// List one page of invoices for a location
    pub async fn list(
        &self,
        parameters: &invoice::ListParameters,
    ) -> Result<Verbatim<invoice::ListResponse>> {
        invoice::list(self.client, parameters).await
    }
}

/// API handler for Orders endpoints
#[derive(Debug)]
pub struct OrdersApi<'a> {
    client: &'a Client,
}

impl OrdersApi<'_> {
    /// Retrieve a single order by ID
    pub async fn get(&self, order_id: &str) -> Result<Order> {
        order::get(self.client, order_id).await
    }

    /// Search orders across locations
    pub async fn search(
        &self,
        parameters: &order::SearchParameters,
    ) -> Result<order::SearchResponse> {
        order::search(self.client, parameters).await
    }
}

/// API handler for Customers endpoints
#[derive(Debug)]
pub struct CustomersApi<'a> {
    client: &'a Client,
}

impl CustomersApi<'_> {
    /// Retrieve a single customer by ID
    pub async fn get(&self, customer_id: &str) -> Result<Customer> {
        customer::get(self.client, customer_id).await
    }
}
