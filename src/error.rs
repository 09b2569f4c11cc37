use std::fmt;

use miette::Diagnostic;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_error::SpanTrace;

/// The broad class of a Square API error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(clippy::module_name_repetitions, clippy::enum_variant_names)]
pub enum ErrorCategory {
    ApiError,
    AuthenticationError,
    InvalidRequestError,
    RateLimitError,
    PaymentMethodError,
    RefundError,
    MerchantSubscriptionError,
    ExternalVendorError,
    #[serde(untagged)]
    Other(String),
}

/// A single entry of the `errors` array Square returns on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::module_name_repetitions)]
pub struct ApiError {
    pub category: ErrorCategory,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)?;
        if let Some(detail) = &self.detail {
            write!(f, ": {detail}")?;
        }
        if let Some(field) = &self.field {
            write!(f, " (field: {field})")?;
        }
        Ok(())
    }
}

/// The error document returned with non-success responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Response {
    #[serde(default, deserialize_with = "crate::utils::serde_helpers::null_as_default")]
    pub errors: Vec<ApiError>,
}

/// Errors that can occur when interacting with the Square API.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("error making request: {0:?}")]
    #[diagnostic(
        code(square_smoke::request_error),
        help("Check your network connection and Square API availability")
    )]
    Request(#[source] reqwest::Error),

    #[error("error decoding response: {0:?}")]
    #[diagnostic(
        code(square_smoke::deserialization_error),
        help("The API returned data in an unexpected format")
    )]
    DeserializationError(#[source] serde_json::Error, Option<String>),

    #[error("object not found: {entity} (url: {url})")]
    #[diagnostic(
        code(square_smoke::not_found),
        help("Verify that the {entity} exists and that the access token can read it")
    )]
    NotFound { entity: String, url: String },

    #[error("endpoint could not be parsed as a URL")]
    #[diagnostic(
        code(square_smoke::invalid_endpoint),
        help("Check that the API base URL and path are correctly formatted")
    )]
    InvalidEndpoint,

    /// A structured error returned by the Square API for a non-success status.
    #[error("square api returned {status_code} for {url}: {errors:#?}")]
    #[diagnostic(
        code(square_smoke::api),
        help("Review the error entries returned by the Square API")
    )]
    API {
        status_code: StatusCode,
        errors: Vec<ApiError>,
        url: String,
        response_body: Option<String>,
        span_trace: SpanTrace,
    },

    #[error("line item {line_item:?} has quantity {quantity:?}, expected a whole number")]
    #[diagnostic(
        code(square_smoke::invalid_quantity),
        help("Only whole-number quantities can be billed as services")
    )]
    InvalidQuantity { line_item: String, quantity: String },

    #[error("error writing output: {0}")]
    #[diagnostic(code(square_smoke::io_error))]
    Io(#[from] std::io::Error),
}

impl Error {
    /// The HTTP status of a Square API error.
    #[must_use]
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            Self::API { status_code, .. } => Some(*status_code),
            Self::Request(e) => e.status(),
            _ => None,
        }
    }

    /// The span trace captured when a Square API error was created.
    #[must_use]
    pub fn span_trace(&self) -> Option<&SpanTrace> {
        match self {
            Self::API { span_trace, .. } => Some(span_trace),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Self::Request(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::DeserializationError(e, None)
    }
}

/// Type alias for results from this crate.
///
/// This is already a Miette diagnostic result due to the implementation of
/// the Diagnostic trait for the Error type.
pub type Result<O> = std::result::Result<O, Error>;
