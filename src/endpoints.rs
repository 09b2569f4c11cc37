use std::fmt;

use url::Url;

use crate::error::{Error, Result};

pub const PRODUCTION_URL: &str = "https://connect.squareup.com/v2/";
pub const SANDBOX_URL: &str = "https://connect.squareupsandbox.com/v2/";

/// The Square deployment a client talks to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Production,
    Sandbox,
    /// Any other base URL including the `/v2` prefix, e.g. a local mock of the API.
    Custom(Url),
}

impl Environment {
    /// The versioned base URL every endpoint is resolved against.
    pub fn base_url(&self) -> Result<Url> {
        match self {
            Self::Production => Url::parse(PRODUCTION_URL).map_err(|_| Error::InvalidEndpoint),
            Self::Sandbox => Url::parse(SANDBOX_URL).map_err(|_| Error::InvalidEndpoint),
            Self::Custom(url) => Ok(url.clone()),
        }
    }
}

/// A typed representation of the Square API endpoints this crate uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareEndpoint {
    Locations,
    Location(String),
    Invoices,
    Order(String),
    SearchOrders,
    Customer(String),
}

impl SquareEndpoint {
    fn segments(&self) -> Vec<&str> {
        match self {
            Self::Locations => vec!["locations"],
            Self::Location(id) => vec!["locations", id],
            Self::Invoices => vec!["invoices"],
            Self::Order(id) => vec!["orders", id],
            Self::SearchOrders => vec!["orders", "search"],
            Self::Customer(id) => vec!["customers", id],
        }
    }

    /// Resolves the endpoint against the base URL of `environment`.
    ///
    /// Identifiers are pushed as single path segments, so they are
    /// percent-encoded and can never escape the versioned prefix.
    pub fn to_url(&self, environment: &Environment) -> Result<Url> {
        let mut url = environment.base_url()?;
        url.path_segments_mut()
            .map_err(|()| Error::InvalidEndpoint)?
            .pop_if_empty()
            .extend(self.segments());
        Ok(url)
    }
}

impl fmt::Display for SquareEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_url(&Environment::Production) {
            Ok(url) => write!(f, "{url}"),
            Err(_) => write!(f, "Invalid endpoint"),
        }
    }
}
