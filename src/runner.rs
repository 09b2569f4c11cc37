//! The smoke test: list locations, then list a few invoices for one location.
//!
//! The run is strictly sequential. The first failure ends it, and is folded
//! into a [`Failure`] that distinguishes Square's own error responses from
//! everything else.

use std::fmt;
use std::io::Write;
use std::process::ExitCode;

use reqwest::StatusCode;

use crate::config::Config;
use crate::entities::{invoice, location, Verbatim};
use crate::error::{ApiError, Error, Result};
use crate::Client;

/// How many invoices the smoke test asks for.
pub const INVOICE_LIMIT: u32 = 3;

/// The two reads the smoke test performs.
#[allow(async_fn_in_trait)]
pub trait SquareApi {
    async fn list_locations(&self) -> Result<location::ListResponse>;

    async fn list_invoices(
        &self,
        parameters: &invoice::ListParameters,
    ) -> Result<Verbatim<invoice::ListResponse>>;
}

impl SquareApi for Client {
    async fn list_locations(&self) -> Result<location::ListResponse> {
        self.locations().list().await
    }

    async fn list_invoices(
        &self,
        parameters: &invoice::ListParameters,
    ) -> Result<Verbatim<invoice::ListResponse>> {
        self.invoices().list(parameters).await
    }
}

/// Why a run stopped.
#[derive(Debug)]
pub enum Failure {
    /// Square answered with an error document.
    Vendor {
        status_code: StatusCode,
        errors: Vec<ApiError>,
    },
    /// Transport, decoding, output or programming errors.
    Generic { detail: String },
}

impl From<Error> for Failure {
    fn from(error: Error) -> Self {
        match error {
            Error::API {
                status_code, errors, ..
            } => Self::Vendor {
                status_code,
                errors,
            },
            other => Self::Generic {
                detail: format!("{other:?}"),
            },
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vendor {
                status_code,
                errors,
            } => {
                let errors = serde_json::to_string_pretty(errors).map_err(|_| fmt::Error)?;
                write!(f, "SquareError: {} {errors}", status_code.as_u16())
            }
            Self::Generic { detail } => write!(f, "Unexpected error: {detail}"),
        }
    }
}

/// One configured smoke-test run against a [`SquareApi`].
#[derive(Debug)]
pub struct SmokeTest<'a, A> {
    api: &'a A,
    location_id: &'a str,
}

impl<'a, A: SquareApi> SmokeTest<'a, A> {
    #[must_use]
    pub fn new(api: &'a A, config: &'a Config) -> Self {
        Self {
            api,
            location_id: &config.location_id,
        }
    }

    /// Runs both calls in order, writing each result to `out` as soon as it arrives.
    ///
    /// Nothing further is attempted after the first failure.
    #[instrument(skip(self, out), fields(location_id = self.location_id))]
    pub async fn run<W: Write>(&self, out: &mut W) -> std::result::Result<(), Failure> {
        self.try_run(out).await.map_err(|e| {
            error!("smoke test failed: {}", e);
            Failure::from(e)
        })
    }

    /// Runs the smoke test as the binary does: results go to `out`, a failure
    /// is rendered to `err` and turns into a failing exit code.
    pub async fn report<O: Write, E: Write>(&self, out: &mut O, err: &mut E) -> ExitCode {
        match self.run(out).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(failure) => {
                if let Err(e) = writeln!(err, "{failure}") {
                    error!("could not report failure: {}", e);
                }
                ExitCode::FAILURE
            }
        }
    }

    async fn try_run<W: Write>(&self, out: &mut W) -> Result<()> {
        info!("listing locations");
        let locations = self.api.list_locations().await?;
        let summaries: Vec<String> = locations
            .locations
            .iter()
            .map(location::Location::summary)
            .collect();
        writeln!(out, "Locations: {summaries:?}")?;

        info!(limit = INVOICE_LIMIT, "listing invoices");
        let parameters = invoice::ListParameters::new(self.location_id).limit(INVOICE_LIMIT);
        let invoices = self.api.list_invoices(&parameters).await?;
        writeln!(out, "Invoices list: {}", serde_json::to_string_pretty(&invoices.raw)?)?;

        info!(invoices = invoices.value.invoices.len(), "smoke test finished");
        Ok(())
    }
}
