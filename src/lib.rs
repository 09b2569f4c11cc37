//! # square-smoke
//!
//! A small Rust client for the Square API and a smoke test built on it.
//!
//! The smoke test verifies that an access token and location id work against
//! production: it lists the merchant's locations, then lists a few invoices
//! for the configured location.
//!
//! ```ignore
//! use square_smoke::{Client, Config, Environment, SmokeTest};
//!
//! let config = Config::from_env();
//! let client = Client::new(config.access_token.clone(), Environment::Production);
//! if let Err(failure) = SmokeTest::new(&client, &config).run(&mut std::io::stdout()).await {
//!     eprintln!("{failure}");
//! }
//! ```
//!
//! ## Span traces
//!
//! Square API errors capture a span trace when they are created. Install
//! `tracing_error::ErrorLayer` in your subscriber for it to contain anything:
//!
//! ```ignore
//! use tracing_subscriber::prelude::*;
//! use tracing_error::ErrorLayer;
//!
//! tracing_subscriber::registry()
//!     .with(tracing_subscriber::fmt::layer())
//!     .with(ErrorLayer::default())
//!     .init();
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

#[macro_use]
extern crate tracing;

pub mod client;
pub mod config;
pub mod endpoints;
pub mod entities;
pub mod error;
pub mod runner;
pub mod utils;

pub use client::Client;
pub use config::{AccessToken, Config};
pub use endpoints::{Environment, SquareEndpoint};
pub use entities::*;
pub use error::{ApiError, Error, ErrorCategory};
pub use runner::{Failure, SmokeTest, SquareApi};

// Re-export SpanTrace for users who want to access it
pub use tracing_error::SpanTrace;
