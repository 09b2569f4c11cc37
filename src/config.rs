use std::fmt;

/// Environment variable holding the Square access token.
pub const ACCESS_TOKEN_VAR: &str = "SQUARE_ACCESS_TOKEN";
/// Environment variable holding the location whose invoices are listed.
pub const LOCATION_ID_VAR: &str = "SQUARE_LOCATION_ID";

/// A Square bearer token. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    #[must_use]
    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken([redacted])")
    }
}

/// Settings for one smoke-test run, read once at startup.
///
/// Nothing is validated here: a missing variable becomes an empty string and
/// the API rejects it on the first call.
#[derive(Debug, Clone)]
pub struct Config {
    pub access_token: AccessToken,
    pub location_id: String,
}

impl Config {
    /// Reads the configuration from the process environment, after loading a
    /// `.env` file from the working directory if one exists.
    #[must_use]
    pub fn from_env() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "loaded .env file"),
            Err(e) if e.not_found() => trace!("no .env file found"),
            Err(e) => warn!("ignoring unreadable .env file: {}", e),
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name to its value.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name).unwrap_or_else(|| {
                warn!("{} is not set; the API will reject the request", name);
                String::new()
            })
        };

        Self {
            access_token: AccessToken::new(read(ACCESS_TOKEN_VAR)),
            location_id: read(LOCATION_ID_VAR),
        }
    }
}
