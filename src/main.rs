use std::process::ExitCode;

use square_smoke::{Client, Config, Environment, SmokeTest};
use tracing_error::ErrorLayer;
use tracing_subscriber::{prelude::*, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(ErrorLayer::default())
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();

    let config = Config::from_env();
    let client = Client::new(config.access_token.clone(), Environment::Production);

    SmokeTest::new(&client, &config)
        .report(&mut std::io::stdout(), &mut std::io::stderr())
        .await
}
