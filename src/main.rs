#![deny(rust_2018_idioms)]

use push_request_relay::{
    config,
    flow::{self, PrepareFlow, RelayFlow},
    Config,
};
use snafu::{ResultExt, Snafu};
use tokio::io::{self, BufReader, BufWriter};
use tracing::info;

fn main() {
    if let Err(e) = core() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[tokio::main]
async fn core() -> Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    dotenv::dotenv().ok();

    let config = Config::from_environment().context(UnableToConfigureSnafu)?;
    info!(
        default_title = config.default_title.is_some(),
        max_line_bytes = config.max_line_bytes,
        "Relaying notification requests from stdin",
    );

    let prepare = PrepareFlow::new(config.default_title);
    let relay = RelayFlow::new(prepare, config.max_line_bytes);

    let input = BufReader::new(io::stdin());
    let output = BufWriter::new(io::stdout());

    relay
        .relay(input, output)
        .await
        .context(RelayFailedSnafu)?;

    Ok(())
}

#[derive(Debug, Snafu)]
enum Error {
    #[snafu(display("Unable to configure application"))]
    UnableToConfigure { source: config::Error },

    #[snafu(display("Unable to relay notification requests"))]
    RelayFailed { source: flow::Error },
}

type Result<T, E = Error> = std::result::Result<T, E>;
