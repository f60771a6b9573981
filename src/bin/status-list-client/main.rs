//! Status List Token client.
//!
//! Fetches the Status List Token published at the given URI and prints the
//! status stored at the given index.
//!
//! # Usage
//!
//! ```console
//! $ status-list-client --allow-unsecured https://example.com/statuslists/1 0
//! invalid
//! ```
//!
//! No signature verifier is bundled with this tool: `--allow-unsecured` must
//! be passed explicitly to accept tokens without checking their signature.
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use token_status_client::{
    client::{FetchOptions, StatusListTokenFetcher, Unverified},
    reference::InvalidStatusReference,
    GetStatus, StatusError, StatusReference, TokenFormat,
};

#[derive(Parser)]
#[clap(name = "status-list-client")]
struct Args {
    /// Status List Token URI.
    uri: String,

    /// Index of the status in the list.
    index: usize,

    /// Status List Token format.
    #[clap(short, long, value_enum, default_value_t = Format::Jwt)]
    format: Format,

    /// Tolerated clock skew, in seconds.
    #[clap(long, default_value_t = 60)]
    clock_skew: i64,

    /// Accept status list tokens without verifying their signature.
    #[clap(long)]
    allow_unsecured: bool,

    /// Skip the token expiration and issuance date checks.
    #[clap(long)]
    ignore_time_bounds: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Jwt,
    Cwt,
}

impl From<Format> for TokenFormat {
    fn from(value: Format) -> Self {
        match value {
            Format::Jwt => Self::Jwt,
            Format::Cwt => Self::Cwt,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum Error {
    #[error("no signature verifier available, use `--allow-unsecured` to skip verification")]
    Unsecured,

    #[error("invalid clock skew: {0} seconds")]
    ClockSkew(i64),

    #[error(transparent)]
    Reference(#[from] InvalidStatusReference),

    #[error(transparent)]
    Status(#[from] StatusError),
}

async fn run(args: Args) -> Result<(), Error> {
    if !args.allow_unsecured {
        return Err(Error::Unsecured);
    }

    let clock_skew = chrono::Duration::try_seconds(args.clock_skew)
        .filter(|skew| *skew >= chrono::Duration::zero())
        .ok_or(Error::ClockSkew(args.clock_skew))?;

    let reference = StatusReference::from_str_uri(args.index, &args.uri)?;

    let options = FetchOptions {
        ignore_time_bounds: args.ignore_time_bounds,
    };
    let fetcher = StatusListTokenFetcher::new(Unverified).with_options(options);

    let status = GetStatus::new()
        .get_status_of(&reference, args.format.into(), &fetcher, clock_skew)
        .await?;

    println!("{status}");
    Ok(())
}
