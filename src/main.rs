//! gamebundle - publishes and packages self-contained game builds.

use gamebundle::cli::{self, Args};
use std::process;

#[tokio::main]
async fn main() {
    let args = Args::parse_args();

    // RUST_LOG overrides the default filter
    let default_filter = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let exit_code = cli::run(args).await;
    process::exit(exit_code);
}
