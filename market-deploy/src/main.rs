// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! CLI for `market-deploy`.

use std::process::ExitCode;

use clap::Parser;

mod common_args;
mod deploy;
mod error;
mod utils;

#[derive(Debug, Parser)]
#[command(name = "market-deploy")]
#[command(author = "Offchain Labs, Inc.")]
#[command(about = "Deploy a compiled contract and print its address", long_about = None)]
#[command(version)]
struct Args {
    #[command(flatten)]
    deploy: deploy::DeployArgs,

    /// Whether to print debug info.
    #[arg(long, global = true)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        // Help and version requests keep clap's own output and exit status
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            let _ = err.print();
            return ExitCode::FAILURE;
        }
    };

    let log_level = if args.verbose {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    simple_logger::init_with_level(log_level).expect("setting up logger");

    // Build async runtime and block on the deployment
    let result = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(Into::into)
        .and_then(|rt| rt.block_on(deploy::exec(args.deploy)));

    // Report any error and return proper exit code
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            utils::print_error(&err);
            err.exit_code()
        }
    }
}
