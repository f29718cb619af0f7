//! `domainlog` binary entry point.
use anyhow::Result;
use clap::Parser;

use domainlog::{cli, commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    logging::init_subscriber(args.verbose);

    match args.command {
        cli::Command::Emit(opts) => commands::emit::run(&args.global, &opts),
        cli::Command::Stress(opts) => commands::stress::run(&args.global, &opts),
        cli::Command::Serve(opts) => commands::serve::run(&args.global, &opts),
        cli::Command::Version => commands::version::run(),
    }
}
