#![cfg_attr(test, allow(unused_crate_dependencies))]
#![forbid(unsafe_code)]

mod browse;
mod build;
mod cli_input;
mod config;
mod errors;
mod fetch_schema;
mod output;
mod schema;
mod show;

use std::{io::IsTerminal as _, process};

use clap::Parser;
use cli_input::{Args, SubCommand};
use errors::CliError;
use output::report;
use tracing_subscriber::{prelude::*, EnvFilter};

fn main() {
    let args = Args::parse();

    if !std::io::stderr().is_terminal() {
        colored::control::set_override(false);
    }

    let exit_code = match try_main(args) {
        Ok(()) => 0,
        Err(error) => {
            report::error(&error);
            1
        }
    };

    process::exit(exit_code);
}

fn try_main(args: Args) -> Result<(), CliError> {
    let filter = {
        let builder = EnvFilter::builder();
        match args.log_filter() {
            Some(argument_filter) => builder.parse_lossy(argument_filter),
            None => builder.from_env_lossy(),
        }
    };

    tracing_subscriber::registry()
        .with(args.log_format())
        .with(filter)
        .init();

    let config = config::load(&args.config)?;

    tracing::debug!(command = %args.command, config = %args.config.display(), "starting");

    match args.command {
        SubCommand::FetchSchema(cmd) => fetch_schema::fetch_schema(&config, &cmd),
        SubCommand::Build(cmd) => build::build(&config, &cmd),
        SubCommand::Schema => schema::schema(&config),
        SubCommand::Show(cmd) => show::show(&config, &cmd),
        SubCommand::Browse => browse::browse(&config),
    }
}
