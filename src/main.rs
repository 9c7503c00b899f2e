mod cli;
mod commands;

use std::process::ExitCode;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use libvbatch::{Error, Ffmpeg};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli_args = cli::Cli::parse();

    let engine = Ffmpeg::new(cli_args.ffmpeg, cli_args.ffprobe, cli_args.dry_run);

    use cli::CliCommands;
    let result = match cli_args.cmd {
        CliCommands::Merge(x) => commands::merge::merge_cmd(&engine, x),
        CliCommands::Split(x) => commands::split::split_cmd(&engine, x),
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);

            // propagate ffmpeg exit code if that is what failed
            let code = err.downcast_ref::<Error>().map_or(1, Error::exit_code);
            ExitCode::from(code)
        },
    }
}
