use clap::Parser;
use desk_scene::app::{run_gui, run_headless};
use desk_scene::io::cli::Cli;
use log::error;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    let result = match &cli.headless {
        Some(output) => run_headless(&cli, output),
        None => run_gui(&cli),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
