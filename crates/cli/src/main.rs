use std::io::{stderr, stdout};
use std::process::ExitCode;

use clap::Parser;
use crossterm::tty::IsTty;

use optmatch_cli::cli_args::Args;
use optmatch_cli::driver::{run, Status};

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();
    let colored = stderr().is_tty();

    match run(&args, &mut stdout(), &mut stderr(), colored) {
        Ok(Status::Success) => ExitCode::SUCCESS,
        Ok(Status::Failure) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
