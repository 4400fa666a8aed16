#![deny(unsafe_code)]
#![deny(clippy::all)]
#![deny(clippy::unwrap_used, clippy::expect_used)]

use std::process::ExitCode;

use solfront::error::Result;
use solfront::logging::{self, LogOptions};
use solfront::{cli, version};

fn main() -> ExitCode {
    run_with_args(std::env::args().skip(1))
}

fn run_with_args<I, S>(args: I) -> ExitCode
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    logging::init(LogOptions::from_env());
    match try_main(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn try_main<I, S>(args: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    match cli::parse_from(args.into_iter().map(Into::into))? {
        cli::Invocation::Help => println!("{}", cli::usage()),
        cli::Invocation::Version => println!("{}", version::formatted()),
        cli::Invocation::License => println!("{}", cli::license()),
        cli::Invocation::Options(resolved) => {
            tracing::debug!(mode = ?resolved.input_mode, "arguments resolved");
            // Compilation itself is handed off from here.
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use solfront::error::Error;

    #[test]
    fn run_with_args_returns_success_for_help() {
        let exit = run_with_args(["--help"]);
        assert_eq!(exit, ExitCode::SUCCESS);
    }

    #[test]
    fn run_with_args_reports_conflicting_modes() {
        let exit = run_with_args(["--link", "--assemble"]);
        assert_eq!(exit, ExitCode::FAILURE);
    }

    #[test]
    fn try_main_forwards_parse_errors() {
        let err = try_main(["--frobnicate"]).expect_err("unknown option must fail");
        match err {
            Error::Cli(_) => {}
            other => panic!("expected CLI error, found {other:?}"),
        }
    }
}
