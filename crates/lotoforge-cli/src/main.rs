//! `lotoforge` command-line front end.

mod commands;
mod error;
mod filter_arg;
mod history;
mod output;

use std::error::Error;
use std::io;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;

use commands::{AnalyzeArgs, CheckArgs, GenerateArgs, StatsArgs};
use error::CliError;

#[derive(Parser)]
#[command(
    name = "lotoforge",
    version,
    about = "Constrained 15-of-25 ticket generation and historical checks"
)]
struct Cli {
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Suppress the banner and the engine log
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate tickets that satisfy a set of filters
    Generate(GenerateArgs),
    /// Count how often tickets hit past draws
    Check(CheckArgs),
    /// Grade a selection against the ideal bands
    Analyze(AnalyzeArgs),
    /// Number frequencies and constraint averages of recent draws
    Stats(StatsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if !cli.json && !cli.quiet {
        lotoforge::console::init();
    }

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            report(&err);
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<bool, CliError> {
    let mut out = io::stdout().lock();
    match &cli.command {
        Command::Generate(args) => commands::generate(args, cli.json, &mut out),
        Command::Check(args) => commands::check(args, cli.json, &mut out),
        Command::Analyze(args) => commands::analyze(args, cli.json, &mut out),
        Command::Stats(args) => commands::stats(args, cli.json, &mut out),
    }
}

fn report(err: &CliError) {
    eprintln!("{} {err}", "error:".bright_red().bold());
    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "lotoforge", "generate", "-n", "3", "--seed", "7", "-f", "sum=180..220", "--json",
        ])
        .unwrap();
        assert!(cli.json);
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.quantity, Some(3));
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.filters.len(), 1);
    }

    #[test]
    fn test_check_needs_numbers_or_file() {
        assert!(Cli::try_parse_from(["lotoforge", "check", "--history", "h.json"]).is_err());
        assert!(Cli::try_parse_from([
            "lotoforge", "check", "--history", "h.json", "--tickets", "t.json"
        ])
        .is_ok());
    }

    #[test]
    fn test_bad_filter_is_a_usage_error() {
        assert!(Cli::try_parse_from(["lotoforge", "generate", "-f", "sum"]).is_err());
    }
}
