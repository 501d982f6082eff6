//! Subcommand implementations.
//!
//! Each command writes its report to `out` and returns whether it succeeded.
//! With `--json`, `generate` writes one event per line and the other commands
//! write a single document.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use lotoforge::{
    ConstraintType, DrawHistory, FilterState, GenerationOutcome, GenerationProfile,
    GenerationRequest, LotoForge, Ticket, TicketSink,
};
use tokio::sync::mpsc;

use crate::error::CliError;
use crate::filter_arg::FilterArg;
use crate::history::{load_history, TicketFile};
use crate::output;

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// JSON history file, needed for the `repeats` filter
    #[arg(long)]
    pub history: Option<PathBuf>,

    /// TOML profile with run settings and filters
    #[arg(short, long)]
    pub profile: Option<PathBuf>,

    /// Number of tickets (overrides the profile)
    #[arg(short = 'n', long)]
    pub quantity: Option<u32>,

    /// PRNG seed for a reproducible run (overrides the profile)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Extra filter as NAME=MIN..MAX, repeatable
    #[arg(short, long = "filter", value_name = "NAME=MIN..MAX")]
    pub filters: Vec<FilterArg>,

    /// Enable the ideal band of every constraint type
    #[arg(long)]
    pub ideal: bool,

    /// Write the generated tickets to this JSON file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// JSON history file
    #[arg(long)]
    pub history: PathBuf,

    /// JSON file holding an array of tickets
    #[arg(long, conflicts_with = "numbers")]
    pub tickets: Option<PathBuf>,

    /// The 15 numbers of a single ticket
    #[arg(num_args = 1.., required_unless_present = "tickets")]
    pub numbers: Vec<u8>,
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// JSON history file; its last draw is the reference for repeats
    #[arg(long)]
    pub history: Option<PathBuf>,

    /// The selection to grade
    #[arg(num_args = 1.., required = true)]
    pub numbers: Vec<u8>,
}

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// JSON history file
    #[arg(long)]
    pub history: PathBuf,

    /// Number of most recent draws to aggregate
    #[arg(short, long, default_value_t = 100)]
    pub window: usize,
}

/// Builds the generation request from the profile and the command line.
pub fn build_request(args: &GenerateArgs) -> Result<GenerationRequest, CliError> {
    let profile = match &args.profile {
        Some(path) => GenerationProfile::load(path)?,
        None => GenerationProfile::default(),
    };

    let mut filters = profile.filter_states()?;
    if args.ideal {
        filters.extend(ConstraintType::ALL.iter().map(|&c| FilterState::ideal(c)));
    }
    filters.extend(args.filters.iter().map(|FilterArg(state)| *state));

    let quantity = args.quantity.or(profile.quantity()).unwrap_or(1);
    let request = GenerationRequest::new(quantity, filters, profile.generation_config()?)?;
    Ok(match args.seed.or(profile.random_seed()) {
        Some(seed) => request.with_seed(seed),
        None => request,
    })
}

pub fn generate<W: Write>(args: &GenerateArgs, json: bool, out: &mut W) -> Result<bool, CliError> {
    let request = build_request(args)?;
    let history = load_history(args.history.as_deref())?;

    let outcome = match &args.output {
        Some(path) => {
            let forge = LotoForge::new(history, TicketFile::new(path));
            let outcome = run_generation(&forge, &request, json, out)?;
            forge.sink().finish()?;
            outcome
        }
        None => run_generation(&LotoForge::new(history, ()), &request, json, out)?,
    };
    Ok(outcome.is_finished())
}

fn run_generation<K: TicketSink, W: Write>(
    forge: &LotoForge<DrawHistory, K>,
    request: &GenerationRequest,
    json: bool,
    out: &mut W,
) -> Result<GenerationOutcome, CliError> {
    let (sender, mut receiver) = mpsc::unbounded_channel();
    let outcome = forge.generate(request, sender);

    if json {
        while let Ok(event) = receiver.try_recv() {
            serde_json::to_writer(&mut *out, &event)?;
            writeln!(out)?;
        }
    } else {
        output::outcome(out, &outcome)?;
    }
    Ok(outcome)
}

pub fn check<W: Write>(args: &CheckArgs, json: bool, out: &mut W) -> Result<bool, CliError> {
    let history = load_history(Some(args.history.as_path()))?;
    let tickets = match &args.tickets {
        Some(path) => read_tickets(path)?,
        None => vec![Ticket::new(args.numbers.iter().copied()).map_err(CliError::Ticket)?],
    };

    let forge = LotoForge::new(history, ());
    let results = forge.check_many(&tickets);
    if json {
        let report: Vec<_> = tickets
            .iter()
            .zip(&results)
            .map(|(ticket, result)| serde_json::json!({ "ticket": ticket, "result": result }))
            .collect();
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
    } else {
        for (ticket, result) in tickets.iter().zip(&results) {
            output::check_result(out, ticket, result)?;
        }
    }
    Ok(true)
}

fn read_tickets(path: &Path) -> Result<Vec<Ticket>, CliError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let selections: Vec<Vec<u8>> = serde_json::from_str(&contents)?;
    let tickets = selections
        .into_iter()
        .map(Ticket::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(CliError::Ticket)?;
    Ok(tickets)
}

pub fn analyze<W: Write>(args: &AnalyzeArgs, json: bool, out: &mut W) -> Result<bool, CliError> {
    let history = load_history(args.history.as_deref())?;
    let analysis = LotoForge::new(history, ()).analyze(&args.numbers);

    if json {
        serde_json::to_writer_pretty(&mut *out, &analysis)?;
        writeln!(out)?;
    } else {
        output::analysis(out, &analysis)?;
    }
    Ok(!analysis.evaluations.is_empty())
}

pub fn stats<W: Write>(args: &StatsArgs, json: bool, out: &mut W) -> Result<bool, CliError> {
    let history = load_history(Some(args.history.as_path()))?;
    let statistics = LotoForge::new(history, ()).statistics(args.window);

    if json {
        serde_json::to_writer_pretty(&mut *out, statistics.as_ref())?;
        writeln!(out)?;
    } else {
        output::statistics(out, &statistics)?;
    }
    Ok(true)
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
