//! Human-readable reports.

use std::io::{self, Write};

use lotoforge::{
    CheckResult, GenerationOutcome, GenerationTelemetry, HistoryStatistics, Status, Ticket,
    TicketAnalysis, TICKET_SIZE,
};
use owo_colors::OwoColorize;

pub fn outcome<W: Write>(out: &mut W, outcome: &GenerationOutcome) -> io::Result<()> {
    match outcome {
        GenerationOutcome::Finished { tickets, telemetry } => {
            writeln!(out, "{}", "Tickets".bright_cyan().bold())?;
            for (i, ticket) in tickets.iter().enumerate() {
                writeln!(out, "  {:>3}. {}", i + 1, ticket.bright_white())?;
            }
            telemetry_summary(out, telemetry)
        }
        GenerationOutcome::Failed { reason, telemetry } => {
            writeln!(out, "{} {}", "Generation failed:".bright_red().bold(), reason)?;
            telemetry_summary(out, telemetry)
        }
        GenerationOutcome::Cancelled => writeln!(out, "{}", "Generation cancelled".yellow()),
    }
}

fn telemetry_summary<W: Write>(out: &mut W, telemetry: &GenerationTelemetry) -> io::Result<()> {
    writeln!(
        out,
        "  strategy {}, seed {}, attempts {}, solver nodes {}, {} ms",
        telemetry.strategy,
        telemetry.seed,
        telemetry.attempts,
        telemetry.solver_nodes,
        telemetry.elapsed.as_millis(),
    )?;
    if telemetry.diversity_rejections > 0 {
        writeln!(
            out,
            "  too similar to an accepted ticket: {}",
            telemetry.diversity_rejections
        )?;
    }
    let mut rejections: Vec<_> = telemetry.rejections.iter().collect();
    rejections.sort_by(|a, b| b.1.cmp(&a.1));
    for (constraint, n) in rejections {
        writeln!(out, "  rejected by {constraint}: {n}")?;
    }
    Ok(())
}

pub fn check_result<W: Write>(out: &mut W, ticket: &Ticket, result: &CheckResult) -> io::Result<()> {
    writeln!(out, "{}", ticket.bright_white().bold())?;
    for hits in (11..=TICKET_SIZE as u32).rev() {
        writeln!(out, "  {hits} hits: {}", result.count(hits))?;
    }
    match &result.last_hit {
        Some(hit) => writeln!(
            out,
            "  last prize: contest {} ({} hits)",
            hit.contest,
            hit.hits.bright_green()
        )?,
        None => writeln!(out, "  last prize: {}", "never".bright_black())?,
    }
    let recent: Vec<String> = result
        .recent
        .iter()
        .map(|hit| format!("{}:{}", hit.contest, hit.hits))
        .collect();
    writeln!(
        out,
        "  checked up to contest {}, recent {}",
        result.last_checked_contest,
        recent.join(" ")
    )
}

pub fn analysis<W: Write>(out: &mut W, analysis: &TicketAnalysis) -> io::Result<()> {
    if analysis.evaluations.is_empty() {
        return writeln!(
            out,
            "{} a ticket needs {TICKET_SIZE} distinct numbers in 1..=25",
            "Invalid selection:".bright_red().bold()
        );
    }
    writeln!(
        out,
        "Score {} {}",
        analysis.score.bold(),
        status(analysis.status)
    )?;
    for evaluation in &analysis.evaluations {
        writeln!(
            out,
            "  {:<20} {:>4}  {}",
            evaluation.constraint.to_string(),
            evaluation.value,
            status(evaluation.status)
        )?;
    }
    Ok(())
}

fn status(status: Status) -> String {
    match status {
        Status::Excellent => status.bright_green().to_string(),
        Status::Good => status.green().to_string(),
        Status::Warning => status.yellow().to_string(),
        Status::Bad => status.bright_red().to_string(),
    }
}

pub fn statistics<W: Write>(out: &mut W, stats: &HistoryStatistics) -> io::Result<()> {
    writeln!(out, "{} over {} draws", "Statistics".bright_cyan().bold(), stats.draws)?;
    writeln!(out, "  hot  {}", join(&stats.hot).bright_red())?;
    writeln!(out, "  cold {}", join(&stats.cold).bright_blue())?;
    for (i, frequency) in stats.frequencies.iter().enumerate() {
        writeln!(out, "  {:02} {frequency}", i + 1)?;
    }
    for summary in &stats.constraints {
        writeln!(
            out,
            "  {:<20} mean {:>7.2}  ideal {:>5.1}%",
            summary.constraint.to_string(),
            summary.mean,
            summary.ideal_share * 100.0
        )?;
    }
    Ok(())
}

fn join(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| format!("{n:02}"))
        .collect::<Vec<_>>()
        .join(" ")
}
