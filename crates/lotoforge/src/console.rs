//! Colorful console output for generation runs.
//!
//! Provides a custom `tracing` layer that formats engine events with colors.

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect. Does
/// nothing if another global subscriber is already installed.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = "lotoforge_solver=info".parse() {
            filter = filter.add_directive(directive);
        }

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(GenerationConsoleLayer)
            .try_init();
    });
}

fn print_banner() {
    let banner = r#"
 _          _        _____
| |    ___ | |_ ___ |  ___|__  _ __ __ _  ___
| |   / _ \| __/ _ \| |_ / _ \| '__/ _` |/ _ \
| |__| (_) | || (_) |  _| (_) | | | (_| |  __/
|_____\___/ \__\___/|_|  \___/|_|  \__, |\___|
                                   |___/
"#;

    let version_line = format!(
        "             v{} - Constrained Ticket Generator\n",
        env!("CARGO_PKG_VERSION")
    );

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats generation events with colors.
pub struct GenerationConsoleLayer;

impl<S: Subscriber> Layer<S> for GenerationConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("lotoforge_solver") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    strategy: Option<String>,
    reason: Option<String>,
    phase: Option<String>,
    ticket: Option<String>,
    quantity: Option<u64>,
    rules: Option<u64>,
    seed: Option<u64>,
    tickets: Option<u64>,
    attempts: Option<u64>,
    solver_nodes: Option<u64>,
    elapsed_ms: Option<u64>,
    accepted: Option<u64>,
    current: Option<u64>,
    timeout_ms: Option<u64>,
    estimated_success_rate: Option<f64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value).trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "strategy" => self.strategy = Some(s),
            "reason" => self.reason = Some(s),
            "phase" => self.phase = Some(s),
            "ticket" => self.ticket = Some(s),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "strategy" => self.strategy = Some(value.to_string()),
            "reason" => self.reason = Some(value.to_string()),
            "phase" => self.phase = Some(value.to_string()),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "quantity" => self.quantity = Some(value),
            "rules" => self.rules = Some(value),
            "seed" => self.seed = Some(value),
            "tickets" => self.tickets = Some(value),
            "attempts" => self.attempts = Some(value),
            "solver_nodes" => self.solver_nodes = Some(value),
            "elapsed_ms" => self.elapsed_ms = Some(value),
            "accepted" => self.accepted = Some(value),
            "current" => self.current = Some(value),
            "timeout_ms" => self.timeout_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        if field.name() == "estimated_success_rate" {
            self.estimated_success_rate = Some(value);
        }
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "generation_start" => format_start(v),
        "ticket_accepted" => format_accepted(v),
        "generation_timeout" => format_timeout(v),
        "generation_end" => format_end(v),
        "generation_failed" => format_failed(v),
        "generation_cancelled" => format_cancelled(v),
        _ => String::new(),
    }
}

fn count(value: Option<u64>) -> String {
    value.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn format_start(v: &EventVisitor) -> String {
    let rate = v.estimated_success_rate.unwrap_or(1.0) * 100.0;
    format!(
        "{} {} {} quantity ({}), rules ({}), estimated success ({}), seed ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Generator]".bright_cyan(),
        count(v.quantity).bright_yellow(),
        count(v.rules).bright_yellow(),
        format!("{rate:.1}%").bright_magenta(),
        v.seed.unwrap_or(0).white(),
    )
}

fn format_accepted(v: &EventVisitor) -> String {
    format!(
        "    {} #{:<4} {} [{}]",
        "->".bright_blue(),
        v.current.unwrap_or(0).white(),
        v.ticket.as_deref().unwrap_or("").bright_white().bold(),
        v.phase.as_deref().unwrap_or("?").bright_black(),
    )
}

fn format_timeout(v: &EventVisitor) -> String {
    format!(
        "{} {} {} no ticket accepted for {}, keeping {} ticket(s)",
        timestamp().bright_black(),
        "WARN".yellow(),
        "[Generator]".bright_cyan(),
        format_duration_ms(v.timeout_ms.unwrap_or(0)).yellow(),
        count(v.accepted).bright_yellow(),
    )
}

fn format_end(v: &EventVisitor) -> String {
    format!(
        "{} {} {} generation ended: tickets ({}), strategy ({}), attempts ({}), solver nodes ({}), time spent ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Generator]".bright_cyan(),
        count(v.tickets).bright_green().bold(),
        format_strategy(v.strategy.as_deref().unwrap_or("?")),
        count(v.attempts).white(),
        count(v.solver_nodes).white(),
        format_duration_ms(v.elapsed_ms.unwrap_or(0)).yellow(),
    )
}

fn format_failed(v: &EventVisitor) -> String {
    format!(
        "{} {} {} generation failed: {} after {} attempt(s)",
        timestamp().bright_black(),
        "FAIL".bright_red().bold(),
        "[Generator]".bright_cyan(),
        v.reason.as_deref().unwrap_or("?").bright_red(),
        count(v.attempts).white(),
    )
}

fn format_cancelled(v: &EventVisitor) -> String {
    format!(
        "{} {} {} cancelled with {} ticket(s)",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Generator]".bright_cyan(),
        count(v.accepted).white(),
    )
}

fn format_strategy(strategy: &str) -> String {
    match strategy {
        "heuristic" => strategy.bright_green().to_string(),
        "backtracking" => strategy.bright_blue().to_string(),
        _ => strategy.yellow().to_string(),
    }
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 100000;
            let millis = d.subsec_millis();
            format!("{:5}.{:03}", secs, millis)
        })
        .unwrap_or_else(|_| "    0.000".to_string())
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}
