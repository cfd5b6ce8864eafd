//! Colorful console output for solve runs.
//!
//! Provides a custom `tracing` layer that formats solver events with colors.
//! Output goes to stderr so the proposals and prompts on stdout stay clean.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (solve/round start and end, snapshots)
//! - **DEBUG**: Every proposal and verdict
//! - **TRACE**: Every pruned candidate

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::level_filters::LevelFilter;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SOLVE_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crates whose events the console renders.
const TARGETS: [&str; 2] = ["quartet_solver", "quartet_scoring"];

/// Initializes console output at INFO level.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the quartet banner and sets up tracing.
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initializes console output, showing solver events up to `level`.
///
/// `RUST_LOG` takes precedence when set.
pub fn init_with_level(level: Level) {
    INIT.get_or_init(|| {
        print_banner();

        let mut filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy();
        if std::env::var_os(EnvFilter::DEFAULT_ENV).is_none() {
            let level = level.as_str().to_ascii_lowercase();
            for target in TARGETS {
                if let Ok(directive) = format!("{target}={level}").parse::<Directive>() {
                    filter = filter.add_directive(directive);
                }
            }
        }

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(QuartetConsoleLayer)
            .try_init();
    });
}

// Marks the start of solving for elapsed time tracking.
fn mark_solve_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SOLVE_START_NANOS.store(nanos, Ordering::Relaxed);
}

// Returns elapsed time since solve start.
fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SOLVE_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
  __ _ _   _  __ _ _ __| |_ ___| |_
 / _` | | | |/ _` | '__| __/ _ \ __|
| (_| | |_| | (_| | |  | ||  __/ |_
 \__, |\__,_|\__,_|_|   \__\___|\__|
    |_|
"#;

    let version_line = format!("        v{} - Word Group Solver\n", VERSION);

    let mut stderr = io::stderr().lock();
    let _ = writeln!(stderr, "{}", banner.bright_cyan());
    let _ = writeln!(stderr, "{}", version_line.bright_white().bold());
    let _ = stderr.flush();
}

/// A tracing layer that formats solver events with colors.
pub struct QuartetConsoleLayer;

impl<S: Subscriber> Layer<S> for QuartetConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();

        if !TARGETS.iter().any(|t| target.starts_with(t)) {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let level = *metadata.level();
        let output = format_event(&visitor, level);
        if !output.is_empty() {
            let _ = writeln!(io::stderr(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    round: Option<u64>,
    attempt: Option<u64>,
    group: Option<String>,
    score: Option<String>,
    verdict: Option<String>,
    outcome: Option<String>,
    status: Option<String>,
    reason: Option<String>,
    dataset: Option<String>,
    input: Option<String>,
    error: Option<String>,
    pool_size: Option<u64>,
    group_size: Option<u64>,
    group_count: Option<u64>,
    item_count: Option<u64>,
    candidates: Option<u64>,
    proposals: Option<u64>,
    pruned: Option<u64>,
    groups: Option<u64>,
    remaining: Option<u64>,
    rejected: Option<u64>,
    words: Option<u64>,
    dimensions: Option<u64>,
    duration_ms: Option<u64>,
}

impl EventVisitor {
    fn text_field(&mut self, name: &str) -> Option<&mut Option<String>> {
        Some(match name {
            "event" => &mut self.event,
            "group" => &mut self.group,
            "score" => &mut self.score,
            "verdict" => &mut self.verdict,
            "outcome" => &mut self.outcome,
            "status" => &mut self.status,
            "reason" => &mut self.reason,
            "dataset" => &mut self.dataset,
            "input" => &mut self.input,
            "error" => &mut self.error,
            _ => return None,
        })
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        if let Some(slot) = self.text_field(field.name()) {
            *slot = Some(s.trim_matches('"').to_string());
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "round" => self.round = Some(value),
            "attempt" => self.attempt = Some(value),
            "pool_size" => self.pool_size = Some(value),
            "group_size" => self.group_size = Some(value),
            "group_count" => self.group_count = Some(value),
            "item_count" => self.item_count = Some(value),
            "candidates" => self.candidates = Some(value),
            "proposals" => self.proposals = Some(value),
            "pruned" => self.pruned = Some(value),
            "groups" => self.groups = Some(value),
            "remaining" => self.remaining = Some(value),
            "rejected" => self.rejected = Some(value),
            "words" => self.words = Some(value),
            "dimensions" => self.dimensions = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value as u64);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if let Some(slot) = self.text_field(field.name()) {
            *slot = Some(value.to_string());
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "solve_start" => format_solve_start(v),
        "solve_end" => format_solve_end(v),
        "round_start" => format_round_start(v),
        "round_end" => format_round_end(v),
        "proposal" => format_proposal(v),
        "verdict" => format_verdict(v),
        "pruned" => format_pruned(v, level),
        "snapshot_loaded" | "snapshot_written" => format_snapshot(v, event),
        "invalid_verdict" | "oracle_io_error" => format_warning(v, event),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn format_count(n: u64) -> String {
    n.to_formatted_string(&Locale::en)
}

fn format_solve_start(v: &EventVisitor) -> String {
    mark_solve_start();
    let items = v.item_count.unwrap_or(0);
    let group_size = v.group_size.unwrap_or(0);
    let groups = v.group_count.unwrap_or(0);

    format!(
        "{} {} Solving │ {} words │ {} groups of {}",
        format_elapsed(),
        "▶".bright_green().bold(),
        format_count(items).bright_yellow(),
        format_count(groups).bright_yellow(),
        group_size.bright_yellow(),
    )
}

fn format_solve_end(v: &EventVisitor) -> String {
    let status = v.status.as_deref().unwrap_or("unknown");
    let solved = status == "solved";
    let groups = v.groups.unwrap_or(0);
    let remaining = v.remaining.unwrap_or(0);
    let proposals = v.proposals.unwrap_or(0);
    let rejected = v.rejected.unwrap_or(0);
    let duration = v.duration_ms.unwrap_or(0);

    let status_colored = if solved {
        status.to_uppercase().bright_green().bold().to_string()
    } else {
        status.to_uppercase().bright_red().bold().to_string()
    };

    let mut output = format!(
        "{} {} Solving complete │ {} │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_duration_ms(duration).yellow(),
        status_colored
    );

    // Summary box
    let inner_width: usize = 42;
    let rule = "═".repeat(inner_width);
    output.push_str("\n\n");
    output.push_str(&format!("╔{}╗", rule).bright_cyan().to_string());
    output.push('\n');

    let rows = [
        ("Groups found:", format_count(groups)),
        ("Words left:", format_count(remaining)),
        ("Proposals:", format_count(proposals)),
        ("Rejected:", format_count(rejected)),
    ];
    for (label, value) in rows {
        output.push_str(&format!(
            "{}  {:<18}{:>20}  {}",
            "║".bright_cyan(),
            label,
            value,
            "║".bright_cyan()
        ));
        output.push('\n');
    }

    output.push_str(&format!("╚{}╝", rule).bright_cyan().to_string());
    output.push('\n');

    output
}

fn format_round_start(v: &EventVisitor) -> String {
    let round = v.round.unwrap_or(0) + 1;
    let pool = v.pool_size.unwrap_or(0);

    format!(
        "{} {} Round {} started │ {} words left",
        format_elapsed(),
        "▶".bright_blue(),
        round.white().bold(),
        format_count(pool).bright_yellow(),
    )
}

fn format_round_end(v: &EventVisitor) -> String {
    let round = v.round.unwrap_or(0) + 1;
    let outcome = v.outcome.as_deref().unwrap_or("unknown");
    let proposals = v.proposals.unwrap_or(0);
    let candidates = v.candidates.unwrap_or(0);
    let pruned = v.pruned.unwrap_or(0);
    let duration = v.duration_ms.unwrap_or(0);

    let outcome_colored = match outcome {
        "confirmed" => outcome.bright_green().bold().to_string(),
        _ => outcome.bright_red().bold().to_string(),
    };

    let mut output = format!(
        "{} {} Round {} {} │ {} │ {} proposals │ {} candidates │ {} pruned",
        format_elapsed(),
        "◀".bright_blue(),
        round.white().bold(),
        outcome_colored,
        format_duration_ms(duration).yellow(),
        format_count(proposals).bright_magenta().bold(),
        format_count(candidates).white(),
        format_count(pruned).white(),
    );

    if outcome == "confirmed" {
        if let Some(ref group) = v.group {
            output.push_str(&format!(" │ {}", group.bright_green()));
        }
    }

    output
}

fn format_proposal(v: &EventVisitor) -> String {
    let attempt = v.attempt.unwrap_or(0);
    let group = v.group.as_deref().unwrap_or("[]");
    let score = v.score.as_deref().unwrap_or("N/A");

    format!(
        "{} {} Proposal {:>4} │ {} │ {}",
        format_elapsed(),
        "?".bright_cyan(),
        format_count(attempt).white(),
        group.white(),
        score.bright_magenta()
    )
}

fn format_verdict(v: &EventVisitor) -> String {
    let verdict = v.verdict.as_deref().unwrap_or("none");

    let icon = if verdict == "correct" {
        "✓".bright_green().to_string()
    } else {
        "✗".bright_red().to_string()
    };

    format!("{} {} {}", format_elapsed(), icon, verdict.white())
}

fn format_pruned(v: &EventVisitor, level: Level) -> String {
    if level != Level::TRACE {
        return String::new();
    }

    let group = v.group.as_deref().unwrap_or("[]");
    let reason = v.reason.as_deref().unwrap_or("unknown");

    format!(
        "{} {} Pruned {} │ {}",
        format_elapsed(),
        "·".bright_black(),
        group.bright_black(),
        reason.bright_black()
    )
}

fn format_snapshot(v: &EventVisitor, event: &str) -> String {
    let dataset = v.dataset.as_deref().unwrap_or("unknown");
    let words = v.words.unwrap_or(0);
    let dimensions = v.dimensions.unwrap_or(0);
    let verb = if event == "snapshot_written" {
        "Built"
    } else {
        "Loaded"
    };

    format!(
        "{} {} {} {} │ {} words │ {} dimensions",
        format_elapsed(),
        "◆".bright_cyan(),
        verb,
        dataset.white().bold(),
        format_count(words).bright_yellow(),
        format_count(dimensions).bright_yellow(),
    )
}

fn format_warning(v: &EventVisitor, event: &str) -> String {
    let detail = match event {
        "invalid_verdict" => format!(
            "Unrecognized answer '{}'",
            v.input.as_deref().unwrap_or("")
        ),
        _ => format!(
            "Oracle input failed: {}",
            v.error.as_deref().unwrap_or("unknown error")
        ),
    };

    format!("{} {} {}", format_elapsed(), "!".bright_yellow().bold(), detail.yellow())
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
