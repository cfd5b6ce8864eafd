//! Quartet CLI
//!
//! Reads a list of words, then proposes groups of related words one at a
//! time and asks for a verdict on each until every word is placed.
//!
//! Proposals and prompts go to stdout; logs go to stderr.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use owo_colors::OwoColorize;
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

use quartet::{
    solve_lines, QuartetConfig, SimilaritySource, SnapshotStore, SolveReport, SolveStatus,
    TerminalOracle,
};

mod error;

use error::{CliError, CliExitCode};

/// Configuration file picked up from the working directory when present.
const DEFAULT_CONFIG_FILE: &str = "quartet.toml";

/// Quartet - solve word grouping puzzles interactively
#[derive(Parser, Debug)]
#[command(name = "quartet")]
#[command(version)]
#[command(about = "Propose groups of related words and learn from your verdicts")]
struct Cli {
    /// Configuration file (TOML, or YAML with a .yaml/.yml extension)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Word-vector text file used to build the snapshot on first run
    #[arg(long)]
    vectors: Option<PathBuf>,

    /// Dataset name; keys the snapshot file
    #[arg(long)]
    dataset: Option<String>,

    /// Directory holding snapshots
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Number of words in every group
    #[arg(short, long)]
    group_size: Option<usize>,

    /// Read words from this file instead of standard input
    #[arg(short, long)]
    words: Option<PathBuf>,

    /// Plain log lines instead of the colored console
    #[arg(long)]
    no_console: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn level(&self) -> Level {
        match self.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_console {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(cli.level().as_str().to_ascii_lowercase()));
        fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_level(true)
            .with_writer(io::stderr)
            .init();
    } else {
        quartet::console::init_with_level(cli.level());
    }

    match run(&cli) {
        Ok(report) => {
            print_report(&report);
            CliExitCode::from(report.status).into()
        }
        Err(err) => {
            eprintln!("{} {}", "error:".bright_red().bold(), err);
            CliExitCode::from(&err).into()
        }
    }
}

fn run(cli: &Cli) -> Result<SolveReport, CliError> {
    let config = resolve_config(cli)?;

    let store = SnapshotStore::new(&config.data_dir, config.dataset.as_str());
    let table = store.load_or_build(config.vectors.as_deref())?;

    let words = match &cli.words {
        Some(path) => read_words_file(path)?,
        None => {
            println!("Enter words (ctrl + D to end):");
            read_words(io::stdin().lock()).map_err(|source| CliError::Words {
                path: "standard input".into(),
                source,
            })?
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    solve_session(&table, &words, &config, stdin.lock(), stdout.lock())
}

/// Loads the configuration file and applies command-line overrides.
fn resolve_config(cli: &Cli) -> Result<QuartetConfig, CliError> {
    let mut config = match &cli.config {
        Some(path) => load_config_file(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
            QuartetConfig::load(DEFAULT_CONFIG_FILE)?
        }
        None => QuartetConfig::default(),
    };

    if let Some(group_size) = cli.group_size {
        config = config.with_group_size(group_size);
    }
    if let Some(dataset) = &cli.dataset {
        config = config.with_dataset(dataset.as_str());
    }
    if let Some(data_dir) = &cli.data_dir {
        config = config.with_data_dir(data_dir);
    }
    if let Some(vectors) = &cli.vectors {
        config = config.with_vectors(vectors);
    }

    config.validate()?;
    Ok(config)
}

fn load_config_file(path: &Path) -> Result<QuartetConfig, CliError> {
    let yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    );
    let config = if yaml {
        QuartetConfig::from_yaml_file(path)?
    } else {
        QuartetConfig::from_toml_file(path)?
    };
    Ok(config)
}

/// Reads lines until end of input.
fn read_words<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    reader.lines().collect()
}

fn read_words_file(path: &Path) -> Result<Vec<String>, CliError> {
    File::open(path)
        .and_then(|file| read_words(BufReader::new(file)))
        .map_err(|source| CliError::Words {
            path: path.display().to_string(),
            source,
        })
}

/// Normalizes `words` and solves them, reading verdicts from `input`.
fn solve_session<S, R, W>(
    source: &S,
    words: &[String],
    config: &QuartetConfig,
    input: R,
    output: W,
) -> Result<SolveReport, CliError>
where
    S: SimilaritySource + ?Sized,
    R: BufRead,
    W: Write,
{
    let mut oracle = TerminalOracle::new(input, output);
    let report = solve_lines(source, words, config, &mut oracle)?;
    Ok(report)
}

fn print_report(report: &SolveReport) {
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout);
    for found in &report.groups {
        let _ = writeln!(stdout, "{} {} {}", "✓".bright_green(), found.group, found.score);
    }

    match report.status {
        SolveStatus::Solved => {}
        SolveStatus::Exhausted => {
            let _ = writeln!(stdout, "{}", "No solution found".bright_red().bold());
        }
        SolveStatus::Abandoned => {
            let _ = writeln!(stdout, "{}", "Stopped before the puzzle was solved".yellow());
        }
    }

    if !report.remaining.is_empty() {
        let left: Vec<String> = report.remaining.iter().map(|item| item.label()).collect();
        let _ = writeln!(stdout, "Unplaced: {}", left.join(", "));
    }
    let _ = stdout.flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use quartet_test::fruit_and_vehicles;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "quartet",
            "--group-size",
            "3",
            "--dataset",
            "glove-wiki-gigaword-100",
            "--data-dir",
            "/tmp/quartet",
            "-vv",
        ])
        .unwrap();

        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.group_size, 3);
        assert_eq!(config.dataset, "glove-wiki-gigaword-100");
        assert_eq!(
            config.snapshot_path(),
            Path::new("/tmp/quartet/glove-wiki-gigaword-100.qvec")
        );
        assert_eq!(cli.level(), Level::TRACE);
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let cli = Cli::try_parse_from(["quartet", "--group-size", "1"]).unwrap();
        assert!(matches!(resolve_config(&cli), Err(CliError::Config(_))));
    }

    #[test]
    fn test_config_file_then_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("puzzle.yaml");
        std::fs::write(&path, "group_size: 2\ndataset: tiny\n").unwrap();

        let cli = Cli::try_parse_from([
            "quartet",
            "--config",
            path.to_str().unwrap(),
            "--dataset",
            "override",
        ])
        .unwrap();

        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.group_size, 2);
        assert_eq!(config.dataset, "override");
    }

    #[test]
    fn test_missing_config_file_fails() {
        let cli = Cli::try_parse_from(["quartet", "--config", "/nonexistent/quartet.toml"]).unwrap();
        assert!(resolve_config(&cli).is_err());
    }

    #[test]
    fn test_read_words_keeps_raw_lines() {
        let lines = read_words(Cursor::new("Apple\n\nice cream\n")).unwrap();
        assert_eq!(lines, vec!["Apple", "", "ice cream"]);
    }

    #[test]
    fn test_session_solves_with_terminal_answers() {
        let table = fruit_and_vehicles();
        let list = words(&["apple", "banana", "car", "truck", "dog", "cat", "bike", "train"]);
        let mut out = Vec::new();

        let report = solve_session(
            &table,
            &list,
            &QuartetConfig::default(),
            Cursor::new("y\ny\n"),
            &mut out,
        )
        .unwrap();

        assert_eq!(report.status, SolveStatus::Solved);
        assert_eq!(CliExitCode::from(report.status), CliExitCode::Success);
    }

    #[test]
    fn test_session_reports_closed_input() {
        let table = fruit_and_vehicles();
        let list = words(&["apple", "banana", "car", "truck", "dog", "cat", "bike", "train"]);

        let report = solve_session(
            &table,
            &list,
            &QuartetConfig::default(),
            Cursor::new("y\n"),
            Vec::new(),
        )
        .unwrap();

        assert_eq!(report.status, SolveStatus::Abandoned);
        assert_eq!(CliExitCode::from(report.status), CliExitCode::Failure);
    }

    #[test]
    fn test_session_rejects_wrong_count() {
        let table = fruit_and_vehicles();
        let list = words(&["apple", "banana", "car"]);

        let err = solve_session(
            &table,
            &list,
            &QuartetConfig::default(),
            Cursor::new(""),
            Vec::new(),
        )
        .unwrap_err();

        assert!(err.to_string().contains("multiple of 4"));
    }
}
