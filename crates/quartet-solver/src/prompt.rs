//! Interactive oracle reading verdicts from a terminal.

use std::io::{BufRead, Write};

use tracing::warn;

use quartet_core::{Oracle, Proposal, Verdict};

/// Prompt shown after every proposal.
pub const VERDICT_PROMPT: &str =
    "'y' (correct), '1' (one away), '2+' (two or more away), or 'n' (incorrect): ";

/// An oracle backed by a line reader and a writer, usually stdin and stdout.
///
/// Each proposal is printed as its labels followed by its score, then the
/// verdict prompt. Unrecognized answers print the proposal again. End of
/// input, or a failed read or write, declines to answer.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
/// use quartet_core::{Group, Item, Oracle, Proposal, SimilarityScore, Verdict};
/// use quartet_solver::TerminalOracle;
///
/// let mut out = Vec::new();
/// let mut oracle = TerminalOracle::new(Cursor::new("maybe\n2+\n"), &mut out);
/// let proposal = Proposal {
///     group: Group::new(["ice_cream", "cake", "pie", "tart"].map(Item::from)),
///     score: SimilarityScore::of(0.5),
///     round: 0,
///     attempt: 1,
/// };
///
/// assert_eq!(oracle.judge(&proposal), Some(Verdict::FarAway));
/// assert_eq!(oracle.judge(&proposal), None);
/// ```
#[derive(Debug)]
pub struct TerminalOracle<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalOracle<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Returns the reader and writer.
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    fn show(&mut self, proposal: &Proposal) -> std::io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{} {}", proposal.group, proposal.score)?;
        write!(self.output, "{VERDICT_PROMPT}")?;
        self.output.flush()
    }

    fn ask(&mut self, proposal: &Proposal) -> std::io::Result<Option<Verdict>> {
        let mut line = String::new();
        loop {
            self.show(proposal)?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            match line.parse::<Verdict>() {
                Ok(verdict) => return Ok(Some(verdict)),
                Err(err) => warn!(event = "invalid_verdict", input = %err.0),
            }
        }
    }
}

impl<R: BufRead, W: Write> Oracle for TerminalOracle<R, W> {
    fn judge(&mut self, proposal: &Proposal) -> Option<Verdict> {
        match self.ask(proposal) {
            Ok(verdict) => verdict,
            Err(err) => {
                warn!(event = "oracle_io_error", error = %err);
                None
            }
        }
    }
}
