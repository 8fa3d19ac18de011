//! Terminal rendering for pipeline progress and results.
//!
//! All progress goes to stderr so the answer text on stdout stays pipeable.

use crate::pipeline::{Stage, StageReporter};
use std::time::Duration;

const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

/// Stage reporter that renders progress to stderr.
///
/// Quiet suppresses everything; verbosity 1 shows stage progress;
/// verbosity 2 adds per-stage elapsed times.
pub struct ConsoleReporter {
    quiet: bool,
    verbosity: u8,
}

impl ConsoleReporter {
    pub fn new(quiet: bool, verbosity: u8) -> Self {
        Self { quiet, verbosity }
    }
}

impl StageReporter for ConsoleReporter {
    fn stage_started(&self, stage: Stage) {
        if self.quiet || self.verbosity == 0 {
            return;
        }
        eprintln!("{DIM}{stage}...{RESET}");
    }

    fn stage_finished(&self, stage: Stage, elapsed: Duration) {
        if self.quiet || self.verbosity < 2 {
            return;
        }
        eprintln!("{DIM}{stage} done in {}ms{RESET}", elapsed.as_millis());
    }
}

/// Print the transcribed question and its answer.
pub fn render_exchange(question: &str, answer: &str, quiet: bool) {
    if quiet {
        return;
    }
    eprintln!("{DIM}Q:{RESET} {question}");
    println!("{GREEN}A:{RESET} {answer}");
}

/// Print where the answer audio was written.
pub fn render_saved(path: &std::path::Path, quiet: bool) {
    if !quiet {
        eprintln!("Answer audio written to {}", path.display());
    }
}
