use crate::ports::outbound::ProgressReporter;
use owo_colors::{OwoColorize, Stream};

/// StderrProgressReporter adapter for reporting progress to stderr
///
/// This adapter implements the ProgressReporter port, writing progress
/// information to stderr so it doesn't interfere with stdout output.
/// Markers are colored only when stderr is a terminal.
pub struct StderrProgressReporter;

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn report_warning(&self, message: &str) {
        eprintln!(
            "{} {}",
            "warning:".if_supports_color(Stream::Stderr, |t| t.yellow()),
            message
        );
    }

    fn report_error(&self, message: &str) {
        eprintln!(
            "{} {}",
            "error:".if_supports_color(Stream::Stderr, |t| t.red()),
            message
        );
    }

    fn report_completion(&self, message: &str) {
        eprintln!("{}", message.if_supports_color(Stream::Stderr, |t| t.green()));
    }
}
