//! User-facing output: success lines and diagnostics.

use std::fmt;

/// Sink for the two text streams the client writes to.
///
/// [`ConsoleReporter`] sends success lines to standard output and diagnostics to
/// standard error. Install another implementation with
/// [`crate::EgoSmsClientBuilder::reporter`] to capture or redirect them.
pub trait Reporter: Send + Sync + fmt::Debug {
    /// A confirmation (message sent, credentials validated, follow-up code).
    fn success(&self, line: &str);

    /// A warning or error the caller should see.
    fn diagnostic(&self, line: &str);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn success(&self, line: &str) {
        println!("{line}");
    }

    fn diagnostic(&self, line: &str) {
        eprintln!("{line}");
    }
}
