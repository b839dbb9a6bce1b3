//! Diagnostic sinks for comparator warnings.

/// Collaborator that records warning messages.
///
/// The comparator only calls it when it falls back after an internal failure.
pub trait DiagnosticSink {
    fn warn(&self, message: &str);
}

/// Forwards warnings to `tracing` at WARN level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn warn(&self, message: &str) {
        tracing::warn!(target: "output_compare", "{message}");
    }
}

impl<F> DiagnosticSink for F
where
    F: Fn(&str),
{
    fn warn(&self, message: &str) {
        self(message);
    }
}
