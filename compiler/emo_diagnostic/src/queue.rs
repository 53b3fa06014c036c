//! Diagnostic queue: the sink every compiler phase reports into.
//!
//! Features:
//! - Error limits to prevent overwhelming output
//! - Deduplication of identical diagnostics
//! - Optional promotion of warnings to errors
//! - `ErrorGuaranteed` proof that errors were emitted

use crate::{Diagnostic, ErrorGuaranteed, Severity};

/// Configuration for diagnostic processing.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Maximum number of stored errors (0 = unlimited).
    pub error_limit: usize,
    /// Drop diagnostics identical in code, primary span and message.
    pub deduplicate: bool,
    /// Report warnings as errors.
    pub warnings_as_errors: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            error_limit: 20,
            deduplicate: true,
            warnings_as_errors: false,
        }
    }
}

impl DiagnosticConfig {
    /// Create a config with no limits (for testing).
    pub fn unlimited() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            deduplicate: false,
            warnings_as_errors: false,
        }
    }
}

/// Queue for collecting diagnostics across declarations.
///
/// # Example
///
/// ```text
/// let mut queue = DiagnosticQueue::new();
/// match parser.parse_and_fetch_type(&ctx, dynamism) {
///     Ok(fetched) => { /* store the type */ }
///     Err(err) => { queue.emit_error(err.to_diagnostic()); }
/// }
/// let sorted = queue.flush();
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
    /// Errors reported, including ones dropped by the limit.
    error_count: usize,
    warning_count: usize,
    config: DiagnosticConfig,
}

impl DiagnosticQueue {
    /// Create a new diagnostic queue with default configuration.
    pub fn new() -> Self {
        Self::with_config(DiagnosticConfig::default())
    }

    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            diagnostics: Vec::new(),
            error_count: 0,
            warning_count: 0,
            config,
        }
    }

    /// Emit an error diagnostic and get proof it was emitted.
    pub fn emit_error(&mut self, mut diag: Diagnostic) -> ErrorGuaranteed {
        diag.severity = Severity::Error;
        if self.config.deduplicate && self.is_duplicate(&diag) {
            return ErrorGuaranteed::new();
        }

        self.error_count += 1;
        if !self.limit_exceeded() {
            self.diagnostics.push(diag);
        }
        ErrorGuaranteed::new()
    }

    /// Emit a warning. Processing continues; nothing is aborted.
    pub fn emit_warning(&mut self, diag: Diagnostic) {
        if self.config.warnings_as_errors {
            self.emit_error(diag);
            return;
        }
        if self.config.deduplicate && self.is_duplicate(&diag) {
            return;
        }
        self.warning_count += 1;
        self.diagnostics.push(diag);
    }

    fn is_duplicate(&self, diag: &Diagnostic) -> bool {
        let span = diag.primary_span();
        self.diagnostics.iter().any(|queued| {
            queued.code == diag.code
                && queued.primary_span() == span
                && queued.message == diag.message
        })
    }

    fn limit_exceeded(&self) -> bool {
        self.config.error_limit > 0 && self.error_count > self.config.error_limit
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    /// Check if any errors were emitted and get proof if so.
    pub fn has_errors(&self) -> Option<ErrorGuaranteed> {
        ErrorGuaranteed::from_error_count(self.error_count)
    }

    /// Queued diagnostics in emission order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Sort diagnostics by position and return them, clearing the queue.
    ///
    /// Diagnostics without a primary span sort first; ties keep emission order.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        let mut result = std::mem::take(&mut self.diagnostics);
        result.sort_by_key(|d| d.primary_span().map(|s| (s.start, s.end)));
        self.error_count = 0;
        self.warning_count = 0;
        result
    }
}
