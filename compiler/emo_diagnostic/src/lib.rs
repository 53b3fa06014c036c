//! Diagnostics for the emoc compiler.
//!
//! - Error codes for searchability
//! - Clear messages (what went wrong)
//! - Primary span (where it went wrong)
//! - Suggestions (how to fix)
//!
//! Fatal errors abort the declaration being processed; the compiler then
//! continues with the next declaration and keeps collecting diagnostics in a
//! `DiagnosticQueue`. `ErrorGuaranteed` proves at the type level that at
//! least one error reached the queue.

mod diagnostic;
mod error_code;
mod guarantee;
pub mod queue;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
pub use guarantee::ErrorGuaranteed;
pub use queue::{DiagnosticConfig, DiagnosticQueue};
