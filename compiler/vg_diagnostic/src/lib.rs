//! Diagnostics reported by a parser frontend.
//!
//! The generator never produces diagnostics of its own: it only inspects the
//! ones the parser attaches to each translation unit and decides whether the
//! batch may continue. Anything at or above [`FATAL_THRESHOLD`] aborts it.

mod diagnostic;

pub use diagnostic::{fatal_diagnostics, Diagnostic, Severity, FATAL_THRESHOLD};
