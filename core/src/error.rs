//! Shared error plumbing for Tessera.
//!
//! Every crate owns its own `thiserror` enum. This module holds what they
//! have in common: a name and a structured details payload for each error,
//! and rendering of the full `source()` chain for log output.

use crate::Attributes;
use std::error::Error;

/// Boxed error used at the boundary with caller-provided code.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Structured description of an error.
pub trait Describe: Error {
    /// Stable, machine-readable error name (e.g. `"ValidationError"`).
    fn name(&self) -> &'static str;

    /// Structured context about the failure (offending field, index, ...).
    fn details(&self) -> Attributes {
        Attributes::new()
    }

    /// The direct cause, when it is itself described.
    ///
    /// Return the same error as `source()`; `render_chain` uses it to name
    /// the cause.
    fn described_source(&self) -> Option<&dyn Describe> {
        None
    }
}

/// Render an error and every error in its `source()` chain.
///
/// The first line is `"<name>: <message>"`. Each cause follows on its own
/// line as `"Caused by: <name>: <message>"`, or `"Caused by: <message>"`
/// once the chain reaches an error that is not described.
pub fn render_chain<E: Describe + ?Sized>(err: &E) -> String {
    let mut out = format!("{}: {}", err.name(), err);
    let mut described = err.described_source();
    let mut cause = err.source();
    loop {
        if let Some(current) = described {
            out.push_str(&format!("\nCaused by: {}: {}", current.name(), current));
            described = current.described_source();
            cause = current.source();
        } else if let Some(current) = cause {
            out.push_str("\nCaused by: ");
            out.push_str(&current.to_string());
            cause = current.source();
        } else {
            return out;
        }
    }
}

/// Collect the messages of an error's causes, outermost first.
pub fn causes(err: &(dyn Error + 'static)) -> Vec<String> {
    let mut out = Vec::new();
    let mut cause = err.source();
    while let Some(current) = cause {
        out.push(current.to_string());
        cause = current.source();
    }
    out
}
