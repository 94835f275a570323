//! Application bootstrap for Tessera.
//!
//! - [`Bootstrap`] starts named [`InitUnit`]s in ascending name order, runs
//!   the application callback and tears the units down in reverse order.
//! - [`logging::init`] installs the `tracing` subscriber described by a
//!   [`LogConfig`]; [`logging::log_error`] emits an error with its full cause
//!   chain.

mod config;
mod error;
mod lifecycle;
pub mod logging;

pub use config::{BootstrapConfig, LogConfig, LogFormat};
pub use error::{BootstrapError, BootstrapResult};
pub use lifecycle::{Bootstrap, InitUnit};
