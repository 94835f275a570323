//! Ordered start-up and reversed teardown of init units.

use tessera_core::BoxError;
use tracing::{debug, info, warn};

use crate::config::BootstrapConfig;
use crate::error::{BootstrapError, BootstrapResult};
use crate::logging::log_error;

/// One independent piece of application start-up.
pub trait InitUnit {
    /// Units start in ascending order of this name.
    fn name(&self) -> &str;

    fn init(&mut self) -> Result<(), BoxError>;

    fn cleanup(&mut self) -> Result<(), BoxError> {
        Ok(())
    }

    /// Whether `cleanup` should be called during teardown.
    fn has_cleanup(&self) -> bool {
        false
    }
}

/// Runs init units in name order, then the application callback, then the
/// cleanups of every started unit in reverse order.
#[derive(Default)]
pub struct Bootstrap {
    units: Vec<Box<dyn InitUnit>>,
    config: BootstrapConfig,
}

impl Bootstrap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BootstrapConfig) -> Self {
        Self {
            units: Vec::new(),
            config,
        }
    }

    /// Add a unit. Units excluded by the configured filter are skipped at
    /// run time.
    pub fn register(&mut self, unit: impl InitUnit + 'static) -> &mut Self {
        self.units.push(Box::new(unit));
        self
    }

    /// Names of the units that `run` would start, in start order.
    pub fn plan(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .units
            .iter()
            .map(|unit| unit.name().to_string())
            .filter(|name| self.config.allows(name))
            .collect();
        names.sort();
        names
    }

    /// Start every unit, run `callback`, then tear down.
    ///
    /// Teardown always runs for every unit whose init was attempted, even
    /// when an init or the callback failed. The first init or callback
    /// failure is returned after teardown; a cleanup failure is returned
    /// only when nothing else failed.
    pub fn run<F>(self, callback: F) -> BootstrapResult<()>
    where
        F: FnOnce() -> Result<(), BoxError>,
    {
        let Bootstrap { units, config } = self;
        let mut units: Vec<Box<dyn InitUnit>> = units
            .into_iter()
            .filter(|unit| config.allows(unit.name()))
            .collect();
        units.sort_by(|a, b| a.name().cmp(b.name()));

        let mut started = 0;
        let mut failure = None;

        for unit in units.iter_mut() {
            started += 1;
            info!(unit = unit.name(), "initializing");
            if let Err(source) = unit.init() {
                failure = Some(BootstrapError::init(unit.name(), source));
                break;
            }
        }

        if failure.is_none() {
            debug!(units = started, "init chain complete");
            if let Err(source) = callback() {
                failure = Some(BootstrapError::callback(source));
            }
        }

        let mut cleanup_failure = None;
        for unit in units[..started].iter_mut().rev() {
            if !unit.has_cleanup() {
                continue;
            }
            info!(unit = unit.name(), "cleaning up");
            if let Err(source) = unit.cleanup() {
                let err = BootstrapError::cleanup(unit.name(), source);
                log_error(&err);
                cleanup_failure.get_or_insert(err);
            }
        }

        match failure.or(cleanup_failure) {
            Some(err) => {
                warn!(error = %err, "bootstrap failed");
                Err(err)
            }
            None => Ok(()),
        }
    }
}
