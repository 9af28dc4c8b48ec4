use serde::{Deserialize, Serialize};

use crate::error::{FasError, Result};

/// Per-instance settings for a [`crate::fas::Fas`] context.
///
/// Passed explicitly; there is no process-wide toggle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FasConfig {
    /// Length of witness and function vectors.
    pub faslen: usize,
    /// Worker threads for the parallel point folds. `None` uses the
    /// available hardware parallelism.
    pub workers: Option<usize>,
    /// Emit intermediate group elements as `trace` events.
    pub trace_intermediates: bool,
}

impl Default for FasConfig {
    fn default() -> Self {
        Self {
            faslen: 1,
            workers: None,
            trace_intermediates: false,
        }
    }
}

impl FasConfig {
    pub fn new(faslen: usize) -> Self {
        Self {
            faslen,
            ..Self::default()
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn with_trace_intermediates(mut self, on: bool) -> Self {
        self.trace_intermediates = on;
        self
    }

    /// Length of the augmented IPFE vectors: `faslen + 1`.
    pub fn ipfelen(&self) -> usize {
        self.faslen + 1
    }

    pub fn validate(&self) -> Result<()> {
        if self.faslen == 0 {
            return Err(FasError::InvalidConfig("faslen must be at least 1".into()));
        }
        if self.workers == Some(0) {
            return Err(FasError::InvalidConfig("workers must be at least 1".into()));
        }
        Ok(())
    }
}
