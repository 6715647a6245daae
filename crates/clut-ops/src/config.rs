//! Transform configuration.
//!
//! ```rust
//! use clut_ops::ApplyConfig;
//!
//! let config = ApplyConfig::default().rows_per_task(8).threads(4);
//! assert!(config.validate().is_ok());
//! ```

use crate::{OpsError, OpsResult};

/// Default number of image rows handed to one worker task.
pub const DEFAULT_ROWS_PER_TASK: usize = 16;

/// Controls how [`apply_transform_with`](crate::apply_transform_with)
/// schedules work.
///
/// Output never depends on these settings, only throughput does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyConfig {
    /// Split rows across rayon workers (requires the `parallel` feature).
    pub parallel: bool,
    /// Rows per worker task.
    pub rows_per_task: usize,
    /// Dedicated pool size (None = rayon global pool).
    pub threads: Option<usize>,
}

impl Default for ApplyConfig {
    fn default() -> Self {
        Self {
            parallel: cfg!(feature = "parallel"),
            rows_per_task: DEFAULT_ROWS_PER_TASK,
            threads: None,
        }
    }
}

impl ApplyConfig {
    /// Single-threaded configuration.
    pub fn serial() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Sets the number of rows per worker task.
    pub fn rows_per_task(mut self, rows: usize) -> Self {
        self.rows_per_task = rows;
        self
    }

    /// Runs on a dedicated pool of `n` threads.
    pub fn threads(mut self, n: usize) -> Self {
        self.threads = Some(n);
        self
    }

    /// Checks the parameters.
    pub fn validate(&self) -> OpsResult<()> {
        if self.rows_per_task == 0 {
            return Err(OpsError::InvalidParameter(
                "rows_per_task must be > 0".into(),
            ));
        }
        if self.threads == Some(0) {
            return Err(OpsError::InvalidParameter("threads must be > 0".into()));
        }
        Ok(())
    }
}
