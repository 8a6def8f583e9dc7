use crate::errors::{RarefyError, Result};
use anyhow::Context;
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters of a rarefaction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RarefyParams {
    /// Distance between sample points, in reads.
    pub step: usize,
    /// Number of random orderings to average over. The first is a full
    /// shuffle, the rest are chunk shuffles.
    pub trials: usize,
    /// Seed for `rarefy_seeded`.
    pub seed: u64,
    /// Number of independent groups the trials are split into. Groups run on
    /// the rayon thread pool; 1 runs every trial on the calling thread.
    pub trial_chunks: usize,
}

pub const DEFAULT_PARAMS: RarefyParams = RarefyParams {
    step: 1000,
    trials: 1,
    seed: 0,
    trial_chunks: 1,
};

impl Default for RarefyParams {
    fn default() -> Self {
        DEFAULT_PARAMS
    }
}

macro_rules! warn_non_default {
    ($p:expr, $($field:ident),+) => {
        $(
            if DEFAULT_PARAMS.$field != $p.$field {
                warn!("using non-default {} = {:?}", stringify!($field), $p.$field);
            }
        )+
    };
}

impl RarefyParams {
    pub fn new(step: usize, trials: usize) -> Self {
        RarefyParams {
            step,
            trials,
            ..DEFAULT_PARAMS
        }
    }

    pub fn with_seed(self, seed: u64) -> Self {
        RarefyParams { seed, ..self }
    }

    pub fn with_trial_chunks(self, trial_chunks: usize) -> Self {
        RarefyParams {
            trial_chunks,
            ..self
        }
    }

    /// Parse parameters from TOML. Missing keys take their default value.
    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        let params: RarefyParams = toml::from_str(s).context("invalid rarefaction parameters")?;
        warn_non_default!(params, step, trials, seed, trial_chunks);
        Ok(params)
    }

    /// Load parameters from a TOML file, falling back to the defaults if the
    /// file does not exist.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            warn!(
                "could not find {}, falling back to default rarefaction parameters",
                path.display()
            );
            return Ok(DEFAULT_PARAMS);
        }
        let s = std::fs::read_to_string(path).with_context(|| path.display().to_string())?;
        Self::from_toml_str(&s).with_context(|| path.display().to_string())
    }

    pub fn validate(&self) -> Result<()> {
        if self.step == 0 {
            return Err(RarefyError::InvalidStep(self.step));
        }
        if self.trials == 0 {
            return Err(RarefyError::InvalidTrials(self.trials));
        }
        if self.trial_chunks == 0 {
            return Err(RarefyError::InvalidTrialChunks(self.trial_chunks));
        }
        Ok(())
    }
}
