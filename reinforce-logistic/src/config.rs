//! Configuration of [`LogisticPolicy`](crate::LogisticPolicy).
use anyhow::Result;
use reinforce_core::error::ReinforceError;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`LogisticPolicy`](crate::LogisticPolicy).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct LogisticPolicyConfig {
    /// Dimension of observations, i.e., of the parameter vector.
    pub dim: usize,

    /// Learning rate.
    pub lr: f64,

    /// Discount factor, in `(0, 1]`.
    pub gamma: f64,

    /// Initial parameters. If `None`, parameters are drawn uniformly
    /// from `[0, 1)` with the random generator of the policy.
    pub init_params: Option<Vec<f64>>,

    /// Seed of the random generator used for initialization and action sampling.
    pub seed: u64,
}

impl Default for LogisticPolicyConfig {
    fn default() -> Self {
        Self {
            dim: 4,
            lr: 0.002,
            gamma: 0.99,
            init_params: None,
            seed: 0,
        }
    }
}

impl LogisticPolicyConfig {
    /// Sets the dimension of observations.
    pub fn dim(mut self, v: usize) -> Self {
        self.dim = v;
        self
    }

    /// Sets the learning rate.
    pub fn lr(mut self, v: f64) -> Self {
        self.lr = v;
        self
    }

    /// Sets the discount factor.
    pub fn gamma(mut self, v: f64) -> Self {
        self.gamma = v;
        self
    }

    /// Sets the initial parameters. The dimension is set to their length.
    pub fn init_params(mut self, v: Vec<f64>) -> Self {
        self.dim = v.len();
        self.init_params = Some(v);
        self
    }

    /// Sets the random seed.
    pub fn seed(mut self, v: u64) -> Self {
        self.seed = v;
        self
    }

    /// Checks the values of the configuration.
    pub fn check(&self) -> Result<(), ReinforceError> {
        if self.dim == 0 {
            return Err(ReinforceError::InvalidConfig("dim must be positive".into()));
        }
        if !(self.lr > 0.0) {
            return Err(ReinforceError::InvalidConfig(format!(
                "lr must be positive, got {}",
                self.lr
            )));
        }
        if !(self.gamma > 0.0 && self.gamma <= 1.0) {
            return Err(ReinforceError::InvalidConfig(format!(
                "gamma must be in (0, 1], got {}",
                self.gamma
            )));
        }
        if let Some(params) = &self.init_params {
            if params.len() != self.dim {
                return Err(ReinforceError::InvalidConfig(format!(
                    "init_params has {} elements, expected {}",
                    params.len(),
                    self.dim
                )));
            }
            if params.iter().any(|p| !p.is_finite()) {
                return Err(ReinforceError::InvalidConfig(
                    "init_params must be finite".into(),
                ));
            }
        }
        Ok(())
    }

    /// Checks that `dim` equals the number of features of observations.
    pub fn check_obs_dim(&self, n_features: usize) -> Result<(), ReinforceError> {
        if self.dim != n_features {
            return Err(ReinforceError::InvalidConfig(format!(
                "dim is {}, but observations have {} features",
                self.dim, n_features
            )));
        }
        Ok(())
    }

    /// Constructs [`LogisticPolicyConfig`] from YAML file and checks it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let config: Self = serde_yaml::from_reader(rdr)?;
        config.check()?;
        Ok(config)
    }

    /// Saves [`LogisticPolicyConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
