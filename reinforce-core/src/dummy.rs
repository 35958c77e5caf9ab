//! Dummy environment, used for tests.
//!
//! [`DummyEnv`] runs episodes of a fixed length and pays a reward of `1.0`
//! per step, regardless of the actions. Its observation at step `t` is
//! `[1.0, t, 0.0, ...]`, so tests can tell the steps of an episode apart.
use crate::{record::Record, Env, Step};
use anyhow::Result;

/// Dummy observation.
#[derive(Clone, Debug, PartialEq)]
pub struct DummyObs(pub Vec<f64>);

impl crate::Obs for DummyObs {
    fn len(&self) -> usize {
        self.0.len()
    }
}

impl AsRef<[f64]> for DummyObs {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

/// Dummy action.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DummyAct(pub usize);

impl crate::Act for DummyAct {}

impl From<usize> for DummyAct {
    fn from(a: usize) -> Self {
        Self(a)
    }
}

impl From<DummyAct> for usize {
    fn from(a: DummyAct) -> Self {
        a.0
    }
}

/// Configuration of [`DummyEnv`].
#[derive(Clone, Debug)]
pub struct DummyEnvConfig {
    /// Dimension of observations, at least 2.
    pub dim_obs: usize,

    /// Number of steps of an episode.
    pub episode_len: usize,
}

impl Default for DummyEnvConfig {
    fn default() -> Self {
        Self {
            dim_obs: 4,
            episode_len: 3,
        }
    }
}

/// Dummy environment.
pub struct DummyEnv {
    config: DummyEnvConfig,
    t: usize,
    n_resets: usize,
}

impl DummyEnv {
    fn obs(&self) -> DummyObs {
        let mut obs = vec![0.0; self.config.dim_obs];
        obs[0] = 1.0;
        obs[1] = self.t as f64;
        DummyObs(obs)
    }

    /// The number of times the environment has been reset.
    pub fn n_resets(&self) -> usize {
        self.n_resets
    }
}

impl Env for DummyEnv {
    type Config = DummyEnvConfig;
    type Obs = DummyObs;
    type Act = DummyAct;
    type Info = ();

    fn build(config: &Self::Config, _seed: i64) -> Result<Self> {
        assert!(config.dim_obs >= 2);
        Ok(Self {
            config: config.clone(),
            t: 0,
            n_resets: 0,
        })
    }

    fn step(&mut self, a: &Self::Act) -> (Step<Self>, Record) {
        self.t += 1;
        let is_terminated = self.t >= self.config.episode_len;
        let step = Step::new(self.obs(), *a, 1.0, is_terminated, false, ());
        (step, Record::empty())
    }

    fn reset(&mut self) -> Result<Self::Obs> {
        self.t = 0;
        self.n_resets += 1;
        Ok(self.obs())
    }

    fn reset_with_index(&mut self, _ix: usize) -> Result<Self::Obs> {
        self.reset()
    }
}
