//! Policy.
use super::Env;
use anyhow::Result;
use serde::de::DeserializeOwned;
use std::path::Path;

/// A stochastic policy on an environment.
///
/// Policy is a mapping from an observation to a distribution over actions.
pub trait Policy<E: Env> {
    /// Samples an action given an observation.
    ///
    /// Returns the action and the probability the policy assigned to it.
    fn sample(&mut self, obs: &E::Obs) -> (E::Act, f64);
}

/// A configurable object.
pub trait Configurable {
    /// Configuration.
    type Config: Clone + DeserializeOwned;

    /// Builds the object.
    fn build(config: Self::Config) -> Self;

    /// Build the object with the configuration in the yaml file of the given path.
    fn build_from_path(path: impl AsRef<Path>) -> Result<Self>
    where
        Self: Sized,
    {
        let file = std::fs::File::open(path)?;
        let rdr = std::io::BufReader::new(file);
        let config = serde_yaml::from_reader(rdr)?;
        Ok(Self::build(config))
    }
}
