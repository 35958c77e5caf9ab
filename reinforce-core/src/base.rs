//! Core functionalities.
mod agent;
mod env;
mod policy;
mod step;
mod trajectory;
pub use agent::Agent;
pub use env::Env;
pub use policy::{Configurable, Policy};
use std::fmt::Debug;
pub use step::{Info, Step};
pub use trajectory::Trajectory;

/// An observation of an environment.
///
/// Environments are not vectorized, so an object of this trait holds
/// the observation of a single environment step.
pub trait Obs: Clone + Debug {
    /// Returns the number of features in the observation.
    fn len(&self) -> usize;
}

/// An action of an environment.
pub trait Act: Clone + Debug {}
