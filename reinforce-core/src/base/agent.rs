//! Agent.
use super::{Env, Policy, Trajectory};
use crate::record::Record;

/// Represents a trainable policy on an environment.
///
/// [`Trainer`](crate::Trainer) only interacts with a policy through
/// [`Policy::sample`] and [`Agent::opt`], so alternative parameterizations
/// can be trained without changing the training loop.
pub trait Agent<E: Env>: Policy<E> {
    /// Performs an optimization step with a complete episode.
    ///
    /// `trajectory` holds the observations, actions and rewards of one episode
    /// in timestep order. The returned [`Record`] contains information about
    /// the step, for example the norm of the gradient.
    fn opt(&mut self, trajectory: &Trajectory<E>) -> Record;
}
