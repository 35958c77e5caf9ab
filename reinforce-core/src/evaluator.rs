//! Evaluate [`Policy`].
use crate::{record::Record, Policy};
use anyhow::Result;
mod default_evaluator;
pub use default_evaluator::DefaultEvaluator;

/// Evaluate [`Policy`].
pub trait Evaluator<E: crate::Env> {
    /// Evaluate [`Policy`].
    ///
    /// Implementations only sample actions from `policy` and must not update
    /// its parameters.
    fn evaluate<P>(&mut self, policy: &mut P) -> Result<Record>
    where
        P: Policy<E> + ?Sized;
}
