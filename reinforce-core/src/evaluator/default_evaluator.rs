//! Default implementation of the [`Evaluator`] trait.
use super::Evaluator;
use crate::{
    record::{Record, RecordValue},
    trainer::step_until_done,
    Env, Policy,
};
use anyhow::Result;
use log::info;

/// Runs a fixed number of episodes with a frozen policy.
///
/// Episode `ix` starts from [`Env::reset_with_index`]`(ix)`, so two
/// evaluations of the same policy see the same initial states.
///
/// The returned [`Record`] has the mean return under `"Episode return"` and
/// the return of every episode under `"Episode returns"`.
///
/// ```ignore
/// let env = CartPoleEnv::build(&CartPoleConfig::default(), 0)?;
/// let mut evaluator = DefaultEvaluator::new(env, 100)?;
/// let record = evaluator.evaluate(&mut policy)?;
/// println!("Average return: {}", record.get_scalar("Episode return")?);
/// ```
pub struct DefaultEvaluator<E: Env> {
    /// The number of episodes to run during evaluation.
    n_episodes: usize,

    /// The environment instance used for evaluation.
    env: E,
}

impl<E: Env> Evaluator<E> for DefaultEvaluator<E> {
    fn evaluate<P>(&mut self, policy: &mut P) -> Result<Record>
    where
        P: Policy<E> + ?Sized,
    {
        let mut returns = Vec::with_capacity(self.n_episodes);

        for ix in 0..self.n_episodes {
            let obs = self.env.reset_with_index(ix)?;
            let mut r_total = 0f64;
            step_until_done(&mut self.env, policy, obs, |_, _, _, step, _| {
                r_total += step.reward
            });
            returns.push(r_total as f32);
        }

        let mean = returns.iter().sum::<f32>() / self.n_episodes.max(1) as f32;
        info!(
            "Evaluation over {} episodes, average return = {}",
            self.n_episodes, mean
        );

        let mut record = Record::from_scalar("Episode return", mean);
        record.insert("Episode returns", RecordValue::Array1(returns));
        Ok(record)
    }
}

impl<E: Env> DefaultEvaluator<E> {
    /// Constructs a new [`DefaultEvaluator`].
    ///
    /// * `env` - The environment used for evaluation
    /// * `n_episodes` - Number of episodes to run during evaluation
    pub fn new(env: E, n_episodes: usize) -> Result<Self> {
        Ok(Self { n_episodes, env })
    }

    /// Returns the environment, for example to inspect it after evaluation.
    pub fn env(&self) -> &E {
        &self.env
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dummy::{DummyAct, DummyEnv, DummyEnvConfig, DummyObs};

    struct Alternating(usize);

    impl Policy<DummyEnv> for Alternating {
        fn sample(&mut self, _obs: &DummyObs) -> (DummyAct, f64) {
            self.0 += 1;
            (DummyAct(self.0 % 2), 0.5)
        }
    }

    #[test]
    fn test_default_evaluator() -> Result<()> {
        let config = DummyEnvConfig {
            dim_obs: 2,
            episode_len: 10,
        };
        let env = DummyEnv::build(&config, 0)?;
        let mut evaluator = DefaultEvaluator::new(env, 3)?;
        let mut policy = Alternating(0);

        let record = evaluator.evaluate(&mut policy)?;
        assert_eq!(record.get_scalar("Episode return")?, 10.0);
        assert_eq!(record.get_array1("Episode returns")?, vec![10.0; 3]);
        assert_eq!(policy.0, 30);
        assert_eq!(evaluator.env().n_resets(), 3);
        Ok(())
    }
}
