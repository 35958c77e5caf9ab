//! Training entry point.
use crate::{LogisticPolicy, LogisticPolicyConfig};
use anyhow::Result;
use log::debug;
use reinforce_core::{record::NullRecorder, Configurable, Env, Obs, Trainer, TrainerConfig};

/// Trains a [`LogisticPolicy`] built from `config` for `max_episodes` episodes.
///
/// Every episode is followed by exactly one [`LogisticPolicy::update`] with
/// the data of that episode. Returns the total reward of each episode and
/// the trained policy.
///
/// # Errors
///
/// Returns an error if `config` is invalid, its `dim` differs from the number
/// of features of the observations of `env`, or the environment fails to reset.
pub fn train<E>(
    env: &mut E,
    config: LogisticPolicyConfig,
    max_episodes: usize,
) -> Result<(Vec<f64>, LogisticPolicy)>
where
    E: Env,
    E::Obs: AsRef<[f64]>,
    E::Act: From<usize> + Into<usize>,
{
    config.check()?;
    config.check_obs_dim(env.reset()?.len())?;
    let mut policy: LogisticPolicy = LogisticPolicy::build(config);
    debug!("Initial parameters: {}", policy.params());
    let mut trainer = Trainer::build(TrainerConfig::default().max_episodes(max_episodes));
    let episode_rewards = trainer.train(env, &mut policy, &mut NullRecorder {})?;
    debug!("Trained parameters: {}", policy.params());
    Ok((episode_rewards, policy))
}
