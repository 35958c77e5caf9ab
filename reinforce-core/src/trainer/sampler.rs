//! Episode runner.
use crate::{record::Record, Env, Policy, Step, Trajectory};
use anyhow::Result;
use log::trace;

/// Runs `policy` in `env` from observation `obs` until a step reports that
/// the episode is terminated or truncated.
///
/// `f` is called for every step, including the last one, with the
/// observation the action was sampled on, the action, its probability, the
/// step and the record returned by [`Env::step`].
pub(crate) fn step_until_done<E, P, F>(env: &mut E, policy: &mut P, mut obs: E::Obs, mut f: F)
where
    E: Env,
    P: Policy<E> + ?Sized,
    F: FnMut(E::Obs, E::Act, f64, &Step<E>, Record),
{
    loop {
        let (act, prob) = policy.sample(&obs);
        let (step, record) = env.step(&act);
        f(obs, act, prob, &step, record);
        if step.is_done() {
            break;
        }
        obs = step.obs;
    }
}

/// Runs one episode of `policy` in `env` and returns its trajectory.
///
/// The environment is reset, then actions are sampled and applied until a
/// step reports that the episode is terminated or truncated. The total
/// reward is available as [`Trajectory::total_reward`].
///
/// No step limit is imposed here. If `env` never ends an episode, this
/// function does not return; environments are expected to truncate long
/// episodes themselves.
///
/// # Errors
///
/// Returns an error if the environment fails to reset.
pub fn run_episode<E, P>(env: &mut E, policy: &mut P) -> Result<Trajectory<E>>
where
    E: Env,
    P: Policy<E> + ?Sized,
{
    let mut trajectory = Trajectory::new();
    let obs = env.reset()?;

    step_until_done(env, policy, obs, |obs, act, prob, step, _| {
        trajectory.push(obs, act, step.reward, prob)
    });

    trace!(
        "Episode finished after {} steps, return = {}",
        trajectory.len(),
        trajectory.total_reward()
    );

    Ok(trajectory)
}
