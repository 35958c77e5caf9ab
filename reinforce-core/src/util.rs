//! Utilities for interaction of policies and environments.
use crate::{
    record::{RecordValue, Recorder},
    trainer::step_until_done,
    Env, Policy,
};
use anyhow::Result;

/// Run episodes with a policy and write a record of every step.
///
/// Each written record holds the values the environment returned from
/// [`Env::step`] together with `"episode"`, `"step"`, `"reward"` and
/// `"prob"`, the probability of the sampled action. Episode `i` starts from
/// [`Env::reset_with_index`]`(i)`. Returns the total reward of each episode.
///
/// The policy is only sampled, never updated.
pub fn eval_with_recorder<E, P, R>(
    env: &mut E,
    policy: &mut P,
    n_episodes: usize,
    recorder: &mut R,
) -> Result<Vec<f64>>
where
    E: Env,
    P: Policy<E> + ?Sized,
    R: Recorder + ?Sized,
{
    let mut rs = Vec::new();

    for episode in 0..n_episodes {
        let obs = env.reset_with_index(episode)?;
        let mut count_step = 0;
        let mut r_total = 0.0;

        step_until_done(env, policy, obs, |_, _, prob, step, mut record| {
            r_total += step.reward;
            record.insert("reward", RecordValue::Scalar(step.reward as _));
            record.insert("prob", RecordValue::Scalar(prob as _));
            record.insert("episode", RecordValue::Scalar(episode as _));
            record.insert("step", RecordValue::Scalar(count_step as _));
            recorder.write(record);
            count_step += 1;
        });
        rs.push(r_total);
    }

    Ok(rs)
}
