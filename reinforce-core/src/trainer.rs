//! Train [`Agent`].
mod config;
mod sampler;
use crate::{
    record::{AggregateRecorder, RecordValue::Scalar},
    Agent, Env,
};
use anyhow::Result;
pub use config::TrainerConfig;
use log::info;
pub use sampler::run_episode;
pub(crate) use sampler::step_until_done;
use std::time::{Duration, SystemTime};

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Manages the training loop.
///
/// # Training loop
///
/// For each of `max_episodes` iterations:
///
/// 1. Run one episode with [`run_episode`], sampling actions with
///    [`Policy::sample`](crate::Policy::sample).
/// 2. Append the total reward of the episode to the returned reward curve.
/// 3. Call [`Agent::opt`] once with the trajectory of that episode. Episodes
///    are never batched; every update uses the data of a single episode.
/// 4. Store a record with `"episode"`, `"episode_return"`, `"episode_length"`
///    and the values returned by the agent.
/// 5. If `episode % flush_record_interval == 0`, flush the recorder.
///    Records stored after the last such flush are flushed once the loop ends.
/// 6. If `episode % log_interval == 0`, log the progress and the number of
///    environment steps per second (`"steps_per_sec"`).
///
/// # Interaction of objects
///
/// ```mermaid
/// graph LR
///     A[Agent]-->|Env::Act|B[Env]
///     B -->|Env::Obs|A
///     B -->|"Step&lt;E: Env&gt;"|C[Trajectory]
///     C -->|per episode|A
/// ```
pub struct Trainer {
    /// The number of training episodes.
    max_episodes: usize,

    /// Interval of flushing records in episodes.
    flush_record_interval: usize,

    /// Interval of logging in episodes.
    log_interval: usize,

    /// Environment steps for computing steps per second.
    env_steps_for_sps: usize,

    /// Timer for computing steps per second.
    timer_for_sps: Duration,
}

impl Trainer {
    /// Constructs a trainer.
    pub fn build(config: TrainerConfig) -> Self {
        Self {
            max_episodes: config.max_episodes,
            flush_record_interval: config.flush_record_interval,
            log_interval: config.log_interval,
            env_steps_for_sps: 0,
            timer_for_sps: Duration::new(0, 0),
        }
    }

    /// Returns environment steps per second, then reset the internal counter.
    fn steps_per_sec(&mut self) -> f32 {
        let millis = self.timer_for_sps.as_millis().max(1) as f32;
        let sps = 1000. * self.env_steps_for_sps as f32 / millis;
        self.env_steps_for_sps = 0;
        self.timer_for_sps = Duration::new(0, 0);
        sps
    }

    /// Train the agent.
    ///
    /// Returns the total reward of every training episode, in order. The
    /// length of the returned vector is `max_episodes` and [`Agent::opt`]
    /// has been called exactly that many times.
    pub fn train<E, A>(
        &mut self,
        env: &mut E,
        agent: &mut A,
        recorder: &mut dyn AggregateRecorder,
    ) -> Result<Vec<f64>>
    where
        E: Env,
        A: Agent<E> + ?Sized,
    {
        let mut episode_returns = Vec::with_capacity(self.max_episodes);

        for i in 0..self.max_episodes {
            let episode = i + 1;

            let timer = SystemTime::now();
            let trajectory = run_episode(env, agent)?;
            self.timer_for_sps += timer.elapsed()?;
            self.env_steps_for_sps += trajectory.len();

            let ret = trajectory.total_reward();
            episode_returns.push(ret);

            let mut record = agent.opt(&trajectory);
            record.insert("episode", Scalar(episode as f32));
            record.insert("episode_return", Scalar(ret as f32));
            record.insert("episode_length", Scalar(trajectory.len() as f32));

            if self.log_interval > 0 && episode % self.log_interval == 0 {
                let sps = self.steps_per_sec();
                info!("Episode {}, return = {}, {:.0} steps/sec", episode, ret, sps);
                record.insert("steps_per_sec", Scalar(sps));
            }

            recorder.store(record);

            if self.flush_record_interval > 0 && episode % self.flush_record_interval == 0 {
                recorder.flush(episode as _);
            }
        }

        // Records stored after the last periodic flush
        let flushed = self.flush_record_interval > 0
            && self.max_episodes % self.flush_record_interval == 0;
        if self.max_episodes > 0 && !flushed {
            recorder.flush(self.max_episodes as _);
        }

        Ok(episode_returns)
    }
}
