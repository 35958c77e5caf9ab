#![warn(missing_docs)]
//! Core abstractions for on-policy reinforcement learning.
//!
//! This crate does not depend on any concrete environment or policy
//! parameterization. It provides the traits an environment ([`Env`]) and a
//! trainable policy ([`Agent`]) implement, the per-episode [`Trajectory`],
//! the episode runner [`run_episode`], the training loop [`Trainer`] and
//! the [`record`] module used to report metrics.
pub mod dummy;
pub mod error;
pub mod record;
pub mod util;

mod base;
pub use base::{Act, Agent, Configurable, Env, Info, Obs, Policy, Step, Trajectory};

mod evaluator;
pub use evaluator::{DefaultEvaluator, Evaluator};

mod trainer;
pub use trainer::{run_episode, Trainer, TrainerConfig};
