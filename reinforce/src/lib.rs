//! Policy-gradient reinforcement learning with a linear-logistic policy.
//!
//! This crate collects the crates of the workspace:
//!
//! * [reinforce-core](reinforce_core) provides the traits of environments and
//!   agents, the episode runner, the training loop and records of metrics.
//!   Its public items are re-exported at the root of this crate.
//! * [reinforce-logistic](logistic) has `LogisticPolicy`, a two-action
//!   policy trained with REINFORCE.
//! * [reinforce-cartpole](cartpole) is a native cart-pole environment.
//! * [reinforce-tensorboard](tensorboard) has `TensorboardRecorder` to
//!   write records which can be shown in Tensorboard.
//!
//! The `logistic_cartpole` example trains a logistic policy on cart-pole
//! from the command line.
pub use reinforce_cartpole as cartpole;
pub use reinforce_core::*;
pub use reinforce_logistic as logistic;
pub use reinforce_tensorboard as tensorboard;
