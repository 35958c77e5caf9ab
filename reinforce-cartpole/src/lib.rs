#![warn(missing_docs)]
//! Native cart-pole balancing environment.
//!
//! [`CartPoleEnv`] implements [`reinforce_core::Env`] with the classic
//! cart-pole dynamics. Observations are 4-dimensional feature vectors and
//! actions convert from and to `usize` in `{0, 1}`, so the environment can be
//! paired directly with a binary-action policy.
//!
//! ```rust
//! use reinforce_cartpole::{CartPoleAct, CartPoleConfig, CartPoleEnv};
//! use reinforce_core::Env;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut env = CartPoleEnv::build(&CartPoleConfig::default(), 0)?;
//! let obs = env.reset()?;
//! assert!(obs.0.iter().all(|v| v.abs() <= 0.05));
//!
//! let (step, _record) = env.step(&CartPoleAct::Right);
//! assert_eq!(step.reward, 1.0);
//! # Ok(())
//! # }
//! ```
mod config;
mod env;
pub use config::CartPoleConfig;
pub use env::{CartPoleAct, CartPoleEnv, CartPoleObs};
