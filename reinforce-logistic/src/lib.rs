#![warn(missing_docs)]
//! Linear-logistic policy for binary-action environments, trained with
//! REINFORCE (Monte-Carlo policy gradient).
//!
//! [`LogisticPolicy`] implements [`reinforce_core::Policy`] and
//! [`reinforce_core::Agent`] for any environment whose observations are
//! feature vectors (`AsRef<[f64]>`) and whose actions convert from and to
//! `usize` in `{0, 1}`.
//!
//! ```rust
//! use ndarray::array;
//! use reinforce_logistic::LogisticPolicy;
//!
//! let mut policy = LogisticPolicy::new(array![0.0, 0.0], 0.01, 0.99, 0);
//! assert_eq!(policy.action_probabilities(&[1.0, -1.0]), [0.5, 0.5]);
//!
//! let (action, prob) = policy.sample_action(&[1.0, -1.0]);
//! assert!(action < 2 && prob == 0.5);
//!
//! policy.update(&[1.0], &[[1.0, -1.0]], &[action]);
//! ```
mod config;
mod policy;
mod train;
pub use config::LogisticPolicyConfig;
pub use policy::{logistic, LogisticPolicy};
pub use train::train;
