//! Trajectory of an episode.
use super::Env;

/// Observations, actions, rewards and action probabilities of one episode.
///
/// Index `i` of every sequence refers to the same timestep: `observations()[i]`
/// is the observation the policy acted on, `actions()[i]` the sampled action,
/// `probs()[i]` its probability under the policy and `rewards()[i]` the reward
/// the environment returned for it. The sequences can only grow together
/// through [`Trajectory::push`], so they always have the same length.
pub struct Trajectory<E: Env> {
    observations: Vec<E::Obs>,
    actions: Vec<E::Act>,
    rewards: Vec<f64>,
    probs: Vec<f64>,
    total_reward: f64,
}

impl<E: Env> Default for Trajectory<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Env> Trajectory<E> {
    /// Constructs an empty trajectory.
    pub fn new() -> Self {
        Self {
            observations: Vec::new(),
            actions: Vec::new(),
            rewards: Vec::new(),
            probs: Vec::new(),
            total_reward: 0.0,
        }
    }

    /// Appends a timestep.
    pub fn push(&mut self, obs: E::Obs, act: E::Act, reward: f64, prob: f64) {
        self.observations.push(obs);
        self.actions.push(act);
        self.rewards.push(reward);
        self.probs.push(prob);
        self.total_reward += reward;
    }

    /// The number of timesteps.
    pub fn len(&self) -> usize {
        self.rewards.len()
    }

    /// Returns `true` if no step has been pushed.
    pub fn is_empty(&self) -> bool {
        self.rewards.is_empty()
    }

    /// Sum of the rewards of the episode.
    pub fn total_reward(&self) -> f64 {
        self.total_reward
    }

    /// Observations on which the actions were taken.
    pub fn observations(&self) -> &[E::Obs] {
        &self.observations
    }

    /// Actions taken.
    pub fn actions(&self) -> &[E::Act] {
        &self.actions
    }

    /// Rewards received.
    pub fn rewards(&self) -> &[f64] {
        &self.rewards
    }

    /// Probabilities of the taken actions.
    pub fn probs(&self) -> &[f64] {
        &self.probs
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dummy::{DummyAct, DummyEnv, DummyObs};

    #[test]
    fn test_push_keeps_sequences_aligned() {
        let mut traj = Trajectory::<DummyEnv>::new();
        assert!(traj.is_empty());

        traj.push(DummyObs(vec![0.0, 1.0]), DummyAct(1), 1.0, 0.25);
        traj.push(DummyObs(vec![1.0, 1.0]), DummyAct(0), 0.5, 0.75);

        assert_eq!(traj.len(), 2);
        assert_eq!(traj.observations().len(), 2);
        assert_eq!(traj.actions().len(), 2);
        assert_eq!(traj.probs(), &[0.25, 0.75]);
        assert_eq!(traj.rewards(), &[1.0, 0.5]);
        assert_eq!(traj.total_reward(), 1.5);
        assert_eq!(traj.actions()[0].0, 1);
    }
}
