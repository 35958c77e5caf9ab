//! Cart-pole environment.
use crate::CartPoleConfig;
use anyhow::Result;
use log::{debug, trace, warn};
use reinforce_core::{
    record::{Record, RecordValue},
    Env, Step,
};

const GRAVITY: f64 = 9.8;
const MASS_CART: f64 = 1.0;
const MASS_POLE: f64 = 0.1;
const TOTAL_MASS: f64 = MASS_CART + MASS_POLE;
// Half of the pole length
const LENGTH: f64 = 0.5;
const POLE_MASS_LENGTH: f64 = MASS_POLE * LENGTH;
const FORCE_MAG: f64 = 10.0;
const TAU: f64 = 0.02;
const X_THRESHOLD: f64 = 2.4;
const THETA_THRESHOLD: f64 = 12.0 * 2.0 * std::f64::consts::PI / 360.0;

/// Observation of [`CartPoleEnv`]: cart position, cart velocity, pole angle
/// and pole angular velocity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CartPoleObs(pub [f64; 4]);

impl reinforce_core::Obs for CartPoleObs {
    fn len(&self) -> usize {
        4
    }
}

impl AsRef<[f64]> for CartPoleObs {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

/// Action of [`CartPoleEnv`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CartPoleAct {
    /// Push the cart to the left, action index 0.
    Left,

    /// Push the cart to the right, action index 1.
    Right,
}

impl reinforce_core::Act for CartPoleAct {}

impl From<usize> for CartPoleAct {
    /// Panics if `a` is not 0 or 1.
    fn from(a: usize) -> Self {
        match a {
            0 => Self::Left,
            1 => Self::Right,
            _ => panic!("Invalid cart-pole action: {}", a),
        }
    }
}

impl From<CartPoleAct> for usize {
    fn from(a: CartPoleAct) -> Self {
        match a {
            CartPoleAct::Left => 0,
            CartPoleAct::Right => 1,
        }
    }
}

/// A pole attached by an un-actuated joint to a cart moving along a track.
///
/// The cart is pushed left or right with a fixed force. A reward of `1.0` is
/// given for every step, including the last one. The episode terminates when
/// the pole is more than 12 degrees from upright or the cart leaves
/// `[-2.4, 2.4]`, and is truncated after
/// [`max_episode_steps`](CartPoleConfig::max_episode_steps) steps.
///
/// The state is integrated with the explicit Euler method. Each element of
/// the initial state is drawn uniformly from `[-0.05, 0.05]`.
pub struct CartPoleEnv {
    config: CartPoleConfig,
    state: [f64; 4],
    rng: fastrand::Rng,
    seed: u64,
    n_steps: usize,
    is_done: bool,
}

impl CartPoleEnv {
    /// Reseeds the random generator used for initial states.
    pub fn seed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng.seed(seed);
    }

    /// The current state.
    pub fn state(&self) -> [f64; 4] {
        self.state
    }

    /// Logs the current state if rendering is enabled.
    pub fn render(&self) {
        if self.config.render {
            let [x, _, theta, _] = self.state;
            debug!(
                "step {:>4} | cart x = {:+.3} | pole angle = {:+.2} deg",
                self.n_steps,
                x,
                theta.to_degrees()
            );
        }
    }

    fn record(&self) -> Record {
        let [x, _, theta, _] = self.state;
        Record::from_slice(&[
            ("cart_position", RecordValue::Scalar(x as f32)),
            ("pole_angle", RecordValue::Scalar(theta as f32)),
            (
                "state",
                RecordValue::Array1(self.state.iter().map(|&v| v as f32).collect()),
            ),
        ])
    }

    fn integrate(&mut self, act: CartPoleAct) {
        let [x, x_dot, theta, theta_dot] = self.state;
        let force = match act {
            CartPoleAct::Left => -FORCE_MAG,
            CartPoleAct::Right => FORCE_MAG,
        };
        let (sin, cos) = theta.sin_cos();

        let temp = (force + POLE_MASS_LENGTH * theta_dot * theta_dot * sin) / TOTAL_MASS;
        let theta_acc = (GRAVITY * sin - cos * temp)
            / (LENGTH * (4.0 / 3.0 - MASS_POLE * cos * cos / TOTAL_MASS));
        let x_acc = temp - POLE_MASS_LENGTH * theta_acc * cos / TOTAL_MASS;

        self.state = [
            x + TAU * x_dot,
            x_dot + TAU * x_acc,
            theta + TAU * theta_dot,
            theta_dot + TAU * theta_acc,
        ];
    }
}

impl Env for CartPoleEnv {
    type Config = CartPoleConfig;
    type Obs = CartPoleObs;
    type Act = CartPoleAct;
    type Info = ();

    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        let seed = seed as u64;
        Ok(Self {
            config: config.clone(),
            state: [0.0; 4],
            rng: fastrand::Rng::with_seed(seed),
            seed,
            n_steps: 0,
            is_done: true,
        })
    }

    fn step(&mut self, a: &Self::Act) -> (Step<Self>, Record) {
        let reward = if self.is_done {
            warn!("CartPoleEnv::step() called after the episode ended; call reset()");
            0.0
        } else {
            self.integrate(*a);
            self.n_steps += 1;
            1.0
        };

        let [x, _, theta, _] = self.state;
        let is_terminated = x < -X_THRESHOLD
            || x > X_THRESHOLD
            || theta < -THETA_THRESHOLD
            || theta > THETA_THRESHOLD;
        let is_truncated = !is_terminated && self.n_steps >= self.config.max_episode_steps;
        self.is_done = is_terminated || is_truncated;

        self.render();

        let step = Step::new(
            CartPoleObs(self.state),
            *a,
            reward,
            is_terminated,
            is_truncated,
            (),
        );
        (step, self.record())
    }

    fn reset(&mut self) -> Result<Self::Obs> {
        trace!("CartPoleEnv::reset()");
        let rng = &self.rng;
        self.state = [(); 4].map(|_| rng.f64() * 0.1 - 0.05);
        self.n_steps = 0;
        self.is_done = false;
        self.render();
        Ok(CartPoleObs(self.state))
    }

    /// Reseeds the random generator with `seed + ix` and resets the environment.
    fn reset_with_index(&mut self, ix: usize) -> Result<Self::Obs> {
        self.rng.seed(self.seed.wrapping_add(ix as u64));
        self.reset()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn run(env: &mut CartPoleEnv, act: CartPoleAct) -> (usize, Step<CartPoleEnv>) {
        let mut n = 0;
        loop {
            let (step, _) = env.step(&act);
            n += 1;
            if step.is_done() {
                return (n, step);
            }
        }
    }

    #[test]
    fn test_reset_bounds() -> Result<()> {
        let mut env = CartPoleEnv::build(&CartPoleConfig::default(), 0)?;
        for _ in 0..100 {
            let obs = env.reset()?;
            assert!(obs.0.iter().all(|v| v.abs() <= 0.05));
        }
        Ok(())
    }

    #[test]
    fn test_seeded_reset_is_reproducible() -> Result<()> {
        let config = CartPoleConfig::default();
        let mut env1 = CartPoleEnv::build(&config, 42)?;
        let mut env2 = CartPoleEnv::build(&config, 42)?;
        assert_eq!(env1.reset()?, env2.reset()?);

        let obs = env1.reset_with_index(3)?;
        env1.reset()?;
        assert_eq!(env1.reset_with_index(3)?, obs);
        assert_eq!(env2.reset_with_index(3)?, obs);
        Ok(())
    }

    #[test]
    fn test_reseed() -> Result<()> {
        let config = CartPoleConfig::default();
        let mut env1 = CartPoleEnv::build(&config, 0)?;
        let mut env2 = CartPoleEnv::build(&config, 5)?;
        env1.reset()?;

        env1.seed(5);
        let obs = env1.reset()?;
        assert_eq!(obs, env2.reset()?);
        assert_eq!(env1.state(), obs.0);

        // reset_with_index counts from the new seed
        assert_eq!(env1.reset_with_index(2)?, env2.reset_with_index(2)?);
        Ok(())
    }

    #[test]
    fn test_constant_push_terminates() -> Result<()> {
        let mut env = CartPoleEnv::build(&CartPoleConfig::default(), 0)?;
        env.reset()?;
        let (n, step) = run(&mut env, CartPoleAct::Right);

        assert!(step.is_terminated);
        assert!(!step.is_truncated);
        assert!(n < 200);
        // Pushing right tilts the pole to the left
        assert!(step.obs.0[2] < -THETA_THRESHOLD);
        assert_eq!(step.reward, 1.0);
        Ok(())
    }

    #[test]
    fn test_truncation() -> Result<()> {
        let config = CartPoleConfig::default().max_episode_steps(5);
        let mut env = CartPoleEnv::build(&config, 0)?;
        env.reset()?;
        let (n, step) = run(&mut env, CartPoleAct::Left);
        assert_eq!(n, 5);
        assert!(step.is_truncated);
        assert!(!step.is_terminated);
        Ok(())
    }

    #[test]
    fn test_step_after_done_gives_no_reward() -> Result<()> {
        let config = CartPoleConfig::default().max_episode_steps(1);
        let mut env = CartPoleEnv::build(&config, 0)?;
        env.reset()?;
        let (step, _) = env.step(&CartPoleAct::Left);
        assert!(step.is_done());
        let (step, _) = env.step(&CartPoleAct::Left);
        assert_eq!(step.reward, 0.0);
        Ok(())
    }

    #[test]
    fn test_step_record() -> Result<()> {
        let mut env = CartPoleEnv::build(&CartPoleConfig::default(), 0)?;
        env.reset()?;
        let (step, record) = env.step(&CartPoleAct::Right);
        assert_eq!(env.state(), step.obs.0);
        assert_eq!(record.get_scalar("cart_position")?, step.obs.0[0] as f32);
        assert_eq!(record.get_array1("state")?.len(), 4);
        Ok(())
    }

    #[test]
    fn test_act_conversion() {
        assert_eq!(CartPoleAct::from(0), CartPoleAct::Left);
        assert_eq!(CartPoleAct::from(1), CartPoleAct::Right);
        assert_eq!(usize::from(CartPoleAct::Right), 1);
    }
}
