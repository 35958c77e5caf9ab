//! Binary-action policy with a linear-logistic model.
use crate::LogisticPolicyConfig;
use ndarray::{Array1, Array2, ArrayView1};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use reinforce_core::{
    record::{Record, RecordValue},
    Agent, Configurable, Env, Policy, Trajectory,
};

/// The logistic function `1 / (1 + exp(-y))`.
///
/// Saturates to exactly `0.0` or `1.0` for large `|y|`; it never returns NaN
/// for a non-NaN input.
#[inline]
pub fn logistic(y: f64) -> f64 {
    1.0 / (1.0 + (-y).exp())
}

/// A stochastic policy over actions `{0, 1}`.
///
/// With parameters `θ` and observation `x`,
/// `π(0|x) = σ(x·θ)` and `π(1|x) = 1 - σ(x·θ)`, where `σ` is [`logistic`].
/// The parameters are improved by REINFORCE: after every episode,
/// [`LogisticPolicy::update`] performs one step of gradient ascent on the
/// expected discounted return.
///
/// Randomness for action sampling comes from the generator `R` owned by the
/// policy. It defaults to [`SmallRng`] seeded from the configuration; tests
/// can inject a deterministic generator with [`LogisticPolicy::with_rng`].
///
/// Observations are passed as feature slices whose length must equal the
/// dimension of the parameter vector. A mismatch, a non-finite logit or
/// trajectories of different lengths are contract violations and panic.
#[derive(Clone, Debug)]
pub struct LogisticPolicy<R = SmallRng> {
    params: Array1<f64>,
    lr: f64,
    gamma: f64,
    rng: R,
}

impl LogisticPolicy<SmallRng> {
    /// Constructs a policy with a [`SmallRng`] seeded with `seed`.
    pub fn new(params: Array1<f64>, lr: f64, gamma: f64, seed: u64) -> Self {
        Self::with_rng(params, lr, gamma, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> LogisticPolicy<R> {
    /// Constructs a policy with the given random generator.
    ///
    /// Panics if `params` is empty or not finite, `lr` is not positive or
    /// `gamma` is not in `(0, 1]`.
    pub fn with_rng(params: Array1<f64>, lr: f64, gamma: f64, rng: R) -> Self {
        assert!(!params.is_empty(), "Parameter vector must not be empty");
        assert!(
            params.iter().all(|p| p.is_finite()),
            "Parameters must be finite: {}",
            params
        );
        assert!(lr > 0.0, "Learning rate must be positive, got {}", lr);
        assert!(
            gamma > 0.0 && gamma <= 1.0,
            "Discount factor must be in (0, 1], got {}",
            gamma
        );
        Self {
            params,
            lr,
            gamma,
            rng,
        }
    }

    /// The parameter vector.
    pub fn params(&self) -> &Array1<f64> {
        &self.params
    }

    /// Dimension of observations.
    pub fn dim(&self) -> usize {
        self.params.len()
    }

    /// Learning rate.
    pub fn lr(&self) -> f64 {
        self.lr
    }

    /// Discount factor.
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    fn logit(&self, x: &[f64]) -> f64 {
        assert_eq!(
            x.len(),
            self.dim(),
            "Observation has {} features, expected {}",
            x.len(),
            self.dim()
        );
        let y = ArrayView1::from(x).dot(&self.params);
        assert!(y.is_finite(), "Non-finite logit {} for observation {:?}", y, x);
        y
    }

    /// Returns `[p0, p1]`, the probabilities of actions 0 and 1 given `x`.
    ///
    /// `p1` is computed as `1 - p0`, so they always sum to one.
    pub fn action_probabilities(&self, x: &[f64]) -> [f64; 2] {
        let p0 = logistic(self.logit(x));
        [p0, 1.0 - p0]
    }

    /// Samples an action and returns it with its probability.
    ///
    /// A uniform draw `u` in `[0, 1)` is taken from the random generator;
    /// the action is 0 if `u < p0` and 1 otherwise.
    pub fn sample_action(&mut self, x: &[f64]) -> (usize, f64) {
        let probs = self.action_probabilities(x);
        let u: f64 = self.rng.gen();
        let action = if u < probs[0] { 0 } else { 1 };
        (action, probs[action])
    }

    /// Returns the gradients of `log π(0|x)` and `log π(1|x)` with respect to `θ`.
    ///
    /// `g0 = x (1 - σ(x·θ))` and `g1 = -x σ(x·θ)`.
    pub fn gradient_log_prob(&self, x: &[f64]) -> (Array1<f64>, Array1<f64>) {
        let s = logistic(self.logit(x));
        let x = ArrayView1::from(x);
        (x.mapv(|v| v * (1.0 - s)), x.mapv(|v| -v * s))
    }

    /// Returns the discounted reward-to-go of every step of an episode.
    ///
    /// Computed in one backward pass:
    /// `d[T-1] = r[T-1]` and `d[i] = r[i] + γ d[i+1]`.
    pub fn discount_rewards(&self, rewards: &[f64]) -> Array1<f64> {
        let mut discounted = Array1::zeros(rewards.len());
        let mut cumulative = 0.0;
        for (i, r) in rewards.iter().enumerate().rev() {
            cumulative = cumulative * self.gamma + r;
            discounted[i] = cumulative;
        }
        discounted
    }

    /// Performs one step of gradient ascent with the data of one episode.
    ///
    /// `rewards`, `observations` and `actions` must have the same length and
    /// be in timestep order. With `G` the `(T, D)` matrix whose row `i` is the
    /// gradient of the log-probability of `actions[i]` at `observations[i]`
    /// and `d` the discounted rewards, the parameters are updated as
    /// `θ ← θ + lr Gᵀ d`.
    ///
    /// The returned record contains `"grad_norm"`, the norm of `Gᵀ d`, and
    /// `"episode_length"`.
    pub fn update<O: AsRef<[f64]>>(
        &mut self,
        rewards: &[f64],
        observations: &[O],
        actions: &[usize],
    ) -> Record {
        let t = rewards.len();
        assert_eq!(
            observations.len(),
            t,
            "{} observations for {} rewards",
            observations.len(),
            t
        );
        assert_eq!(actions.len(), t, "{} actions for {} rewards", actions.len(), t);

        let mut grad_log_p = Array2::<f64>::zeros((t, self.dim()));
        for (i, (obs, &action)) in observations.iter().zip(actions).enumerate() {
            let (g0, g1) = self.gradient_log_prob(obs.as_ref());
            let grad = match action {
                0 => g0,
                1 => g1,
                _ => panic!("Action must be 0 or 1, got {}", action),
            };
            grad_log_p.row_mut(i).assign(&grad);
        }
        assert_eq!(grad_log_p.dim(), (t, self.dim()));

        let discounted = self.discount_rewards(rewards);
        let dot = grad_log_p.t().dot(&discounted);
        self.params.scaled_add(self.lr, &dot);

        let mut record = Record::from_scalar("grad_norm", dot.dot(&dot).sqrt() as f32);
        record.insert("episode_length", RecordValue::Scalar(t as f32));
        record
    }
}

impl Configurable for LogisticPolicy<SmallRng> {
    type Config = LogisticPolicyConfig;

    /// Builds the policy.
    ///
    /// Panics if [`LogisticPolicyConfig::check`] fails.
    fn build(config: Self::Config) -> Self {
        if let Err(e) = config.check() {
            panic!("{}", e);
        }
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let params = match config.init_params {
            Some(params) => Array1::from(params),
            None => Array1::from_shape_fn(config.dim, |_| rng.gen::<f64>()),
        };
        Self::with_rng(params, config.lr, config.gamma, rng)
    }
}

impl<E, R> Policy<E> for LogisticPolicy<R>
where
    E: Env,
    E::Obs: AsRef<[f64]>,
    E::Act: From<usize>,
    R: Rng,
{
    fn sample(&mut self, obs: &E::Obs) -> (E::Act, f64) {
        let (action, prob) = self.sample_action(obs.as_ref());
        (action.into(), prob)
    }
}

impl<E, R> Agent<E> for LogisticPolicy<R>
where
    E: Env,
    E::Obs: AsRef<[f64]>,
    E::Act: From<usize> + Into<usize>,
    R: Rng,
{
    fn opt(&mut self, trajectory: &Trajectory<E>) -> Record {
        let actions: Vec<usize> = trajectory
            .actions()
            .iter()
            .cloned()
            .map(Into::into)
            .collect();
        self.update(trajectory.rewards(), trajectory.observations(), &actions)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use ndarray::array;
    use rand::rngs::mock::StepRng;
    use tempdir::TempDir;

    const TOL: f64 = 1e-12;

    fn random_vec(rng: &mut SmallRng, dim: usize, scale: f64) -> Vec<f64> {
        (0..dim).map(|_| scale * (2.0 * rng.gen::<f64>() - 1.0)).collect()
    }

    fn policy(params: Array1<f64>, gamma: f64) -> LogisticPolicy {
        LogisticPolicy::new(params, 0.01, gamma, 0)
    }

    #[test]
    fn test_action_probabilities_sum_to_one() {
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..100 {
            let p = policy(Array1::from(random_vec(&mut rng, 4, 2.0)), 0.99);
            let x = random_vec(&mut rng, 4, 3.0);
            let [p0, p1] = p.action_probabilities(&x);
            assert!((p0 + p1 - 1.0).abs() < TOL);
            assert!(p0 > 0.0 && p0 < 1.0);
            assert!(p1 > 0.0 && p1 < 1.0);
        }
    }

    #[test]
    fn test_gradient_log_prob_closed_form() {
        let mut rng = SmallRng::seed_from_u64(2);
        for _ in 0..100 {
            let theta = random_vec(&mut rng, 5, 1.0);
            let x = random_vec(&mut rng, 5, 2.0);
            let p = policy(Array1::from(theta.clone()), 0.99);

            let y: f64 = x.iter().zip(theta.iter()).map(|(a, b)| a * b).sum();
            let s = 1.0 / (1.0 + (-y).exp());
            let (g0, g1) = p.gradient_log_prob(&x);
            for j in 0..5 {
                assert!((g0[j] - x[j] * (1.0 - s)).abs() < TOL);
                assert!((g1[j] + x[j] * s).abs() < TOL);
            }
        }
    }

    #[test]
    fn test_gradient_matches_finite_difference() {
        // d/dθ log π(a|x), checked against central differences
        let theta = array![0.3, -0.2, 0.5];
        let x = [1.0, 0.5, -2.0];
        let p = policy(theta.clone(), 0.99);
        let (g0, g1) = p.gradient_log_prob(&x);
        let eps = 1e-6;
        for j in 0..3 {
            let mut plus = theta.clone();
            plus[j] += eps;
            let mut minus = theta.clone();
            minus[j] -= eps;
            let pp = policy(plus, 0.99).action_probabilities(&x);
            let pm = policy(minus, 0.99).action_probabilities(&x);
            let fd0 = (pp[0].ln() - pm[0].ln()) / (2.0 * eps);
            let fd1 = (pp[1].ln() - pm[1].ln()) / (2.0 * eps);
            assert!((g0[j] - fd0).abs() < 1e-6);
            assert!((g1[j] - fd1).abs() < 1e-6);
        }
    }

    #[test]
    fn test_discount_rewards() {
        let p = policy(Array1::zeros(4), 0.5);
        assert_eq!(p.discount_rewards(&[1.0, 1.0, 1.0]), array![1.75, 1.5, 1.0]);
        assert_eq!(p.discount_rewards(&[3.0]), array![3.0]);
        assert!(p.discount_rewards(&[]).is_empty());
    }

    #[test]
    fn test_discount_rewards_is_linear() {
        let p = policy(Array1::zeros(4), 0.9);
        let r = [1.0, -2.0, 0.5, 4.0, 0.0];
        let c = -3.5;
        let scaled: Vec<f64> = r.iter().map(|v| c * v).collect();
        let lhs = p.discount_rewards(&scaled);
        let rhs = p.discount_rewards(&r) * c;
        for (a, b) in lhs.iter().zip(rhs.iter()) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_zero_params_give_even_odds() {
        let p = policy(Array1::zeros(4), 0.99);
        assert_eq!(p.action_probabilities(&[0.3, -1.0, 2.0, 0.1]), [0.5, 0.5]);
    }

    #[test]
    fn test_sample_action_threshold() {
        let x = [0.3, -1.0, 2.0, 0.1];

        // u = 0.0 < p0 = 0.5
        let mut p = LogisticPolicy::with_rng(Array1::zeros(4), 0.01, 0.99, StepRng::new(0, 0));
        assert_eq!(p.sample_action(&x), (0, 0.5));

        // u = 1 - 2^-53 >= p0
        let mut p =
            LogisticPolicy::with_rng(Array1::zeros(4), 0.01, 0.99, StepRng::new(u64::MAX, 0));
        assert_eq!(p.sample_action(&x), (1, 0.5));
    }

    #[test]
    fn test_sample_action_is_reproducible() {
        let x = [0.1, 0.2, -0.3, 0.4];
        let mut p1 = policy(array![0.5, -0.5, 0.2, 0.1], 0.99);
        let mut p2 = policy(array![0.5, -0.5, 0.2, 0.1], 0.99);
        let a1: Vec<_> = (0..50).map(|_| p1.sample_action(&x)).collect();
        let a2: Vec<_> = (0..50).map(|_| p2.sample_action(&x)).collect();
        assert_eq!(a1, a2);
        assert!(a1.iter().any(|(a, _)| *a == 0));
        assert!(a1.iter().any(|(a, _)| *a == 1));
    }

    #[test]
    fn test_update() {
        let mut p = LogisticPolicy::new(array![0.0, 0.0], 0.1, 0.5, 0);
        let obs = vec![vec![1.0, 2.0], vec![-1.0, 1.0]];
        let actions = [0, 1];
        let rewards = [1.0, 1.0];

        p.update(&rewards, &obs, &actions);

        // σ(0) = 0.5, g0(x0) = [0.5, 1.0], g1(x1) = [0.5, -0.5], d = [1.5, 1.0]
        // Δθ = 1.5 [0.5, 1.0] + 1.0 [0.5, -0.5] = [1.25, 1.0]
        assert!((p.params()[0] - 0.125).abs() < TOL);
        assert!((p.params()[1] - 0.1).abs() < TOL);
    }

    #[test]
    fn test_update_is_deterministic() {
        let mut rng = SmallRng::seed_from_u64(3);
        let obs: Vec<Vec<f64>> = (0..20).map(|_| random_vec(&mut rng, 4, 1.0)).collect();
        let actions: Vec<usize> = (0..20).map(|i| i % 2).collect();
        let rewards = vec![1.0; 20];

        let theta = Array1::from(random_vec(&mut rng, 4, 1.0));
        let mut p1 = policy(theta.clone(), 0.99);
        let mut p2 = policy(theta, 0.99);
        let r1 = p1.update(&rewards, &obs, &actions);
        let r2 = p2.update(&rewards, &obs, &actions);

        assert_eq!(p1.params(), p2.params());
        assert_eq!(r1.get_scalar("grad_norm").unwrap(), r2.get_scalar("grad_norm").unwrap());
    }

    #[test]
    fn test_update_single_step_episode() {
        let mut p = policy(array![0.0, 0.0, 0.0, 0.0], 0.99);
        let record = p.update(&[2.0], &[vec![1.0, 0.0, -1.0, 0.0]], &[1]);
        // g1 = -x σ(0) = [-0.5, 0, 0.5, 0], d = [2.0]
        assert_eq!(p.params(), &array![-0.01, 0.0, 0.01, 0.0]);
        assert_eq!(record.get_scalar("episode_length").unwrap(), 1.0);
    }

    #[test]
    fn test_saturated_logistic_gives_finite_update() {
        let mut p = policy(array![1000.0, 0.0], 0.99);
        let x = [1.0, 1.0];
        assert_eq!(p.action_probabilities(&x), [1.0, 0.0]);

        let (g0, g1) = p.gradient_log_prob(&x);
        assert_eq!(g0, array![0.0, 0.0]);
        assert_eq!(g1, array![-1.0, -1.0]);

        p.update(&[1.0, 1.0], &[x, x], &[0, 0]);
        assert_eq!(p.params(), &array![1000.0, 0.0]);
        assert!(p.params().iter().all(|v| v.is_finite()));
    }

    #[test]
    #[should_panic]
    fn test_update_length_mismatch() {
        let mut p = policy(Array1::zeros(2), 0.99);
        p.update(&[1.0, 1.0], &[vec![1.0, 1.0]], &[0, 1]);
    }

    #[test]
    #[should_panic]
    fn test_wrong_observation_dimension() {
        let p = policy(Array1::zeros(4), 0.99);
        p.action_probabilities(&[1.0, 2.0]);
    }

    #[test]
    #[should_panic]
    fn test_non_finite_observation() {
        let p = policy(Array1::ones(2), 0.99);
        p.action_probabilities(&[f64::NAN, 1.0]);
    }

    #[test]
    fn test_build_from_config() {
        let config = LogisticPolicyConfig::default().seed(7);
        let p1 = <LogisticPolicy>::build(config.clone());
        let p2 = <LogisticPolicy>::build(config);
        assert_eq!(p1.dim(), 4);
        assert_eq!(p1.params(), p2.params());
        assert!(p1.params().iter().all(|&v| (0.0..1.0).contains(&v)));

        let p3 = <LogisticPolicy>::build(
            LogisticPolicyConfig::default()
                .init_params(vec![0.1, 0.2])
                .lr(0.5)
                .gamma(0.9),
        );
        assert_eq!(p3.params(), &array![0.1, 0.2]);
        assert_eq!(p3.lr(), 0.5);
        assert_eq!(p3.gamma(), 0.9);
    }

    #[test]
    #[should_panic]
    fn test_build_from_invalid_config() {
        <LogisticPolicy>::build(LogisticPolicyConfig::default().gamma(0.0));
    }

    #[test]
    fn test_build_from_path() -> anyhow::Result<()> {
        let dir = TempDir::new("logistic_policy")?;
        let path = dir.path().join("logistic_policy.yaml");
        LogisticPolicyConfig::default()
            .init_params(vec![0.5, -0.5])
            .lr(0.1)
            .gamma(0.9)
            .save(&path)?;

        let p = <LogisticPolicy>::build_from_path(&path)?;
        assert_eq!(p.params(), &array![0.5, -0.5]);
        assert_eq!(p.lr(), 0.1);
        assert_eq!(p.gamma(), 0.9);
        Ok(())
    }
}
