use anyhow::Result;
use clap::Parser;
use log::info;
use reinforce::{
    cartpole::{CartPoleConfig, CartPoleEnv},
    logistic::{LogisticPolicy, LogisticPolicyConfig},
    record::{AggregateRecorder, BufferedRecorder, NullRecorder},
    tensorboard::TensorboardRecorder,
    util::eval_with_recorder,
    Configurable, Env as _, Obs as _, Trainer, TrainerConfig,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

const DIM_OBS: usize = 4;
const LOG_INTERVAL: usize = 100;
const FLUSH_RECORD_INTERVAL: usize = 100;

/// Train a logistic policy with REINFORCE in the cart-pole environment
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of training episodes
    #[arg(long, default_value_t = 2000)]
    episodes: usize,

    /// Learning rate
    #[arg(long, default_value_t = 0.002)]
    lr: f64,

    /// Discount factor
    #[arg(long, default_value_t = 0.99)]
    gamma: f64,

    /// Seed of the policy and the environment
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Number of evaluation episodes after training, 0 to skip
    #[arg(long, default_value_t = 0)]
    eval_episodes: usize,

    /// Write the total reward of every training episode to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write training metrics for Tensorboard into this directory
    #[arg(long)]
    logdir: Option<PathBuf>,

    /// Policy config in YAML, overrides --lr, --gamma and --seed
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log the cart-pole state of every evaluation step at debug level
    #[arg(long, default_value_t = false)]
    render: bool,
}

#[derive(Debug, Serialize)]
struct RewardRecord {
    episode: usize,
    reward: f64,
}

fn policy_config(args: &Args) -> Result<LogisticPolicyConfig> {
    match &args.config {
        Some(path) => LogisticPolicyConfig::load(path),
        None => {
            let config = LogisticPolicyConfig::default()
                .dim(DIM_OBS)
                .lr(args.lr)
                .gamma(args.gamma)
                .seed(args.seed);
            config.check()?;
            Ok(config)
        }
    }
}

fn create_recorder(args: &Args) -> Box<dyn AggregateRecorder> {
    match &args.logdir {
        Some(logdir) => Box::new(TensorboardRecorder::new(logdir)),
        None => Box::new(NullRecorder {}),
    }
}

fn train(args: &Args, config: &LogisticPolicyConfig) -> Result<(Vec<f64>, LogisticPolicy)> {
    info!("{:?}", config);

    let mut env = CartPoleEnv::build(&CartPoleConfig::default(), config.seed as i64)?;
    config.check_obs_dim(env.reset()?.len())?;
    let mut policy: LogisticPolicy = LogisticPolicy::build(config.clone());
    let mut recorder = create_recorder(args);
    let mut trainer = Trainer::build(
        TrainerConfig::default()
            .max_episodes(args.episodes)
            .log_interval(LOG_INTERVAL)
            .flush_record_interval(FLUSH_RECORD_INTERVAL),
    );

    let rewards = trainer.train(&mut env, &mut policy, recorder.as_mut())?;
    info!("Trained parameters: {}", policy.params());
    Ok((rewards, policy))
}

/// Evaluates `policy` in an environment seeded like the training one.
fn eval(
    args: &Args,
    config: &LogisticPolicyConfig,
    policy: &mut LogisticPolicy,
) -> Result<Vec<f64>> {
    let env_config = CartPoleConfig::default().render(args.render);
    let mut env = CartPoleEnv::build(&env_config, config.seed as i64)?;
    let mut recorder = BufferedRecorder::new();

    let returns = eval_with_recorder(&mut env, policy, args.eval_episodes, &mut recorder)?;
    let mean = returns.iter().sum::<f64>() / returns.len().max(1) as f64;
    info!(
        "Evaluation: {} episodes, {} steps, mean return = {}",
        returns.len(),
        recorder.len(),
        mean
    );
    Ok(returns)
}

fn write_csv(path: &Path, rewards: &[f64]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for (i, &reward) in rewards.iter().enumerate() {
        wtr.serialize(RewardRecord {
            episode: i + 1,
            reward,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = policy_config(&args)?;
    let (rewards, mut policy) = train(&args, &config)?;

    if let Some(path) = &args.csv {
        write_csv(path, &rewards)?;
        info!("Wrote reward curve to {:?}", path);
    } else {
        for (i, r) in rewards.iter().enumerate() {
            println!("{},{}", i + 1, r);
        }
    }

    if args.eval_episodes > 0 {
        eval(&args, &config, &mut policy)?;
    }

    Ok(())
}
