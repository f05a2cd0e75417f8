//! AdCUE simulation CLI — runs the LinUCB bandit against a uniform-random
//! baseline on a synthetic click model and reports the CTR uplift.

mod reward;
mod runner;

use adcue_core::{Cohort, SimConfig, Topic};
use clap::Parser;
use runner::Simulation;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "adcue-sim")]
#[command(about = "Bandit-vs-random ad placement learning simulation")]
#[command(version)]
struct Cli {
    /// Impressions to simulate (overrides config)
    #[arg(long, env = "ADCUE__IMPRESSIONS")]
    impressions: Option<usize>,

    /// LinUCB exploration alpha (overrides config)
    #[arg(long, env = "ADCUE__ALPHA")]
    alpha: Option<f64>,

    /// Detected content topic: kitchen, outdoor, gaming, fitness, city
    #[arg(long, env = "ADCUE__TOPIC")]
    topic: Option<Topic>,

    /// Viewer cohort: foodies, travelers, gamers, athletes, commuters
    #[arg(long, env = "ADCUE__COHORT")]
    cohort: Option<Cohort>,

    /// Number of ad creatives in the rotation
    #[arg(long, env = "ADCUE__N_ADS")]
    ads: Option<usize>,

    /// RNG seed for reproducible runs
    #[arg(long, env = "ADCUE__SEED")]
    seed: Option<u64>,

    /// Write the final decision record (JSON) to this path
    #[arg(long)]
    decision_log: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "adcue_sim=info,adcue_rl=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let mut config = SimConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        SimConfig::default()
    });

    if let Some(impressions) = cli.impressions {
        config.impressions = impressions;
    }
    if let Some(alpha) = cli.alpha {
        config.alpha = alpha;
    }
    if let Some(topic) = cli.topic {
        config.topic = topic;
    }
    if let Some(cohort) = cli.cohort {
        config.cohort = cohort;
    }
    if let Some(ads) = cli.ads {
        config.n_ads = ads;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }

    info!(
        topic = config.topic.as_str(),
        cohort = config.cohort.as_str(),
        impressions = config.impressions,
        alpha = config.alpha,
        n_ads = config.n_ads,
        seed = config.seed,
        "Configuration loaded"
    );

    let report = Simulation::new(config).run()?;

    println!(
        "Bandit clicks: {} | Random clicks: {} | Estimated uplift: {:.1}%",
        report.bandit_clicks, report.random_clicks, report.uplift_pct
    );
    println!(
        "Final decision: ad {} at {} ({})",
        report.record.ad_id,
        report.record.placement.as_str(),
        report.record.reason
    );

    let json = report.record.to_json()?;
    match cli.decision_log {
        Some(path) => {
            std::fs::write(&path, &json)?;
            info!(path = %path, "Decision record written");
        }
        None => println!("{json}"),
    }

    Ok(())
}
