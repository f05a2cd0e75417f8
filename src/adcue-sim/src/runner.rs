//! Bandit-vs-random simulation loop.
//!
//! Runs a fixed (topic, cohort) context through `impressions` rounds: the
//! LinUCB learner selects an (ad, placement) action, a click is simulated,
//! and the learner is updated. A uniform-random policy runs alongside as the
//! baseline for the uplift number.

use crate::reward::simulate_click;
use adcue_core::context::encode_context;
use adcue_core::{ActionSpace, AdcueResult, DecisionRecord, SimConfig};
use adcue_rl::LinUcb;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};
use uuid::Uuid;

/// Outcome of a simulation run.
#[derive(Debug)]
pub struct SimReport {
    pub bandit_clicks: u64,
    pub random_clicks: u64,
    /// Cumulative bandit clicks after each impression.
    pub bandit_trajectory: Vec<u64>,
    /// Cumulative random-baseline clicks after each impression.
    pub random_trajectory: Vec<u64>,
    pub uplift_pct: f64,
    pub record: DecisionRecord,
}

pub struct Simulation {
    config: SimConfig,
    space: ActionSpace,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Self {
        let space = ActionSpace::new(config.n_ads);
        Self { config, space }
    }

    pub fn run(&self) -> AdcueResult<SimReport> {
        let cfg = &self.config;
        let context = encode_context(cfg.topic, cfg.cohort);
        let mut bandit = LinUcb::new(self.space.len(), context.len(), cfg.alpha)?;
        let mut rng = StdRng::seed_from_u64(cfg.seed);

        info!(
            topic = cfg.topic.as_str(),
            cohort = cfg.cohort.as_str(),
            n_actions = self.space.len(),
            dim = context.len(),
            alpha = cfg.alpha,
            impressions = cfg.impressions,
            "Simulation starting"
        );

        let mut bandit_clicks = 0u64;
        let mut random_clicks = 0u64;
        let mut bandit_trajectory = Vec::with_capacity(cfg.impressions);
        let mut random_trajectory = Vec::with_capacity(cfg.impressions);
        let mut last = None;

        for t in 0..cfg.impressions {
            let idx = bandit.select(&context)?;
            let action = self
                .space
                .action(idx)
                .ok_or_else(|| adcue_core::AdcueError::InvalidAction {
                    index: idx,
                    n_actions: self.space.len(),
                })?;
            let clicked = simulate_click(&mut rng, cfg.topic, cfg.cohort, action, cfg.noise);
            bandit.update(&context, idx, if clicked { 1.0 } else { 0.0 })?;
            bandit_clicks += clicked as u64;
            bandit_trajectory.push(bandit_clicks);

            let r_idx = rng.gen_range(0..self.space.len());
            let r_action = self.space.action(r_idx).unwrap_or(action);
            let r_clicked = simulate_click(&mut rng, cfg.topic, cfg.cohort, r_action, cfg.noise);
            random_clicks += r_clicked as u64;
            random_trajectory.push(random_clicks);

            debug!(round = t, action = idx, clicked, "impression simulated");
            last = Some((t, action, clicked));
        }

        let (t, action, clicked) = last.ok_or_else(|| {
            adcue_core::AdcueError::Config("impressions must be positive".to_string())
        })?;

        let reason = format!(
            "Topic={}, Cohort={}, prior bandit reward~{:.3}",
            cfg.topic.as_str(),
            cfg.cohort.as_str(),
            bandit_clicks as f64 / (t.max(1)) as f64
        );

        let record = DecisionRecord {
            decision_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            content_name: cfg.content_name.clone(),
            topic: cfg.topic,
            cohort: cfg.cohort,
            ad_id: action.ad_id,
            placement: action.placement,
            reason,
            clicked,
        };

        let uplift_pct =
            (bandit_clicks as f64 - random_clicks as f64) / (random_clicks.max(1) as f64) * 100.0;

        info!(bandit_clicks, random_clicks, uplift_pct, "Simulation finished");

        Ok(SimReport {
            bandit_clicks,
            random_clicks,
            bandit_trajectory,
            random_trajectory,
            uplift_pct,
            record,
        })
    }
}
