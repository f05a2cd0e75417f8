//! Synthetic click model for the simulation.
//!
//! Hand-crafted base CTRs with a few strong (topic, cohort, ad) affinities
//! and mild placement effects, kept small on purpose so the learner has a
//! clear signal to find.

use adcue_core::{Action, Cohort, Placement, Topic};
use rand::Rng;

/// Base click-through rate for a (topic, cohort, ad, placement) combination.
pub fn base_ctr(topic: Topic, cohort: Cohort, action: Action) -> f64 {
    let mut ctr: f64 = 0.02;

    // Positive affinities
    if topic == Topic::Kitchen && cohort == Cohort::Foodies && action.ad_id == 0 {
        ctr += 0.06;
    }
    if topic == Topic::Gaming && cohort == Cohort::Gamers && action.ad_id == 1 {
        ctr += 0.05;
    }
    if topic == Topic::Fitness && cohort == Cohort::Athletes && action.ad_id == 2 {
        ctr += 0.05;
    }
    if topic == Topic::Outdoor && cohort == Cohort::Travelers && action.ad_id == 3 {
        ctr += 0.04;
    }

    // Placement tweaks: the bottom corners perform slightly better.
    match action.placement {
        Placement::BottomLeft => ctr += 0.01,
        Placement::BottomRight => ctr += 0.005,
        _ => {}
    }

    ctr.clamp(0.001, 0.5)
}

/// Draw a simulated click for one impression. Gaussian noise around the base
/// CTR keeps the model from being fully deterministic.
pub fn simulate_click(
    rng: &mut impl Rng,
    topic: Topic,
    cohort: Cohort,
    action: Action,
    noise: f64,
) -> bool {
    let p = base_ctr(topic, cohort, action) + standard_normal(rng) * noise;
    let p = p.clamp(0.0001, 0.9);
    rng.gen::<f64>() < p
}

/// Standard normal approximation via the sum of twelve uniforms.
fn standard_normal(rng: &mut impl Rng) -> f64 {
    (0..12).map(|_| rng.gen::<f64>()).sum::<f64>() - 6.0
}
