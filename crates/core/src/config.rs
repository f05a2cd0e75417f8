use crate::types::{Cohort, Topic};
use serde::Deserialize;

/// Simulation configuration. Loaded from environment variables with the
/// prefix `ADCUE__`, with CLI flags applied on top by the binary.
#[derive(Debug, Clone, Deserialize)]
pub struct SimConfig {
    /// Number of impressions to simulate.
    #[serde(default = "default_impressions")]
    pub impressions: usize,
    /// LinUCB exploration coefficient.
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// Detected content topic for the run.
    #[serde(default = "default_topic")]
    pub topic: Topic,
    /// Viewer cohort for the run.
    #[serde(default = "default_cohort")]
    pub cohort: Cohort,
    /// Number of ad creatives in the rotation.
    #[serde(default = "default_n_ads")]
    pub n_ads: usize,
    /// RNG seed for the click model and the random baseline.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Std-dev of the Gaussian noise applied to the base CTR.
    #[serde(default = "default_noise")]
    pub noise: f64,
    /// Name of the content the decision record refers to.
    #[serde(default = "default_content_name")]
    pub content_name: String,
}

fn default_impressions() -> usize {
    300
}
fn default_alpha() -> f64 {
    0.25
}
fn default_topic() -> Topic {
    Topic::Kitchen
}
fn default_cohort() -> Cohort {
    Cohort::Foodies
}
fn default_n_ads() -> usize {
    4
}
fn default_seed() -> u64 {
    42
}
fn default_noise() -> f64 {
    0.01
}
fn default_content_name() -> String {
    "sample_001.jpg".to_string()
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            impressions: default_impressions(),
            alpha: default_alpha(),
            topic: default_topic(),
            cohort: default_cohort(),
            n_ads: default_n_ads(),
            seed: default_seed(),
            noise: default_noise(),
            content_name: default_content_name(),
        }
    }
}

impl SimConfig {
    /// Load configuration from `ADCUE__`-prefixed environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("ADCUE")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
