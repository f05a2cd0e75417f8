//! Shared domain types: content topics, viewer cohorts, overlay placements,
//! and the flat action space the bandit selects over.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Detected content topic of the frame the ad is overlaid on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Kitchen,
    Outdoor,
    Gaming,
    Fitness,
    City,
}

impl Topic {
    pub const ALL: [Topic; 5] = [
        Topic::Kitchen,
        Topic::Outdoor,
        Topic::Gaming,
        Topic::Fitness,
        Topic::City,
    ];

    /// Position in the one-hot encoding.
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Kitchen => "kitchen",
            Topic::Outdoor => "outdoor",
            Topic::Gaming => "gaming",
            Topic::Fitness => "fitness",
            Topic::City => "city",
        }
    }
}

impl std::str::FromStr for Topic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown topic: {s}"))
    }
}

/// Viewer cohort the impression is served to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cohort {
    Foodies,
    Travelers,
    Gamers,
    Athletes,
    Commuters,
}

impl Cohort {
    pub const ALL: [Cohort; 5] = [
        Cohort::Foodies,
        Cohort::Travelers,
        Cohort::Gamers,
        Cohort::Athletes,
        Cohort::Commuters,
    ];

    /// Position in the one-hot encoding.
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|c| c == self).unwrap_or(0)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Cohort::Foodies => "foodies",
            Cohort::Travelers => "travelers",
            Cohort::Gamers => "gamers",
            Cohort::Athletes => "athletes",
            Cohort::Commuters => "commuters",
        }
    }
}

impl std::str::FromStr for Cohort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown cohort: {s}"))
    }
}

/// Corner of the frame the ad creative is overlaid into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
    BottomLeft,
    BottomRight,
    TopLeft,
    TopRight,
}

impl Placement {
    pub const ALL: [Placement; 4] = [
        Placement::BottomLeft,
        Placement::BottomRight,
        Placement::TopLeft,
        Placement::TopRight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Placement::BottomLeft => "bottom-left",
            Placement::BottomRight => "bottom-right",
            Placement::TopLeft => "top-left",
            Placement::TopRight => "top-right",
        }
    }
}

/// One discrete choice the learner can make: which creative goes in which corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub ad_id: usize,
    pub placement: Placement,
}

/// Flat enumeration of all (ad, placement) combinations.
///
/// The learner only ever sees a flat index in `[0, len())`; this is the
/// caller-side translation between that index and domain terms. Index order
/// matches enumeration order: all placements of ad 0, then ad 1, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionSpace {
    n_ads: usize,
}

impl ActionSpace {
    pub fn new(n_ads: usize) -> Self {
        Self { n_ads }
    }

    pub fn n_ads(&self) -> usize {
        self.n_ads
    }

    pub fn len(&self) -> usize {
        self.n_ads * Placement::ALL.len()
    }

    pub fn is_empty(&self) -> bool {
        self.n_ads == 0
    }

    /// Translate a flat action index back into domain terms.
    pub fn action(&self, index: usize) -> Option<Action> {
        if index >= self.len() {
            return None;
        }
        Some(Action {
            ad_id: index / Placement::ALL.len(),
            placement: Placement::ALL[index % Placement::ALL.len()],
        })
    }

    pub fn index_of(&self, action: Action) -> Option<usize> {
        if action.ad_id >= self.n_ads {
            return None;
        }
        let p = Placement::ALL.iter().position(|&pl| pl == action.placement)?;
        Some(action.ad_id * Placement::ALL.len() + p)
    }

    pub fn iter(&self) -> impl Iterator<Item = Action> + '_ {
        (0..self.len()).filter_map(move |i| self.action(i))
    }
}

/// Explainable record of the final decision of a simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub decision_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub content_name: String,
    pub topic: Topic,
    pub cohort: Cohort,
    pub ad_id: usize,
    pub placement: Placement,
    pub reason: String,
    pub clicked: bool,
}

impl DecisionRecord {
    pub fn to_json(&self) -> crate::AdcueResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
