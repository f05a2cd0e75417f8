//! LinUCB contextual bandit for discrete actions with dense context vectors.
//!
//! Each action `a` keeps a ridge-regression model over (context, reward)
//! pairs: a Gram matrix `A_a = I + Σ x·xᵗ` and a reward vector `b_a = Σ r·x`.
//! The selection score is the upper confidence bound
//!
//! ```text
//!   score_a(x) = θ_aᵗ·x + alpha · sqrt(xᵗ·A_a⁻¹·x),   θ_a = A_a⁻¹·b_a
//! ```
//!
//! Selection is a pure read; `update` is the only mutating operation. The
//! learner is single-threaded by design — callers running it from multiple
//! threads must serialize access themselves.

use crate::linalg::Cholesky;
use adcue_core::{AdcueError, AdcueResult};
use ndarray::{Array1, Array2, Axis};
use tracing::trace;

/// Per-action ridge regression state.
#[derive(Debug, Clone)]
struct ArmState {
    /// Regularized Gram matrix, `I + Σ x·xᵗ`. Stays symmetric
    /// positive-definite because every increment is a PSD outer product.
    a: Array2<f64>,
    /// Accumulated reward-weighted contexts, `Σ r·x`.
    b: Array1<f64>,
}

impl ArmState {
    fn new(dim: usize) -> Self {
        Self {
            a: Array2::eye(dim),
            b: Array1::zeros(dim),
        }
    }
}

/// LinUCB learner over a fixed set of actions.
pub struct LinUcb {
    alpha: f64,
    dim: usize,
    arms: Vec<ArmState>,
}

impl LinUcb {
    /// Create a learner for `n_actions` discrete choices over contexts of
    /// length `dim`, with exploration coefficient `alpha` (larger values
    /// favor actions with higher estimated-return uncertainty).
    pub fn new(n_actions: usize, dim: usize, alpha: f64) -> AdcueResult<Self> {
        if n_actions == 0 {
            return Err(AdcueError::Config(
                "n_actions must be positive".to_string(),
            ));
        }
        if dim == 0 {
            return Err(AdcueError::Config("dim must be positive".to_string()));
        }
        if !alpha.is_finite() || alpha < 0.0 {
            return Err(AdcueError::Config(format!(
                "alpha must be a non-negative finite number, got {alpha}"
            )));
        }

        Ok(Self {
            alpha,
            dim,
            arms: (0..n_actions).map(|_| ArmState::new(dim)).collect(),
        })
    }

    pub fn n_actions(&self) -> usize {
        self.arms.len()
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Choose the action with the highest UCB score for this context.
    ///
    /// Ties go to the lowest index, so selection is deterministic given
    /// identical state and input — at initialization every arm scores the
    /// same and action 0 wins. Does not mutate state.
    pub fn select(&self, x: &Array1<f64>) -> AdcueResult<usize> {
        self.check_context(x)?;

        let mut best_score = f64::NEG_INFINITY;
        let mut best_action = 0;

        for (idx, arm) in self.arms.iter().enumerate() {
            let score = self.ucb_score(arm, x)?;
            if score > best_score {
                best_score = score;
                best_action = idx;
            }
        }

        Ok(best_action)
    }

    /// Fold an observed reward for `action` under context `x` into that
    /// action's model: `A += x·xᵗ`, `b += reward·x`.
    ///
    /// Validation happens before any mutation, so a failed call leaves the
    /// learner untouched.
    pub fn update(&mut self, x: &Array1<f64>, action: usize, reward: f64) -> AdcueResult<()> {
        self.check_context(x)?;
        if action >= self.arms.len() {
            return Err(AdcueError::InvalidAction {
                index: action,
                n_actions: self.arms.len(),
            });
        }
        if !reward.is_finite() {
            return Err(AdcueError::Numerical(format!(
                "reward must be finite, got {reward}"
            )));
        }

        let outer = x
            .view()
            .insert_axis(Axis(1))
            .dot(&x.view().insert_axis(Axis(0)));

        let arm = &mut self.arms[action];
        arm.a += &outer;
        arm.b.scaled_add(reward, x);

        trace!(action, reward, "arm state updated");
        Ok(())
    }

    /// UCB score for a single arm: exploit term `θᵗx` plus exploration term
    /// `alpha·sqrt(xᵗA⁻¹x)`. One Cholesky factorization, two solves.
    fn ucb_score(&self, arm: &ArmState, x: &Array1<f64>) -> AdcueResult<f64> {
        let chol = Cholesky::factor(&arm.a)?;

        let theta = chol.solve(&arm.b);
        let exploit = theta.dot(x);

        let y = chol.solve(x);
        let quad = x.dot(&y).max(0.0);
        let explore = self.alpha * quad.sqrt();

        Ok(exploit + explore)
    }

    fn check_context(&self, x: &Array1<f64>) -> AdcueResult<()> {
        if x.len() != self.dim {
            return Err(AdcueError::DimensionMismatch {
                expected: self.dim,
                actual: x.len(),
            });
        }
        if x.iter().any(|v| !v.is_finite()) {
            return Err(AdcueError::Numerical(
                "context contains non-finite values".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn arms_equal(a: &LinUcb, b: &LinUcb) -> bool {
        a.arms.len() == b.arms.len()
            && a.arms
                .iter()
                .zip(b.arms.iter())
                .all(|(x, y)| x.a == y.a && x.b == y.b)
    }

    // 1. Construction --------------------------------------------------------

    #[test]
    fn test_rejects_zero_actions_or_dim() {
        assert!(matches!(LinUcb::new(0, 4, 1.0), Err(AdcueError::Config(_))));
        assert!(matches!(LinUcb::new(4, 0, 1.0), Err(AdcueError::Config(_))));
    }

    #[test]
    fn test_rejects_bad_alpha() {
        assert!(LinUcb::new(2, 2, -0.5).is_err());
        assert!(LinUcb::new(2, 2, f64::NAN).is_err());
        assert!(LinUcb::new(2, 2, 0.0).is_ok());
    }

    // 2. Initial symmetry (P1) -----------------------------------------------

    #[test]
    fn test_untried_arms_tie_break_to_first() {
        let bandit = LinUcb::new(5, 10, 1.0).unwrap();
        let mut x = Array1::zeros(10);
        x[3] = 1.0;
        x[7] = 1.0;
        assert_eq!(bandit.select(&x).unwrap(), 0);
    }

    // 3. Confidence shrink (P2) ----------------------------------------------

    #[test]
    fn test_explore_term_shrinks_with_evidence() {
        let mut bandit = LinUcb::new(1, 3, 1.0).unwrap();
        let x = array![1.0, 0.0, 0.0];

        // Zero reward keeps b at zero, so the score is the explore term alone.
        let mut previous = bandit.ucb_score(&bandit.arms[0], &x).unwrap();
        assert!((previous - 1.0).abs() < 1e-12);

        for _ in 0..5 {
            bandit.update(&x, 0, 0.0).unwrap();
            let score = bandit.ucb_score(&bandit.arms[0], &x).unwrap();
            assert!(score < previous);
            previous = score;
        }
    }

    // 4. Reward sensitivity (P3) ---------------------------------------------

    #[test]
    fn test_prefers_rewarded_arm() {
        let mut bandit = LinUcb::new(2, 2, 0.01).unwrap();
        let x = array![1.0, 0.0];

        bandit.update(&x, 0, 1.0).unwrap();
        bandit.update(&x, 1, 0.0).unwrap();

        assert_eq!(bandit.select(&x).unwrap(), 0);
    }

    // 5. Dimension contract (P4) ---------------------------------------------

    #[test]
    fn test_dimension_mismatch_leaves_state_unchanged() {
        let mut bandit = LinUcb::new(3, 4, 1.0).unwrap();
        let pristine = LinUcb::new(3, 4, 1.0).unwrap();
        let short = array![1.0, 0.0, 0.0];

        assert!(matches!(
            bandit.select(&short),
            Err(AdcueError::DimensionMismatch {
                expected: 4,
                actual: 3
            })
        ));
        assert!(matches!(
            bandit.update(&short, 0, 1.0),
            Err(AdcueError::DimensionMismatch { .. })
        ));
        assert!(arms_equal(&bandit, &pristine));
    }

    // 6. Bounds contract (P5) ------------------------------------------------

    #[test]
    fn test_invalid_action_leaves_state_unchanged() {
        let mut bandit = LinUcb::new(2, 2, 1.0).unwrap();
        let pristine = LinUcb::new(2, 2, 1.0).unwrap();

        assert!(matches!(
            bandit.update(&array![1.0, 0.0], 2, 1.0),
            Err(AdcueError::InvalidAction {
                index: 2,
                n_actions: 2
            })
        ));
        assert!(arms_equal(&bandit, &pristine));
    }

    // 7. Non-finite guards ---------------------------------------------------

    #[test]
    fn test_rejects_non_finite_inputs() {
        let mut bandit = LinUcb::new(2, 2, 1.0).unwrap();
        let pristine = LinUcb::new(2, 2, 1.0).unwrap();

        assert!(matches!(
            bandit.select(&array![f64::NAN, 0.0]),
            Err(AdcueError::Numerical(_))
        ));
        assert!(bandit.update(&array![f64::INFINITY, 0.0], 0, 1.0).is_err());
        assert!(bandit.update(&array![1.0, 0.0], 0, f64::NAN).is_err());
        assert!(arms_equal(&bandit, &pristine));
    }

    // 8. Determinism (P6) ----------------------------------------------------

    #[test]
    fn test_identical_histories_identical_learners() {
        let mut left = LinUcb::new(4, 6, 0.5).unwrap();
        let mut right = LinUcb::new(4, 6, 0.5).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let x = Array1::from_iter((0..6).map(|_| rng.gen::<f64>()));
            let reward = if rng.gen::<f64>() < 0.3 { 1.0 } else { 0.0 };

            let a = left.select(&x).unwrap();
            let b = right.select(&x).unwrap();
            assert_eq!(a, b);

            left.update(&x, a, reward).unwrap();
            right.update(&x, b, reward).unwrap();
        }

        assert!(arms_equal(&left, &right));
    }

    // 9. Spec scenarios ------------------------------------------------------

    #[test]
    fn test_greedy_two_arm_scenario() {
        let mut bandit = LinUcb::new(2, 2, 0.0).unwrap();
        let x = array![1.0, 0.0];

        assert_eq!(bandit.select(&x).unwrap(), 0);

        bandit.update(&x, 0, 1.0).unwrap();
        bandit.update(&x, 1, 0.0).unwrap();

        // Arm 0 now predicts 0.5 for this context, arm 1 predicts 0.
        assert_eq!(bandit.select(&x).unwrap(), 0);
    }

    #[test]
    fn test_select_rejects_short_context() {
        let bandit = LinUcb::new(3, 4, 1.0).unwrap();
        assert!(bandit.select(&array![1.0, 0.0, 0.0]).is_err());
    }

    // 10. Score agreement with the explicit-inverse formulation --------------

    #[test]
    fn test_scores_match_hand_computed_inverse() {
        let mut bandit = LinUcb::new(1, 2, 0.7).unwrap();
        let x = array![1.0, 2.0];
        bandit.update(&x, 0, 1.0).unwrap();

        // A = I + x·xᵗ = [[2, 2], [2, 5]], det = 6
        // A⁻¹ = [[5, -2], [-2, 2]] / 6, b = [1, 2]
        // θ = A⁻¹·b = [1/6, 2/6], exploit = θᵗx = 1/6 + 4/6 = 5/6
        // xᵗA⁻¹x = (1·(5-4) + 2·(-2+4)) / 6 = 5/6
        let expected = 5.0 / 6.0 + 0.7 * (5.0f64 / 6.0).sqrt();
        let score = bandit.ucb_score(&bandit.arms[0], &x).unwrap();
        assert!((score - expected).abs() < 1e-12);
    }
}
