//! Pre-game win probability from whatever signals a row carries.
//!
//! Tiers, first satisfied wins:
//! - **Rating**: logistic on `home_rating - away_rating`
//! - **Spread**: logistic on `-home_spread` (negative spread = home favored)
//! - **Neutral**: 0.5
//!
//! The model never fails; a missing or half-missing pair just drops to the
//! next tier.

use crate::table::models::ResolvedSignals;

/// Rating points that move a matchup to ~73% (one logistic scale unit).
pub const DEFAULT_RATING_SCALE: f64 = 10.0;
/// Spread points that move a matchup to ~73%.
pub const DEFAULT_SPREAD_SCALE: f64 = 6.0;
pub const NEUTRAL_PROB: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelParams {
    pub rating_scale: f64,
    pub spread_scale: f64,
}

impl Default for ModelParams {
    fn default() -> Self {
        ModelParams {
            rating_scale: DEFAULT_RATING_SCALE,
            spread_scale: DEFAULT_SPREAD_SCALE,
        }
    }
}

/// Which tier produced a probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbabilityPolicy {
    Rating,
    Spread,
    Neutral,
}

/// Full-precision outcome for one game. Round only when presenting.
#[derive(Debug, Clone, PartialEq)]
pub struct WinProbability {
    pub home_prob: f64,
    pub away_prob: f64,
    pub favorite_home: bool,
    pub favorite_prob: f64,
    pub policy: ProbabilityPolicy,
}

impl WinProbability {
    fn from_home(home_prob: f64, policy: ProbabilityPolicy) -> Self {
        let away_prob = 1.0 - home_prob;
        // Ties go to the home side.
        let favorite_home = home_prob >= away_prob;
        WinProbability {
            home_prob,
            away_prob,
            favorite_home,
            favorite_prob: home_prob.max(away_prob),
            policy,
        }
    }

    pub fn favorite_team<'a>(&self, signals: &'a ResolvedSignals) -> &'a str {
        if self.favorite_home {
            &signals.home_team
        } else {
            &signals.away_team
        }
    }
}

// ── Public API ───────────────────────────────────────────────────────────────

/// `1 / (1 + e^(-diff/scale))`. `scale` must be positive.
pub fn logistic(diff: f64, scale: f64) -> f64 {
    debug_assert!(scale > 0.0, "logistic scale must be positive");
    1.0 / (1.0 + (-diff / scale).exp())
}

/// Pick the highest available tier and compute the home win probability.
pub fn estimate_win_probability(signals: &ResolvedSignals, params: &ModelParams) -> WinProbability {
    let (home_prob, policy) = match (
        signals.home_rating,
        signals.away_rating,
        signals.home_spread,
        signals.away_spread,
    ) {
        (Some(home), Some(away), _, _) => (
            logistic(home - away, params.rating_scale),
            ProbabilityPolicy::Rating,
        ),
        // The away spread only gates the tier; it mirrors the home spread.
        (_, _, Some(home_spread), Some(_)) => (
            logistic(-home_spread, params.spread_scale),
            ProbabilityPolicy::Spread,
        ),
        _ => (NEUTRAL_PROB, ProbabilityPolicy::Neutral),
    };

    WinProbability::from_home(home_prob, policy)
}

// ── Tests ────────────────────────────────────────────────────────────────────
