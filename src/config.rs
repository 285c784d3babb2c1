use serde::Deserialize;

use crate::constants::*;
use crate::error::SimError;

/// Tuning knobs for a single game simulation.
///
/// Every field defaults to the value in [`crate::constants`], so a host can
/// deserialize a partial table and override only what it needs.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimConfig {
    pub game_minutes: f64,
    pub subs_every_n: usize,
    pub possession_noise: f64,
    pub rating_noise: f64,
    pub sub_reset_noise: f64,
    pub min_stint: f64,
    pub fatigue_rate: f64,
    pub recovery_rate: f64,
    pub base_turnover: f64,
    pub steal_prob: f64,
    pub base_block: f64,
    pub shooting_foul_prob: f64,
    pub three_point_threshold: f64,
    pub three_point_tendency: f64,
    pub assist_prob: f64,
    pub and_one_prob: f64,
    pub defensive_rebound_prob: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            game_minutes: GAME_MINUTES,
            subs_every_n: SUBS_EVERY_N,
            possession_noise: POSSESSION_NOISE,
            rating_noise: RATING_NOISE,
            sub_reset_noise: SUB_RESET_NOISE,
            min_stint: MIN_STINT,
            fatigue_rate: FATIGUE_RATE,
            recovery_rate: RECOVERY_RATE,
            base_turnover: BASE_TURNOVER,
            steal_prob: STEAL_PROB,
            base_block: BASE_BLOCK,
            shooting_foul_prob: SHOOTING_FOUL_PROB,
            three_point_threshold: THREE_POINT_THRESHOLD,
            three_point_tendency: THREE_POINT_TENDENCY,
            assist_prob: ASSIST_PROB,
            and_one_prob: AND_ONE_PROB,
            defensive_rebound_prob: DEFENSIVE_REBOUND_PROB,
        }
    }
}

impl SimConfig {
    /// Minutes of game clock that pass between two substitution checks.
    pub fn rotation_interval(&self, num_possessions: usize) -> f64 {
        self.game_minutes / (2 * num_possessions) as f64 * self.subs_every_n as f64
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if self.subs_every_n == 0 {
            return Err(SimError::InvalidConfig {
                field: "subsEveryN",
                reason: "must be at least 1".to_string(),
            });
        }

        let probabilities = [
            ("baseTurnover", self.base_turnover),
            ("stealProb", self.steal_prob),
            ("baseBlock", self.base_block),
            ("shootingFoulProb", self.shooting_foul_prob),
            ("threePointTendency", self.three_point_tendency),
            ("assistProb", self.assist_prob),
            ("andOneProb", self.and_one_prob),
            ("defensiveReboundProb", self.defensive_rebound_prob),
        ];
        for (field, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(SimError::InvalidConfig {
                    field,
                    reason: format!("probability {} outside [0, 1]", value),
                });
            }
        }

        let scales = [
            ("gameMinutes", self.game_minutes),
            ("possessionNoise", self.possession_noise),
            ("ratingNoise", self.rating_noise),
            ("subResetNoise", self.sub_reset_noise),
            ("minStint", self.min_stint),
            ("fatigueRate", self.fatigue_rate),
            ("recoveryRate", self.recovery_rate),
        ];
        for (field, value) in scales {
            if !value.is_finite() || value < 0.0 {
                return Err(SimError::InvalidConfig {
                    field,
                    reason: format!("expected a finite non-negative value, got {}", value),
                });
            }
        }

        Ok(())
    }
}
