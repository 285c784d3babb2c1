use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::SimError;

/// Composite ratings consumed by the possession resolver.
///
/// The `*Ratio` ratings are selection weights; the `*Percentage` ratings are
/// success probabilities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Rating {
    ShotRatio,
    TurnoverRatio,
    StealRatio,
    BlockRatio,
    FoulRatio,
    AssistRatio,
    ReboundRatio,
    ThreePointerPercentage,
    FieldGoalPercentage,
    FreeThrowPercentage,
}

impl Rating {
    pub const ALL: [Rating; 10] = [
        Rating::ShotRatio,
        Rating::TurnoverRatio,
        Rating::StealRatio,
        Rating::BlockRatio,
        Rating::FoulRatio,
        Rating::AssistRatio,
        Rating::ReboundRatio,
        Rating::ThreePointerPercentage,
        Rating::FieldGoalPercentage,
        Rating::FreeThrowPercentage,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Rating::ShotRatio => "shotRatio",
            Rating::TurnoverRatio => "turnoverRatio",
            Rating::StealRatio => "stealRatio",
            Rating::BlockRatio => "blockRatio",
            Rating::FoulRatio => "foulRatio",
            Rating::AssistRatio => "assistRatio",
            Rating::ReboundRatio => "reboundRatio",
            Rating::ThreePointerPercentage => "threePointerPercentage",
            Rating::FieldGoalPercentage => "fieldGoalPercentage",
            Rating::FreeThrowPercentage => "freeThrowPercentage",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rating {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rating::ALL
            .iter()
            .copied()
            .find(|rating| rating.as_str() == s)
            .ok_or_else(|| SimError::UnknownRating(s.to_string()))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatingMap {
    values: BTreeMap<Rating, f64>,
}

impl RatingMap {
    pub fn new() -> Self {
        RatingMap::default()
    }

    /// Same value for every rating.
    pub fn uniform(value: f64) -> Self {
        Rating::ALL.into_iter().map(|r| (r, value)).collect()
    }

    /// Rating value, or 0 when absent. Rosters are checked for completeness
    /// before a game starts, so the fallback is never hit during simulation.
    pub fn get(&self, rating: Rating) -> f64 {
        self.values.get(&rating).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, rating: Rating, value: f64) {
        self.values.insert(rating, value);
    }

    /// First rating in [`Rating::ALL`] order that has no value.
    pub fn missing(&self) -> Option<Rating> {
        Rating::ALL
            .into_iter()
            .find(|r| !self.values.contains_key(r))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Rating, f64)> + '_ {
        self.values.iter().map(|(&rating, &value)| (rating, value))
    }
}

impl FromIterator<(Rating, f64)> for RatingMap {
    fn from_iter<I: IntoIterator<Item = (Rating, f64)>>(iter: I) -> Self {
        RatingMap {
            values: iter.into_iter().collect(),
        }
    }
}
