use tracing::trace;

use crate::config::SimConfig;
use crate::constants::ON_COURT;
use crate::draws::DrawSource;
use crate::ratings::Rating;
use crate::selector::pick_player;
use crate::stats::Stat;
use crate::team::Team;

/// One team's view of a possession: its record and who is on court.
pub struct Side<'a> {
    pub team: &'a mut Team,
    pub on_court: &'a [usize; ON_COURT],
}

impl Side<'_> {
    fn ratings(&self, rating: Rating) -> [f64; ON_COURT] {
        self.on_court.map(|p| self.team.players[p].rating(rating))
    }

    /// Weighted pick over the on-court players; returns the on-court slot.
    fn pick_slot<D: DrawSource>(
        &self,
        rating: Rating,
        exempt: Option<usize>,
        draws: &mut D,
    ) -> usize {
        pick_player(self.ratings(rating), exempt, draws)
    }

    fn credit(&mut self, slot: usize, stat: Stat, amount: f64) {
        let player = self.on_court[slot];
        self.team.record(player, stat, amount);
    }

    /// Pick a player by `rating` and credit them with one `stat`.
    fn pick_and_credit<D: DrawSource>(&mut self, rating: Rating, stat: Stat, draws: &mut D) {
        let slot = self.pick_slot(rating, None, draws);
        self.credit(slot, stat, 1.0);
    }
}

/// Terminal event of a possession.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PossessionOutcome {
    Turnover { stolen: bool },
    /// Dead ball: no shot attempt and no rebound
    Blocked,
    /// Two-shot foul instead of a field goal attempt
    FreeThrows { made: u32 },
    MadeShot { points: u32, assisted: bool, and_one: bool },
    MissedShot { offensive_rebound: bool },
}

impl PossessionOutcome {
    pub fn points(&self) -> u32 {
        match *self {
            PossessionOutcome::FreeThrows { made } => made,
            PossessionOutcome::MadeShot { points, .. } => points,
            _ => 0,
        }
    }
}

/// Resolve a single offensive possession, recording every sub-event.
pub fn resolve_possession<D: DrawSource>(
    offense: &mut Side<'_>,
    defense: &mut Side<'_>,
    config: &SimConfig,
    draws: &mut D,
) -> PossessionOutcome {
    let defense_rating = defense.team.defense;

    let outcome = if draws.uniform() < config.base_turnover + defense_rating {
        offense.pick_and_credit(Rating::TurnoverRatio, Stat::Turnovers, draws);
        let stolen = draws.uniform() < config.steal_prob;
        if stolen {
            defense.pick_and_credit(Rating::StealRatio, Stat::Steals, draws);
        }
        PossessionOutcome::Turnover { stolen }
    } else {
        let shooter = offense.pick_slot(Rating::ShotRatio, None, draws);

        if draws.uniform() < config.base_block + defense_rating {
            defense.pick_and_credit(Rating::BlockRatio, Stat::Blocks, draws);
            PossessionOutcome::Blocked
        } else if draws.uniform() < config.shooting_foul_prob {
            defense.pick_and_credit(Rating::FoulRatio, Stat::PersonalFouls, draws);
            let made = free_throws(offense, shooter, 2, draws);
            PossessionOutcome::FreeThrows { made }
        } else {
            field_goal_attempt(offense, defense, shooter, config, draws)
        }
    };

    trace!(
        offense = offense.team.id,
        defense = defense.team.id,
        ?outcome,
        "possession"
    );
    outcome
}

fn field_goal_attempt<D: DrawSource>(
    offense: &mut Side<'_>,
    defense: &mut Side<'_>,
    shooter: usize,
    config: &SimConfig,
    draws: &mut D,
) -> PossessionOutcome {
    let player = &offense.team.players[offense.on_court[shooter]];
    let three_pct = player.rating(Rating::ThreePointerPercentage);
    let two_pct = player.rating(Rating::FieldGoalPercentage);

    offense.credit(shooter, Stat::FieldGoalsAttempted, 1.0);

    // The tendency draw only happens for players who shoot threes at all
    let three = three_pct > config.three_point_threshold
        && draws.uniform() < config.three_point_tendency * three_pct;
    if three {
        offense.credit(shooter, Stat::ThreePointersAttempted, 1.0);
    }
    let pct = if three { three_pct } else { two_pct };

    if draws.uniform() < pct - defense.team.defense {
        offense.credit(shooter, Stat::FieldGoalsMade, 1.0);
        offense.credit(shooter, Stat::Points, 2.0);
        let mut points = 2;
        if three {
            offense.credit(shooter, Stat::ThreePointersMade, 1.0);
            offense.credit(shooter, Stat::Points, 1.0);
            points += 1;
        }

        let assisted = draws.uniform() < config.assist_prob;
        if assisted {
            let assister = offense.pick_slot(Rating::AssistRatio, Some(shooter), draws);
            offense.credit(assister, Stat::Assists, 1.0);
        }

        let and_one = draws.uniform() < config.and_one_prob;
        if and_one {
            points += free_throws(offense, shooter, 1, draws);
        }

        PossessionOutcome::MadeShot {
            points,
            assisted,
            and_one,
        }
    } else {
        let offensive_rebound = draws.uniform() >= config.defensive_rebound_prob;
        if offensive_rebound {
            offense.pick_and_credit(Rating::ReboundRatio, Stat::OffensiveRebounds, draws);
        } else {
            defense.pick_and_credit(Rating::ReboundRatio, Stat::DefensiveRebounds, draws);
        }
        PossessionOutcome::MissedShot { offensive_rebound }
    }
}

/// Shoot `amount` free throws for the on-court `slot`; returns how many went in.
fn free_throws<D: DrawSource>(
    offense: &mut Side<'_>,
    slot: usize,
    amount: u32,
    draws: &mut D,
) -> u32 {
    let pct = offense.team.players[offense.on_court[slot]].rating(Rating::FreeThrowPercentage);
    let mut made = 0;
    for _ in 0..amount {
        offense.credit(slot, Stat::FreeThrowsAttempted, 1.0);
        if draws.uniform() < pct {
            offense.credit(slot, Stat::FreeThrowsMade, 1.0);
            offense.credit(slot, Stat::Points, 1.0);
            made += 1;
        }
    }
    made
}
