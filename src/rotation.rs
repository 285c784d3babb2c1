use tracing::debug;

use crate::config::SimConfig;
use crate::constants::ON_COURT;
use crate::draws::DrawSource;
use crate::stats::Stat;
use crate::team::Team;

/// Run one substitution check for a team and advance its clocks by `dt`
/// minutes.
///
/// Each on-court slot, in order, is compared against the bench in roster
/// order; the first rested bench player with a higher fatigue-adjusted
/// rating replaces a player who has been on court long enough. Returns the
/// number of substitutions made.
pub fn update_on_court<D: DrawSource>(
    team: &mut Team,
    on_court: &mut [usize; ON_COURT],
    dt: f64,
    config: &SimConfig,
    draws: &mut D,
) -> usize {
    let effective: Vec<f64> = team
        .players
        .iter()
        .map(|p| {
            p.overall_rating * p.stats.get(Stat::Energy) * draws.normal(1.0, config.rating_noise)
        })
        .collect();

    let mut substitutions = 0;
    for slot in 0..ON_COURT {
        let p = on_court[slot];
        if team.players[p].stats.get(Stat::CourtTime) <= config.min_stint {
            continue;
        }

        let incoming = (0..team.players.len()).find(|&b| {
            !on_court.contains(&b)
                && team.players[b].stats.get(Stat::BenchTime) > config.min_stint
                && effective[b] > effective[p]
        });

        if let Some(b) = incoming {
            on_court[slot] = b;
            for player in [b, p] {
                for stat in [Stat::CourtTime, Stat::BenchTime] {
                    let reset = draws.normal(0.0, config.sub_reset_noise);
                    team.players[player].stats.set(stat, reset);
                }
            }
            substitutions += 1;
            debug!(
                team = team.id,
                slot,
                player_out = team.players[p].id,
                player_in = team.players[b].id,
                "substitution"
            );
        }
    }

    for i in 0..team.players.len() {
        if on_court.contains(&i) {
            team.record(i, Stat::Minutes, dt);
            team.record(i, Stat::CourtTime, dt);
            team.record(i, Stat::Energy, -dt * config.fatigue_rate);
            if team.players[i].stats.get(Stat::Energy) < 0.0 {
                team.players[i].stats.set(Stat::Energy, 0.0);
            }
        } else {
            team.record(i, Stat::BenchTime, dt);
            team.record(i, Stat::Energy, dt * config.recovery_rate);
            if team.players[i].stats.get(Stat::Energy) > 1.0 {
                team.players[i].stats.set(Stat::Energy, 1.0);
            }
        }
    }

    substitutions
}
