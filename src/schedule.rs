use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::debug;

use crate::config::SimConfig;
use crate::draws::SeededDraws;
use crate::error::SimError;
use crate::game::simulate;
use crate::team::{ResultTeam, Team};

/// Simulate a day's worth of independent games in parallel.
///
/// Each game gets its own draw source, seeded from a master stream in input
/// order, so results only depend on `seed` and never on thread scheduling.
pub fn simulate_schedule(
    games: Vec<(Team, Team)>,
    config: &SimConfig,
    seed: Option<u64>,
) -> Vec<Result<[ResultTeam; 2], SimError>> {
    let mut rng = match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    };
    let seeded: Vec<(u64, (Team, Team))> = games
        .into_iter()
        .map(|game| (rng.gen::<u64>(), game))
        .collect();

    debug!(games = seeded.len(), "simulating schedule");

    seeded
        .into_par_iter()
        .map(|(game_seed, (home, away))| {
            simulate(home, away, config.clone(), SeededDraws::new(game_seed))
        })
        .collect()
}
