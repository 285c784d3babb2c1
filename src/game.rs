use tracing::{debug, info};

use crate::config::SimConfig;
use crate::constants::ON_COURT;
use crate::draws::DrawSource;
use crate::error::SimError;
use crate::possession::{resolve_possession, PossessionOutcome, Side};
use crate::rotation::update_on_court;
use crate::team::{ResultTeam, Team};

/// A single game in progress.
///
/// Owns working copies of both rosters for the length of one game. The
/// first team runs its whole allotment of possessions, then the second
/// team runs its allotment.
pub struct GameSim<D: DrawSource> {
    teams: [Team; 2],
    on_court: [[usize; ON_COURT]; 2],
    num_possessions: usize,
    config: SimConfig,
    draws: D,
}

impl<D: DrawSource> GameSim<D> {
    /// Validate both rosters and draw the game's possession count.
    pub fn new(
        team1: Team,
        team2: Team,
        config: SimConfig,
        mut draws: D,
    ) -> Result<Self, SimError> {
        config.validate()?;
        team1.validate()?;
        team2.validate()?;

        let mut teams = [team1, team2];
        for team in teams.iter_mut() {
            team.prepare();
        }

        let mean_pace = (teams[0].pace + teams[1].pace) / 2.0;
        let num_possessions = (mean_pace * draws.normal(1.0, config.possession_noise))
            .round()
            .max(0.0) as usize;

        debug!(
            team1 = teams[0].id,
            team2 = teams[1].id,
            num_possessions,
            "game created"
        );

        Ok(GameSim {
            teams,
            on_court: [[0, 1, 2, 3, 4]; 2],
            num_possessions,
            config,
            draws,
        })
    }

    /// Possessions allotted to each team.
    pub fn num_possessions(&self) -> usize {
        self.num_possessions
    }

    /// Roster indices currently on court for team `t`.
    pub fn on_court(&self, t: usize) -> [usize; ON_COURT] {
        self.on_court[t]
    }

    pub fn teams(&self) -> &[Team; 2] {
        &self.teams
    }

    /// Substitution check for both teams.
    pub fn update_players_on_court(&mut self) {
        let dt = self.config.rotation_interval(self.num_possessions);
        for t in 0..2 {
            update_on_court(
                &mut self.teams[t],
                &mut self.on_court[t],
                dt,
                &self.config,
                &mut self.draws,
            );
        }
    }

    /// Play one possession with team `o` on offense.
    pub fn play_possession(&mut self, o: usize) -> PossessionOutcome {
        let [team0, team1] = &mut self.teams;
        let (offense, defense) = if o == 0 { (team0, team1) } else { (team1, team0) };
        let d = 1 - o;

        resolve_possession(
            &mut Side {
                team: offense,
                on_court: &self.on_court[o],
            },
            &mut Side {
                team: defense,
                on_court: &self.on_court[d],
            },
            &self.config,
            &mut self.draws,
        )
    }

    /// Simulate the whole game and return the sanitized box scores.
    pub fn run(mut self) -> [ResultTeam; 2] {
        for o in 0..2 {
            for i in 0..self.num_possessions {
                if i % self.config.subs_every_n == 0 {
                    self.update_players_on_court();
                }
                self.play_possession(o);
            }
        }

        let [team1, team2] = self.teams;
        let results = [team1.into_result(), team2.into_result()];
        info!(
            team1 = results[0].id,
            team2 = results[1].id,
            score1 = results[0].points(),
            score2 = results[1].points(),
            "game finished"
        );
        results
    }
}

/// Simulate one game between `team1` and `team2`.
pub fn simulate<D: DrawSource>(
    team1: Team,
    team2: Team,
    config: SimConfig,
    draws: D,
) -> Result<[ResultTeam; 2], SimError> {
    Ok(GameSim::new(team1, team2, config, draws)?.run())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draws::tests::ScriptedDraws;
    use crate::draws::SeededDraws;
    use crate::ratings::{Rating, RatingMap};
    use crate::stats::Stat;
    use crate::team::tests::make_team;
    use crate::team::Player;
    use proptest::prelude::*;

    fn box_score_stats() -> impl Iterator<Item = Stat> {
        Stat::ALL.into_iter().filter(|s| s.rolls_up())
    }

    fn mixed_team(id: u32, seed: u64) -> Team {
        // Roster of 13 with spread-out ratings
        let mut draws = SeededDraws::new(seed);
        let players = (0..13)
            .map(|i| {
                let ratings: RatingMap = Rating::ALL
                    .into_iter()
                    .map(|r| (r, 0.2 + 0.6 * draws.uniform()))
                    .collect();
                Player::new(id * 100 + i, 40.0 + 30.0 * draws.uniform(), ratings)
            })
            .collect();
        Team::new(id, 0.02 + 0.05 * draws.uniform(), 90.0 + 10.0 * draws.uniform(), players)
    }

    #[test]
    fn test_golden_path_scripted() {
        // Every uniform is 0.3 and every normal returns its mean: 96
        // possessions per team, each one an assisted two by slot 1
        let team1 = make_team(1, 5, 0.45);
        let team2 = make_team(2, 5, 0.45);
        let draws = ScriptedDraws::constant(0.3);

        let game = GameSim::new(team1, team2, SimConfig::default(), draws).unwrap();
        assert_eq!(game.num_possessions(), 96);
        let [r1, r2] = game.run();

        for team in [&r1, &r2] {
            assert_eq!(team.points(), 192.0);
            assert_eq!(team.stats.get(Stat::FieldGoalsAttempted), 96.0);
            assert_eq!(team.stats.get(Stat::FieldGoalsMade), 96.0);
            assert_eq!(team.stats.get(Stat::Assists), 96.0);
            assert_eq!(team.stats.get(Stat::Turnovers), 0.0);
            assert_eq!(team.players[1].stats.get(Stat::Points), 192.0);
            assert_eq!(team.players[2].stats.get(Stat::Assists), 96.0);
            // 20 checks per half, each adding 1.25 minutes to five players
            assert!((team.stats.get(Stat::Minutes) - 250.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_golden_path_seeded() {
        let game = GameSim::new(
            make_team(1, 5, 0.45),
            make_team(2, 5, 0.45),
            SimConfig::default(),
            SeededDraws::new(2012),
        )
        .unwrap();
        assert_eq!(game.num_possessions(), 94);

        let [home, away] = game.run();
        assert_eq!(home.points(), 70.0);
        assert_eq!(away.points(), 67.0);

        let expected = [
            (Stat::Turnovers, 13.0, 13.0),
            (Stat::Steals, 8.0, 9.0),
            (Stat::Blocks, 4.0, 3.0),
            (Stat::PersonalFouls, 10.0, 13.0),
            (Stat::FieldGoalsAttempted, 65.0, 67.0),
            (Stat::FieldGoalsMade, 28.0, 29.0),
            (Stat::ThreePointersAttempted, 11.0, 13.0),
            (Stat::ThreePointersMade, 4.0, 4.0),
            (Stat::FreeThrowsAttempted, 29.0, 23.0),
            (Stat::FreeThrowsMade, 10.0, 5.0),
            (Stat::Assists, 17.0, 20.0),
            (Stat::OffensiveRebounds, 4.0, 9.0),
            (Stat::DefensiveRebounds, 29.0, 33.0),
        ];
        for (stat, home_total, away_total) in expected {
            assert_eq!(home.stats.get(stat), home_total, "home {}", stat);
            assert_eq!(away.stats.get(stat), away_total, "away {}", stat);
        }
        // 38 rotation checks of 48 / 188 * 5 minutes for five slots
        assert!((home.stats.get(Stat::Minutes) - 242.5531914893617).abs() < 1e-9);

        let again = simulate(
            make_team(1, 5, 0.45),
            make_team(2, 5, 0.45),
            SimConfig::default(),
            SeededDraws::new(2012),
        )
        .unwrap();
        assert_eq!(again, [home, away]);
    }

    #[test]
    fn test_deterministic_bytes() {
        let run = || {
            let results = simulate(
                mixed_team(1, 10),
                mixed_team(2, 20),
                SimConfig::default(),
                SeededDraws::new(99),
            )
            .unwrap();
            serde_json::to_vec(&results).unwrap()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_different_seeds_differ() {
        let run = |seed| {
            simulate(
                mixed_team(1, 10),
                mixed_team(2, 20),
                SimConfig::default(),
                SeededDraws::new(seed),
            )
            .unwrap()
        };
        let (a, b) = (run(1), run(2));
        assert_ne!(
            serde_json::to_vec(&a).unwrap(),
            serde_json::to_vec(&b).unwrap()
        );
    }

    #[test]
    fn test_sanitized_output() {
        let results = simulate(
            mixed_team(1, 3),
            mixed_team(2, 4),
            SimConfig::default(),
            SeededDraws::new(5),
        )
        .unwrap();
        let json = serde_json::to_string(&results).unwrap();
        for field in ["overallRating", "compositeRatings", "defense", "pace"] {
            assert!(!json.contains(field), "{} leaked", field);
        }
        assert_eq!(results[0].id, 1);
        assert_eq!(results[1].players.len(), 13);
    }

    #[test]
    fn test_all_turnovers_when_defense_overwhelming() {
        let mut team1 = make_team(1, 8, 0.45);
        let mut team2 = make_team(2, 8, 0.45);
        team1.defense = 0.95;
        team2.defense = 0.95;

        let game = GameSim::new(team1, team2, SimConfig::default(), SeededDraws::new(8)).unwrap();
        let n = game.num_possessions() as f64;
        let results = game.run();

        for team in &results {
            assert_eq!(team.stats.get(Stat::Turnovers), n);
            assert_eq!(team.stats.get(Stat::FieldGoalsAttempted), 0.0);
            assert_eq!(team.stats.get(Stat::FreeThrowsAttempted), 0.0);
            assert_eq!(team.stats.get(Stat::Blocks), 0.0);
            assert_eq!(team.points(), 0.0);
        }
    }

    #[test]
    fn test_dominant_bench_player_gets_minutes() {
        let mut team1 = make_team(1, 6, 0.45);
        team1.players[5].overall_rating = 500.0;
        let team2 = make_team(2, 5, 0.45);

        let results = simulate(team1, team2, SimConfig::default(), SeededDraws::new(17)).unwrap();

        let bench = &results[0].players[5].stats;
        assert!(bench.get(Stat::Minutes) > 0.0);
        assert_eq!(bench.get(Stat::Starter), 0.0);
        // Somebody sat down: five starters no longer share all the minutes
        let starter_minutes: f64 = results[0].players[..5]
            .iter()
            .map(|p| p.stats.get(Stat::Minutes))
            .sum();
        assert!(starter_minutes < results[0].stats.get(Stat::Minutes));
    }

    #[test]
    fn test_on_court_changes_during_game() {
        let mut team1 = make_team(1, 6, 0.45);
        team1.players[5].overall_rating = 500.0;
        let team2 = make_team(2, 5, 0.45);

        let mut game = GameSim::new(
            team1,
            team2,
            SimConfig::default(),
            ScriptedDraws::constant(0.5),
        )
        .unwrap();
        // 96 possessions: each check advances the clocks 1.25 minutes, so
        // the fourth check is the first with both stints above 3
        for _ in 0..3 {
            game.update_players_on_court();
            assert_eq!(game.on_court(0), [0, 1, 2, 3, 4]);
        }
        game.update_players_on_court();
        assert_eq!(game.on_court(0), [5, 1, 2, 3, 4]);

        let starter = &game.teams()[0].players[0].stats;
        // Court clock reset to zero by the scripted draw, then a bench interval
        assert_eq!(starter.get(Stat::CourtTime), 0.0);
        assert!((starter.get(Stat::BenchTime) - 1.25).abs() < 1e-12);
    }

    #[test]
    fn test_short_roster_fails_before_any_draw() {
        let mut draws = ScriptedDraws::constant(0.5);
        let rejected = matches!(
            GameSim::new(
                make_team(1, 4, 0.45),
                make_team(2, 5, 0.45),
                SimConfig::default(),
                &mut draws,
            ),
            Err(SimError::InvalidRoster { team: 1, .. })
        );
        assert!(rejected);
        assert_eq!(draws.normals, 0);
        assert_eq!(draws.uniforms_used(), 0);
    }

    #[test]
    fn test_play_possession_uses_requested_offense() {
        let mut game = GameSim::new(
            make_team(1, 5, 0.45),
            make_team(2, 5, 0.45),
            SimConfig::default(),
            ScriptedDraws::constant(0.3),
        )
        .unwrap();

        let outcome = game.play_possession(1);
        assert_eq!(
            outcome,
            PossessionOutcome::MadeShot {
                points: 2,
                assisted: true,
                and_one: false
            }
        );
        assert_eq!(game.teams()[1].stats.get(Stat::Points), 2.0);
        assert_eq!(game.teams()[0].stats.get(Stat::Points), 0.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_box_score_invariants(seed in any::<u64>(), roster_seed in 0u64..1000) {
            let results = simulate(
                mixed_team(1, roster_seed),
                mixed_team(2, roster_seed + 1),
                SimConfig::default(),
                SeededDraws::new(seed),
            )
            .unwrap();

            for team in &results {
                for stat in box_score_stats() {
                    let total = team.player_total(stat);
                    let rolled = team.stats.get(stat);
                    prop_assert!(
                        (total - rolled).abs() < 1e-6,
                        "{} {} vs {}",
                        stat,
                        total,
                        rolled
                    );
                }
                for player in &team.players {
                    let s = &player.stats;
                    let made_attempted = [
                        (Stat::FieldGoalsMade, Stat::FieldGoalsAttempted),
                        (Stat::ThreePointersMade, Stat::ThreePointersAttempted),
                        (Stat::ThreePointersAttempted, Stat::FieldGoalsAttempted),
                        (Stat::FreeThrowsMade, Stat::FreeThrowsAttempted),
                    ];
                    for (part, whole) in made_attempted {
                        prop_assert!(s.get(part) <= s.get(whole), "{} > {}", part, whole);
                    }
                    let energy = s.get(Stat::Energy);
                    prop_assert!((0.0..=1.0).contains(&energy));
                    for stat in box_score_stats() {
                        prop_assert!(s.get(stat) >= 0.0);
                    }
                }
            }
        }

        #[test]
        fn prop_on_court_always_valid(seed in any::<u64>()) {
            let mut game = GameSim::new(
                mixed_team(1, 5),
                mixed_team(2, 6),
                SimConfig::default(),
                SeededDraws::new(seed),
            )
            .unwrap();
            for o in 0..2 {
                for i in 0..game.num_possessions() {
                    if i % SimConfig::default().subs_every_n == 0 {
                        game.update_players_on_court();
                        for t in 0..2 {
                            let mut court = game.on_court(t);
                            court.sort_unstable();
                            prop_assert!(court.windows(2).all(|w| w[0] < w[1]));
                            prop_assert!(court[ON_COURT - 1] < game.teams()[t].players.len());
                        }
                    }
                    game.play_possession(o);
                }
            }
        }
    }
}
