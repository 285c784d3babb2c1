use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gamesim_core::{
    pick_player, simulate, simulate_schedule, Player, Rating, RatingMap, SeededDraws, SimConfig,
    Team,
};

fn create_team(id: u32, size: u32) -> Team {
    let players = (0..size)
        .map(|i| {
            let mut ratings = RatingMap::uniform(0.45);
            ratings.set(Rating::ThreePointerPercentage, 0.3 + (i % 4) as f64 * 0.03);
            ratings.set(Rating::FreeThrowPercentage, 0.7 + (i % 3) as f64 * 0.05);
            Player::new(id * 100 + i, 70.0 - i as f64 * 2.0, ratings)
        })
        .collect();
    Team::new(id, 0.04, 96.0, players)
}

fn bench_pick_player(c: &mut Criterion) {
    let mut draws = SeededDraws::new(42);
    let weights = [0.1, 0.3, 0.2, 0.25, 0.15];

    c.bench_function("pick_player", |b| {
        b.iter(|| pick_player(black_box(weights), Some(1), &mut draws))
    });
}

fn bench_single_game(c: &mut Criterion) {
    let home = create_team(1, 13);
    let away = create_team(2, 13);

    c.bench_function("simulate_game_13_man_rosters", |b| {
        b.iter(|| {
            simulate(
                black_box(home.clone()),
                black_box(away.clone()),
                SimConfig::default(),
                SeededDraws::new(42),
            )
        })
    });
}

fn bench_schedule(c: &mut Criterion) {
    let games: Vec<(Team, Team)> = (0..15)
        .map(|i| (create_team(2 * i, 13), create_team(2 * i + 1, 13)))
        .collect();
    let config = SimConfig::default();

    c.bench_function("simulate_schedule_15_games", |b| {
        b.iter(|| simulate_schedule(black_box(games.clone()), &config, Some(42)))
    });
}

criterion_group!(benches, bench_pick_player, bench_single_game, bench_schedule);
criterion_main!(benches);
