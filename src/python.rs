//! Python bindings.
//!
//! Rosters cross the boundary as plain dicts with the same camelCase keys the
//! storage layer uses, and come back as sanitized dicts.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::config::SimConfig;
use crate::constants::{GAME_MINUTES, ON_COURT, SUBS_EVERY_N};
use crate::draws::SeededDraws;
use crate::error::SimError;
use crate::game::simulate;
use crate::ratings::{Rating, RatingMap};
use crate::schedule::simulate_schedule;
use crate::stats::{Stat, StatMap};
use crate::team::{Player, ResultTeam, Team};

impl From<SimError> for PyErr {
    fn from(err: SimError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

fn required<'py>(dict: &Bound<'py, PyDict>, key: &str) -> PyResult<Bound<'py, PyAny>> {
    dict.get_item(key)?
        .ok_or_else(|| PyValueError::new_err(format!("missing key `{}`", key)))
}

fn extract_stats(obj: Option<Bound<'_, PyAny>>) -> PyResult<StatMap> {
    let mut stats = StatMap::new();
    if let Some(obj) = obj {
        for (key, value) in obj.downcast::<PyDict>()?.iter() {
            let name: String = key.extract()?;
            stats.set(name.parse::<Stat>()?, value.extract()?);
        }
    }
    Ok(stats)
}

fn extract_ratings(obj: &Bound<'_, PyAny>) -> PyResult<RatingMap> {
    let mut ratings = RatingMap::new();
    for (key, value) in obj.downcast::<PyDict>()?.iter() {
        let name: String = key.extract()?;
        ratings.set(name.parse::<Rating>()?, value.extract()?);
    }
    Ok(ratings)
}

fn extract_player(obj: &Bound<'_, PyAny>) -> PyResult<Player> {
    let dict = obj.downcast::<PyDict>()?;
    Ok(Player {
        id: required(dict, "id")?.extract()?,
        overall_rating: required(dict, "overallRating")?.extract()?,
        stats: extract_stats(dict.get_item("stats")?)?,
        composite_ratings: extract_ratings(&required(dict, "compositeRatings")?)?,
    })
}

fn extract_team(dict: &Bound<'_, PyDict>) -> PyResult<Team> {
    let players_obj = required(dict, "players")?;
    let players = players_obj
        .downcast::<PyList>()?
        .iter()
        .map(|p| extract_player(&p))
        .collect::<PyResult<Vec<_>>>()?;

    Ok(Team {
        id: required(dict, "id")?.extract()?,
        defense: required(dict, "defense")?.extract()?,
        pace: required(dict, "pace")?.extract()?,
        stats: extract_stats(dict.get_item("stats")?)?,
        players,
    })
}

fn stats_to_dict<'py>(py: Python<'py>, stats: &StatMap) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    for (stat, value) in stats.iter() {
        dict.set_item(stat.as_str(), value)?;
    }
    Ok(dict)
}

fn result_to_dict<'py>(py: Python<'py>, team: &ResultTeam) -> PyResult<Bound<'py, PyDict>> {
    let players = PyList::empty_bound(py);
    for player in &team.players {
        let entry = PyDict::new_bound(py);
        entry.set_item("id", player.id)?;
        entry.set_item("stats", stats_to_dict(py, &player.stats)?)?;
        players.append(entry)?;
    }

    let dict = PyDict::new_bound(py);
    dict.set_item("id", team.id)?;
    dict.set_item("stats", stats_to_dict(py, &team.stats)?)?;
    dict.set_item("players", players)?;
    Ok(dict)
}

fn results_to_list<'py>(
    py: Python<'py>,
    results: &[ResultTeam; 2],
) -> PyResult<Bound<'py, PyList>> {
    let list = PyList::empty_bound(py);
    for team in results {
        list.append(result_to_dict(py, team)?)?;
    }
    Ok(list)
}

/// Simulate one game. Returns `[team1_result, team2_result]`.
#[pyfunction]
#[pyo3(name = "simulate_game", signature = (team1, team2, seed = None))]
fn py_simulate_game<'py>(
    py: Python<'py>,
    team1: &Bound<'py, PyDict>,
    team2: &Bound<'py, PyDict>,
    seed: Option<u64>,
) -> PyResult<Bound<'py, PyList>> {
    let team1 = extract_team(team1)?;
    let team2 = extract_team(team2)?;

    let results = py.allow_threads(|| {
        simulate(team1, team2, SimConfig::default(), SeededDraws::from_seed(seed))
    })?;
    results_to_list(py, &results)
}

/// Simulate a list of `(team1, team2)` games in parallel.
///
/// Raises `ValueError` for the first game whose roster is rejected.
#[pyfunction]
#[pyo3(name = "simulate_schedule", signature = (games, seed = None))]
fn py_simulate_schedule<'py>(
    py: Python<'py>,
    games: &Bound<'py, PyList>,
    seed: Option<u64>,
) -> PyResult<Bound<'py, PyList>> {
    let mut matchups = Vec::with_capacity(games.len());
    for game in games.iter() {
        let (team1, team2): (Bound<'py, PyDict>, Bound<'py, PyDict>) = game.extract()?;
        matchups.push((extract_team(&team1)?, extract_team(&team2)?));
    }

    let results = py.allow_threads(|| simulate_schedule(matchups, &SimConfig::default(), seed));

    let out = PyList::empty_bound(py);
    for result in results {
        out.append(results_to_list(py, &result?)?)?;
    }
    Ok(out)
}

#[pymodule]
fn gamesim_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_simulate_game, m)?)?;
    m.add_function(wrap_pyfunction!(py_simulate_schedule, m)?)?;

    m.add("GAME_MINUTES", GAME_MINUTES)?;
    m.add("SUBS_EVERY_N", SUBS_EVERY_N)?;
    m.add("ON_COURT", ON_COURT)?;
    m.add(
        "STAT_NAMES",
        Stat::ALL.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
    )?;
    m.add(
        "RATING_NAMES",
        Rating::ALL.iter().map(|r| r.as_str()).collect::<Vec<_>>(),
    )?;

    Ok(())
}
