/// Length of a regulation game in minutes
pub const GAME_MINUTES: f64 = 48.0;

/// Possessions between substitution checks
pub const SUBS_EVERY_N: usize = 5;

/// Standard deviation of the game-level pace multiplier
pub const POSSESSION_NOISE: f64 = 0.03;

/// Standard deviation of the per-check effective rating multiplier
pub const RATING_NOISE: f64 = 0.04;

/// Standard deviation of court/bench clocks after a substitution
pub const SUB_RESET_NOISE: f64 = 2.0;

/// Minutes a player must sit (or play) before being swapped again
pub const MIN_STINT: f64 = 3.0;

/// Energy lost per minute on court
pub const FATIGUE_RATE: f64 = 0.01;

/// Energy regained per minute on the bench
pub const RECOVERY_RATE: f64 = 0.2;

/// Turnover probability before the defense rating is added
pub const BASE_TURNOVER: f64 = 0.1;

/// Probability that a turnover is credited as a steal
pub const STEAL_PROB: f64 = 0.55;

/// Block probability before the defense rating is added
pub const BASE_BLOCK: f64 = 0.02;

/// Probability of a two-shot foul instead of a field goal attempt
pub const SHOOTING_FOUL_PROB: f64 = 0.15;

/// Minimum three point percentage for a player to attempt threes
pub const THREE_POINT_THRESHOLD: f64 = 0.25;

/// Fraction of the three point percentage used as the attempt probability
pub const THREE_POINT_TENDENCY: f64 = 0.5;

/// Probability that a made field goal is assisted
pub const ASSIST_PROB: f64 = 0.6;

/// Probability of an and-one free throw after a make
pub const AND_ONE_PROB: f64 = 0.1;

/// Probability that a missed shot is rebounded by the defense
pub const DEFENSIVE_REBOUND_PROB: f64 = 0.8;

/// Players on court per team
pub const ON_COURT: usize = 5;
