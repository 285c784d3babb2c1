use rand::distributions::Distribution;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use statrs::distribution::Normal;

/// Source of the random draws a game consumes.
///
/// The order of calls is part of the simulation: the same source state and
/// the same inputs always replay the same game.
pub trait DrawSource {
    /// Uniform sample in [0, 1).
    fn uniform(&mut self) -> f64;

    /// Gaussian sample.
    fn normal(&mut self, mean: f64, std_dev: f64) -> f64;
}

impl<D: DrawSource + ?Sized> DrawSource for &mut D {
    fn uniform(&mut self) -> f64 {
        (**self).uniform()
    }

    fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        (**self).normal(mean, std_dev)
    }
}

/// ChaCha-backed draw source, one per game.
#[derive(Clone, Debug)]
pub struct SeededDraws {
    rng: ChaCha8Rng,
}

impl SeededDraws {
    pub fn new(seed: u64) -> Self {
        SeededDraws {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        SeededDraws {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => SeededDraws::new(s),
            None => SeededDraws::from_entropy(),
        }
    }
}

impl DrawSource for SeededDraws {
    fn uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        // statrs rejects a zero spread; that distribution is the point mass
        match Normal::new(mean, std_dev) {
            Ok(dist) => dist.sample(&mut self.rng),
            Err(_) => mean,
        }
    }
}
