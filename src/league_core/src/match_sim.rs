use rand::Rng;
use serde::Serialize;

use crate::constants::MAX_GOALS;

/// Final score of a fixture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

/// Draw a random scoreline.
///
/// Each side's goals are independent and uniform over `0..=MAX_GOALS`.
pub fn simulate_score<R: Rng>(rng: &mut R) -> Score {
    Score {
        home: rng.gen_range(0..=MAX_GOALS),
        away: rng.gen_range(0..=MAX_GOALS),
    }
}
