use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::roster::{TeamRecord, WeekSelector};
use crate::simulator::Simulator;
use crate::team::TeamId;

/// How often a team finished top across many simulated championships.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TitleOdds {
    pub id: TeamId,
    pub name: String,
    pub titles: usize,
    /// Titles as a percentage of all simulations
    pub frequency: f64,
}

/// Play the remaining championship `simulations` times and count champions.
///
/// Every simulation gets its own seed drawn from a master generator, so a
/// fixed `seed` gives the same counts regardless of thread scheduling. Results
/// are in roster order.
pub fn title_odds(records: &[TeamRecord], simulations: usize, seed: Option<u64>) -> Result<Vec<TitleOdds>> {
    let template = Simulator::new(WeekSelector::All, records)?;

    let mut rng = match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    };
    let seeds: Vec<u64> = (0..simulations).map(|_| rng.gen::<u64>()).collect();

    let champions: Vec<Option<TeamId>> = seeds
        .par_iter()
        .map(|&sim_seed| {
            let mut simulator = template.clone();
            let report = simulator.run_seeded(Some(sim_seed));
            report
                .latest()
                .and_then(|week| week.standings.first())
                .map(|row| row.id)
        })
        .collect();

    let mut titles = vec![0usize; template.teams().len()];
    for id in champions.into_iter().flatten() {
        titles[id] += 1;
    }

    info!(simulations, teams = titles.len(), "computed title odds");

    Ok(template
        .teams()
        .iter()
        .map(|team| TitleOdds {
            id: team.id,
            name: team.name.clone(),
            titles: titles[team.id],
            frequency: if simulations == 0 {
                0.0
            } else {
                100.0 * titles[team.id] as f64 / simulations as f64
            },
        })
        .collect())
}
