use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{LeagueError, Result};
use crate::match_sim::Score;
use crate::team::TeamId;

/// A home/away pairing, with its score once played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Fixture {
    pub home: TeamId,
    pub away: TeamId,
    pub result: Option<Score>,
}

impl Fixture {
    pub fn new(home: TeamId, away: TeamId) -> Self {
        debug_assert_ne!(home, away);
        Fixture {
            home,
            away,
            result: None,
        }
    }

    pub fn involves(&self, team: TeamId) -> bool {
        self.home == team || self.away == team
    }

    /// True if the two fixtures have any team in common.
    pub fn shares_team(&self, other: &Fixture) -> bool {
        self.involves(other.home) || self.involves(other.away)
    }

    pub fn is_played(&self) -> bool {
        self.result.is_some()
    }
}

/// Number of weeks in a double round-robin for `team_count` teams.
///
/// Every team meets every other team home and away, one match per week, so
/// this is `2 * (n - 1)`. It coincides with `n * (n - 1) / 2` only at `n = 4`;
/// with two teams there are two weeks, not one.
pub fn total_weeks(team_count: usize) -> u32 {
    (2 * team_count.saturating_sub(1)) as u32
}

/// Every ordered pair of distinct teams, in roster order.
pub fn candidate_fixtures(team_count: usize) -> Vec<Fixture> {
    let mut candidates = Vec::with_capacity(team_count * team_count.saturating_sub(1));
    for home in 0..team_count {
        for away in 0..team_count {
            if home != away {
                candidates.push(Fixture::new(home, away));
            }
        }
    }
    candidates
}

/// Fixtures grouped into weeks. Week numbers are 1-based.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Schedule {
    weeks: Vec<Vec<Fixture>>,
}

impl Schedule {
    pub fn total_weeks(&self) -> u32 {
        self.weeks.len() as u32
    }

    pub fn week(&self, week: u32) -> Option<&[Fixture]> {
        let index = (week as usize).checked_sub(1)?;
        self.weeks.get(index).map(Vec::as_slice)
    }

    pub fn week_mut(&mut self, week: u32) -> Option<&mut [Fixture]> {
        let index = (week as usize).checked_sub(1)?;
        self.weeks.get_mut(index).map(Vec::as_mut_slice)
    }

    /// Iterate `(week_number, fixtures)` in order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &[Fixture])> {
        self.weeks
            .iter()
            .enumerate()
            .map(|(i, fixtures)| (i as u32 + 1, fixtures.as_slice()))
    }

    pub fn fixture_count(&self) -> usize {
        self.weeks.iter().map(Vec::len).sum()
    }
}

/// Builds a double round-robin where every team plays once per week.
#[derive(Clone, Copy, Debug)]
pub struct ScheduleBuilder {
    team_count: usize,
}

impl ScheduleBuilder {
    pub fn new(team_count: usize) -> Result<Self> {
        if team_count == 0 || team_count % 2 != 0 {
            return Err(LeagueError::InvalidRoster {
                reason: format!("cannot schedule {} teams", team_count),
            });
        }
        Ok(ScheduleBuilder { team_count })
    }

    pub fn matches_per_week(&self) -> usize {
        self.team_count / 2
    }

    pub fn total_weeks(&self) -> u32 {
        total_weeks(self.team_count)
    }

    /// Build the full schedule.
    ///
    /// Weeks are filled greedily from the candidate pool in roster order. For
    /// team counts where the greedy scan strands fixtures, the circle method
    /// is used instead.
    pub fn build(&self) -> Schedule {
        match self.build_greedy() {
            Some(schedule) => {
                debug!(teams = self.team_count, weeks = schedule.total_weeks(), "built greedy schedule");
                schedule
            }
            None => {
                warn!(teams = self.team_count, "greedy scheduling stranded fixtures, using circle method");
                self.build_circle()
            }
        }
    }

    /// Greedy week partition over the candidate pool.
    ///
    /// A candidate joins the week only if neither team is in any fixture
    /// already accepted for that week. Returns `None` if some week cannot be
    /// filled.
    pub fn build_greedy(&self) -> Option<Schedule> {
        let per_week = self.matches_per_week();
        let mut pool = candidate_fixtures(self.team_count);
        let mut weeks = Vec::with_capacity(self.total_weeks() as usize);

        for _ in 0..self.total_weeks() {
            let mut week: Vec<Fixture> = Vec::with_capacity(per_week);
            let mut i = 0;

            while i < pool.len() && week.len() < per_week {
                let candidate = pool[i];
                if week.iter().all(|accepted| !accepted.shares_team(&candidate)) {
                    week.push(pool.remove(i));
                } else {
                    i += 1;
                }
            }

            if week.len() < per_week {
                return None;
            }
            weeks.push(week);
        }

        debug_assert!(pool.is_empty());
        Some(Schedule { weeks })
    }

    /// Circle method: fix the first team, rotate the rest, then mirror every
    /// round with home and away swapped.
    pub fn build_circle(&self) -> Schedule {
        let n = self.team_count;
        let mut order: Vec<TeamId> = (0..n).collect();
        let mut first_half = Vec::with_capacity(n - 1);

        for round in 0..n - 1 {
            let week: Vec<Fixture> = (0..n / 2)
                .map(|i| {
                    let (a, b) = (order[i], order[n - 1 - i]);
                    // alternate venues so no team is always at home
                    let swap = if i == 0 { round % 2 == 1 } else { i % 2 == 1 };
                    if swap {
                        Fixture::new(b, a)
                    } else {
                        Fixture::new(a, b)
                    }
                })
                .collect();
            first_half.push(week);
            order[1..].rotate_right(1);
        }

        let second_half: Vec<Vec<Fixture>> = first_half
            .iter()
            .map(|week| week.iter().map(|f| Fixture::new(f.away, f.home)).collect())
            .collect();

        let mut weeks = first_half;
        weeks.extend(second_half);
        Schedule { weeks }
    }
}
