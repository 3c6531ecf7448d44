use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{LeagueError, Result};
use crate::match_sim::simulate_score;
use crate::probability::ProbabilityEstimator;
use crate::roster::{build_teams, TeamRecord, WeekSelector};
use crate::schedule::{Fixture, Schedule, ScheduleBuilder};
use crate::team::{MatchSummary, Team, TeamId};

/// Where a simulator is in its run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimulationState {
    Uninitialized,
    ScheduleBuilt,
    WeekSimulated(u32),
    Exhausted,
}

/// Outcome of a single `simulate` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// A week was played. `more` is true when the caller should keep going.
    Simulated { week: u32, more: bool },
    /// The requested week is past the end of the schedule.
    Exhausted,
}

/// One line of the league table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StandingsRow {
    pub id: TeamId,
    pub name: String,
    pub points: u32,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
    pub last_match: Option<MatchSummary>,
}

impl From<&Team> for StandingsRow {
    fn from(team: &Team) -> Self {
        StandingsRow {
            id: team.id,
            name: team.name.clone(),
            points: team.points,
            played: team.matches_played,
            won: team.wins,
            drawn: team.draws,
            lost: team.losses,
            goals_for: team.goals_for,
            goals_against: team.goals_against,
            goal_difference: team.goal_difference,
            last_match: team.last_match.clone(),
        }
    }
}

/// One line of the championship predictions table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PredictionRow {
    pub name: String,
    pub probability: f64,
}

/// Everything a renderer needs for one simulated week.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WeekReport {
    pub week: u32,
    pub fixtures: Vec<Fixture>,
    /// Ordered by points, highest first
    pub standings: Vec<StandingsRow>,
    /// Same order as `standings`
    pub predictions: Vec<PredictionRow>,
    pub next_week: u32,
}

/// Result of driving a simulator to completion.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RunReport {
    pub weeks: Vec<WeekReport>,
    /// True when the run ended because no weeks were left
    pub exhausted: bool,
}

impl RunReport {
    /// The last simulated week, if any.
    pub fn latest(&self) -> Option<&WeekReport> {
        self.weeks.last()
    }
}

/// Drives a league through its schedule, one week per `simulate` call.
#[derive(Clone, Debug)]
pub struct Simulator {
    selector: WeekSelector,
    builder: ScheduleBuilder,
    teams: Vec<Team>,
    schedule: Option<Schedule>,
    current_week: u32,
    state: SimulationState,
    reports: Vec<WeekReport>,
}

impl Simulator {
    /// Validate the roster and prepare a run.
    ///
    /// In `All` mode the run resumes after the week every team has already
    /// played, so all teams must report the same `played` count.
    pub fn new(selector: WeekSelector, records: &[TeamRecord]) -> Result<Self> {
        let teams = build_teams(records)?;
        let builder = ScheduleBuilder::new(teams.len())?;

        let current_week = match selector {
            WeekSelector::Week(0) => {
                return Err(LeagueError::InvalidWeek {
                    value: "0".to_string(),
                })
            }
            WeekSelector::Week(week) => week,
            WeekSelector::All => resume_week(&teams)?,
        };

        Ok(Simulator {
            selector,
            builder,
            teams,
            schedule: None,
            current_week,
            state: SimulationState::Uninitialized,
            reports: Vec::new(),
        })
    }

    /// Play the current week.
    ///
    /// Builds the schedule on first use, simulates every fixture of the week,
    /// updates both teams of each fixture, refreshes the probability shares
    /// and records a [`WeekReport`].
    pub fn simulate<R: Rng>(&mut self, estimator: &mut ProbabilityEstimator, rng: &mut R) -> Step {
        let week = self.current_week;
        if week > self.total_weeks() {
            info!(week, total_weeks = self.total_weeks(), "no weeks left to simulate");
            self.state = SimulationState::Exhausted;
            return Step::Exhausted;
        }

        if self.schedule.is_none() {
            self.schedule = Some(self.builder.build());
            self.state = SimulationState::ScheduleBuilt;
        }

        let fixtures = match self.schedule.as_mut().and_then(|s| s.week_mut(week)) {
            Some(fixtures) => fixtures,
            None => {
                self.state = SimulationState::Exhausted;
                return Step::Exhausted;
            }
        };

        for fixture in fixtures.iter_mut() {
            let score = simulate_score(rng);
            fixture.result = Some(score);

            let summary = MatchSummary {
                home: self.teams[fixture.home].name.clone(),
                away: self.teams[fixture.away].name.clone(),
                score,
            };
            debug!(week, %summary, "played fixture");

            self.teams[fixture.home].apply_result(score.home, score.away, summary.clone());
            self.teams[fixture.away].apply_result(score.away, score.home, summary);
        }
        let played = fixtures.to_vec();

        if !estimator.is_team_set() {
            estimator.set_teams(&self.teams);
        }
        let ranking = estimator.compute(&mut self.teams, week).to_vec();

        let standings = ranking.iter().map(|&id| StandingsRow::from(&self.teams[id])).collect();
        let predictions = ranking
            .iter()
            .map(|&id| PredictionRow {
                name: self.teams[id].name.clone(),
                probability: self.teams[id].probability_share,
            })
            .collect();

        self.current_week += 1;
        self.state = SimulationState::WeekSimulated(week);
        self.reports.push(WeekReport {
            week,
            fixtures: played,
            standings,
            predictions,
            next_week: self.current_week,
        });

        Step::Simulated {
            week,
            more: self.selector.is_all(),
        }
    }

    /// Run the requested week, or every remaining week in `All` mode.
    ///
    /// A fresh estimator is used for each run.
    pub fn run<R: Rng>(&mut self, rng: &mut R) -> RunReport {
        info!(selector = %self.selector, from_week = self.current_week, teams = self.teams.len(), "starting simulation run");

        let mut estimator = ProbabilityEstimator::new();
        let mut exhausted = false;

        loop {
            match self.simulate(&mut estimator, rng) {
                Step::Simulated { more: true, .. } => continue,
                Step::Simulated { more: false, .. } => break,
                Step::Exhausted => {
                    exhausted = true;
                    break;
                }
            }
        }

        let weeks = std::mem::take(&mut self.reports);
        info!(weeks = weeks.len(), exhausted, "simulation run finished");
        RunReport { weeks, exhausted }
    }

    /// Run with a `ChaCha8Rng`, seeded from `seed` or from entropy.
    pub fn run_seeded(&mut self, seed: Option<u64>) -> RunReport {
        let mut rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        };
        self.run(&mut rng)
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// The schedule, once the first week has been simulated.
    pub fn schedule(&self) -> Option<&Schedule> {
        self.schedule.as_ref()
    }

    pub fn current_week(&self) -> u32 {
        self.current_week
    }

    pub fn total_weeks(&self) -> u32 {
        self.builder.total_weeks()
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    /// Current statistics as roster records, for resuming in a later run.
    pub fn records(&self) -> Vec<TeamRecord> {
        self.teams
            .iter()
            .map(|team| TeamRecord {
                name: Some(team.name.clone()),
                pts: team.points,
                won: team.wins,
                drawn: team.draws,
                lost: team.losses,
                gf: team.goals_for,
                ga: team.goals_against,
                gd: team.goal_difference,
                played: team.matches_played,
            })
            .collect()
    }
}

/// Validate a request and run it in one go.
pub fn run_league(records: &[TeamRecord], selector: WeekSelector, seed: Option<u64>) -> Result<RunReport> {
    let mut simulator = Simulator::new(selector, records)?;
    Ok(simulator.run_seeded(seed))
}

fn resume_week(teams: &[Team]) -> Result<u32> {
    let expected = teams.first().map_or(0, |t| t.matches_played);
    if let Some(team) = teams.iter().find(|t| t.matches_played != expected) {
        return Err(LeagueError::InconsistentProgress {
            team: team.name.clone(),
            expected,
            found: team.matches_played,
        });
    }
    Ok(expected + 1)
}
