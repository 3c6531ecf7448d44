//! League Core - round-robin league scheduling and simulation.
//!
//! Builds a double round-robin schedule for an even roster, simulates it one
//! week at a time and keeps the league table and each team's point-share
//! championship estimate up to date. Rendering and transport are left to the
//! caller; every report type is `serde::Serialize`.

pub mod batch;
pub mod constants;
pub mod error;
pub mod match_sim;
pub mod probability;
pub mod roster;
pub mod schedule;
pub mod simulator;
pub mod team;

pub use batch::{title_odds, TitleOdds};
pub use constants::{MAX_GOALS, POINTS_FOR_DRAW, POINTS_FOR_WIN, SHARE_DECIMALS};
pub use error::{LeagueError, Result};
pub use match_sim::{simulate_score, Score};
pub use probability::ProbabilityEstimator;
pub use roster::{build_teams, TeamRecord, WeekSelector};
pub use schedule::{candidate_fixtures, Fixture, Schedule, ScheduleBuilder};
pub use simulator::{
    run_league, PredictionRow, RunReport, SimulationState, Simulator, StandingsRow, Step, WeekReport,
};
pub use team::{MatchSummary, Team, TeamId, TeamStats};
