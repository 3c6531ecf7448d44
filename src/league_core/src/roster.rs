use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::error::{LeagueError, Result};
use crate::team::{Team, TeamStats};

/// One roster entry as submitted by a client.
///
/// Every statistic defaults to zero. `name` is optional here so a missing name
/// surfaces as [`LeagueError::MissingName`] instead of a parse failure.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct TeamRecord {
    pub name: Option<String>,
    #[serde(default)]
    pub pts: u32,
    #[serde(default)]
    pub won: u32,
    #[serde(default)]
    pub drawn: u32,
    #[serde(default)]
    pub lost: u32,
    #[serde(default)]
    pub gf: u32,
    #[serde(default)]
    pub ga: u32,
    #[serde(default)]
    pub gd: i64,
    #[serde(default)]
    pub played: u32,
}

impl TeamRecord {
    /// A fresh entry with nothing played.
    pub fn named(name: impl Into<String>) -> Self {
        TeamRecord {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn stats(&self) -> TeamStats {
        TeamStats {
            points: self.pts,
            wins: self.won,
            draws: self.drawn,
            losses: self.lost,
            goals_for: self.gf,
            goals_against: self.ga,
            matches_played: self.played,
        }
    }
}

/// Which part of the championship to simulate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeekSelector {
    /// Simulate exactly this week (1-based).
    Week(u32),
    /// Simulate every remaining week.
    All,
}

impl WeekSelector {
    pub fn is_all(&self) -> bool {
        matches!(self, WeekSelector::All)
    }
}

impl FromStr for WeekSelector {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self> {
        let value = s.trim();
        if value.eq_ignore_ascii_case("all") {
            return Ok(WeekSelector::All);
        }
        match value.parse::<u32>() {
            Ok(week) if week > 0 => Ok(WeekSelector::Week(week)),
            _ => Err(LeagueError::InvalidWeek {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for WeekSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekSelector::Week(week) => write!(f, "{}", week),
            WeekSelector::All => write!(f, "all"),
        }
    }
}

/// Turn roster records into teams, ids assigned by position.
///
/// Fails on a missing name, or when the team count is zero or odd. Seeded
/// statistics are taken as given; records whose points or match counts do not
/// add up are logged.
pub fn build_teams(records: &[TeamRecord]) -> Result<Vec<Team>> {
    let mut teams = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let name = match record.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => return Err(LeagueError::MissingName { index }),
        };

        let team = Team::with_stats(index, name, record.stats());
        if team.goal_difference != record.gd {
            debug!(team = name, given = record.gd, derived = team.goal_difference, "ignoring submitted goal difference");
        }
        if !team.is_consistent() {
            warn!(
                team = name,
                pts = record.pts,
                won = record.won,
                drawn = record.drawn,
                lost = record.lost,
                played = record.played,
                "seeded record does not add up, standings invariants will not hold for this team"
            );
        }
        teams.push(team);
    }

    if teams.is_empty() {
        return Err(LeagueError::InvalidRoster {
            reason: "no teams".to_string(),
        });
    }
    if teams.len() % 2 != 0 {
        return Err(LeagueError::InvalidRoster {
            reason: format!("{} teams, an even number is required", teams.len()),
        });
    }

    Ok(teams)
}
