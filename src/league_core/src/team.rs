use serde::Serialize;
use std::fmt;

use crate::constants::{POINTS_FOR_DRAW, POINTS_FOR_WIN};
use crate::match_sim::Score;

/// Stable team index, assigned by roster order.
pub type TeamId = usize;

/// The most recent fixture a team took part in, as seen by a renderer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    pub home: String,
    pub away: String,
    pub score: Score,
}

impl fmt::Display for MatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} : {} {}", self.home, self.score.home, self.score.away, self.away)
    }
}

/// Statistics carried over from earlier weeks when resuming a championship.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TeamStats {
    pub points: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub matches_played: u32,
}

/// A league team and its running totals.
#[derive(Clone, Debug, PartialEq)]
pub struct Team {
    pub id: TeamId,
    pub name: String,

    pub points: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    /// Always `goals_for - goals_against`
    pub goal_difference: i64,
    pub matches_played: u32,

    /// Share of all league points in percent, two decimals
    pub probability_share: f64,

    pub last_match: Option<MatchSummary>,
}

impl Team {
    /// Create a team with no matches played.
    pub fn new(id: TeamId, name: impl Into<String>) -> Self {
        Team::with_stats(id, name, TeamStats::default())
    }

    /// Create a team seeded with earlier statistics.
    pub fn with_stats(id: TeamId, name: impl Into<String>, stats: TeamStats) -> Self {
        Team {
            id,
            name: name.into(),
            points: stats.points,
            wins: stats.wins,
            draws: stats.draws,
            losses: stats.losses,
            goals_for: stats.goals_for,
            goals_against: stats.goals_against,
            goal_difference: i64::from(stats.goals_for) - i64::from(stats.goals_against),
            matches_played: stats.matches_played,
            probability_share: 0.0,
            last_match: None,
        }
    }

    pub fn stats(&self) -> TeamStats {
        TeamStats {
            points: self.points,
            wins: self.wins,
            draws: self.draws,
            losses: self.losses,
            goals_for: self.goals_for,
            goals_against: self.goals_against,
            matches_played: self.matches_played,
        }
    }

    /// Record one match from this team's perspective.
    ///
    /// Must be called exactly once per team per fixture, with the team's own
    /// goals first. Counters saturate at `u32::MAX`.
    pub fn apply_result(&mut self, goals_for: u32, goals_against: u32, summary: MatchSummary) {
        self.matches_played = self.matches_played.saturating_add(1);
        self.goals_for = self.goals_for.saturating_add(goals_for);
        self.goals_against = self.goals_against.saturating_add(goals_against);
        self.goal_difference = i64::from(self.goals_for) - i64::from(self.goals_against);
        self.last_match = Some(summary);

        if goals_for > goals_against {
            self.points = self.points.saturating_add(POINTS_FOR_WIN);
            self.wins = self.wins.saturating_add(1);
        } else if goals_for == goals_against {
            self.points = self.points.saturating_add(POINTS_FOR_DRAW);
            self.draws = self.draws.saturating_add(1);
        } else {
            self.losses = self.losses.saturating_add(1);
        }
    }

    /// True when points and record agree with each other.
    pub fn is_consistent(&self) -> bool {
        let (wins, draws, losses) = (u64::from(self.wins), u64::from(self.draws), u64::from(self.losses));
        u64::from(self.points) == u64::from(POINTS_FOR_WIN) * wins + u64::from(POINTS_FOR_DRAW) * draws
            && u64::from(self.matches_played) == wins + draws + losses
            && self.goal_difference == i64::from(self.goals_for) - i64::from(self.goals_against)
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} pts | {}-{}-{} | {}:{}",
            self.name, self.points, self.wins, self.draws, self.losses, self.goals_for, self.goals_against
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(home: u32, away: u32) -> MatchSummary {
        MatchSummary {
            home: "A".to_string(),
            away: "B".to_string(),
            score: Score { home, away },
        }
    }

    #[test]
    fn test_win_awards_three_points() {
        let mut team = Team::new(0, "A");
        team.apply_result(3, 1, summary(3, 1));

        assert_eq!(team.points, 3);
        assert_eq!(team.wins, 1);
        assert_eq!(team.matches_played, 1);
        assert_eq!(team.goal_difference, 2);
        assert!(team.is_consistent());
    }

    #[test]
    fn test_draw_and_loss() {
        let mut team = Team::new(1, "B");
        team.apply_result(2, 2, summary(2, 2));
        team.apply_result(0, 4, summary(4, 0));

        assert_eq!(team.points, 1);
        assert_eq!((team.wins, team.draws, team.losses), (0, 1, 1));
        assert_eq!(team.goals_for, 2);
        assert_eq!(team.goals_against, 6);
        assert_eq!(team.goal_difference, -4);
        assert!(team.is_consistent());
    }

    #[test]
    fn test_counters_saturate() {
        let stats = TeamStats {
            points: u32::MAX - 1,
            goals_for: u32::MAX,
            ..Default::default()
        };
        let mut team = Team::with_stats(0, "A", stats);
        team.apply_result(5, 0, summary(5, 0));

        assert_eq!(team.points, u32::MAX);
        assert_eq!(team.goals_for, u32::MAX);
        assert_eq!(team.wins, 1);
        assert_eq!(team.goal_difference, i64::from(u32::MAX));
    }

    #[test]
    fn test_last_match_is_replaced() {
        let mut team = Team::new(0, "A");
        team.apply_result(1, 0, summary(1, 0));
        team.apply_result(0, 0, summary(0, 0));

        assert_eq!(team.last_match.as_ref().unwrap().to_string(), "A 0 : 0 B");
    }

    #[test]
    fn test_seeded_goal_difference_is_derived() {
        let stats = TeamStats {
            points: 4,
            wins: 1,
            draws: 1,
            losses: 0,
            goals_for: 5,
            goals_against: 2,
            matches_played: 2,
        };
        let team = Team::with_stats(2, "C", stats);

        assert_eq!(team.goal_difference, 3);
        assert_eq!(team.stats(), stats);
        assert!(team.is_consistent());
    }
}
