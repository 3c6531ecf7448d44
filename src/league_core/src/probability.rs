use tracing::debug;

use crate::constants::round_share;
use crate::team::{Team, TeamId};

/// Point-share estimate of each team's chance of winning the championship.
///
/// A team's share is its points as a percentage of all league points. The
/// estimator only remembers team ids and looks teams up on every call, so it
/// never owns them. One estimator is created per simulation run.
#[derive(Clone, Debug, Default)]
pub struct ProbabilityEstimator {
    team_ids: Vec<TeamId>,
    ranking: Vec<TeamId>,
    total_points: u64,
    last_week: Option<u32>,
}

impl ProbabilityEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the team set, forgetting any earlier computation.
    pub fn set_teams(&mut self, teams: &[Team]) -> &mut Self {
        self.team_ids = teams.iter().map(|t| t.id).collect();
        self.ranking.clear();
        self.total_points = 0;
        self.last_week = None;
        self
    }

    pub fn is_team_set(&self) -> bool {
        !self.team_ids.is_empty()
    }

    /// Recompute every share for `week` and return the points ranking.
    ///
    /// Shares are written into the teams. With no points in the league every
    /// share is zero. The ranking orders team ids by points, highest first,
    /// keeping roster order between equal teams.
    pub fn compute(&mut self, teams: &mut [Team], week: u32) -> &[TeamId] {
        self.total_points = self
            .team_ids
            .iter()
            .map(|&id| u64::from(points_of(&*teams, id)))
            .sum::<u64>();

        for team in teams.iter_mut().filter(|t| self.team_ids.contains(&t.id)) {
            team.probability_share = if self.total_points == 0 {
                0.0
            } else {
                round_share(100.0 * f64::from(team.points) / self.total_points as f64)
            };
        }

        let view: &[Team] = teams;
        let mut ranking = self.team_ids.clone();
        ranking.sort_by(|&a, &b| points_of(view, b).cmp(&points_of(view, a)));
        self.ranking = ranking;
        self.last_week = Some(week);

        debug!(week, total_points = self.total_points, "computed probability shares");
        &self.ranking
    }

    /// Team ids from the last `compute`, best first.
    pub fn ranking(&self) -> &[TeamId] {
        &self.ranking
    }

    pub fn total_points(&self) -> u64 {
        self.total_points
    }

    pub fn last_week(&self) -> Option<u32> {
        self.last_week
    }
}

fn points_of(teams: &[Team], id: TeamId) -> u32 {
    teams.iter().find(|t| t.id == id).map_or(0, |t| t.points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::team::TeamStats;

    fn team_with_points(id: TeamId, name: &str, wins: u32, draws: u32) -> Team {
        Team::with_stats(
            id,
            name,
            TeamStats {
                points: 3 * wins + draws,
                wins,
                draws,
                matches_played: wins + draws,
                ..Default::default()
            },
        )
    }

    fn make_teams() -> Vec<Team> {
        vec![
            team_with_points(0, "A", 1, 1),
            team_with_points(1, "B", 3, 0),
            team_with_points(2, "C", 0, 1),
            team_with_points(3, "D", 1, 1),
        ]
    }

    #[test]
    fn test_zero_points_gives_zero_shares() {
        let mut teams = vec![Team::new(0, "A"), Team::new(1, "B")];
        let mut estimator = ProbabilityEstimator::new();
        estimator.set_teams(&teams);

        let ranking = estimator.compute(&mut teams, 0).to_vec();

        assert_eq!(ranking, vec![0, 1]);
        assert_eq!(estimator.total_points(), 0);
        assert!(teams.iter().all(|t| t.probability_share == 0.0));
    }

    #[test]
    fn test_shares_and_ranking() {
        let mut teams = make_teams();
        let mut estimator = ProbabilityEstimator::new();
        estimator.set_teams(&teams);

        let ranking = estimator.compute(&mut teams, 3).to_vec();

        // B 9, A 4, D 4, C 1 out of 18
        assert_eq!(ranking, vec![1, 0, 3, 2]);
        assert_eq!(estimator.total_points(), 18);
        assert_eq!(teams[1].probability_share, 50.0);
        assert_eq!(teams[0].probability_share, 22.22);
        assert_eq!(teams[2].probability_share, 5.56);
        assert_eq!(estimator.last_week(), Some(3));

        let sum: f64 = teams.iter().map(|t| t.probability_share).sum();
        assert!((sum - 100.0).abs() < 0.05, "shares should sum to ~100, got {}", sum);
    }

    #[test]
    fn test_large_point_totals_do_not_overflow() {
        let mut teams = vec![Team::new(0, "A"), Team::new(1, "B")];
        teams[0].points = u32::MAX;
        teams[1].points = u32::MAX;
        let mut estimator = ProbabilityEstimator::new();
        estimator.set_teams(&teams);

        estimator.compute(&mut teams, 1);

        assert_eq!(estimator.total_points(), 2 * u64::from(u32::MAX));
        assert_eq!(teams[0].probability_share, 50.0);
        assert_eq!(teams[1].probability_share, 50.0);
    }

    #[test]
    fn test_compute_is_idempotent() {
        let mut teams = make_teams();
        let mut estimator = ProbabilityEstimator::new();
        estimator.set_teams(&teams);

        let first_ranking = estimator.compute(&mut teams, 1).to_vec();
        let first: Vec<f64> = teams.iter().map(|t| t.probability_share).collect();
        let second_ranking = estimator.compute(&mut teams, 1).to_vec();
        let second: Vec<f64> = teams.iter().map(|t| t.probability_share).collect();

        assert_eq!(first, second);
        assert_eq!(first_ranking, second_ranking);
    }

    #[test]
    fn test_set_teams_resets_state() {
        let mut teams = make_teams();
        let mut estimator = ProbabilityEstimator::new();
        assert!(!estimator.is_team_set());

        estimator.set_teams(&teams).compute(&mut teams, 2);
        estimator.set_teams(&teams[..2]);

        assert!(estimator.is_team_set());
        assert!(estimator.ranking().is_empty());
        assert_eq!(estimator.last_week(), None);
    }
}
