use thiserror::Error;

/// Errors raised while setting up a league run.
///
/// Running out of weeks is not an error; see [`crate::simulator::Step::Exhausted`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LeagueError {
    #[error("Invalid roster: {reason}")]
    InvalidRoster { reason: String },

    #[error("Team at index {index} has no name")]
    MissingName { index: usize },

    #[error("Inconsistent progress: team {team} played {found} matches, expected {expected}")]
    InconsistentProgress {
        team: String,
        expected: u32,
        found: u32,
    },

    #[error("Invalid week selector: {value:?}")]
    InvalidWeek { value: String },
}

impl LeagueError {
    /// True for problems with the submitted roster itself.
    pub fn is_roster_error(&self) -> bool {
        matches!(
            self,
            LeagueError::InvalidRoster { .. } | LeagueError::MissingName { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, LeagueError>;
