//! Board scope shared by tasks and columns.

use std::fmt;

use uuid::Uuid;

/// Whose kanban board an operation targets.
///
/// Requests without an `X-Team-Id` header act on the caller's personal
/// board; requests with it act on the shared board of that team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardScope {
    /// The personal board of a user.
    Personal(Uuid),
    /// The shared board of a team.
    Team(Uuid),
}

impl BoardScope {
    /// Stable storage key for the board (`user:<id>` or `team:<id>`).
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// The team id when this is a team board.
    pub fn team_id(&self) -> Option<Uuid> {
        match self {
            Self::Team(id) => Some(*id),
            Self::Personal(_) => None,
        }
    }
}

impl fmt::Display for BoardScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Personal(id) => write!(f, "user:{id}"),
            Self::Team(id) => write!(f, "team:{id}"),
        }
    }
}
