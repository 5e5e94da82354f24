use chrono::{DateTime, Utc};
use scrumcap_core::{CapacityError, CapacityResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type TeamId = Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    #[serde(default = "Utc::now", alias = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now", alias = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Team {
    pub fn new(name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn rename(&mut self, name: String) {
        self.name = name;
        self.updated_at = Utc::now();
    }
}

/// Pick the team an operation applies to: the explicit one if given, else
/// the currently active team.
pub fn resolve_team(explicit: Option<TeamId>, active: Option<TeamId>) -> CapacityResult<TeamId> {
    explicit.or(active).ok_or(CapacityError::MissingActiveTeam)
}
