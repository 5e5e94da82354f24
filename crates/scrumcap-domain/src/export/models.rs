use crate::{Resource, Sprint, Team};
use serde::{Deserialize, Serialize};

/// Export format for a single team with all its data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamExport {
    pub team: Team,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub sprints: Vec<Sprint>,
}

/// Export format for all teams.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllTeamsExport {
    pub teams: Vec<TeamExport>,
}

impl AllTeamsExport {
    pub fn from_teams(teams: Vec<TeamExport>) -> Self {
        Self { teams }
    }
}
