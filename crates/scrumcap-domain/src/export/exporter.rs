use super::models::{AllTeamsExport, TeamExport};
use crate::{Resource, Sprint, Team};
use scrumcap_core::{CapacityError, CapacityResult};

pub struct TeamExporter;

impl TeamExporter {
    pub fn export_team(team: &Team, resources: &[Resource], sprints: &[Sprint]) -> TeamExport {
        TeamExport {
            team: team.clone(),
            resources: resources
                .iter()
                .filter(|r| r.belongs_to(team.id))
                .cloned()
                .collect(),
            sprints: sprints
                .iter()
                .filter(|s| s.team_id == team.id)
                .cloned()
                .collect(),
        }
    }

    pub fn export_all_teams(
        teams: &[Team],
        resources: &[Resource],
        sprints: &[Sprint],
    ) -> AllTeamsExport {
        AllTeamsExport::from_teams(
            teams
                .iter()
                .map(|team| Self::export_team(team, resources, sprints))
                .collect(),
        )
    }

    pub fn export_to_json(export: &AllTeamsExport) -> CapacityResult<String> {
        serde_json::to_string_pretty(export).map_err(|e| CapacityError::Serialization(e.to_string()))
    }
}
