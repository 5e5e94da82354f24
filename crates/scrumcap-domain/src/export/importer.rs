use super::models::{AllTeamsExport, TeamExport};
use crate::calendar::{end_date, validate_duration};
use crate::overlap::check_overlap;
use crate::sprint::validate_committed_points;
use crate::team::Team;
use crate::velocity::evaluate_completion;
use crate::{Resource, ResourceId, Sprint};
use chrono::Utc;
use scrumcap_core::{CapacityError, CapacityResult};
use serde::Deserialize;
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Deserialize)]
#[serde(untagged)]
enum ImportDocument {
    All(AllTeamsExport),
    Single(TeamExport),
}

/// Brings exported teams back in under fresh identifiers.
pub struct TeamImporter;

impl TeamImporter {
    /// Parse either a multi-team export or a single team export.
    pub fn parse(data: &str) -> CapacityResult<AllTeamsExport> {
        let document: ImportDocument =
            serde_json::from_str(data).map_err(|e| CapacityError::Serialization(e.to_string()))?;
        Ok(match document {
            ImportDocument::All(all) => all,
            ImportDocument::Single(team) => AllTeamsExport::from_teams(vec![team]),
        })
    }

    /// Re-key a team export and check its sprints. Either the whole team is
    /// returned ready to append, or nothing is.
    pub fn prepare(export: TeamExport) -> CapacityResult<TeamExport> {
        let now = Utc::now();
        let mut team: Team = export.team;
        team.id = Uuid::new_v4();
        team.updated_at = now;

        let mut id_map: HashMap<ResourceId, ResourceId> = HashMap::new();
        let resources: Vec<Resource> = export
            .resources
            .into_iter()
            .map(|mut resource| {
                let new_id = Uuid::new_v4();
                id_map.insert(resource.id, new_id);
                resource.id = new_id;
                resource.team_id = Some(team.id);
                resource.updated_at = now;
                resource
            })
            .collect();

        let mut sprints: Vec<Sprint> = Vec::with_capacity(export.sprints.len());
        for mut sprint in export.sprints {
            validate_imported_sprint(&mut sprint)?;
            sprint.id = Uuid::new_v4();
            sprint.team_id = team.id;
            sprint.updated_at = now;
            for resource in &mut sprint.resources {
                resource.id = *id_map.entry(resource.id).or_insert_with(Uuid::new_v4);
                resource.team_id = Some(team.id);
            }
            check_overlap(
                team.id,
                sprint.start_date,
                i64::from(sprint.duration),
                &sprints,
                None,
            )?;
            sprints.push(sprint);
        }

        tracing::debug!(
            team = %team.name,
            resources = resources.len(),
            sprints = sprints.len(),
            "prepared team import"
        );
        Ok(TeamExport {
            team,
            resources,
            sprints,
        })
    }
}

fn validate_imported_sprint(sprint: &mut Sprint) -> CapacityResult<()> {
    let duration = validate_duration(i64::from(sprint.duration))?;
    if end_date(sprint.start_date, duration)? != sprint.end_date {
        return Err(CapacityError::Validation(format!(
            "sprint starting {} lasts {} days but ends on {}",
            sprint.start_date, duration, sprint.end_date
        )));
    }
    validate_committed_points(sprint.story_points_committed)?;
    if let Some(completion) = sprint.completion {
        sprint.completion = Some(evaluate_completion(
            sprint.story_points_committed,
            completion.story_points_completed,
            duration,
        )?);
    }
    Ok(())
}
