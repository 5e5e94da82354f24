//! Sprint planning service.
//!
//! [`plan_sprint`] is the pure core: from a team's existing sprints and
//! resource directory it validates a draft, generates the calendars and
//! computes the theoretical capacity. [`SprintPlanner`] wraps the same rules
//! around a [`SprintRepository`]: each operation reads one snapshot of the
//! team's data, works on a copy of the sprint and writes it back only once
//! every check has passed.

use crate::calendar::{populate_calendars, validate_duration};
use crate::capacity::theoretical_capacity;
use crate::overlap::check_overlap;
use crate::repository::SprintRepository;
use crate::resource::{Resource, ResourceId};
use crate::sprint::{validate_committed_points, Sprint, SprintId, SprintUpdate};
use crate::team::{resolve_team, TeamId};
use crate::velocity::{average_velocity, team_average_velocity, TeamMetrics};
use chrono::NaiveDate;
use scrumcap_core::{CapacityError, CapacityResult, EngineConfig};

/// Commitment-side input for a new sprint
#[derive(Debug, Clone)]
pub struct SprintDraft {
    pub start_date: NaiveDate,
    pub duration: i64,
    pub story_points_committed: f64,
    pub objective: Option<String>,
}

/// Build a new in-progress sprint for `team_id`.
pub fn plan_sprint(
    team_id: TeamId,
    draft: &SprintDraft,
    existing: &[Sprint],
    directory: &[Resource],
    config: &EngineConfig,
) -> CapacityResult<Sprint> {
    let duration = validate_duration(draft.duration)?;
    validate_committed_points(draft.story_points_committed)?;
    check_overlap(team_id, draft.start_date, draft.duration, existing, None)?;

    let team_resources: Vec<Resource> = directory
        .iter()
        .filter(|r| r.belongs_to(team_id))
        .cloned()
        .collect();
    let resources = populate_calendars(&team_resources, draft.start_date, draft.duration)?;
    let velocity = team_average_velocity(team_id, existing, config);
    let capacity = theoretical_capacity(velocity, &resources, duration);

    let mut sprint = Sprint::new(
        team_id,
        draft.start_date,
        draft.duration,
        draft.story_points_committed,
        resources,
        capacity,
    )?;
    sprint.objective = draft.objective.clone();
    Ok(sprint)
}

/// Theoretical capacity of an existing sprint, using the velocity of the
/// team's other sprints.
pub fn recompute_capacity(sprint: &Sprint, team_sprints: &[Sprint], config: &EngineConfig) -> f64 {
    let velocity = average_velocity(
        team_sprints
            .iter()
            .filter(|s| s.team_id == sprint.team_id && s.id != sprint.id),
        config,
    );
    theoretical_capacity(velocity, &sprint.resources, sprint.duration)
}

/// Align a sprint's resource copies with the current directory. Directory
/// values win for name and nominal capacity; entered daily capacities are
/// kept for resources that are still present.
pub fn refresh_resources(
    sprint: &Sprint,
    directory: &[Resource],
) -> CapacityResult<Vec<Resource>> {
    let merged: Vec<Resource> = directory
        .iter()
        .filter(|r| r.belongs_to(sprint.team_id))
        .map(|entry| {
            let mut resource = entry.clone();
            resource.daily_capacities = sprint
                .resource(entry.id)
                .and_then(|current| current.daily_capacities.clone());
            resource
        })
        .collect();
    populate_calendars(&merged, sprint.start_date, i64::from(sprint.duration))
}

fn find_sprint(sprints: &[Sprint], sprint_id: SprintId) -> CapacityResult<Sprint> {
    sprints
        .iter()
        .find(|s| s.id == sprint_id)
        .cloned()
        .ok_or_else(|| CapacityError::NotFound(format!("Sprint not found: {}", sprint_id)))
}

/// Runs the capacity engine against an injected repository.
pub struct SprintPlanner<'a, R: SprintRepository> {
    repository: &'a mut R,
    config: EngineConfig,
    active_team: Option<TeamId>,
}

impl<'a, R: SprintRepository> SprintPlanner<'a, R> {
    pub fn new(repository: &'a mut R, config: EngineConfig) -> Self {
        Self {
            repository,
            config,
            active_team: None,
        }
    }

    /// Team used by operations that are not given one explicitly
    pub fn with_active_team(mut self, team_id: Option<TeamId>) -> Self {
        self.active_team = team_id;
        self
    }

    fn team(&self, team_id: Option<TeamId>) -> CapacityResult<TeamId> {
        resolve_team(team_id, self.active_team)
    }

    async fn store(&mut self, sprint: Sprint) -> CapacityResult<Sprint> {
        self.repository.save_sprint(&sprint).await?;
        tracing::info!(
            sprint_id = %sprint.id,
            team_id = %sprint.team_id,
            theoretical_capacity = sprint.theoretical_capacity,
            "saved sprint"
        );
        Ok(sprint)
    }

    pub async fn create_sprint(
        &mut self,
        team_id: Option<TeamId>,
        draft: SprintDraft,
    ) -> CapacityResult<Sprint> {
        let team_id = self.team(team_id)?;
        let existing = self.repository.load_sprints(team_id).await?;
        let directory = self.repository.load_resources(team_id).await?;
        let sprint = plan_sprint(team_id, &draft, &existing, &directory, &self.config)?;
        self.store(sprint).await
    }

    pub async fn complete_sprint(
        &mut self,
        team_id: Option<TeamId>,
        sprint_id: SprintId,
        story_points_completed: f64,
        objective_achieved: Option<bool>,
    ) -> CapacityResult<Sprint> {
        let team_id = self.team(team_id)?;
        let sprints = self.repository.load_sprints(team_id).await?;
        let mut sprint = find_sprint(&sprints, sprint_id)?;
        sprint.complete(story_points_completed)?;
        if let Some(achieved) = objective_achieved {
            sprint.objective_achieved = Some(achieved);
        }
        self.store(sprint).await
    }

    /// Edit dates, commitment or objective. Moving or resizing the sprint
    /// re-checks overlaps, regenerates calendars and recomputes the
    /// theoretical capacity.
    pub async fn update_sprint(
        &mut self,
        team_id: Option<TeamId>,
        sprint_id: SprintId,
        updates: SprintUpdate,
    ) -> CapacityResult<Sprint> {
        let team_id = self.team(team_id)?;
        let sprints = self.repository.load_sprints(team_id).await?;
        let mut sprint = find_sprint(&sprints, sprint_id)?;

        if updates.changes_schedule() {
            let start = updates.start_date.unwrap_or(sprint.start_date);
            let duration = updates.duration.unwrap_or(i64::from(sprint.duration));
            check_overlap(team_id, start, duration, &sprints, Some(sprint.id))?;
            sprint.reschedule(start, duration)?;
        }
        if let Some(points) = updates.story_points_committed {
            sprint.set_committed_points(points)?;
        }
        if updates.changes_schedule() {
            sprint.theoretical_capacity = recompute_capacity(&sprint, &sprints, &self.config);
        }
        sprint.update_objective(updates.objective, updates.objective_achieved);
        self.store(sprint).await
    }

    pub async fn recompute(
        &mut self,
        team_id: Option<TeamId>,
        sprint_id: SprintId,
    ) -> CapacityResult<Sprint> {
        let team_id = self.team(team_id)?;
        let sprints = self.repository.load_sprints(team_id).await?;
        let mut sprint = find_sprint(&sprints, sprint_id)?;
        sprint.theoretical_capacity = recompute_capacity(&sprint, &sprints, &self.config);
        self.store(sprint).await
    }

    /// Pull the current resource directory into the sprint and recompute.
    pub async fn sync_resources(
        &mut self,
        team_id: Option<TeamId>,
        sprint_id: SprintId,
    ) -> CapacityResult<Sprint> {
        let team_id = self.team(team_id)?;
        let sprints = self.repository.load_sprints(team_id).await?;
        let directory = self.repository.load_resources(team_id).await?;
        let mut sprint = find_sprint(&sprints, sprint_id)?;
        sprint.resources = refresh_resources(&sprint, &directory)?;
        sprint.theoretical_capacity = recompute_capacity(&sprint, &sprints, &self.config);
        self.store(sprint).await
    }

    pub async fn set_daily_capacity(
        &mut self,
        team_id: Option<TeamId>,
        sprint_id: SprintId,
        resource_id: ResourceId,
        date: NaiveDate,
        capacity: f64,
    ) -> CapacityResult<Sprint> {
        let team_id = self.team(team_id)?;
        let sprints = self.repository.load_sprints(team_id).await?;
        let mut sprint = find_sprint(&sprints, sprint_id)?;
        sprint.set_daily_capacity(resource_id, date, capacity)?;
        self.store(sprint).await
    }

    pub async fn metrics(&self, team_id: Option<TeamId>) -> CapacityResult<TeamMetrics> {
        let team_id = self.team(team_id)?;
        let sprints = self.repository.load_sprints(team_id).await?;
        Ok(TeamMetrics::compute(team_id, &sprints, &self.config))
    }
}
