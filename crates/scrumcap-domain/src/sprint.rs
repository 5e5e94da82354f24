use crate::calendar::{
    end_date, generate_daily_capacities, populate_calendars, validate_duration,
};
use crate::capacity::total_capacity;
use crate::field_update::FieldUpdate;
use crate::resource::{Resource, ResourceId};
use crate::team::TeamId;
use crate::velocity::evaluate_completion;
use chrono::{DateTime, NaiveDate, Utc};
use scrumcap_core::{CapacityError, CapacityResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type SprintId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SprintStatus {
    InProgress,
    Completed,
}

/// Achievement-side fields of a sprint. They only ever exist together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SprintCompletion {
    #[serde(alias = "storyPointsCompleted")]
    pub story_points_completed: f64,
    /// Story points per day of the sprint.
    #[serde(alias = "velocityAchieved")]
    pub velocity_achieved: f64,
    /// Percentage of committed points delivered.
    #[serde(alias = "commitmentRespected")]
    pub commitment_respected: f64,
    #[serde(alias = "isSuccessful")]
    pub is_successful: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawSprint")]
pub struct Sprint {
    pub id: SprintId,
    pub team_id: TeamId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration: u32,
    pub story_points_committed: f64,
    pub theoretical_capacity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion: Option<SprintCompletion>,
    /// Resources as they were when the calendar was generated. Later edits
    /// to the team's directory do not reach these copies.
    pub resources: Vec<Resource>,
    pub objective: Option<String>,
    pub objective_achieved: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Wire shape of a sprint. Completion may come nested or as four flat fields.
#[derive(Deserialize)]
struct RawSprint {
    id: SprintId,
    #[serde(alias = "teamId")]
    team_id: TeamId,
    #[serde(alias = "startDate")]
    start_date: NaiveDate,
    #[serde(alias = "endDate")]
    end_date: NaiveDate,
    duration: u32,
    #[serde(alias = "storyPointsCommitted")]
    story_points_committed: f64,
    #[serde(alias = "theoreticalCapacity")]
    theoretical_capacity: f64,
    #[serde(default)]
    completion: Option<SprintCompletion>,
    #[serde(default, alias = "storyPointsCompleted")]
    story_points_completed: Option<f64>,
    #[serde(default, alias = "velocityAchieved")]
    velocity_achieved: Option<f64>,
    #[serde(default, alias = "commitmentRespected")]
    commitment_respected: Option<f64>,
    #[serde(default, alias = "isSuccessful")]
    is_successful: Option<bool>,
    #[serde(default)]
    resources: Vec<Resource>,
    #[serde(default)]
    objective: Option<String>,
    #[serde(default, alias = "objectiveAchieved")]
    objective_achieved: Option<bool>,
    #[serde(default = "Utc::now", alias = "createdAt")]
    created_at: DateTime<Utc>,
    #[serde(default = "Utc::now", alias = "updatedAt")]
    updated_at: DateTime<Utc>,
}

impl TryFrom<RawSprint> for Sprint {
    type Error = CapacityError;

    fn try_from(raw: RawSprint) -> CapacityResult<Self> {
        let flat = match (
            raw.story_points_completed,
            raw.velocity_achieved,
            raw.commitment_respected,
            raw.is_successful,
        ) {
            (None, None, None, None) => None,
            (
                Some(story_points_completed),
                Some(velocity_achieved),
                Some(commitment_respected),
                Some(is_successful),
            ) => Some(SprintCompletion {
                story_points_completed,
                velocity_achieved,
                commitment_respected,
                is_successful,
            }),
            _ => {
                return Err(CapacityError::Validation(format!(
                    "Sprint {} has a partial completion record",
                    raw.id
                )))
            }
        };

        let completion = match (raw.completion, flat) {
            (Some(nested), Some(flat)) if nested != flat => {
                return Err(CapacityError::Validation(format!(
                    "Sprint {} has conflicting completion records",
                    raw.id
                )))
            }
            (nested, flat) => nested.or(flat),
        };

        Ok(Self {
            id: raw.id,
            team_id: raw.team_id,
            start_date: raw.start_date,
            end_date: raw.end_date,
            duration: raw.duration,
            story_points_committed: raw.story_points_committed,
            theoretical_capacity: raw.theoretical_capacity,
            completion,
            resources: raw.resources,
            objective: raw.objective,
            objective_achieved: raw.objective_achieved,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
        })
    }
}

impl Sprint {
    /// Create an in-progress sprint. `resources` must already carry their
    /// calendars for the sprint range.
    pub fn new(
        team_id: TeamId,
        start_date: NaiveDate,
        duration: i64,
        story_points_committed: f64,
        resources: Vec<Resource>,
        theoretical_capacity: f64,
    ) -> CapacityResult<Self> {
        let duration = validate_duration(duration)?;
        validate_committed_points(story_points_committed)?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            team_id,
            start_date,
            end_date: end_date(start_date, duration)?,
            duration,
            story_points_committed,
            theoretical_capacity,
            completion: None,
            resources,
            objective: None,
            objective_achieved: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn status(&self) -> SprintStatus {
        if self.is_completed() {
            SprintStatus::Completed
        } else {
            SprintStatus::InProgress
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completion.is_some()
    }

    pub fn story_points_completed(&self) -> Option<f64> {
        self.completion.map(|c| c.story_points_completed)
    }

    pub fn velocity_achieved(&self) -> Option<f64> {
        self.completion.map(|c| c.velocity_achieved)
    }

    pub fn commitment_respected(&self) -> Option<f64> {
        self.completion.map(|c| c.commitment_respected)
    }

    pub fn is_successful(&self) -> Option<bool> {
        self.completion.map(|c| c.is_successful)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    pub fn total_person_days(&self) -> f64 {
        total_capacity(&self.resources)
    }

    pub fn resource(&self, id: ResourceId) -> Option<&Resource> {
        self.resources.iter().find(|r| r.id == id)
    }

    /// Record the actual outcome. Completion fields are computed together and
    /// replace any previous completion.
    pub fn complete(&mut self, story_points_completed: f64) -> CapacityResult<()> {
        let completion =
            evaluate_completion(self.story_points_committed, story_points_completed, self.duration)?;
        self.completion = Some(completion);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Change the committed points. A completed sprint is re-evaluated
    /// against its recorded completed points.
    pub fn set_committed_points(&mut self, story_points_committed: f64) -> CapacityResult<()> {
        validate_committed_points(story_points_committed)?;
        let completion = match self.completion {
            Some(previous) => Some(evaluate_completion(
                story_points_committed,
                previous.story_points_completed,
                self.duration,
            )?),
            None => None,
        };
        self.story_points_committed = story_points_committed;
        self.completion = completion;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Move or resize the sprint, regenerating every resource calendar while
    /// keeping values entered for dates that stay in range.
    pub fn reschedule(&mut self, start_date: NaiveDate, duration: i64) -> CapacityResult<()> {
        let days = validate_duration(duration)?;
        let end = end_date(start_date, days)?;
        let resources = populate_calendars(&self.resources, start_date, duration)?;
        let completion = match self.completion {
            Some(previous) => Some(evaluate_completion(
                self.story_points_committed,
                previous.story_points_completed,
                days,
            )?),
            None => None,
        };
        self.start_date = start_date;
        self.end_date = end;
        self.duration = days;
        self.resources = resources;
        self.completion = completion;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Edit one resource's capacity on one day of the sprint.
    pub fn set_daily_capacity(
        &mut self,
        resource_id: ResourceId,
        date: NaiveDate,
        capacity: f64,
    ) -> CapacityResult<()> {
        if !self.contains(date) {
            return Err(CapacityError::Validation(format!(
                "{} is outside the sprint ({} to {})",
                date, self.start_date, self.end_date
            )));
        }
        let (start, duration) = (self.start_date, i64::from(self.duration));
        let resource = self
            .resources
            .iter_mut()
            .find(|r| r.id == resource_id)
            .ok_or_else(|| {
                CapacityError::NotFound(format!("Resource {} is not in this sprint", resource_id))
            })?;
        let mut caps = match &resource.daily_capacities {
            Some(caps) => caps.clone(),
            None => generate_daily_capacities(resource.capacity_per_day, start, duration)?,
        };
        caps.set(date, capacity)?;
        resource.daily_capacities = Some(caps);
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn update_objective(
        &mut self,
        objective: FieldUpdate<String>,
        objective_achieved: FieldUpdate<bool>,
    ) {
        if !objective.is_change() && !objective_achieved.is_change() {
            return;
        }
        objective.apply_to(&mut self.objective);
        objective_achieved.apply_to(&mut self.objective_achieved);
        self.updated_at = Utc::now();
    }
}

pub fn validate_committed_points(points: f64) -> CapacityResult<()> {
    if !points.is_finite() || points <= 0.0 {
        return Err(CapacityError::InvalidStoryPoints(format!(
            "committed story points must be greater than zero, got {}",
            points
        )));
    }
    Ok(())
}

/// Partial update for a sprint
#[derive(Debug, Clone, Default)]
pub struct SprintUpdate {
    pub start_date: Option<NaiveDate>,
    pub duration: Option<i64>,
    pub story_points_committed: Option<f64>,
    pub objective: FieldUpdate<String>,
    pub objective_achieved: FieldUpdate<bool>,
}

impl SprintUpdate {
    pub fn changes_schedule(&self) -> bool {
        self.start_date.is_some() || self.duration.is_some()
    }
}
