use crate::daily_capacity::DailyCapacities;
use crate::field_update::FieldUpdate;
use crate::team::TeamId;
use chrono::{DateTime, Utc};
use scrumcap_core::{CapacityError, CapacityResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type ResourceId = Uuid;

/// A team member (or any capacity-bearing contributor).
///
/// `capacity_per_day` is the fraction of a full working day the resource is
/// normally available. `daily_capacities` is only populated on the copies a
/// sprint keeps; directory entries usually leave it empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    pub name: String,
    #[serde(alias = "capacityPerDay")]
    pub capacity_per_day: f64,
    #[serde(default, alias = "teamId")]
    pub team_id: Option<TeamId>,
    #[serde(default, alias = "dailyCapacities", skip_serializing_if = "Option::is_none")]
    pub daily_capacities: Option<DailyCapacities>,
    #[serde(default = "Utc::now", alias = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now", alias = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Resource {
    pub fn new(
        name: String,
        capacity_per_day: f64,
        team_id: Option<TeamId>,
    ) -> CapacityResult<Self> {
        validate_capacity_per_day(capacity_per_day)?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            capacity_per_day,
            team_id,
            daily_capacities: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn belongs_to(&self, team_id: TeamId) -> bool {
        self.team_id == Some(team_id)
    }

    pub fn has_daily_capacities(&self) -> bool {
        self.daily_capacities
            .as_ref()
            .is_some_and(|caps| !caps.is_empty())
    }

    /// Apply a partial update. Nothing changes if validation fails.
    pub fn update(&mut self, updates: ResourceUpdate) -> CapacityResult<()> {
        if let Some(capacity) = updates.capacity_per_day {
            validate_capacity_per_day(capacity)?;
        }
        if let Some(name) = updates.name {
            self.name = name;
        }
        if let Some(capacity) = updates.capacity_per_day {
            self.capacity_per_day = capacity;
        }
        updates.team_id.apply_to(&mut self.team_id);
        self.updated_at = Utc::now();
        Ok(())
    }
}

pub fn validate_capacity_per_day(capacity: f64) -> CapacityResult<()> {
    if !capacity.is_finite() || capacity < 0.0 {
        return Err(CapacityError::Validation(format!(
            "capacity per day must be a non-negative number, got {}",
            capacity
        )));
    }
    Ok(())
}

/// Partial update for a directory resource
#[derive(Debug, Clone, Default)]
pub struct ResourceUpdate {
    pub name: Option<String>,
    pub capacity_per_day: Option<f64>,
    pub team_id: FieldUpdate<TeamId>,
}
