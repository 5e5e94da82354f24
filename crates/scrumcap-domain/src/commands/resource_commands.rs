use super::{Command, CommandContext};
use crate::{Resource, ResourceId, ResourceUpdate, TeamId};
use scrumcap_core::{CapacityError, CapacityResult};

/// Add a resource to a team's directory
pub struct CreateResource {
    pub team_id: TeamId,
    pub name: String,
    pub capacity_per_day: f64,
}

impl Command for CreateResource {
    fn execute(&self, context: &mut CommandContext) -> CapacityResult<()> {
        if !context.teams.iter().any(|t| t.id == self.team_id) {
            return Err(CapacityError::NotFound(format!(
                "Team not found: {}",
                self.team_id
            )));
        }
        let resource = Resource::new(self.name.clone(), self.capacity_per_day, Some(self.team_id))?;
        context.resources.push(resource);
        Ok(())
    }

    fn description(&self) -> String {
        format!("Create resource {}", self.name)
    }
}

/// Update a directory resource. Sprints keep their own copies and are not
/// affected.
pub struct UpdateResource {
    pub resource_id: ResourceId,
    pub updates: ResourceUpdate,
}

impl Command for UpdateResource {
    fn execute(&self, context: &mut CommandContext) -> CapacityResult<()> {
        let resource = context
            .resources
            .iter_mut()
            .find(|r| r.id == self.resource_id)
            .ok_or_else(|| {
                CapacityError::NotFound(format!("Resource not found: {}", self.resource_id))
            })?;
        resource.update(self.updates.clone())
    }

    fn description(&self) -> String {
        format!("Update resource {}", self.resource_id)
    }
}

/// Remove a resource from the directory
pub struct DeleteResource {
    pub resource_id: ResourceId,
}

impl Command for DeleteResource {
    fn execute(&self, context: &mut CommandContext) -> CapacityResult<()> {
        let before = context.resources.len();
        context.resources.retain(|r| r.id != self.resource_id);
        if context.resources.len() == before {
            return Err(CapacityError::NotFound(format!(
                "Resource not found: {}",
                self.resource_id
            )));
        }
        Ok(())
    }

    fn description(&self) -> String {
        format!("Delete resource {}", self.resource_id)
    }
}
