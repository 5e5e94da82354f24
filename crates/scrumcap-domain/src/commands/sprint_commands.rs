use super::{Command, CommandContext};
use crate::SprintId;
use scrumcap_core::{CapacityError, CapacityResult};

/// Delete a sprint
pub struct DeleteSprint {
    pub sprint_id: SprintId,
}

impl Command for DeleteSprint {
    fn execute(&self, context: &mut CommandContext) -> CapacityResult<()> {
        let before = context.sprints.len();
        context.sprints.retain(|s| s.id != self.sprint_id);
        if context.sprints.len() == before {
            return Err(CapacityError::NotFound(format!(
                "Sprint not found: {}",
                self.sprint_id
            )));
        }
        Ok(())
    }

    fn description(&self) -> String {
        format!("Delete sprint {}", self.sprint_id)
    }
}
