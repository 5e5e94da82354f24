use scrumcap_core::CapacityResult;

pub mod resource_commands;
pub mod sprint_commands;
pub mod team_commands;

pub use resource_commands::*;
pub use sprint_commands::*;
pub use team_commands::*;

/// Trait for directory commands that mutate state
/// Commands represent intent and can be executed, queued, and persisted
pub trait Command: Send + Sync {
    /// Execute this command, mutating the domain state
    fn execute(&self, context: &mut CommandContext) -> CapacityResult<()>;

    /// Human-readable description of what this command does
    fn description(&self) -> String;
}

/// Context passed to commands for mutation
pub struct CommandContext<'a> {
    pub teams: &'a mut Vec<crate::Team>,
    pub resources: &'a mut Vec<crate::Resource>,
    pub sprints: &'a mut Vec<crate::Sprint>,
    pub active_team_id: &'a mut Option<crate::TeamId>,
}
