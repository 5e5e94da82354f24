use crate::resource::Resource;
use crate::sprint::Sprint;
use crate::team::TeamId;
use async_trait::async_trait;
use scrumcap_core::CapacityResult;

/// Storage the planner reads team data from and writes sprints back to.
/// Implementations handle the backend (file snapshot, database, ...).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SprintRepository: Send + Sync {
    /// The team's resource directory
    async fn load_resources(&self, team_id: TeamId) -> CapacityResult<Vec<Resource>>;

    /// Every sprint of the team, in progress or completed
    async fn load_sprints(&self, team_id: TeamId) -> CapacityResult<Vec<Sprint>>;

    /// Insert or replace a sprint, keyed by its id
    async fn save_sprint(&mut self, sprint: &Sprint) -> CapacityResult<()>;
}
