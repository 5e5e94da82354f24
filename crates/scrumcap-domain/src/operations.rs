use crate::{
    Resource, ResourceCalendar, ResourceId, ResourceUpdate, Sprint, SprintId, Team, TeamId,
};
use scrumcap_core::CapacityResult;

/// Filter options for listing resources
#[derive(Default, Clone)]
pub struct ResourceFilter {
    pub team_id: Option<TeamId>,
    /// Include resources that belong to no team
    pub unassigned: bool,
}

/// Directory and query operations every front end exposes. Sprint planning
/// itself (create, edit, complete, recompute) and team metrics go through
/// [`crate::SprintPlanner`].
pub trait CapacityOperations {
    // Team operations
    fn create_team(&mut self, name: String) -> CapacityResult<Team>;
    fn list_teams(&self) -> CapacityResult<Vec<Team>>;
    fn get_team(&self, id: TeamId) -> CapacityResult<Option<Team>>;
    fn select_team(&mut self, id: TeamId) -> CapacityResult<Team>;
    fn rename_team(&mut self, id: TeamId, name: String) -> CapacityResult<Team>;
    fn delete_team(&mut self, id: TeamId) -> CapacityResult<()>;

    // Resource directory
    fn create_resource(
        &mut self,
        team_id: Option<TeamId>,
        name: String,
        capacity_per_day: f64,
    ) -> CapacityResult<Resource>;
    fn list_resources(&self, filter: ResourceFilter) -> CapacityResult<Vec<Resource>>;
    fn get_resource(&self, id: ResourceId) -> CapacityResult<Option<Resource>>;
    fn update_resource(&mut self, id: ResourceId, updates: ResourceUpdate)
        -> CapacityResult<Resource>;
    fn delete_resource(&mut self, id: ResourceId) -> CapacityResult<()>;

    // Sprint queries and removal
    fn list_sprints(&self, team_id: Option<TeamId>) -> CapacityResult<Vec<Sprint>>;
    fn get_sprint(&self, id: SprintId) -> CapacityResult<Option<Sprint>>;
    fn sprint_calendar(
        &self,
        id: SprintId,
        resource_id: Option<ResourceId>,
    ) -> CapacityResult<Vec<ResourceCalendar>>;
    fn delete_sprint(&mut self, id: SprintId) -> CapacityResult<()>;

    // Import/Export
    fn export_teams(&self, team_id: Option<TeamId>) -> CapacityResult<String>;
    fn import_teams(&mut self, data: &str) -> CapacityResult<Vec<Team>>;
}
