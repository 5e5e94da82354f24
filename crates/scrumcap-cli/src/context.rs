use scrumcap_core::{CapacityError, CapacityResult, EngineConfig};
use scrumcap_domain::commands::{Command, CommandContext};
use scrumcap_domain::{
    resolve_team, AllTeamsExport, CapacityOperations, Resource, ResourceCalendar, ResourceFilter,
    ResourceId, ResourceUpdate, Snapshot, Sprint, SprintId, SprintRepository, Team, TeamExporter,
    TeamId, TeamImporter,
};
use scrumcap_persistence::JsonFileStore;

pub struct CliContext {
    pub teams: Vec<Team>,
    pub resources: Vec<Resource>,
    pub sprints: Vec<Sprint>,
    pub active_team_id: Option<TeamId>,
    pub config: EngineConfig,
    store: JsonFileStore,
}

impl CliContext {
    pub async fn load(file_path: &str, config: EngineConfig) -> CapacityResult<Self> {
        let store = JsonFileStore::new(file_path);
        let snapshot = store.load_snapshot().await?;

        Ok(Self {
            teams: snapshot.teams,
            resources: snapshot.resources,
            sprints: snapshot.sprints,
            active_team_id: snapshot.active_team_id,
            config,
            store,
        })
    }

    pub fn execute(&mut self, command: Box<dyn Command>) -> CapacityResult<()> {
        tracing::debug!("Executing: {}", command.description());
        let mut ctx = CommandContext {
            teams: &mut self.teams,
            resources: &mut self.resources,
            sprints: &mut self.sprints,
            active_team_id: &mut self.active_team_id,
        };
        command.execute(&mut ctx)
    }

    pub async fn save(&self) -> CapacityResult<()> {
        let snapshot = Snapshot {
            teams: self.teams.clone(),
            resources: self.resources.clone(),
            sprints: self.sprints.clone(),
            active_team_id: self.active_team_id,
        };
        self.store.save_snapshot(&snapshot).await?;
        Ok(())
    }

    fn find_team(&self, id: TeamId) -> CapacityResult<&Team> {
        self.teams
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| CapacityError::NotFound(format!("Team not found: {}", id)))
    }
}

impl CapacityOperations for CliContext {
    fn create_team(&mut self, name: String) -> CapacityResult<Team> {
        use scrumcap_domain::commands::CreateTeam;
        self.execute(Box::new(CreateTeam { name }))?;
        self.teams.last().cloned().ok_or_else(|| {
            CapacityError::Internal("Team creation succeeded but team not found".into())
        })
    }

    fn list_teams(&self) -> CapacityResult<Vec<Team>> {
        Ok(self.teams.clone())
    }

    fn get_team(&self, id: TeamId) -> CapacityResult<Option<Team>> {
        Ok(self.teams.iter().find(|t| t.id == id).cloned())
    }

    fn select_team(&mut self, id: TeamId) -> CapacityResult<Team> {
        use scrumcap_domain::commands::SelectTeam;
        self.execute(Box::new(SelectTeam { team_id: id }))?;
        self.find_team(id).cloned()
    }

    fn rename_team(&mut self, id: TeamId, name: String) -> CapacityResult<Team> {
        use scrumcap_domain::commands::RenameTeam;
        self.execute(Box::new(RenameTeam { team_id: id, name }))?;
        self.find_team(id).cloned()
    }

    fn delete_team(&mut self, id: TeamId) -> CapacityResult<()> {
        use scrumcap_domain::commands::DeleteTeam;
        self.execute(Box::new(DeleteTeam { team_id: id }))
    }

    fn create_resource(
        &mut self,
        team_id: Option<TeamId>,
        name: String,
        capacity_per_day: f64,
    ) -> CapacityResult<Resource> {
        use scrumcap_domain::commands::CreateResource;
        let team_id = resolve_team(team_id, self.active_team_id)?;
        let cmd = CreateResource {
            team_id,
            name,
            capacity_per_day,
        };
        self.execute(Box::new(cmd))?;
        self.resources.last().cloned().ok_or_else(|| {
            CapacityError::Internal("Resource creation succeeded but resource not found".into())
        })
    }

    fn list_resources(&self, filter: ResourceFilter) -> CapacityResult<Vec<Resource>> {
        Ok(self
            .resources
            .iter()
            .filter(|r| {
                if filter.unassigned {
                    r.team_id.is_none()
                } else {
                    filter.team_id.map_or(true, |team_id| r.belongs_to(team_id))
                }
            })
            .cloned()
            .collect())
    }

    fn get_resource(&self, id: ResourceId) -> CapacityResult<Option<Resource>> {
        Ok(self.resources.iter().find(|r| r.id == id).cloned())
    }

    fn update_resource(
        &mut self,
        id: ResourceId,
        updates: ResourceUpdate,
    ) -> CapacityResult<Resource> {
        use scrumcap_domain::commands::UpdateResource;
        if let scrumcap_domain::FieldUpdate::Set(team_id) = updates.team_id {
            self.find_team(team_id)?;
        }
        let cmd = UpdateResource {
            resource_id: id,
            updates,
        };
        self.execute(Box::new(cmd))?;
        self.get_resource(id)?
            .ok_or_else(|| CapacityError::NotFound(format!("Resource {}", id)))
    }

    fn delete_resource(&mut self, id: ResourceId) -> CapacityResult<()> {
        use scrumcap_domain::commands::DeleteResource;
        self.execute(Box::new(DeleteResource { resource_id: id }))
    }

    fn list_sprints(&self, team_id: Option<TeamId>) -> CapacityResult<Vec<Sprint>> {
        let mut sprints: Vec<Sprint> = self
            .sprints
            .iter()
            .filter(|s| team_id.map_or(true, |team_id| s.team_id == team_id))
            .cloned()
            .collect();
        sprints.sort_by_key(|s| s.start_date);
        Ok(sprints)
    }

    fn get_sprint(&self, id: SprintId) -> CapacityResult<Option<Sprint>> {
        Ok(self.sprints.iter().find(|s| s.id == id).cloned())
    }

    fn sprint_calendar(
        &self,
        id: SprintId,
        resource_id: Option<ResourceId>,
    ) -> CapacityResult<Vec<ResourceCalendar>> {
        let sprint = self
            .sprints
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| CapacityError::NotFound(format!("Sprint not found: {}", id)))?;

        match resource_id {
            Some(resource_id) => {
                let resource = sprint.resource(resource_id).ok_or_else(|| {
                    CapacityError::NotFound(format!(
                        "Resource {} is not part of sprint {}",
                        resource_id, id
                    ))
                })?;
                Ok(vec![ResourceCalendar::for_resource(resource)])
            }
            None => Ok(sprint
                .resources
                .iter()
                .map(ResourceCalendar::for_resource)
                .collect()),
        }
    }

    fn delete_sprint(&mut self, id: SprintId) -> CapacityResult<()> {
        use scrumcap_domain::commands::DeleteSprint;
        self.execute(Box::new(DeleteSprint { sprint_id: id }))
    }

    fn export_teams(&self, team_id: Option<TeamId>) -> CapacityResult<String> {
        let export = match team_id {
            Some(id) => {
                let team = self.find_team(id)?;
                AllTeamsExport::from_teams(vec![TeamExporter::export_team(
                    team,
                    &self.resources,
                    &self.sprints,
                )])
            }
            None => TeamExporter::export_all_teams(&self.teams, &self.resources, &self.sprints),
        };
        TeamExporter::export_to_json(&export)
    }

    fn import_teams(&mut self, data: &str) -> CapacityResult<Vec<Team>> {
        let document = TeamImporter::parse(data)?;
        let prepared = document
            .teams
            .into_iter()
            .map(TeamImporter::prepare)
            .collect::<CapacityResult<Vec<_>>>()?;

        let mut imported = Vec::with_capacity(prepared.len());
        for export in prepared {
            imported.push(export.team.clone());
            self.teams.push(export.team);
            self.resources.extend(export.resources);
            self.sprints.extend(export.sprints);
        }
        tracing::info!("Imported {} team(s)", imported.len());
        Ok(imported)
    }
}

#[async_trait::async_trait]
impl SprintRepository for CliContext {
    async fn load_resources(&self, team_id: TeamId) -> CapacityResult<Vec<Resource>> {
        self.find_team(team_id)?;
        Ok(self
            .resources
            .iter()
            .filter(|r| r.belongs_to(team_id))
            .cloned()
            .collect())
    }

    async fn load_sprints(&self, team_id: TeamId) -> CapacityResult<Vec<Sprint>> {
        self.find_team(team_id)?;
        Ok(self
            .sprints
            .iter()
            .filter(|s| s.team_id == team_id)
            .cloned()
            .collect())
    }

    async fn save_sprint(&mut self, sprint: &Sprint) -> CapacityResult<()> {
        match self.sprints.iter_mut().find(|s| s.id == sprint.id) {
            Some(existing) => *existing = sprint.clone(),
            None => self.sprints.push(sprint.clone()),
        }
        Ok(())
    }
}
