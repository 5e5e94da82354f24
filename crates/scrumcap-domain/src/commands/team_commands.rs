use super::{Command, CommandContext};
use crate::{Team, TeamId};
use scrumcap_core::{CapacityError, CapacityResult};

fn ensure_team(context: &CommandContext, team_id: TeamId) -> CapacityResult<()> {
    if context.teams.iter().any(|t| t.id == team_id) {
        Ok(())
    } else {
        Err(CapacityError::NotFound(format!("Team not found: {}", team_id)))
    }
}

fn validate_team_name(name: &str) -> CapacityResult<()> {
    if name.trim().is_empty() {
        return Err(CapacityError::Validation(
            "team name must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Create a new team
pub struct CreateTeam {
    pub name: String,
}

impl Command for CreateTeam {
    fn execute(&self, context: &mut CommandContext) -> CapacityResult<()> {
        validate_team_name(&self.name)?;
        context.teams.push(Team::new(self.name.clone()));
        Ok(())
    }

    fn description(&self) -> String {
        format!("Create team {}", self.name)
    }
}

/// Make a team the default for commands without an explicit team
pub struct SelectTeam {
    pub team_id: TeamId,
}

impl Command for SelectTeam {
    fn execute(&self, context: &mut CommandContext) -> CapacityResult<()> {
        ensure_team(context, self.team_id)?;
        *context.active_team_id = Some(self.team_id);
        Ok(())
    }

    fn description(&self) -> String {
        format!("Select team {}", self.team_id)
    }
}

pub struct RenameTeam {
    pub team_id: TeamId,
    pub name: String,
}

impl Command for RenameTeam {
    fn execute(&self, context: &mut CommandContext) -> CapacityResult<()> {
        validate_team_name(&self.name)?;
        let team = context
            .teams
            .iter_mut()
            .find(|t| t.id == self.team_id)
            .ok_or_else(|| CapacityError::NotFound(format!("Team not found: {}", self.team_id)))?;
        team.rename(self.name.clone());
        Ok(())
    }

    fn description(&self) -> String {
        format!("Rename team {} to {}", self.team_id, self.name)
    }
}

/// Delete a team together with its resources and sprints
pub struct DeleteTeam {
    pub team_id: TeamId,
}

impl Command for DeleteTeam {
    fn execute(&self, context: &mut CommandContext) -> CapacityResult<()> {
        ensure_team(context, self.team_id)?;
        context.resources.retain(|r| !r.belongs_to(self.team_id));
        context.sprints.retain(|s| s.team_id != self.team_id);
        context.teams.retain(|t| t.id != self.team_id);
        if *context.active_team_id == Some(self.team_id) {
            *context.active_team_id = None;
        }
        Ok(())
    }

    fn description(&self) -> String {
        format!("Delete team {}", self.team_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::State;
    use crate::{Resource, Sprint};
    use chrono::NaiveDate;
    use uuid::Uuid;

    #[test]
    fn test_create_and_select_team() {
        let mut state = State::default();
        CreateTeam {
            name: "Platform".to_string(),
        }
        .execute(&mut state.context())
        .unwrap();
        let team_id = state.teams[0].id;

        SelectTeam { team_id }
            .execute(&mut state.context())
            .unwrap();
        assert_eq!(state.active_team_id, Some(team_id));
    }

    #[test]
    fn test_blank_team_name_rejected() {
        let mut state = State::default();
        let result = CreateTeam {
            name: "  ".to_string(),
        }
        .execute(&mut state.context());
        assert!(matches!(result, Err(CapacityError::Validation(_))));
        assert!(state.teams.is_empty());
    }

    #[test]
    fn test_rename_team() {
        let mut state = State::default();
        state.teams.push(Team::new("Platform".to_string()));
        let team_id = state.teams[0].id;

        RenameTeam {
            team_id,
            name: "Core".to_string(),
        }
        .execute(&mut state.context())
        .unwrap();
        assert_eq!(state.teams[0].name, "Core");

        let blank = RenameTeam {
            team_id,
            name: String::new(),
        }
        .execute(&mut state.context());
        assert!(matches!(blank, Err(CapacityError::Validation(_))));
        assert_eq!(state.teams[0].name, "Core");
    }

    #[test]
    fn test_select_unknown_team() {
        let mut state = State::default();
        let result = SelectTeam {
            team_id: Uuid::new_v4(),
        }
        .execute(&mut state.context());
        assert!(matches!(result, Err(CapacityError::NotFound(_))));
        assert_eq!(state.active_team_id, None);
    }

    #[test]
    fn test_delete_team_cascades() {
        let mut state = State::default();
        let team = Team::new("Platform".to_string());
        let other = Team::new("Mobile".to_string());
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        state.resources = vec![
            Resource::new("Ada".to_string(), 1.0, Some(team.id)).unwrap(),
            Resource::new("Lin".to_string(), 1.0, Some(other.id)).unwrap(),
        ];
        state.sprints = vec![
            Sprint::new(team.id, start, 10, 20.0, vec![], 0.0).unwrap(),
            Sprint::new(other.id, start, 10, 20.0, vec![], 0.0).unwrap(),
        ];
        state.active_team_id = Some(team.id);
        let team_id = team.id;
        state.teams = vec![team, other];

        DeleteTeam { team_id }
            .execute(&mut state.context())
            .unwrap();
        assert_eq!(state.teams.len(), 1);
        assert_eq!(state.resources.len(), 1);
        assert_eq!(state.sprints.len(), 1);
        assert_eq!(state.active_team_id, None);
    }
}
