use crate::cli::TeamAction;
use crate::context::CliContext;
use crate::output;
use scrumcap_domain::{CapacityOperations, SprintPlanner};

pub async fn handle(ctx: &mut CliContext, action: TeamAction) -> anyhow::Result<()> {
    match action {
        TeamAction::Create { name } => {
            let team = ctx.create_team(name)?;
            ctx.save().await?;
            output::output_success(&team);
        }
        TeamAction::List => {
            let teams = ctx.list_teams()?;
            output::output_list(teams);
        }
        TeamAction::Get { id } => match ctx.get_team(id)? {
            Some(team) => output::output_success(&team),
            None => return output::output_error(&format!("Team not found: {}", id)),
        },
        TeamAction::Rename { id, name } => {
            let team = ctx.rename_team(id, name)?;
            ctx.save().await?;
            output::output_success(&team);
        }
        TeamAction::Select { id } => {
            let team = ctx.select_team(id)?;
            ctx.save().await?;
            output::output_success(&team);
        }
        TeamAction::Delete { id } => {
            ctx.delete_team(id)?;
            ctx.save().await?;
            output::output_success(serde_json::json!({"deleted": id.to_string()}));
        }
        TeamAction::Metrics { team_id } => {
            let active = ctx.active_team_id;
            let config = ctx.config;
            let metrics = SprintPlanner::new(ctx, config)
                .with_active_team(active)
                .metrics(team_id)
                .await?;
            output::output_success(&metrics);
        }
    }
    Ok(())
}
