use crate::cli::{SprintAction, SprintCreateArgs, SprintUpdateArgs};
use crate::context::CliContext;
use crate::output;
use scrumcap_domain::{
    CapacityOperations, FieldUpdate, Sprint, SprintDraft, SprintPlanner, SprintStatus,
    SprintUpdate,
};

fn parse_status(s: &str) -> Result<SprintStatus, String> {
    match s.to_lowercase().replace(['-', '_'], "").as_str() {
        "inprogress" => Ok(SprintStatus::InProgress),
        "completed" | "done" => Ok(SprintStatus::Completed),
        _ => Err(format!(
            "Invalid status '{}'. Valid values: in-progress, completed",
            s
        )),
    }
}

fn planner(ctx: &mut CliContext) -> SprintPlanner<'_, CliContext> {
    let active = ctx.active_team_id;
    let config = ctx.config;
    SprintPlanner::new(ctx, config).with_active_team(active)
}

pub async fn handle(ctx: &mut CliContext, action: SprintAction) -> anyhow::Result<()> {
    match action {
        SprintAction::Create(args) => {
            let sprint = handle_create(ctx, args).await?;
            output::output_success(&sprint);
        }
        SprintAction::List { team_id, status } => {
            let status = status
                .as_deref()
                .map(parse_status)
                .transpose()
                .map_err(anyhow::Error::msg)?;
            let sprints: Vec<Sprint> = ctx
                .list_sprints(team_id)?
                .into_iter()
                .filter(|s| status.map_or(true, |status| s.status() == status))
                .collect();
            output::output_list(sprints);
        }
        SprintAction::Get { id } => match ctx.get_sprint(id)? {
            Some(sprint) => output::output_success(&sprint),
            None => return output::output_error(&format!("Sprint not found: {}", id)),
        },
        SprintAction::Update(args) => {
            let sprint = handle_update(ctx, args).await?;
            output::output_success(&sprint);
        }
        SprintAction::Complete {
            id,
            team_id,
            completed,
            objective_achieved,
        } => {
            let sprint = planner(ctx)
                .complete_sprint(team_id, id, completed, objective_achieved)
                .await?;
            ctx.save().await?;
            output::output_success(&sprint);
        }
        SprintAction::Recompute { id, team_id } => {
            let sprint = planner(ctx).recompute(team_id, id).await?;
            ctx.save().await?;
            output::output_success(&sprint);
        }
        SprintAction::SyncResources { id, team_id } => {
            let sprint = planner(ctx).sync_resources(team_id, id).await?;
            ctx.save().await?;
            output::output_success(&sprint);
        }
        SprintAction::SetCapacity {
            id,
            team_id,
            resource_id,
            date,
            capacity,
        } => {
            let sprint = planner(ctx)
                .set_daily_capacity(team_id, id, resource_id, date, capacity)
                .await?;
            ctx.save().await?;
            output::output_success(&sprint);
        }
        SprintAction::Calendar { id, resource_id } => {
            let calendars = ctx.sprint_calendar(id, resource_id)?;
            output::output_list(calendars);
        }
        SprintAction::Delete { id } => {
            ctx.delete_sprint(id)?;
            ctx.save().await?;
            output::output_success(serde_json::json!({"deleted": id.to_string()}));
        }
    }
    Ok(())
}

async fn handle_create(ctx: &mut CliContext, args: SprintCreateArgs) -> anyhow::Result<Sprint> {
    let draft = SprintDraft {
        start_date: args.start_date,
        duration: args.duration,
        story_points_committed: args.points,
        objective: args.objective,
    };
    let sprint = planner(ctx).create_sprint(args.team_id, draft).await?;
    ctx.save().await?;
    Ok(sprint)
}

async fn handle_update(ctx: &mut CliContext, args: SprintUpdateArgs) -> anyhow::Result<Sprint> {
    let objective = if args.clear_objective {
        FieldUpdate::Clear
    } else {
        args.objective
            .map(FieldUpdate::Set)
            .unwrap_or(FieldUpdate::NoChange)
    };

    let objective_achieved = if args.clear_objective_achieved {
        FieldUpdate::Clear
    } else {
        args.objective_achieved
            .map(FieldUpdate::Set)
            .unwrap_or(FieldUpdate::NoChange)
    };

    let updates = SprintUpdate {
        start_date: args.start_date,
        duration: args.duration,
        story_points_committed: args.points,
        objective,
        objective_achieved,
    };
    let sprint = planner(ctx)
        .update_sprint(args.team_id, args.id, updates)
        .await?;
    ctx.save().await?;
    Ok(sprint)
}
