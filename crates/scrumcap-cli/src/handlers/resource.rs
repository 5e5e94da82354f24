use crate::cli::{ResourceAction, ResourceUpdateArgs};
use crate::context::CliContext;
use crate::output;
use scrumcap_domain::{CapacityOperations, FieldUpdate, ResourceFilter, ResourceUpdate};

pub async fn handle(ctx: &mut CliContext, action: ResourceAction) -> anyhow::Result<()> {
    match action {
        ResourceAction::Create {
            team_id,
            name,
            capacity_per_day,
        } => {
            let resource = ctx.create_resource(team_id, name, capacity_per_day)?;
            ctx.save().await?;
            output::output_success(&resource);
        }
        ResourceAction::List {
            team_id,
            unassigned,
        } => {
            let resources = ctx.list_resources(ResourceFilter {
                team_id,
                unassigned,
            })?;
            output::output_list(resources);
        }
        ResourceAction::Get { id } => match ctx.get_resource(id)? {
            Some(resource) => output::output_success(&resource),
            None => return output::output_error(&format!("Resource not found: {}", id)),
        },
        ResourceAction::Update(args) => {
            let id = args.id;
            let resource = ctx.update_resource(id, build_update(args))?;
            ctx.save().await?;
            output::output_success(&resource);
        }
        ResourceAction::Delete { id } => {
            ctx.delete_resource(id)?;
            ctx.save().await?;
            output::output_success(serde_json::json!({"deleted": id.to_string()}));
        }
    }
    Ok(())
}

fn build_update(args: ResourceUpdateArgs) -> ResourceUpdate {
    let team_id = if args.clear_team {
        FieldUpdate::Clear
    } else {
        args.team_id
            .map(FieldUpdate::Set)
            .unwrap_or(FieldUpdate::NoChange)
    };
    ResourceUpdate {
        name: args.name,
        capacity_per_day: args.capacity_per_day,
        team_id,
    }
}
