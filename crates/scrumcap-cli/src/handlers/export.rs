use crate::cli::{ExportArgs, ImportArgs};
use crate::context::CliContext;
use crate::output;
use scrumcap_domain::CapacityOperations;

pub async fn handle_export(ctx: &CliContext, args: ExportArgs) -> anyhow::Result<()> {
    let json = ctx.export_teams(args.team_id)?;
    println!("{}", json);
    Ok(())
}

pub async fn handle_import(ctx: &mut CliContext, args: ImportArgs) -> anyhow::Result<()> {
    let data = std::fs::read_to_string(&args.input)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", args.input, e))?;
    let teams = ctx.import_teams(&data)?;
    ctx.save().await?;
    output::output_list(teams);
    Ok(())
}
