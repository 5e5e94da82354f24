mod cli;
mod context;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;
use scrumcap_core::EngineConfig;

fn init_tracing() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("SCRUMCAP_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::WARN)
            .init();
    }
    Ok(())
}

fn engine_config(default_velocity: Option<f64>) -> anyhow::Result<EngineConfig> {
    match default_velocity {
        Some(velocity) => Ok(EngineConfig::with_default_velocity(velocity)?),
        None => Ok(EngineConfig::load()),
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "scrumcap", &mut std::io::stdout());
        return Ok(());
    }

    let file_path = cli
        .file
        .ok_or_else(|| anyhow::anyhow!("--file is required (or set SCRUMCAP_FILE)"))?;
    let config = engine_config(cli.default_velocity)?;
    let mut ctx = CliContext::load(&file_path, config).await?;

    match cli.command {
        Commands::Team(team_cmd) => {
            handlers::team::handle(&mut ctx, team_cmd.action).await?;
        }
        Commands::Resource(resource_cmd) => {
            handlers::resource::handle(&mut ctx, resource_cmd.action).await?;
        }
        Commands::Sprint(sprint_cmd) => {
            handlers::sprint::handle(&mut ctx, sprint_cmd.action).await?;
        }
        Commands::Export(args) => {
            handlers::export::handle_export(&ctx, args).await?;
        }
        Commands::Import(args) => {
            handlers::export::handle_import(&mut ctx, args).await?;
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        tracing::debug!("Command failed: {:#}", e);
        output::output_error(&e.to_string());
    }

    Ok(())
}
