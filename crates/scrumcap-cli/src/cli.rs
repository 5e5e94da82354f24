use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date '{}'. Expected format: YYYY-MM-DD", s))
}

#[derive(Parser)]
#[command(name = "scrumcap")]
#[command(about = "Sprint capacity planning and velocity tracking", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the data file (or set SCRUMCAP_FILE env var)
    #[arg(short, long, value_name = "FILE", env = "SCRUMCAP_FILE")]
    pub file: Option<String>,

    /// Velocity used while a team has no completed sprint
    #[arg(long, env = "SCRUMCAP_DEFAULT_VELOCITY")]
    pub default_velocity: Option<f64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Team operations
    Team(TeamCommand),
    /// Resource directory operations
    Resource(ResourceCommand),
    /// Sprint operations
    Sprint(SprintCommand),
    /// Export team data
    Export(ExportArgs),
    /// Import team data
    Import(ImportArgs),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// Team commands
#[derive(Args)]
pub struct TeamCommand {
    #[command(subcommand)]
    pub action: TeamAction,
}

#[derive(Subcommand)]
pub enum TeamAction {
    /// Create a new team
    Create {
        #[arg(long)]
        name: String,
    },
    /// List all teams
    List,
    /// Get a specific team
    Get {
        #[arg(long)]
        id: Uuid,
    },
    /// Rename a team
    Rename {
        #[arg(long)]
        id: Uuid,
        #[arg(long)]
        name: String,
    },
    /// Make a team the default for later commands
    Select {
        #[arg(long)]
        id: Uuid,
    },
    /// Delete a team with its resources and sprints
    Delete {
        #[arg(long)]
        id: Uuid,
    },
    /// Velocity and success figures of a team
    Metrics {
        #[arg(long)]
        team_id: Option<Uuid>,
    },
}

// Resource commands
#[derive(Args)]
pub struct ResourceCommand {
    #[command(subcommand)]
    pub action: ResourceAction,
}

#[derive(Subcommand)]
pub enum ResourceAction {
    /// Add a resource to a team
    Create {
        #[arg(long)]
        team_id: Option<Uuid>,
        #[arg(long)]
        name: String,
        /// Fraction of a working day the resource is available
        #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
        capacity_per_day: f64,
    },
    /// List resources
    List {
        #[arg(long)]
        team_id: Option<Uuid>,
        /// Only resources that belong to no team
        #[arg(long)]
        unassigned: bool,
    },
    /// Get a specific resource
    Get {
        #[arg(long)]
        id: Uuid,
    },
    /// Update a resource
    Update(ResourceUpdateArgs),
    /// Delete a resource
    Delete {
        #[arg(long)]
        id: Uuid,
    },
}

#[derive(Args)]
pub struct ResourceUpdateArgs {
    #[arg(long)]
    pub id: Uuid,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    pub capacity_per_day: Option<f64>,
    #[arg(long, conflicts_with = "clear_team")]
    pub team_id: Option<Uuid>,
    #[arg(long)]
    pub clear_team: bool,
}

// Sprint commands
#[derive(Args)]
pub struct SprintCommand {
    #[command(subcommand)]
    pub action: SprintAction,
}

#[derive(Subcommand)]
pub enum SprintAction {
    /// Plan a new sprint
    Create(SprintCreateArgs),
    /// List sprints
    List {
        #[arg(long)]
        team_id: Option<Uuid>,
        /// in-progress or completed
        #[arg(long)]
        status: Option<String>,
    },
    /// Get a specific sprint
    Get {
        #[arg(long)]
        id: Uuid,
    },
    /// Update dates, commitment or objective of a sprint
    Update(SprintUpdateArgs),
    /// Record the points delivered by a sprint
    Complete {
        #[arg(long)]
        id: Uuid,
        #[arg(long)]
        team_id: Option<Uuid>,
        #[arg(long, allow_negative_numbers = true)]
        completed: f64,
        #[arg(long)]
        objective_achieved: Option<bool>,
    },
    /// Recompute the theoretical capacity of a sprint
    Recompute {
        #[arg(long)]
        id: Uuid,
        #[arg(long)]
        team_id: Option<Uuid>,
    },
    /// Refresh the sprint's resources from the team directory
    SyncResources {
        #[arg(long)]
        id: Uuid,
        #[arg(long)]
        team_id: Option<Uuid>,
    },
    /// Set one resource's capacity on one day of a sprint
    SetCapacity {
        #[arg(long)]
        id: Uuid,
        #[arg(long)]
        team_id: Option<Uuid>,
        #[arg(long)]
        resource_id: Uuid,
        #[arg(long, value_parser = parse_date)]
        date: NaiveDate,
        #[arg(long, allow_negative_numbers = true)]
        capacity: f64,
    },
    /// Show resource calendars grouped by week
    Calendar {
        #[arg(long)]
        id: Uuid,
        #[arg(long)]
        resource_id: Option<Uuid>,
    },
    /// Delete a sprint
    Delete {
        #[arg(long)]
        id: Uuid,
    },
}

#[derive(Args)]
pub struct SprintCreateArgs {
    #[arg(long)]
    pub team_id: Option<Uuid>,
    #[arg(long, value_parser = parse_date)]
    pub start_date: NaiveDate,
    /// Length in calendar days, weekends included
    #[arg(long, allow_negative_numbers = true)]
    pub duration: i64,
    #[arg(long, allow_negative_numbers = true)]
    pub points: f64,
    #[arg(long)]
    pub objective: Option<String>,
}

#[derive(Args)]
pub struct SprintUpdateArgs {
    #[arg(long)]
    pub id: Uuid,
    #[arg(long)]
    pub team_id: Option<Uuid>,
    #[arg(long, value_parser = parse_date)]
    pub start_date: Option<NaiveDate>,
    #[arg(long, allow_negative_numbers = true)]
    pub duration: Option<i64>,
    #[arg(long, allow_negative_numbers = true)]
    pub points: Option<f64>,
    #[arg(long, conflicts_with = "clear_objective")]
    pub objective: Option<String>,
    #[arg(long)]
    pub clear_objective: bool,
    #[arg(long, conflicts_with = "clear_objective_achieved")]
    pub objective_achieved: Option<bool>,
    #[arg(long)]
    pub clear_objective_achieved: bool,
}

// Export/Import commands
#[derive(Args)]
pub struct ExportArgs {
    /// Export a single team instead of all teams
    #[arg(long)]
    pub team_id: Option<Uuid>,
}

#[derive(Args)]
pub struct ImportArgs {
    #[arg(long)]
    pub input: String,
}
