pub mod calendar;
pub mod capacity;
pub mod commands;
pub mod daily_capacity;
pub mod export;
pub mod field_update;
pub mod operations;
pub mod overlap;
pub mod planner;
pub mod repository;
pub mod resource;
pub mod snapshot;
pub mod sprint;
pub mod team;
pub mod velocity;

pub use calendar::{group_by_week, ResourceCalendar, WeekCell, WeekRow};
pub use capacity::{presence_days, theoretical_capacity, total_capacity};
pub use daily_capacity::{DailyCapacities, DailyCapacity};
pub use export::{AllTeamsExport, TeamExport, TeamExporter, TeamImporter};
pub use field_update::FieldUpdate;
pub use operations::{CapacityOperations, ResourceFilter};
pub use overlap::check_overlap;
pub use planner::{SprintDraft, SprintPlanner};
pub use repository::SprintRepository;
pub use resource::{Resource, ResourceId, ResourceUpdate};
pub use snapshot::Snapshot;
pub use sprint::{Sprint, SprintCompletion, SprintId, SprintStatus, SprintUpdate};
pub use team::{resolve_team, Team, TeamId};
pub use velocity::{average_velocity, evaluate_completion, TeamMetrics, SUCCESS_THRESHOLD};
