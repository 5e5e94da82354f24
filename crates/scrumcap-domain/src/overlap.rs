//! Rejects sprints whose date range collides with another sprint of the
//! same team.

use crate::calendar::{end_date, validate_duration};
use crate::sprint::{Sprint, SprintId};
use crate::team::TeamId;
use chrono::NaiveDate;
use scrumcap_core::{CapacityError, CapacityResult};

/// Whether two inclusive date ranges share at least one day.
pub fn ranges_overlap(
    start: NaiveDate,
    end: NaiveDate,
    other_start: NaiveDate,
    other_end: NaiveDate,
) -> bool {
    let start_inside = other_start <= start && start <= other_end;
    let end_inside = other_start <= end && end <= other_end;
    let contains_other = start <= other_start && other_end <= end;
    start_inside || end_inside || contains_other
}

/// Check a proposed range against `existing`, skipping other teams' sprints
/// and `exclude` (the sprint being edited). Returns the proposed end date.
pub fn check_overlap(
    team_id: TeamId,
    start: NaiveDate,
    duration: i64,
    existing: &[Sprint],
    exclude: Option<SprintId>,
) -> CapacityResult<NaiveDate> {
    let end = end_date(start, validate_duration(duration)?)?;
    let conflict = existing
        .iter()
        .filter(|s| s.team_id == team_id && Some(s.id) != exclude)
        .find(|s| ranges_overlap(start, end, s.start_date, s.end_date));

    if let Some(sprint) = conflict {
        tracing::warn!(
            sprint_id = %sprint.id,
            %start,
            %end,
            "rejected overlapping sprint range"
        );
        return Err(CapacityError::OverlappingSprint {
            sprint_id: sprint.id,
            start: sprint.start_date,
            end: sprint.end_date,
        });
    }
    Ok(end)
}
