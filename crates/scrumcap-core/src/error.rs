use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum CapacityError {
    #[error("Invalid duration: {0} (a sprint lasts at least one day)")]
    InvalidDuration(i64),

    #[error("Invalid story points: {0}")]
    InvalidStoryPoints(String),

    #[error("Sprint overlaps existing sprint {sprint_id} ({start} to {end})")]
    OverlappingSprint {
        sprint_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("No active team: pass a team id or select a team first")]
    MissingActiveTeam,

    #[error("Invalid capacity {capacity} on {date}")]
    InvalidCapacity { date: NaiveDate, capacity: f64 },

    #[error("Duplicate daily capacity entry for {0}")]
    DuplicateDate(NaiveDate),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_message_names_conflicting_range() {
        let err = CapacityError::OverlappingSprint {
            sprint_id: Uuid::nil(),
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 14).unwrap(),
        };
        let message = err.to_string();
        assert!(message.contains("2024-01-01"));
        assert!(message.contains("2024-01-14"));
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: CapacityError = io.into();
        assert!(matches!(err, CapacityError::Io(_)));
    }
}
