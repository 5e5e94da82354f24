//! Completion metrics, team velocity and summary figures.

use crate::capacity::round_to_cents;
use crate::sprint::{Sprint, SprintCompletion};
use crate::team::TeamId;
use scrumcap_core::{CapacityError, CapacityResult, EngineConfig};
use serde::Serialize;

/// Commitment percentage from which a sprint counts as successful.
pub const SUCCESS_THRESHOLD: f64 = 80.0;

/// Compute velocity, commitment respected and success for a finished sprint.
pub fn evaluate_completion(
    story_points_committed: f64,
    story_points_completed: f64,
    duration: u32,
) -> CapacityResult<SprintCompletion> {
    if !story_points_completed.is_finite() || story_points_completed < 0.0 {
        return Err(CapacityError::InvalidStoryPoints(format!(
            "completed story points must be zero or more, got {}",
            story_points_completed
        )));
    }
    if !story_points_committed.is_finite() || story_points_committed <= 0.0 {
        return Err(CapacityError::InvalidStoryPoints(format!(
            "committed story points must be greater than zero, got {}",
            story_points_committed
        )));
    }
    if duration == 0 {
        return Err(CapacityError::InvalidDuration(0));
    }

    let velocity_achieved = story_points_completed / f64::from(duration);
    let commitment_respected = story_points_completed / story_points_committed * 100.0;
    Ok(SprintCompletion {
        story_points_completed,
        velocity_achieved,
        commitment_respected,
        is_successful: commitment_respected >= SUCCESS_THRESHOLD,
    })
}

/// Mean achieved velocity over the completed sprints in `sprints`, or the
/// configured default when none is completed.
pub fn average_velocity<'a, I>(sprints: I, config: &EngineConfig) -> f64
where
    I: IntoIterator<Item = &'a Sprint>,
{
    let velocities: Vec<f64> = sprints
        .into_iter()
        .filter_map(Sprint::velocity_achieved)
        .collect();
    if velocities.is_empty() {
        return config.default_velocity;
    }
    velocities.iter().sum::<f64>() / velocities.len() as f64
}

/// Average velocity of one team, read from a mixed list of sprints.
pub fn team_average_velocity(team_id: TeamId, sprints: &[Sprint], config: &EngineConfig) -> f64 {
    average_velocity(sprints.iter().filter(|s| s.team_id == team_id), config)
}

/// Summary figures behind a team's status badges.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamMetrics {
    pub team_id: TeamId,
    pub sprint_count: usize,
    pub completed_count: usize,
    pub successful_count: usize,
    pub average_velocity: f64,
    /// Share of completed sprints that were successful, in percent.
    pub success_rate: Option<f64>,
    pub average_commitment_respected: Option<f64>,
    pub total_story_points_completed: f64,
}

impl TeamMetrics {
    pub fn compute(team_id: TeamId, sprints: &[Sprint], config: &EngineConfig) -> Self {
        let team_sprints: Vec<&Sprint> = sprints.iter().filter(|s| s.team_id == team_id).collect();
        let completions: Vec<SprintCompletion> =
            team_sprints.iter().filter_map(|s| s.completion).collect();

        let completed_count = completions.len();
        let successful_count = completions.iter().filter(|c| c.is_successful).count();
        let (success_rate, average_commitment_respected) = if completed_count == 0 {
            (None, None)
        } else {
            let n = completed_count as f64;
            let commitment: f64 = completions.iter().map(|c| c.commitment_respected).sum();
            (
                Some(round_to_cents(successful_count as f64 / n * 100.0)),
                Some(round_to_cents(commitment / n)),
            )
        };

        Self {
            team_id,
            sprint_count: team_sprints.len(),
            completed_count,
            successful_count,
            average_velocity: average_velocity(team_sprints.iter().copied(), config),
            success_rate,
            average_commitment_respected,
            total_story_points_completed: completions
                .iter()
                .map(|c| c.story_points_completed)
                .sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn sprint(team_id: TeamId, day: u32, duration: i64, committed: f64) -> Sprint {
        let start = NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
        Sprint::new(team_id, start, duration, committed, vec![], 0.0).unwrap()
    }

    #[test]
    fn test_reference_scenario() {
        let completion = evaluate_completion(50.0, 40.0, 10).unwrap();
        assert_eq!(completion.velocity_achieved, 4.0);
        assert_eq!(completion.commitment_respected, 80.0);
        assert!(completion.is_successful);
    }

    #[test]
    fn test_just_below_threshold_fails() {
        let completion = evaluate_completion(100.0, 79.99, 10).unwrap();
        assert!(!completion.is_successful);
        assert!(completion.commitment_respected < SUCCESS_THRESHOLD);
    }

    #[test]
    fn test_success_flag_matches_commitment() {
        for completed in [0.0, 10.0, 39.5, 40.0, 44.0, 60.0, 75.0] {
            let c = evaluate_completion(50.0, completed, 14).unwrap();
            assert_eq!(c.is_successful, c.commitment_respected >= SUCCESS_THRESHOLD);
            assert!((c.commitment_respected - 100.0 * completed / 50.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_zero_completed_is_valid() {
        let completion = evaluate_completion(20.0, 0.0, 5).unwrap();
        assert_eq!(completion.velocity_achieved, 0.0);
        assert!(!completion.is_successful);
    }

    #[test]
    fn test_rejects_negative_or_non_numeric_completion() {
        assert!(matches!(
            evaluate_completion(20.0, -1.0, 5),
            Err(CapacityError::InvalidStoryPoints(_))
        ));
        assert!(matches!(
            evaluate_completion(20.0, f64::NAN, 5),
            Err(CapacityError::InvalidStoryPoints(_))
        ));
    }

    #[test]
    fn test_average_velocity_defaults_without_history() {
        let team = Uuid::new_v4();
        let sprints = vec![sprint(team, 1, 10, 30.0)];
        let config = EngineConfig::default();
        assert_eq!(team_average_velocity(team, &sprints, &config), 1.0);

        let custom = EngineConfig::with_default_velocity(2.0).unwrap();
        assert_eq!(team_average_velocity(team, &[], &custom), 2.0);
    }

    #[test]
    fn test_average_velocity_ignores_in_progress_and_other_teams() {
        let team = Uuid::new_v4();
        let other = Uuid::new_v4();

        let mut first = sprint(team, 1, 10, 50.0);
        first.complete(40.0).unwrap();
        let mut second = sprint(team, 11, 10, 50.0);
        second.complete(20.0).unwrap();
        let in_progress = sprint(team, 21, 10, 50.0);
        let mut foreign = sprint(other, 1, 10, 50.0);
        foreign.complete(100.0).unwrap();

        let sprints = vec![first, second, in_progress, foreign];
        let config = EngineConfig::default();
        assert_eq!(team_average_velocity(team, &sprints, &config), 3.0);
        assert_eq!(team_average_velocity(other, &sprints, &config), 10.0);
    }

    #[test]
    fn test_team_metrics() {
        let team = Uuid::new_v4();
        let mut good = sprint(team, 1, 10, 50.0);
        good.complete(45.0).unwrap();
        let mut poor = sprint(team, 11, 10, 50.0);
        poor.complete(25.0).unwrap();
        let open = sprint(team, 21, 10, 50.0);

        let metrics = TeamMetrics::compute(team, &[good, poor, open], &EngineConfig::default());
        assert_eq!(metrics.sprint_count, 3);
        assert_eq!(metrics.completed_count, 2);
        assert_eq!(metrics.successful_count, 1);
        assert_eq!(metrics.success_rate, Some(50.0));
        assert_eq!(metrics.average_commitment_respected, Some(70.0));
        assert_eq!(metrics.average_velocity, 3.5);
        assert_eq!(metrics.total_story_points_completed, 70.0);
    }

    #[test]
    fn test_team_metrics_without_completed_sprints() {
        let team = Uuid::new_v4();
        let metrics = TeamMetrics::compute(team, &[], &EngineConfig::default());
        assert_eq!(metrics.completed_count, 0);
        assert_eq!(metrics.success_rate, None);
        assert_eq!(metrics.average_velocity, 1.0);
    }
}
