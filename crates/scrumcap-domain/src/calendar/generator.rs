//! Sprint date ranges and default per-day capacities.

use crate::daily_capacity::{DailyCapacities, DailyCapacity};
use crate::resource::Resource;
use chrono::{Datelike, Days, NaiveDate, Weekday};
use scrumcap_core::{CapacityError, CapacityResult};

/// Validate a sprint duration in days. Anything below one day is rejected.
pub fn validate_duration(duration: i64) -> CapacityResult<u32> {
    if duration <= 0 {
        return Err(CapacityError::InvalidDuration(duration));
    }
    u32::try_from(duration).map_err(|_| CapacityError::InvalidDuration(duration))
}

/// Last day (inclusive) of a range of `duration` days starting at `start`.
pub fn end_date(start: NaiveDate, duration: u32) -> CapacityResult<NaiveDate> {
    let span = u64::from(duration.saturating_sub(1));
    start
        .checked_add_days(Days::new(span))
        .ok_or(CapacityError::InvalidDuration(i64::from(duration)))
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// `duration` consecutive dates beginning at `start`.
pub fn sprint_dates(start: NaiveDate, duration: i64) -> CapacityResult<Vec<NaiveDate>> {
    let days = validate_duration(duration)?;
    end_date(start, days)?;
    Ok(start.iter_days().take(days as usize).collect())
}

pub fn default_capacity(capacity_per_day: f64, date: NaiveDate) -> f64 {
    if is_weekend(date) {
        0.0
    } else {
        capacity_per_day
    }
}

pub fn generate_daily_capacities(
    capacity_per_day: f64,
    start: NaiveDate,
    duration: i64,
) -> CapacityResult<DailyCapacities> {
    regenerate_daily_capacities(None, capacity_per_day, start, duration)
}

/// Rebuild a daily-capacity sequence for a new range.
///
/// Values already entered for dates that stay inside the range are kept,
/// dates that fall outside are dropped and new dates get the weekend default.
/// The result always holds exactly `duration` entries in date order.
pub fn regenerate_daily_capacities(
    existing: Option<&DailyCapacities>,
    capacity_per_day: f64,
    start: NaiveDate,
    duration: i64,
) -> CapacityResult<DailyCapacities> {
    let entries = sprint_dates(start, duration)?
        .into_iter()
        .map(|date| {
            let capacity = existing
                .and_then(|caps| caps.get(date))
                .unwrap_or_else(|| default_capacity(capacity_per_day, date));
            DailyCapacity::new(date, capacity)
        })
        .collect::<CapacityResult<Vec<_>>>()?;
    DailyCapacities::new(entries)
}

/// Copy `resources` with their calendars regenerated for the given range,
/// as stored on a sprint.
pub fn populate_calendars(
    resources: &[Resource],
    start: NaiveDate,
    duration: i64,
) -> CapacityResult<Vec<Resource>> {
    resources
        .iter()
        .map(|resource| {
            let mut snapshot = resource.clone();
            snapshot.daily_capacities = Some(regenerate_daily_capacities(
                resource.daily_capacities.as_ref(),
                resource.capacity_per_day,
                start,
                duration,
            )?);
            Ok(snapshot)
        })
        .collect()
}
