//! Sprint calendars: date ranges, default daily capacities and week rows.

pub mod generator;
pub mod week;

pub use generator::{
    default_capacity, end_date, generate_daily_capacities, is_weekend, populate_calendars,
    regenerate_daily_capacities, sprint_dates, validate_duration,
};
pub use week::{group_by_week, ResourceCalendar, WeekCell, WeekRow, DAYS_PER_WEEK};
