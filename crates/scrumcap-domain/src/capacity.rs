//! Person-day aggregation and theoretical story-point capacity.

use crate::resource::Resource;

/// Sum of a resource's daily capacities. A resource without a calendar
/// contributes nothing.
pub fn presence_days(resource: &Resource) -> f64 {
    resource
        .daily_capacities
        .as_ref()
        .map(|caps| caps.total())
        .unwrap_or(0.0)
}

/// Total person-days of a set of resources (typically a sprint's snapshot).
pub fn total_capacity(resources: &[Resource]) -> f64 {
    resources.iter().map(presence_days).sum()
}

/// Person-days a resource brings to a sprint of `duration` days.
///
/// Falls back to `capacity_per_day * duration` when no calendar was
/// generated. That fallback counts weekend days too, unlike the calendar
/// default.
pub fn resource_person_days(resource: &Resource, duration: u32) -> f64 {
    if resource.has_daily_capacities() {
        presence_days(resource)
    } else {
        resource.capacity_per_day * f64::from(duration)
    }
}

/// Expected story points: `average_velocity * person-days`, rounded to cents.
pub fn theoretical_capacity(average_velocity: f64, resources: &[Resource], duration: u32) -> f64 {
    let person_days: f64 = resources
        .iter()
        .map(|r| resource_person_days(r, duration))
        .sum();
    let capacity = round_to_cents(average_velocity * person_days);
    tracing::debug!(
        average_velocity,
        person_days,
        capacity,
        "computed theoretical capacity"
    );
    capacity
}

pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
