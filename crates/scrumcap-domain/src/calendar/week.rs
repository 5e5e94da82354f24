//! Monday-to-Sunday week rows for displaying a resource's calendar.
//!
//! Grouping is a pure view: it reads a [`DailyCapacities`] sequence (in any
//! order) and never mutates it. Days of a week that have no entry are
//! synthesized as placeholder cells, so every row has exactly seven cells.
//! Weekend status and sprint membership are tracked separately: a weekend day
//! inside the sprint is a real, editable cell with (usually) zero capacity.

use super::generator::is_weekend;
use crate::capacity::presence_days;
use crate::daily_capacity::{DailyCapacities, DailyCapacity};
use crate::resource::{Resource, ResourceId};
use chrono::{NaiveDate, Weekday};
use serde::Serialize;

pub const DAYS_PER_WEEK: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeekCell {
    pub date: NaiveDate,
    pub capacity: f64,
    pub is_weekend: bool,
    pub in_sprint: bool,
}

impl WeekCell {
    fn real(entry: &DailyCapacity) -> Self {
        Self {
            date: entry.date,
            capacity: entry.capacity,
            is_weekend: is_weekend(entry.date),
            in_sprint: true,
        }
    }

    fn placeholder(date: NaiveDate) -> Self {
        Self {
            date,
            capacity: 0.0,
            is_weekend: is_weekend(date),
            in_sprint: false,
        }
    }

    /// Only cells backed by a sprint entry may be edited.
    pub fn is_editable(&self) -> bool {
        self.in_sprint
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekRow {
    pub week_start: NaiveDate,
    cells: Vec<WeekCell>,
}

impl WeekRow {
    fn empty(week_start: NaiveDate) -> Self {
        Self {
            week_start,
            cells: week_start
                .iter_days()
                .take(DAYS_PER_WEEK)
                .map(WeekCell::placeholder)
                .collect(),
        }
    }

    fn fill(&mut self, entry: &DailyCapacity) {
        if let Some(cell) = self.cells.iter_mut().find(|c| c.date == entry.date) {
            *cell = WeekCell::real(entry);
        }
    }

    pub fn cells(&self) -> &[WeekCell] {
        &self.cells
    }
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date.week(Weekday::Mon).first_day()
}

/// Arrange capacities into week rows in chronological order. Weeks without
/// any entry produce no row.
pub fn group_by_week(capacities: &DailyCapacities) -> Vec<WeekRow> {
    let mut rows: Vec<WeekRow> = Vec::new();
    for entry in capacities.sorted() {
        let start = week_start(entry.date);
        match rows.last_mut() {
            Some(row) if row.week_start == start => row.fill(&entry),
            _ => {
                let mut row = WeekRow::empty(start);
                row.fill(&entry);
                rows.push(row);
            }
        }
    }
    rows
}

/// Week rows of one resource as shown in a sprint calendar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceCalendar {
    pub resource_id: ResourceId,
    pub name: String,
    pub presence_days: f64,
    pub weeks: Vec<WeekRow>,
}

impl ResourceCalendar {
    pub fn for_resource(resource: &Resource) -> Self {
        Self {
            resource_id: resource.id,
            name: resource.name.clone(),
            presence_days: presence_days(resource),
            weeks: resource
                .daily_capacities
                .as_ref()
                .map(group_by_week)
                .unwrap_or_default(),
        }
    }
}
