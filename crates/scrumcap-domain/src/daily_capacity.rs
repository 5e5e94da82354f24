//! Per-day capacity entries of a resource.
//!
//! A [`DailyCapacity`] is one (date, fraction of a working day) pair. A
//! [`DailyCapacities`] sequence owns a resource's entries for a sprint and
//! guarantees that capacities are finite and non-negative and that no date
//! appears twice. Both types validate on deserialization as well, so imported
//! records go through the same checks as values built in code.

use chrono::NaiveDate;
use scrumcap_core::{CapacityError, CapacityResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDailyCapacity")]
pub struct DailyCapacity {
    pub date: NaiveDate,
    pub capacity: f64,
}

#[derive(Deserialize)]
struct RawDailyCapacity {
    date: NaiveDate,
    capacity: f64,
}

impl TryFrom<RawDailyCapacity> for DailyCapacity {
    type Error = CapacityError;

    fn try_from(raw: RawDailyCapacity) -> CapacityResult<Self> {
        DailyCapacity::new(raw.date, raw.capacity)
    }
}

impl DailyCapacity {
    pub fn new(date: NaiveDate, capacity: f64) -> CapacityResult<Self> {
        validate_capacity(date, capacity)?;
        Ok(Self { date, capacity })
    }
}

fn validate_capacity(date: NaiveDate, capacity: f64) -> CapacityResult<()> {
    if !capacity.is_finite() || capacity < 0.0 {
        return Err(CapacityError::InvalidCapacity { date, capacity });
    }
    Ok(())
}

/// Unique-by-date sequence of daily capacities.
///
/// Insertion order is preserved; consumers that need chronological order call
/// [`DailyCapacities::sorted`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<DailyCapacity>", into = "Vec<DailyCapacity>")]
pub struct DailyCapacities(Vec<DailyCapacity>);

impl TryFrom<Vec<DailyCapacity>> for DailyCapacities {
    type Error = CapacityError;

    fn try_from(entries: Vec<DailyCapacity>) -> CapacityResult<Self> {
        DailyCapacities::new(entries)
    }
}

impl From<DailyCapacities> for Vec<DailyCapacity> {
    fn from(capacities: DailyCapacities) -> Self {
        capacities.0
    }
}

impl DailyCapacities {
    pub fn new(entries: Vec<DailyCapacity>) -> CapacityResult<Self> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.date) {
                return Err(CapacityError::DuplicateDate(entry.date));
            }
        }
        Ok(Self(entries))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DailyCapacity> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[DailyCapacity] {
        &self.0
    }

    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.0.iter().find(|e| e.date == date).map(|e| e.capacity)
    }

    pub fn sorted(&self) -> Vec<DailyCapacity> {
        let mut entries = self.0.clone();
        entries.sort_by_key(|e| e.date);
        entries
    }

    pub fn total(&self) -> f64 {
        self.0.iter().map(|e| e.capacity).sum()
    }

    /// Overwrite the capacity of an existing date. Dates not already in the
    /// sequence are rejected rather than appended.
    pub fn set(&mut self, date: NaiveDate, capacity: f64) -> CapacityResult<()> {
        validate_capacity(date, capacity)?;
        let entry = self
            .0
            .iter_mut()
            .find(|e| e.date == date)
            .ok_or_else(|| CapacityError::NotFound(format!("No capacity entry for {}", date)))?;
        entry.capacity = capacity;
        Ok(())
    }
}
