//! Point-in-time capture of all capacity data.
//!
//! `Snapshot` is what the persistence layer stores and what import/export
//! documents are built from. All fields default so older or partial files
//! still load.

use crate::{Resource, Sprint, Team, TeamId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Snapshot {
    #[serde(default)]
    pub teams: Vec<Team>,

    /// Resource directory across all teams.
    #[serde(default)]
    pub resources: Vec<Resource>,

    #[serde(default)]
    pub sprints: Vec<Sprint>,

    /// Team used when a command does not name one.
    #[serde(default)]
    pub active_team_id: Option<TeamId>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty() && self.resources.is_empty() && self.sprints.is_empty()
    }
}
