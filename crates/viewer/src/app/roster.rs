use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::scene::{tile_center_px, Vec2};
use super::thoughts::ThoughtBoard;

/// Fraction of the remaining distance covered per tick when easing a visual
/// toward its target cell center.
pub const MOTION_SMOOTHING: f32 = 0.1;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(pub String);

impl AgentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AgentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for AgentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Activity {
    Idle,
    Moving,
    Working,
    Eating,
    Sleeping,
    Resting,
}

impl Activity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Moving => "MOVING",
            Self::Working => "WORKING",
            Self::Eating => "EATING",
            Self::Sleeping => "SLEEPING",
            Self::Resting => "RESTING",
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the provider's snapshot. The viewer never mutates records;
/// everything it needs per frame is derived from them anew.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRecord {
    pub id: AgentId,
    pub x: i32,
    pub y: i32,
    pub activity: Activity,
    pub sleeping: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayTag {
    Idle,
    Working,
    Sleeping,
}

impl DisplayTag {
    /// Derived from the current record only; no history is consulted.
    /// `sleeping` outranks the activity, `Working` outranks everything else.
    pub fn for_record(record: &AgentRecord) -> Self {
        if record.sleeping {
            Self::Sleeping
        } else if record.activity == Activity::Working {
            Self::Working
        } else {
            Self::Idle
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualAgent {
    pub current: Vec2,
    pub target: Vec2,
    pub tag: DisplayTag,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub created: usize,
    pub updated: usize,
    pub removed: usize,
    pub skipped: usize,
}

/// Ownership table for every on-screen agent, keyed by id. Visuals are
/// created and destroyed here and nowhere else.
#[derive(Debug, Default, PartialEq)]
pub struct AgentRoster {
    visuals: HashMap<AgentId, VisualAgent>,
}

impl AgentRoster {
    /// Single linear pass: new ids spawn at their cell center, existing ids
    /// retarget, absent ids are destroyed along with their thought bubble.
    /// Records with an empty id are skipped individually. The outcome does
    /// not depend on snapshot ordering.
    pub fn reconcile(
        &mut self,
        snapshot: &[AgentRecord],
        thoughts: &mut ThoughtBoard,
    ) -> ReconcileSummary {
        let mut summary = ReconcileSummary::default();
        let mut seen: HashSet<&str> = HashSet::with_capacity(snapshot.len());

        for record in snapshot {
            if record.id.as_str().is_empty() {
                warn!(x = record.x, y = record.y, "agent_record_skipped_empty_id");
                summary.skipped += 1;
                continue;
            }
            seen.insert(record.id.as_str());

            let center = tile_center_px(record.x, record.y);
            let tag = DisplayTag::for_record(record);
            if let Some(visual) = self.visuals.get_mut(&record.id) {
                visual.target = center;
                visual.tag = tag;
                summary.updated += 1;
            } else {
                self.visuals.insert(
                    record.id.clone(),
                    VisualAgent {
                        current: center,
                        target: center,
                        tag,
                    },
                );
                summary.created += 1;
            }
        }

        let mut dropped: Vec<AgentId> = Vec::new();
        self.visuals.retain(|agent_id, _| {
            if seen.contains(agent_id.as_str()) {
                true
            } else {
                dropped.push(agent_id.clone());
                false
            }
        });
        for agent_id in &dropped {
            thoughts.remove(agent_id);
        }
        summary.removed = dropped.len();

        summary
    }

    /// Eases every visual toward its target by `MOTION_SMOOTHING` per axis.
    /// The remaining distance shrinks geometrically and never snaps to zero.
    pub fn advance_motion(&mut self) {
        for visual in self.visuals.values_mut() {
            visual.current.x += (visual.target.x - visual.current.x) * MOTION_SMOOTHING;
            visual.current.y += (visual.target.y - visual.current.y) * MOTION_SMOOTHING;
        }
    }

    pub fn get(&self, agent_id: &AgentId) -> Option<&VisualAgent> {
        self.visuals.get(agent_id)
    }

    pub fn contains(&self, agent_id: &AgentId) -> bool {
        self.visuals.contains_key(agent_id)
    }

    pub fn len(&self) -> usize {
        self.visuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visuals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AgentId, &VisualAgent)> {
        self.visuals.iter()
    }

    pub fn clear(&mut self) {
        self.visuals.clear();
    }
}

/// Resolves a tile hit against the snapshot records, not the eased visuals,
/// so a click lands on where an agent is, not where it is drawn. Ties on a
/// shared tile go to the lexicographically smallest id.
pub fn agent_at_tile(snapshot: &[AgentRecord], tile: (i32, i32)) -> Option<&AgentId> {
    snapshot
        .iter()
        .filter(|record| !record.id.as_str().is_empty())
        .filter(|record| record.x == tile.0 && record.y == tile.1)
        .map(|record| &record.id)
        .min()
}
