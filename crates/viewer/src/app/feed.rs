use serde_json::Value;
use tracing::warn;

use super::roster::{AgentId, AgentRecord};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WeatherKind {
    #[default]
    Sunny,
    Cloudy,
    Rainy,
}

impl WeatherKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sunny => "Sunny",
            Self::Cloudy => "Cloudy",
            Self::Rainy => "Rainy",
        }
    }
}

/// Clock, weather and headcount for the HUD status line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedStatus {
    pub hour: u32,
    pub minute: u32,
    pub weather: WeatherKind,
    pub active_agents: usize,
}

/// Overlay content pushed by the provider, keyed by agent id. The viewer
/// assigns the timestamp when it applies the push; providers never supply
/// one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThoughtPush {
    pub agent_id: AgentId,
    pub text: String,
}

/// The provider boundary. The viewer pulls from it at tick start and never
/// blocks on it; how the provider refreshes itself (network, script, replay)
/// is its own business.
pub trait AgentFeed {
    /// Gives the provider loop time. Called once per fixed tick.
    fn advance(&mut self, dt_seconds: f32);

    /// The current authoritative snapshot as an ordered list. Must return
    /// synchronously; staleness is fine, blocking is not.
    fn current_agents(&self) -> &[AgentRecord];

    /// Drains queued overlay content changes into `out`.
    fn drain_thoughts(&mut self, out: &mut Vec<ThoughtPush>);

    /// Selection sink; invoked on every click resolution, including `None`
    /// for a click that cleared the selection.
    fn push_selection(&mut self, selection: Option<&AgentId>);

    fn status(&self) -> FeedStatus;
}

/// Decodes a snapshot document element by element. Malformed elements
/// (missing id, non-integer coordinates, unknown activity) are skipped with a
/// warning while the rest of the snapshot still applies.
///
/// Expected element shape:
/// `{ "id": "ava", "x": 3, "y": 4, "activity": "WORKING", "sleeping": false }`
pub fn decode_agent_records(json: &str) -> Vec<AgentRecord> {
    let document: Value = match serde_json::from_str(json) {
        Ok(value) => value,
        Err(error) => {
            warn!(error = %error, "agent_snapshot_parse_failed");
            return Vec::new();
        }
    };

    let elements = match document {
        Value::Array(elements) => elements,
        _ => {
            warn!("agent_snapshot_not_an_array");
            return Vec::new();
        }
    };

    let mut records = Vec::with_capacity(elements.len());
    for (index, element) in elements.into_iter().enumerate() {
        match serde_json::from_value::<AgentRecord>(element) {
            Ok(record) => records.push(record),
            Err(error) => {
                warn!(index, error = %error, "agent_record_skipped");
            }
        }
    }
    records
}
