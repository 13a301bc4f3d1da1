use std::collections::HashMap;

use super::roster::AgentId;

/// Content the provider sends when an agent has nothing to say; treated the
/// same as empty content, i.e. it clears the bubble instead of showing one.
pub const THOUGHT_PLACEHOLDER_TEXT: &str = "No thought recorded yet.";

/// Bubbles older than this are removed by the sweep. Age equal to the limit
/// still renders; only strictly older bubbles expire.
pub const THOUGHT_TTL_MS: u64 = 5_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThoughtBubble {
    pub text: String,
    pub created_at_ms: u64,
}

/// At most one bubble per agent, keyed by id. Screen placement is never
/// stored here; the renderer derives it from the parent visual every frame.
#[derive(Debug, Default, PartialEq)]
pub struct ThoughtBoard {
    bubbles: HashMap<AgentId, ThoughtBubble>,
}

impl ThoughtBoard {
    /// Empty or placeholder content removes the bubble; anything else creates
    /// or replaces it with a fresh timestamp.
    pub fn set_thought(&mut self, agent_id: &AgentId, text: &str, now_ms: u64) {
        if text.is_empty() || text == THOUGHT_PLACEHOLDER_TEXT {
            self.remove(agent_id);
            return;
        }
        self.bubbles.insert(
            agent_id.clone(),
            ThoughtBubble {
                text: text.to_string(),
                created_at_ms: now_ms,
            },
        );
    }

    pub fn remove(&mut self, agent_id: &AgentId) -> bool {
        self.bubbles.remove(agent_id).is_some()
    }

    /// Removes bubbles strictly older than `ttl_ms`. Safe to call any number
    /// of times per tick; a second sweep at the same timestamp removes
    /// nothing.
    pub fn sweep_expired(&mut self, now_ms: u64, ttl_ms: u64) -> usize {
        let before = self.bubbles.len();
        self.bubbles
            .retain(|_, bubble| now_ms.saturating_sub(bubble.created_at_ms) <= ttl_ms);
        before - self.bubbles.len()
    }

    pub fn get(&self, agent_id: &AgentId) -> Option<&ThoughtBubble> {
        self.bubbles.get(agent_id)
    }

    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AgentId, &ThoughtBubble)> {
        self.bubbles.iter()
    }

    pub fn clear(&mut self) {
        self.bubbles.clear();
    }
}
