mod feed;
mod input;
mod loop_runner;
mod metrics;
mod rendering;
mod roster;
mod scene;
mod thoughts;
mod tools;

pub use feed::{decode_agent_records, AgentFeed, FeedStatus, ThoughtPush, WeatherKind};
pub use input::InputAction;
pub use loop_runner::{run_app, run_app_with_metrics, AppError, LoopConfig, SLOW_FRAME_ENV_VAR};
pub use metrics::{LoopMetricsSnapshot, MetricsHandle};
pub use rendering::{screen_to_world_px, world_to_screen_px, Renderer, Viewport};
pub use roster::{
    agent_at_tile, Activity, AgentId, AgentRecord, AgentRoster, DisplayTag, ReconcileSummary,
    VisualAgent, MOTION_SMOOTHING,
};
pub use scene::{
    tile_center_px, world_px_to_tile, Camera2D, HudStatus, InputSnapshot, Scene, SceneCommand,
    TerrainKind, Vec2, ViewerWorld, WorldGrid, WorldGridError, TILE_SIZE_PX,
};
pub use thoughts::{ThoughtBoard, ThoughtBubble, THOUGHT_PLACEHOLDER_TEXT, THOUGHT_TTL_MS};
pub(crate) use tools::OverlayData;
