use std::collections::HashMap;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};
use viewer::{
    agent_at_tile, resolve_app_paths, screen_to_world_px, tile_center_px, world_px_to_tile,
    Activity, AgentFeed, AgentId, AgentRecord, FeedStatus, HudStatus, InputAction, InputSnapshot,
    Scene, SceneCommand, TerrainKind, ThoughtPush, Vec2, ViewerWorld, WeatherKind, WorldGrid,
    THOUGHT_PLACEHOLDER_TEXT, THOUGHT_TTL_MS, TILE_SIZE_PX,
};

const TOWN_WIDTH_TILES: u32 = 20;
const TOWN_HEIGHT_TILES: u32 = 20;
const SCENARIO_VERSION: u32 = 1;
const SCENARIO_FILE_NAME: &str = "town.json";
const SCENARIO_ENV_VAR: &str = "AGENTTOWN_SCENARIO";
const CAMERA_PAN_SPEED_PX_PER_SECOND: f32 = 240.0;
const CAMERA_GLIDE_SPEED_PX_PER_SECOND: f32 = 640.0;
const CAMERA_GLIDE_ARRIVAL_THRESHOLD_PX: f32 = 2.0;
const CAMERA_START_ZOOM: f32 = 1.5;
const MINUTES_PER_DAY: u32 = 24 * 60;
const CLOCK_START_MINUTES: u32 = 8 * 60;
const MINUTES_PER_SIM_STEP: u32 = 10;
const SIM_STEP_SECONDS: f32 = 0.5;
const WEATHER_CYCLE_MINUTES: u32 = 6 * 60;

include!("types.rs");
include!("util.rs");
include!("feed.rs");
include!("scene_state.rs");
include!("scene_impl.rs");

pub(crate) fn build_town_scene() -> Box<dyn Scene> {
    let scenario = load_scenario_or_default();
    let feed = ScriptedTownFeed::new(scenario);
    Box::new(TownScene::new(Box::new(feed)))
}
