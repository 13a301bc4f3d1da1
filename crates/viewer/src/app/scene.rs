use super::input::{ActionStates, InputAction};
use super::roster::{AgentId, AgentRecord, AgentRoster, ReconcileSummary};
use super::thoughts::ThoughtBoard;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    None,
    Exit,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    quit_requested: bool,
    actions: ActionStates,
    cursor_position_px: Option<Vec2>,
    left_click_pressed: bool,
    zoom_delta_steps: i32,
    window_width: u32,
    window_height: u32,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn new(
        quit_requested: bool,
        actions: ActionStates,
        cursor_position_px: Option<Vec2>,
        left_click_pressed: bool,
        zoom_delta_steps: i32,
        window_width: u32,
        window_height: u32,
    ) -> Self {
        Self {
            quit_requested,
            actions,
            cursor_position_px,
            left_click_pressed,
            zoom_delta_steps,
            window_width,
            window_height,
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.actions.is_down(action)
    }

    pub fn with_quit_requested(mut self, quit_requested: bool) -> Self {
        self.quit_requested = quit_requested;
        self
    }

    pub fn with_action_down(mut self, action: InputAction, is_down: bool) -> Self {
        self.actions.set(action, is_down);
        self
    }

    pub fn with_cursor_position_px(mut self, cursor_position_px: Option<Vec2>) -> Self {
        self.cursor_position_px = cursor_position_px;
        self
    }

    pub fn with_left_click_pressed(mut self, left_click_pressed: bool) -> Self {
        self.left_click_pressed = left_click_pressed;
        self
    }

    pub fn with_zoom_delta_steps(mut self, zoom_delta_steps: i32) -> Self {
        self.zoom_delta_steps = zoom_delta_steps;
        self
    }

    pub fn with_window_size(mut self, window_size: (u32, u32)) -> Self {
        self.window_width = window_size.0;
        self.window_height = window_size.1;
        self
    }

    pub fn cursor_position_px(&self) -> Option<Vec2> {
        self.cursor_position_px
    }

    pub fn left_click_pressed(&self) -> bool {
        self.left_click_pressed
    }

    pub fn zoom_delta_steps(&self) -> i32 {
        self.zoom_delta_steps
    }

    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

pub const TILE_SIZE_PX: f32 = 32.0;

pub fn tile_center_px(x: i32, y: i32) -> Vec2 {
    Vec2 {
        x: (x as f32 + 0.5) * TILE_SIZE_PX,
        y: (y as f32 + 0.5) * TILE_SIZE_PX,
    }
}

pub fn world_px_to_tile(world: Vec2) -> (i32, i32) {
    (
        (world.x / TILE_SIZE_PX).floor() as i32,
        (world.y / TILE_SIZE_PX).floor() as i32,
    )
}

pub const CAMERA_ZOOM_DEFAULT: f32 = 1.0;
pub const CAMERA_ZOOM_MIN: f32 = 0.5;
pub const CAMERA_ZOOM_MAX: f32 = 2.0;
pub const CAMERA_ZOOM_STEP: f32 = 0.1;

#[derive(Debug, Clone, Copy)]
pub struct Camera2D {
    pub position: Vec2,
    pub zoom: f32,
}

impl Default for Camera2D {
    fn default() -> Self {
        Self {
            position: Vec2::default(),
            zoom: CAMERA_ZOOM_DEFAULT,
        }
    }
}

impl Camera2D {
    pub fn effective_zoom(&self) -> f32 {
        clamp_camera_zoom(self.zoom)
    }

    pub fn set_zoom_clamped(&mut self, zoom: f32) {
        self.zoom = clamp_camera_zoom(zoom);
    }

    pub fn apply_zoom_steps(&mut self, steps: i32) {
        if steps == 0 {
            return;
        }
        let target_zoom = self.zoom + steps as f32 * CAMERA_ZOOM_STEP;
        self.set_zoom_clamped(target_zoom);
    }
}

fn clamp_camera_zoom(zoom: f32) -> f32 {
    if !zoom.is_finite() {
        return CAMERA_ZOOM_DEFAULT;
    }
    zoom.clamp(CAMERA_ZOOM_MIN, CAMERA_ZOOM_MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerrainKind {
    Wall,
    Floor,
    Residential,
    WorkplaceA,
    WorkplaceB,
    Commercial,
    Park,
}

/// Grid coordinate convention:
/// - World coordinates are pixels with y increasing downward.
/// - Tile (x, y) covers `[x * TILE_SIZE_PX, (x + 1) * TILE_SIZE_PX)` on each
///   axis; its center is `tile_center_px(x, y)`.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldGrid {
    width: u32,
    height: u32,
    cells: Vec<TerrainKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WorldGridError {
    #[error("cell count mismatch: expected {expected}, got {actual}")]
    CellCountMismatch { expected: usize, actual: usize },
}

impl WorldGrid {
    pub fn new(width: u32, height: u32, cells: Vec<TerrainKind>) -> Result<Self, WorldGridError> {
        let expected = width as usize * height as usize;
        let actual = cells.len();
        if expected != actual {
            return Err(WorldGridError::CellCountMismatch { expected, actual });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn contains_tile(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    pub fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if !self.contains_tile(x, y) {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn terrain_at(&self, x: i32, y: i32) -> Option<TerrainKind> {
        self.index_of(x, y)
            .and_then(|index| self.cells.get(index).copied())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudStatus {
    pub clock: String,
    pub weather: String,
    pub active_agents: usize,
    pub selected_detail: Option<String>,
}

#[derive(Debug, Default)]
pub struct ViewerWorld {
    grid: Option<WorldGrid>,
    camera: Camera2D,
    roster: AgentRoster,
    thoughts: ThoughtBoard,
    selected_agent: Option<AgentId>,
}

impl ViewerWorld {
    pub fn set_grid(&mut self, grid: WorldGrid) {
        self.grid = Some(grid);
    }

    pub fn clear_grid(&mut self) {
        self.grid = None;
    }

    pub fn grid(&self) -> Option<&WorldGrid> {
        self.grid.as_ref()
    }

    pub fn camera(&self) -> &Camera2D {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera2D {
        &mut self.camera
    }

    pub fn roster(&self) -> &AgentRoster {
        &self.roster
    }

    pub fn roster_mut(&mut self) -> &mut AgentRoster {
        &mut self.roster
    }

    pub fn thoughts(&self) -> &ThoughtBoard {
        &self.thoughts
    }

    pub fn thoughts_mut(&mut self) -> &mut ThoughtBoard {
        &mut self.thoughts
    }

    pub fn selected_agent(&self) -> Option<&AgentId> {
        self.selected_agent.as_ref()
    }

    pub fn set_selected_agent(&mut self, selected: Option<AgentId>) {
        self.selected_agent = selected;
    }

    /// Reconciles the roster against an authoritative snapshot. Visuals for
    /// dropped ids are destroyed together with their thought bubbles, and a
    /// selection pointing at a dropped id is cleared.
    pub fn apply_snapshot(&mut self, snapshot: &[AgentRecord]) -> ReconcileSummary {
        let summary = self.roster.reconcile(snapshot, &mut self.thoughts);

        if let Some(selected) = &self.selected_agent {
            if !self.roster.contains(selected) {
                debug!(agent = %selected, "selection_cleared_missing_agent");
                self.selected_agent = None;
            }
        }

        debug_assert!(
            !self.has_dangling_thoughts(),
            "thought bubble without a visual agent after reconcile"
        );
        summary
    }

    /// Applies a pushed overlay content change. Pushes for ids with no visual
    /// agent are dropped so a bubble can never outlive or precede its parent.
    pub fn push_thought(&mut self, agent_id: &AgentId, text: &str, now_ms: u64) {
        if !self.roster.contains(agent_id) {
            warn!(agent = %agent_id, "thought_push_for_unknown_agent");
            return;
        }
        self.thoughts.set_thought(agent_id, text, now_ms);
    }

    pub fn clear(&mut self) {
        self.roster.clear();
        self.thoughts.clear();
        self.selected_agent = None;
        self.camera = Camera2D::default();
        self.grid = None;
    }

    fn has_dangling_thoughts(&self) -> bool {
        self.thoughts
            .iter()
            .any(|(agent_id, _)| !self.roster.contains(agent_id))
    }
}

pub trait Scene {
    fn load(&mut self, world: &mut ViewerWorld);
    fn update(
        &mut self,
        fixed_dt_seconds: f32,
        input: &InputSnapshot,
        world: &mut ViewerWorld,
    ) -> SceneCommand;
    fn unload(&mut self, world: &mut ViewerWorld);
    fn hud_status(&self, _world: &ViewerWorld) -> Option<HudStatus> {
        None
    }
    fn window_title(&self, _world: &ViewerWorld) -> Option<String> {
        None
    }
}

pub(crate) struct SceneRuntime {
    scene: Box<dyn Scene>,
    world: ViewerWorld,
    is_loaded: bool,
}

impl SceneRuntime {
    pub(crate) fn new(scene: Box<dyn Scene>) -> Self {
        Self {
            scene,
            world: ViewerWorld::default(),
            is_loaded: false,
        }
    }

    pub(crate) fn load_if_needed(&mut self) {
        if self.is_loaded {
            return;
        }
        self.scene.load(&mut self.world);
        self.is_loaded = true;
    }

    pub(crate) fn update(
        &mut self,
        fixed_dt_seconds: f32,
        input: &InputSnapshot,
    ) -> SceneCommand {
        self.scene.update(fixed_dt_seconds, input, &mut self.world)
    }

    pub(crate) fn world(&self) -> &ViewerWorld {
        &self.world
    }

    pub(crate) fn hud_status(&self) -> Option<HudStatus> {
        self.scene.hud_status(&self.world)
    }

    pub(crate) fn window_title(&self) -> Option<String> {
        self.scene.window_title(&self.world)
    }

    pub(crate) fn shutdown(&mut self) {
        if self.is_loaded {
            self.scene.unload(&mut self.world);
            self.world.clear();
            self.is_loaded = false;
        }
    }
}
