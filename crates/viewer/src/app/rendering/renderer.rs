use std::sync::Arc;

use pixels::{Error, Pixels, SurfaceTexture};
use winit::window::Window;

use crate::app::tools::{
    draw_filled_rect, draw_overlay, draw_rect_outline, draw_text_scaled, text_height_px,
    text_width_px,
};
use crate::app::{
    AgentId, Camera2D, DisplayTag, OverlayData, TerrainKind, ThoughtBubble, Vec2, ViewerWorld,
    VisualAgent, WorldGrid, TILE_SIZE_PX,
};

use super::transform::world_to_screen_px;
use super::Viewport;

const CLEAR_COLOR: [u8; 4] = [26, 26, 46, 255];

const TERRAIN_WALL_COLOR: [u8; 4] = [64, 64, 64, 255];
const TERRAIN_FLOOR_COLOR: [u8; 4] = [128, 128, 128, 255];
const TERRAIN_RESIDENTIAL_COLOR: [u8; 4] = [102, 102, 136, 255];
const TERRAIN_WORKPLACE_A_COLOR: [u8; 4] = [170, 68, 68, 255];
const TERRAIN_WORKPLACE_B_COLOR: [u8; 4] = [68, 170, 68, 255];
const TERRAIN_COMMERCIAL_COLOR: [u8; 4] = [170, 170, 68, 255];
const TERRAIN_PARK_COLOR: [u8; 4] = [68, 170, 102, 255];

const AGENT_IDLE_COLOR: [u8; 4] = [0, 170, 255, 255];
const AGENT_WORKING_COLOR: [u8; 4] = [255, 170, 0, 255];
const AGENT_SLEEPING_COLOR: [u8; 4] = [136, 136, 136, 255];
const AGENT_RADIUS_WORLD_PX: f32 = TILE_SIZE_PX / 3.0;

const SELECTION_RING_COLOR: [u8; 4] = [255, 255, 255, 255];
const SELECTION_RING_GAP_PX: i32 = 3;
const SELECTION_RING_THICKNESS_PX: i32 = 2;

const BUBBLE_BG_COLOR: [u8; 4] = [255, 255, 255, 255];
const BUBBLE_TEXT_COLOR: [u8; 4] = [0, 0, 0, 255];
const BUBBLE_BORDER_COLOR: [u8; 4] = [64, 64, 64, 255];
const BUBBLE_TEXT_SCALE: i32 = 2;
const BUBBLE_PADDING_PX: i32 = 4;
const BUBBLE_MAX_TEXT_CHARS: usize = 24;
const BUBBLE_ANCHOR_LIFT_WORLD_PX: f32 = TILE_SIZE_PX / 2.0;

const VIEW_CULL_PADDING_PX: f32 = 16.0;

#[derive(Debug, Clone, Copy)]
struct WorldBounds {
    min_x: f32,
    max_x: f32,
    min_y: f32,
    max_y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TileRectInclusive {
    x_min: u32,
    x_max: u32,
    y_min: u32,
    y_max: u32,
}

pub struct Renderer {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    viewport: Viewport,
}

impl Renderer {
    pub fn new(window: Arc<Window>) -> Result<Self, Error> {
        let size = window.inner_size();
        let pixels = Self::build_pixels(Arc::clone(&window), size.width, size.height)?;
        Ok(Self {
            window,
            pixels,
            viewport: Viewport {
                width: size.width,
                height: size.height,
            },
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels = Self::build_pixels(Arc::clone(&self.window), width, height)?;
        self.viewport = Viewport { width, height };
        Ok(())
    }

    fn build_pixels(
        window: Arc<Window>,
        width: u32,
        height: u32,
    ) -> Result<Pixels<'static>, Error> {
        let surface = SurfaceTexture::new(width, height, window);
        Pixels::new(width, height, surface)
    }

    pub(crate) fn render_world(
        &mut self,
        world: &ViewerWorld,
        overlay_data: Option<&OverlayData>,
    ) -> Result<(), Error> {
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Ok(());
        }

        let width = self.viewport.width;
        let height = self.viewport.height;
        let frame = self.pixels.frame_mut();

        for chunk in frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&CLEAR_COLOR);
        }

        let view_bounds =
            view_bounds_world(world.camera(), (width, height), VIEW_CULL_PADDING_PX);

        draw_terrain(frame, width, height, world, &view_bounds);
        draw_agents(frame, width, height, world, &view_bounds);
        draw_selection_ring(frame, width, height, world);
        draw_thought_bubbles(frame, width, height, world);

        if let Some(data) = overlay_data {
            draw_overlay(frame, width, height, data);
        }

        self.pixels.render()
    }
}

fn terrain_color(kind: TerrainKind) -> [u8; 4] {
    match kind {
        TerrainKind::Wall => TERRAIN_WALL_COLOR,
        TerrainKind::Floor => TERRAIN_FLOOR_COLOR,
        TerrainKind::Residential => TERRAIN_RESIDENTIAL_COLOR,
        TerrainKind::WorkplaceA => TERRAIN_WORKPLACE_A_COLOR,
        TerrainKind::WorkplaceB => TERRAIN_WORKPLACE_B_COLOR,
        TerrainKind::Commercial => TERRAIN_COMMERCIAL_COLOR,
        TerrainKind::Park => TERRAIN_PARK_COLOR,
    }
}

fn agent_color(tag: DisplayTag) -> [u8; 4] {
    match tag {
        DisplayTag::Idle => AGENT_IDLE_COLOR,
        DisplayTag::Working => AGENT_WORKING_COLOR,
        DisplayTag::Sleeping => AGENT_SLEEPING_COLOR,
    }
}

fn view_bounds_world(camera: &Camera2D, window_size: (u32, u32), padding_px: f32) -> WorldBounds {
    let zoom = camera.effective_zoom();
    let half_w_world = window_size.0 as f32 / (2.0 * zoom);
    let half_h_world = window_size.1 as f32 / (2.0 * zoom);
    let padding_world = padding_px.max(0.0) / zoom;

    WorldBounds {
        min_x: camera.position.x - half_w_world - padding_world,
        max_x: camera.position.x + half_w_world + padding_world,
        min_y: camera.position.y - half_h_world - padding_world,
        max_y: camera.position.y + half_h_world + padding_world,
    }
}

fn bounds_contain_point(bounds: &WorldBounds, point: Vec2) -> bool {
    point.x >= bounds.min_x
        && point.x <= bounds.max_x
        && point.y >= bounds.min_y
        && point.y <= bounds.max_y
}

fn visible_tile_rect(grid: &WorldGrid, bounds: &WorldBounds) -> Option<TileRectInclusive> {
    if grid.width() == 0 || grid.height() == 0 {
        return None;
    }

    let raw_x_min = (bounds.min_x / TILE_SIZE_PX).floor() as i32;
    let raw_x_max = (bounds.max_x / TILE_SIZE_PX).ceil() as i32 - 1;
    let raw_y_min = (bounds.min_y / TILE_SIZE_PX).floor() as i32;
    let raw_y_max = (bounds.max_y / TILE_SIZE_PX).ceil() as i32 - 1;

    let x_limit = grid.width() as i32 - 1;
    let y_limit = grid.height() as i32 - 1;

    let x_min = raw_x_min.max(0);
    let x_max = raw_x_max.min(x_limit);
    let y_min = raw_y_min.max(0);
    let y_max = raw_y_max.min(y_limit);

    if x_min > x_max || y_min > y_max {
        return None;
    }

    Some(TileRectInclusive {
        x_min: x_min as u32,
        x_max: x_max as u32,
        y_min: y_min as u32,
        y_max: y_max as u32,
    })
}

fn draw_terrain(
    frame: &mut [u8],
    width: u32,
    height: u32,
    world: &ViewerWorld,
    view_bounds: &WorldBounds,
) {
    let Some(grid) = world.grid() else {
        return;
    };
    let Some(visible_rect) = visible_tile_rect(grid, view_bounds) else {
        return;
    };

    for y in visible_rect.y_min..=visible_rect.y_max {
        for x in visible_rect.x_min..=visible_rect.x_max {
            let Some(kind) = grid.terrain_at(x as i32, y as i32) else {
                continue;
            };
            draw_tile(
                frame,
                width,
                height,
                world.camera(),
                x as i32,
                y as i32,
                terrain_color(kind),
            );
        }
    }
}

/// Tiles are filled corner to corner in screen space so neighbours stay
/// seamless at fractional zoom levels.
fn draw_tile(
    frame: &mut [u8],
    width: u32,
    height: u32,
    camera: &Camera2D,
    tile_x: i32,
    tile_y: i32,
    color: [u8; 4],
) {
    let (left, top) = world_to_screen_px(
        camera,
        (width, height),
        Vec2 {
            x: tile_x as f32 * TILE_SIZE_PX,
            y: tile_y as f32 * TILE_SIZE_PX,
        },
    );
    let (right, bottom) = world_to_screen_px(
        camera,
        (width, height),
        Vec2 {
            x: (tile_x + 1) as f32 * TILE_SIZE_PX,
            y: (tile_y + 1) as f32 * TILE_SIZE_PX,
        },
    );
    fill_rect_clipped(frame, width, height, left, top, right, bottom, color);
}

fn draw_agents(
    frame: &mut [u8],
    width: u32,
    height: u32,
    world: &ViewerWorld,
    view_bounds: &WorldBounds,
) {
    let mut draw_list: Vec<(&AgentId, &VisualAgent)> = world
        .roster()
        .iter()
        .filter(|(_, visual)| bounds_contain_point(view_bounds, visual.current))
        .collect();
    // Id order keeps overlap resolution stable across frames.
    draw_list.sort_by(|left, right| left.0.cmp(right.0));

    let radius = agent_radius_px(world.camera());
    for (_, visual) in draw_list {
        let (cx, cy) = world_to_screen_px(world.camera(), (width, height), visual.current);
        draw_filled_circle(frame, width, height, cx, cy, radius, agent_color(visual.tag));
    }
}

fn draw_selection_ring(frame: &mut [u8], width: u32, height: u32, world: &ViewerWorld) {
    let Some(selected) = world.selected_agent() else {
        return;
    };
    let Some(visual) = world.roster().get(selected) else {
        return;
    };

    let (cx, cy) = world_to_screen_px(world.camera(), (width, height), visual.current);
    let radius = agent_radius_px(world.camera()) + SELECTION_RING_GAP_PX;
    draw_circle_outline(
        frame,
        width,
        height,
        cx,
        cy,
        radius,
        SELECTION_RING_THICKNESS_PX,
        SELECTION_RING_COLOR,
    );
}

fn draw_thought_bubbles(frame: &mut [u8], width: u32, height: u32, world: &ViewerWorld) {
    if world.thoughts().is_empty() {
        return;
    }

    let mut bubbles: Vec<(&AgentId, &ThoughtBubble)> = world.thoughts().iter().collect();
    bubbles.sort_by(|left, right| left.0.cmp(right.0));

    for (agent_id, bubble) in bubbles {
        let Some(visual) = world.roster().get(agent_id) else {
            continue;
        };
        draw_bubble(
            frame,
            width,
            height,
            world.camera(),
            visual.current,
            &bubble.text,
        );
    }
}

/// Bubble placement is derived from the parent's current position every
/// frame; nothing about it is stored between frames.
fn draw_bubble(
    frame: &mut [u8],
    width: u32,
    height: u32,
    camera: &Camera2D,
    parent_world: Vec2,
    text: &str,
) {
    let anchor_world = Vec2 {
        x: parent_world.x,
        y: parent_world.y - BUBBLE_ANCHOR_LIFT_WORLD_PX,
    };
    let (anchor_x, anchor_y) = world_to_screen_px(camera, (width, height), anchor_world);

    let shown = truncate_bubble_text(text, BUBBLE_MAX_TEXT_CHARS);
    let panel_w = text_width_px(&shown, BUBBLE_TEXT_SCALE) + 2 * BUBBLE_PADDING_PX;
    let panel_h = text_height_px(BUBBLE_TEXT_SCALE) + 2 * BUBBLE_PADDING_PX;
    let left = anchor_x - panel_w / 2;
    let top = anchor_y - panel_h;

    draw_filled_rect(frame, width, height, left, top, panel_w, panel_h, BUBBLE_BG_COLOR);
    draw_rect_outline(
        frame,
        width,
        height,
        left,
        top,
        panel_w,
        panel_h,
        BUBBLE_BORDER_COLOR,
    );
    draw_text_scaled(
        frame,
        width,
        height,
        left + BUBBLE_PADDING_PX,
        top + BUBBLE_PADDING_PX,
        &shown,
        BUBBLE_TEXT_SCALE,
        BUBBLE_TEXT_COLOR,
    );
}

fn truncate_bubble_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep: String = text.chars().take(max_chars.saturating_sub(2)).collect();
    format!("{keep}..")
}

fn agent_radius_px(camera: &Camera2D) -> i32 {
    let radius = (AGENT_RADIUS_WORLD_PX * camera.effective_zoom()).round() as i32;
    radius.max(1)
}

fn write_pixel_rgba_clipped(frame: &mut [u8], width: usize, x: i32, y: i32, color: [u8; 4]) {
    if x < 0 || y < 0 {
        return;
    }
    let x = x as usize;
    let y = y as usize;
    let Some(pixel_offset) = y.checked_mul(width).and_then(|row| row.checked_add(x)) else {
        return;
    };
    let Some(byte_offset) = pixel_offset.checked_mul(4) else {
        return;
    };
    let Some(end) = byte_offset.checked_add(4) else {
        return;
    };
    if end > frame.len() {
        return;
    }
    frame[byte_offset..end].copy_from_slice(&color);
}

/// Half-open rect: fills `[left, right) x [top, bottom)` clipped to the
/// frame.
#[allow(clippy::too_many_arguments)]
fn fill_rect_clipped(
    frame: &mut [u8],
    width: u32,
    height: u32,
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
    color: [u8; 4],
) {
    let x0 = left.max(0);
    let y0 = top.max(0);
    let x1 = right.min(width as i32);
    let y1 = bottom.min(height as i32);

    for y in y0..y1 {
        for x in x0..x1 {
            write_pixel_rgba_clipped(frame, width as usize, x, y, color);
        }
    }
}

fn draw_filled_circle(
    frame: &mut [u8],
    width: u32,
    height: u32,
    cx: i32,
    cy: i32,
    radius: i32,
    color: [u8; 4],
) {
    let radius_sq = radius * radius;
    for y in (cy - radius)..=(cy + radius) {
        for x in (cx - radius)..=(cx + radius) {
            if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
                continue;
            }
            let dx = x - cx;
            let dy = y - cy;
            if dx * dx + dy * dy <= radius_sq {
                write_pixel_rgba_clipped(frame, width as usize, x, y, color);
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_circle_outline(
    frame: &mut [u8],
    width: u32,
    height: u32,
    cx: i32,
    cy: i32,
    radius: i32,
    thickness: i32,
    color: [u8; 4],
) {
    let outer = radius + thickness.max(1);
    let inner_sq = radius * radius;
    let outer_sq = outer * outer;
    for y in (cy - outer)..=(cy + outer) {
        for x in (cx - outer)..=(cx + outer) {
            if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
                continue;
            }
            let dx = x - cx;
            let dy = y - cy;
            let distance_sq = dx * dx + dy * dy;
            if distance_sq >= inner_sq && distance_sq <= outer_sq {
                write_pixel_rgba_clipped(frame, width as usize, x, y, color);
            }
        }
    }
}
