use crate::app::{Camera2D, Vec2};

#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// World pixels to screen pixels, y increasing downward. The camera position
/// lands on the viewport center; zoom scales world offsets around it.
pub fn world_to_screen_px(camera: &Camera2D, window_size: (u32, u32), world: Vec2) -> (i32, i32) {
    let zoom = camera.effective_zoom();
    let x = (world.x - camera.position.x) * zoom + window_size.0 as f32 * 0.5;
    let y = (world.y - camera.position.y) * zoom + window_size.1 as f32 * 0.5;
    (x.round() as i32, y.round() as i32)
}

/// Inverse of `world_to_screen_px` up to rounding; used to turn a cursor
/// position back into a world coordinate.
pub fn screen_to_world_px(camera: &Camera2D, window_size: (u32, u32), screen: Vec2) -> Vec2 {
    let zoom = camera.effective_zoom();
    Vec2 {
        x: (screen.x - window_size.0 as f32 * 0.5) / zoom + camera.position.x,
        y: (screen.y - window_size.1 as f32 * 0.5) / zoom + camera.position.y,
    }
}
