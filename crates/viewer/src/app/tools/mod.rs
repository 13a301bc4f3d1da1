mod overlay;
mod perf_stats;

pub(crate) use overlay::{
    draw_filled_rect, draw_overlay, draw_rect_outline, draw_text_scaled, text_height_px,
    text_width_px, OverlayData,
};
pub(crate) use perf_stats::{PerfStats, PerfStatsSnapshot, RollingMsStats};
