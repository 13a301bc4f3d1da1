use std::time::Duration;

pub(crate) const PERF_WINDOW_LEN: usize = 120;
const PERF_STATS_ENABLED_BY_DEFAULT: bool = true;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct RollingMsStats {
    pub last_ms: f32,
    pub avg_ms: f32,
    pub max_ms: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct PerfStatsSnapshot {
    pub tick: RollingMsStats,
    pub draw: RollingMsStats,
}

/// Rolling per-frame costs of the two loop phases: scene tick and frame
/// draw.
#[derive(Debug, Default)]
pub(crate) struct PerfStats {
    tick: RollingWindowMs,
    draw: RollingWindowMs,
}

impl PerfStats {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn enabled_by_default() -> bool {
        PERF_STATS_ENABLED_BY_DEFAULT
    }

    pub(crate) fn record_frame(&mut self, tick_duration: Duration, draw_duration: Duration) {
        self.tick.push_ms(duration_to_ms(tick_duration));
        self.draw.push_ms(duration_to_ms(draw_duration));
    }

    pub(crate) fn snapshot(&self) -> PerfStatsSnapshot {
        PerfStatsSnapshot {
            tick: self.tick.snapshot(),
            draw: self.draw.snapshot(),
        }
    }
}

#[derive(Debug)]
struct RollingWindowMs {
    samples_ms: [f32; PERF_WINDOW_LEN],
    head: usize,
    count: usize,
    sum_ms: f32,
    last_ms: f32,
}

impl Default for RollingWindowMs {
    fn default() -> Self {
        Self {
            samples_ms: [0.0; PERF_WINDOW_LEN],
            head: 0,
            count: 0,
            sum_ms: 0.0,
            last_ms: 0.0,
        }
    }
}

impl RollingWindowMs {
    fn push_ms(&mut self, value_ms: f32) {
        self.last_ms = value_ms;

        if self.count < PERF_WINDOW_LEN {
            self.samples_ms[self.head] = value_ms;
            self.head = (self.head + 1) % PERF_WINDOW_LEN;
            self.count += 1;
            self.sum_ms += value_ms;
            return;
        }

        let evicted = self.samples_ms[self.head];
        self.samples_ms[self.head] = value_ms;
        self.head = (self.head + 1) % PERF_WINDOW_LEN;
        self.sum_ms += value_ms - evicted;
    }

    fn snapshot(&self) -> RollingMsStats {
        if self.count == 0 {
            return RollingMsStats::default();
        }

        let mut max_ms = self.samples_ms[0];
        for index in 1..self.count {
            let candidate = self.samples_ms[index];
            if candidate > max_ms {
                max_ms = candidate;
            }
        }

        RollingMsStats {
            last_ms: self.last_ms,
            avg_ms: self.sum_ms / self.count as f32,
            max_ms,
        }
    }
}

fn duration_to_ms(duration: Duration) -> f32 {
    duration.as_secs_f32() * 1000.0
}
