/// District bands, north to south: a residential row, the two workplaces and
/// the park, a commercial strip through the middle, open floor below. A one
/// tile wall rings the whole map.
fn build_town_grid() -> WorldGrid {
    let mut cells = Vec::with_capacity((TOWN_WIDTH_TILES * TOWN_HEIGHT_TILES) as usize);
    for y in 0..TOWN_HEIGHT_TILES {
        for x in 0..TOWN_WIDTH_TILES {
            cells.push(district_for_tile(x, y));
        }
    }
    WorldGrid::new(TOWN_WIDTH_TILES, TOWN_HEIGHT_TILES, cells)
        .expect("static town grid shape is valid")
}

fn district_for_tile(x: u32, y: u32) -> TerrainKind {
    if x == 0 || y == 0 || x == TOWN_WIDTH_TILES - 1 || y == TOWN_HEIGHT_TILES - 1 {
        return TerrainKind::Wall;
    }
    if y < 5 {
        return if x < 5 {
            TerrainKind::Residential
        } else if x < 10 {
            TerrainKind::WorkplaceA
        } else if x < 15 {
            TerrainKind::WorkplaceB
        } else {
            TerrainKind::Park
        };
    }
    if y < 10 && (5..15).contains(&x) {
        return TerrainKind::Commercial;
    }
    TerrainKind::Floor
}

fn tile_in_town_interior(tile: [i32; 2]) -> bool {
    let [x, y] = tile;
    x >= 1 && y >= 1 && x <= TOWN_WIDTH_TILES as i32 - 2 && y <= TOWN_HEIGHT_TILES as i32 - 2
}

fn town_center_px() -> Vec2 {
    Vec2 {
        x: TOWN_WIDTH_TILES as f32 * TILE_SIZE_PX * 0.5,
        y: TOWN_HEIGHT_TILES as f32 * TILE_SIZE_PX * 0.5,
    }
}

/// Dinner seats fill the commercial strip row by row; the modulo keeps any
/// resident count inside the district.
fn diner_spot(index: usize) -> (i32, i32) {
    let column = (index % 10) as i32;
    let row = ((index / 10) % 5) as i32;
    (5 + column, 5 + row)
}

/// Evening spots fill the park the same way.
fn leisure_spot(index: usize) -> (i32, i32) {
    let column = (index % 4) as i32;
    let row = ((index / 4) % 4) as i32;
    (15 + column, 1 + row)
}

fn pan_delta(input: &InputSnapshot, fixed_dt_seconds: f32, speed: f32) -> Vec2 {
    let mut x = 0.0f32;
    let mut y = 0.0f32;

    if input.is_down(InputAction::PanRight) {
        x += 1.0;
    }
    if input.is_down(InputAction::PanLeft) {
        x -= 1.0;
    }
    if input.is_down(InputAction::PanDown) {
        y += 1.0;
    }
    if input.is_down(InputAction::PanUp) {
        y -= 1.0;
    }

    let len_sq = x * x + y * y;
    if len_sq > 0.0 {
        let inv_len = len_sq.sqrt().recip();
        x *= inv_len;
        y *= inv_len;
    }

    Vec2 {
        x: x * speed * fixed_dt_seconds,
        y: y * speed * fixed_dt_seconds,
    }
}

fn step_toward(
    current: Vec2,
    target: Vec2,
    speed: f32,
    fixed_dt_seconds: f32,
    arrival_threshold: f32,
) -> (Vec2, bool) {
    let dx = target.x - current.x;
    let dy = target.y - current.y;
    let distance_sq = dx * dx + dy * dy;
    let threshold_sq = arrival_threshold * arrival_threshold;
    if distance_sq <= threshold_sq {
        return (target, true);
    }

    let distance = distance_sq.sqrt();
    let max_step = speed * fixed_dt_seconds;
    if max_step >= distance {
        return (target, true);
    }

    let inv_distance = distance.recip();
    (
        Vec2 {
            x: current.x + dx * inv_distance * max_step,
            y: current.y + dy * inv_distance * max_step,
        },
        false,
    )
}
