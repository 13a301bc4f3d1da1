struct TownScene {
    feed: Box<dyn AgentFeed>,
    latest: Vec<AgentRecord>,
    thought_inbox: Vec<ThoughtPush>,
    sim_elapsed_seconds: f64,
    camera_glide_target: Option<Vec2>,
}

impl TownScene {
    fn new(feed: Box<dyn AgentFeed>) -> Self {
        Self {
            feed,
            latest: Vec::new(),
            thought_inbox: Vec::new(),
            sim_elapsed_seconds: 0.0,
            camera_glide_target: None,
        }
    }

    /// Scene time in milliseconds, accumulated from fixed ticks. Bubble
    /// timestamps come from here, never from the wall clock.
    fn now_ms(&self) -> u64 {
        (self.sim_elapsed_seconds * 1000.0) as u64
    }

    fn pump_thoughts(&mut self, now_ms: u64, world: &mut ViewerWorld) {
        self.thought_inbox.clear();
        self.feed.drain_thoughts(&mut self.thought_inbox);
        for push in &self.thought_inbox {
            world.push_thought(&push.agent_id, &push.text, now_ms);
        }
    }

    fn handle_selection(&mut self, input: &InputSnapshot, world: &mut ViewerWorld) {
        if !input.left_click_pressed() {
            return;
        }
        let Some(cursor) = input.cursor_position_px() else {
            return;
        };

        let world_px = screen_to_world_px(world.camera(), input.window_size(), cursor);
        let tile = world_px_to_tile(world_px);
        let hit = agent_at_tile(&self.latest, tile).cloned();
        match &hit {
            Some(agent_id) => {
                debug!(agent = %agent_id, tile_x = tile.0, tile_y = tile.1, "agent_clicked");
                self.camera_glide_target = Some(tile_center_px(tile.0, tile.1));
            }
            None => {
                debug!(tile_x = tile.0, tile_y = tile.1, "empty_tile_clicked");
                self.camera_glide_target = None;
            }
        }
        world.set_selected_agent(hit.clone());
        self.feed.push_selection(hit.as_ref());
    }

    fn handle_camera(
        &mut self,
        input: &InputSnapshot,
        fixed_dt_seconds: f32,
        world: &mut ViewerWorld,
    ) {
        let pan = pan_delta(input, fixed_dt_seconds, CAMERA_PAN_SPEED_PX_PER_SECOND);
        if pan.x != 0.0 || pan.y != 0.0 {
            // Manual panning always wins over an in-flight glide.
            self.camera_glide_target = None;
            let camera = world.camera_mut();
            camera.position.x += pan.x;
            camera.position.y += pan.y;
        } else if let Some(target) = self.camera_glide_target {
            let camera = world.camera_mut();
            let (position, arrived) = step_toward(
                camera.position,
                target,
                CAMERA_GLIDE_SPEED_PX_PER_SECOND,
                fixed_dt_seconds,
                CAMERA_GLIDE_ARRIVAL_THRESHOLD_PX,
            );
            camera.position = position;
            if arrived {
                self.camera_glide_target = None;
            }
        }

        let zoom_steps = input.zoom_delta_steps();
        if zoom_steps != 0 {
            world.camera_mut().apply_zoom_steps(zoom_steps);
        }
    }

    fn selected_detail(&self, world: &ViewerWorld) -> Option<String> {
        let selected = world.selected_agent()?;
        let record = self.latest.iter().find(|record| &record.id == selected)?;
        Some(format!(
            "{} {} @ {},{}",
            record.id, record.activity, record.x, record.y
        ))
    }
}
