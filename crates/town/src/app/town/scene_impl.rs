impl Scene for TownScene {
    fn load(&mut self, world: &mut ViewerWorld) {
        world.set_grid(build_town_grid());

        let camera = world.camera_mut();
        camera.position = town_center_px();
        camera.set_zoom_clamped(CAMERA_START_ZOOM);

        self.latest.clear();
        self.latest.extend_from_slice(self.feed.current_agents());
        let summary = world.apply_snapshot(&self.latest);

        info!(
            width = TOWN_WIDTH_TILES,
            height = TOWN_HEIGHT_TILES,
            agents = summary.created,
            "town_built"
        );
    }

    fn update(
        &mut self,
        fixed_dt_seconds: f32,
        input: &InputSnapshot,
        world: &mut ViewerWorld,
    ) -> SceneCommand {
        if input.quit_requested() {
            return SceneCommand::Exit;
        }

        self.sim_elapsed_seconds += f64::from(fixed_dt_seconds);
        let now_ms = self.now_ms();

        self.feed.advance(fixed_dt_seconds);
        self.latest.clear();
        self.latest.extend_from_slice(self.feed.current_agents());

        let summary = world.apply_snapshot(&self.latest);
        if summary.created > 0 || summary.removed > 0 || summary.skipped > 0 {
            debug!(
                created = summary.created,
                updated = summary.updated,
                removed = summary.removed,
                skipped = summary.skipped,
                "roster_reconciled"
            );
        }

        self.pump_thoughts(now_ms, world);

        world.roster_mut().advance_motion();

        let expired = world.thoughts_mut().sweep_expired(now_ms, THOUGHT_TTL_MS);
        if expired > 0 {
            debug!(expired, "thoughts_expired");
        }

        self.handle_selection(input, world);
        self.handle_camera(input, fixed_dt_seconds, world);

        SceneCommand::None
    }

    fn unload(&mut self, _world: &mut ViewerWorld) {
        info!("town_scene_unloaded");
        self.latest.clear();
        self.thought_inbox.clear();
        self.camera_glide_target = None;
        self.sim_elapsed_seconds = 0.0;
    }

    fn hud_status(&self, world: &ViewerWorld) -> Option<HudStatus> {
        let status = self.feed.status();
        Some(HudStatus {
            clock: format!("{:02}:{:02}", status.hour, status.minute),
            weather: status.weather.as_str().to_string(),
            active_agents: status.active_agents,
            selected_detail: self.selected_detail(world),
        })
    }

    fn window_title(&self, world: &ViewerWorld) -> Option<String> {
        let status = self.feed.status();
        Some(format!(
            "Agent Town | {:02}:{:02} | agents {}",
            status.hour,
            status.minute,
            world.roster().len()
        ))
    }
}
