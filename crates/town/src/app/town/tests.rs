    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use viewer::DisplayTag;

    const WINDOW: (u32, u32) = (960, 720);

    fn record(id: &str, x: i32, y: i32) -> AgentRecord {
        AgentRecord {
            id: AgentId::from(id),
            x,
            y,
            activity: Activity::Idle,
            sleeping: false,
        }
    }

    fn spec(id: &str, home: [i32; 2], workplace: [i32; 2]) -> ResidentSpec {
        ResidentSpec {
            id: id.to_string(),
            home,
            workplace,
        }
    }

    fn district_at(tile: [i32; 2]) -> TerrainKind {
        district_for_tile(tile[0] as u32, tile[1] as u32)
    }

    struct StubHandles {
        records: Rc<RefCell<Vec<AgentRecord>>>,
        thoughts: Rc<RefCell<Vec<ThoughtPush>>>,
        selections: Rc<RefCell<Vec<Option<AgentId>>>>,
    }

    struct StubFeed {
        shared_records: Rc<RefCell<Vec<AgentRecord>>>,
        shared_thoughts: Rc<RefCell<Vec<ThoughtPush>>>,
        selections: Rc<RefCell<Vec<Option<AgentId>>>>,
        stub_status: FeedStatus,
        snapshot: Vec<AgentRecord>,
    }

    impl AgentFeed for StubFeed {
        fn advance(&mut self, _dt_seconds: f32) {
            self.snapshot = self.shared_records.borrow().clone();
        }

        fn current_agents(&self) -> &[AgentRecord] {
            &self.snapshot
        }

        fn drain_thoughts(&mut self, out: &mut Vec<ThoughtPush>) {
            let mut queued = self.shared_thoughts.borrow_mut();
            out.append(&mut queued);
        }

        fn push_selection(&mut self, selection: Option<&AgentId>) {
            self.selections.borrow_mut().push(selection.cloned());
        }

        fn status(&self) -> FeedStatus {
            self.stub_status
        }
    }

    fn stub_feed(initial: Vec<AgentRecord>) -> (Box<dyn AgentFeed>, StubHandles) {
        let records = Rc::new(RefCell::new(initial.clone()));
        let thoughts = Rc::new(RefCell::new(Vec::new()));
        let selections = Rc::new(RefCell::new(Vec::new()));
        let feed = StubFeed {
            shared_records: Rc::clone(&records),
            shared_thoughts: Rc::clone(&thoughts),
            selections: Rc::clone(&selections),
            stub_status: FeedStatus {
                hour: 8,
                minute: 5,
                weather: WeatherKind::Sunny,
                active_agents: initial.len(),
            },
            snapshot: initial,
        };

        (
            Box::new(feed),
            StubHandles {
                records,
                thoughts,
                selections,
            },
        )
    }

    fn loaded_scene(initial: Vec<AgentRecord>) -> (TownScene, ViewerWorld, StubHandles) {
        let (feed, handles) = stub_feed(initial);
        let mut scene = TownScene::new(feed);
        let mut world = ViewerWorld::default();
        scene.load(&mut world);
        (scene, world, handles)
    }

    fn idle_input() -> InputSnapshot {
        InputSnapshot::empty().with_window_size(WINDOW)
    }

    fn click_at(x: f32, y: f32) -> InputSnapshot {
        idle_input()
            .with_cursor_position_px(Some(Vec2 { x, y }))
            .with_left_click_pressed(true)
    }

    #[test]
    fn town_grid_is_walled_and_districted() {
        let grid = build_town_grid();

        assert_eq!(grid.width(), 20);
        assert_eq!(grid.height(), 20);
        for corner in [(0, 0), (19, 0), (0, 19), (19, 19)] {
            assert_eq!(grid.terrain_at(corner.0, corner.1), Some(TerrainKind::Wall));
        }
        assert_eq!(grid.terrain_at(2, 2), Some(TerrainKind::Residential));
        assert_eq!(grid.terrain_at(6, 2), Some(TerrainKind::WorkplaceA));
        assert_eq!(grid.terrain_at(11, 2), Some(TerrainKind::WorkplaceB));
        assert_eq!(grid.terrain_at(16, 2), Some(TerrainKind::Park));
        assert_eq!(grid.terrain_at(7, 7), Some(TerrainKind::Commercial));
        assert_eq!(grid.terrain_at(2, 7), Some(TerrainKind::Floor));
        assert_eq!(grid.terrain_at(10, 15), Some(TerrainKind::Floor));
    }

    #[test]
    fn interior_check_rejects_border_and_outside_tiles() {
        assert!(tile_in_town_interior([1, 1]));
        assert!(tile_in_town_interior([18, 18]));
        assert!(!tile_in_town_interior([0, 5]));
        assert!(!tile_in_town_interior([5, 0]));
        assert!(!tile_in_town_interior([19, 5]));
        assert!(!tile_in_town_interior([-1, 3]));
    }

    #[test]
    fn diner_and_leisure_spots_stay_inside_their_districts() {
        for index in 0..25 {
            let diner = diner_spot(index);
            let leisure = leisure_spot(index);
            assert_eq!(district_at([diner.0, diner.1]), TerrainKind::Commercial);
            assert_eq!(district_at([leisure.0, leisure.1]), TerrainKind::Park);
        }
    }

    #[test]
    fn pan_delta_normalizes_diagonals() {
        let diagonal = idle_input()
            .with_action_down(InputAction::PanRight, true)
            .with_action_down(InputAction::PanDown, true);
        let pan = pan_delta(&diagonal, 1.0, 240.0);
        assert!((pan.x - 169.7056).abs() < 1e-2);
        assert_eq!(pan.x, pan.y);

        let single = idle_input().with_action_down(InputAction::PanLeft, true);
        let pan = pan_delta(&single, 0.5, 240.0);
        assert_eq!(pan.x, -120.0);
        assert_eq!(pan.y, 0.0);
    }

    #[test]
    fn step_toward_clamps_and_snaps_on_arrival() {
        let start = Vec2 { x: 0.0, y: 0.0 };

        let (position, arrived) = step_toward(start, Vec2 { x: 100.0, y: 0.0 }, 10.0, 1.0, 2.0);
        assert!(!arrived);
        assert!((position.x - 10.0).abs() < 1e-4);

        let (position, arrived) = step_toward(start, Vec2 { x: 10.0, y: 0.0 }, 100.0, 0.2, 2.0);
        assert!(arrived);
        assert_eq!(position, Vec2 { x: 10.0, y: 0.0 });

        let near = Vec2 { x: 9.9, y: 0.0 };
        let (position, arrived) = step_toward(near, Vec2 { x: 10.0, y: 0.0 }, 100.0, 0.0, 2.0);
        assert!(arrived);
        assert_eq!(position.x, 10.0);
    }

    #[test]
    fn default_scenario_is_valid_and_fills_districts() {
        let scenario = default_scenario();

        assert!(validate_scenario(&scenario).is_ok());
        assert_eq!(scenario.residents.len(), 6);
        for resident in &scenario.residents {
            assert_eq!(district_at(resident.home), TerrainKind::Residential);
            assert!(matches!(
                district_at(resident.workplace),
                TerrainKind::WorkplaceA | TerrainKind::WorkplaceB
            ));
        }
    }

    #[test]
    fn scenario_file_loads_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("town.json");
        fs::write(
            &path,
            r#"{
                "version": 1,
                "residents": [
                    { "id": "ava", "home": [1, 1], "workplace": [6, 2] },
                    { "id": "ben", "home": [2, 1], "workplace": [11, 2] }
                ]
            }"#,
        )
        .expect("write scenario");

        let scenario = read_scenario_file(&path).expect("scenario loads");

        assert_eq!(scenario.version, 1);
        assert_eq!(scenario.residents.len(), 2);
        assert_eq!(scenario.residents[0], spec("ava", [1, 1], [6, 2]));
    }

    #[test]
    fn scenario_with_wrong_version_is_rejected() {
        let scenario = ScenarioFile {
            version: 9,
            residents: vec![spec("ava", [1, 1], [6, 2])],
        };
        let error = validate_scenario(&scenario).expect_err("version must be rejected");
        assert!(error.contains("version"));
    }

    #[test]
    fn scenario_with_duplicate_ids_is_rejected() {
        let scenario = ScenarioFile {
            version: SCENARIO_VERSION,
            residents: vec![spec("ava", [1, 1], [6, 2]), spec("ava", [2, 1], [7, 2])],
        };
        let error = validate_scenario(&scenario).expect_err("duplicate must be rejected");
        assert!(error.contains("duplicate id 'ava'"));
        assert!(error.contains("residents[1].id"));
    }

    #[test]
    fn scenario_without_residents_is_rejected() {
        let scenario = ScenarioFile {
            version: SCENARIO_VERSION,
            residents: Vec::new(),
        };
        let error = validate_scenario(&scenario).expect_err("empty scenario must be rejected");
        assert!(error.contains("no residents"));
    }

    #[test]
    fn scenario_with_out_of_bounds_home_is_rejected() {
        let scenario = ScenarioFile {
            version: SCENARIO_VERSION,
            residents: vec![spec("ava", [0, 5], [6, 2])],
        };
        let error = validate_scenario(&scenario).expect_err("wall tile must be rejected");
        assert!(error.contains("residents[0].home"));
        assert!(error.contains("outside the walkable"));
    }

    #[test]
    fn malformed_scenario_json_reports_the_failing_path() {
        let raw = r#"{
            "version": 1,
            "residents": [
                { "id": "ava", "home": [1, "x"], "workplace": [6, 2] }
            ]
        }"#;

        let error = parse_scenario_json(raw).expect_err("type error must surface");

        assert!(error.contains("parse scenario json"));
        assert!(error.contains("residents[0]"));
    }

    #[test]
    fn missing_scenario_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("does_not_exist.json");

        let error = read_scenario_file(&path).expect_err("missing file must fail");

        assert!(error.contains("read scenario"));
    }

    #[test]
    fn phase_schedule_matches_the_daily_routine() {
        assert_eq!(phase_for_minutes(0), DayPhase::Night);
        assert_eq!(phase_for_minutes(359), DayPhase::Night);
        assert_eq!(phase_for_minutes(360), DayPhase::Morning);
        assert_eq!(phase_for_minutes(539), DayPhase::Morning);
        assert_eq!(phase_for_minutes(540), DayPhase::Work);
        assert_eq!(phase_for_minutes(1019), DayPhase::Work);
        assert_eq!(phase_for_minutes(1020), DayPhase::Dinner);
        assert_eq!(phase_for_minutes(1139), DayPhase::Dinner);
        assert_eq!(phase_for_minutes(1140), DayPhase::Leisure);
        assert_eq!(phase_for_minutes(1319), DayPhase::Leisure);
        assert_eq!(phase_for_minutes(1320), DayPhase::Night);
    }

    #[test]
    fn weather_cycles_every_six_hours() {
        assert_eq!(weather_for_clock(0), WeatherKind::Sunny);
        assert_eq!(weather_for_clock(359), WeatherKind::Sunny);
        assert_eq!(weather_for_clock(360), WeatherKind::Cloudy);
        assert_eq!(weather_for_clock(719), WeatherKind::Cloudy);
        assert_eq!(weather_for_clock(720), WeatherKind::Rainy);
        assert_eq!(weather_for_clock(1079), WeatherKind::Rainy);
        assert_eq!(weather_for_clock(1080), WeatherKind::Sunny);
    }

    #[test]
    fn step_tile_toward_walks_x_axis_first() {
        assert_eq!(step_tile_toward((1, 1), (3, 4)), (2, 1));
        assert_eq!(step_tile_toward((3, 2), (3, 4)), (3, 3));
        assert_eq!(step_tile_toward((3, 4), (3, 4)), (3, 4));
    }

    #[test]
    fn feed_starts_with_everyone_idle_at_home() {
        let scenario = default_scenario();
        let feed = ScriptedTownFeed::new(scenario.clone());

        let records = feed.current_agents();
        assert_eq!(records.len(), 6);
        for (record, spec) in records.iter().zip(&scenario.residents) {
            assert_eq!(record.id.as_str(), spec.id);
            assert_eq!([record.x, record.y], spec.home);
            assert_eq!(record.activity, Activity::Idle);
            assert!(!record.sleeping);
        }

        let status = feed.status();
        assert_eq!((status.hour, status.minute), (8, 0));
        assert_eq!(status.weather, WeatherKind::Cloudy);
        assert_eq!(status.active_agents, 6);
    }

    #[test]
    fn feed_steps_on_a_half_second_cadence() {
        let mut feed = ScriptedTownFeed::new(default_scenario());

        feed.advance(0.25);
        assert_eq!(feed.status().minute, 0);

        feed.advance(0.25);
        assert_eq!(feed.status().minute, 10);

        feed.advance(1.0);
        assert_eq!(feed.status().minute, 30);
    }

    #[test]
    fn clock_wraps_at_midnight() {
        let mut feed = ScriptedTownFeed::new(default_scenario());
        feed.clock_minutes = 23 * 60 + 50;

        feed.step_once();

        assert_eq!(feed.clock_minutes, 0);
        let status = feed.status();
        assert_eq!((status.hour, status.minute), (0, 0));
        assert_eq!(status.weather, WeatherKind::Sunny);
    }

    #[test]
    fn work_phase_announces_and_walks_residents_out() {
        let mut feed = ScriptedTownFeed::new(default_scenario());
        feed.clock_minutes = 8 * 60 + 50;

        feed.step_once();

        assert_eq!(feed.phase, DayPhase::Work);
        let mut out = Vec::new();
        feed.drain_thoughts(&mut out);
        assert_eq!(out.len(), 6);
        assert!(out.iter().all(|push| push.text == "Off to work"));
        assert_eq!(feed.residents[0].tile, (2, 1));
    }

    #[test]
    fn residents_arrive_at_work_and_say_so() {
        let mut feed = ScriptedTownFeed::new(default_scenario());
        feed.clock_minutes = 8 * 60 + 50;

        for _ in 0..7 {
            feed.step_once();
        }
        feed.rebuild_snapshot();

        let mut out = Vec::new();
        feed.drain_thoughts(&mut out);
        let arrivals: Vec<_> = out
            .iter()
            .filter(|push| push.text == "Made it to work")
            .collect();
        assert_eq!(arrivals.len(), 2);
        assert!(arrivals
            .iter()
            .any(|push| push.agent_id == AgentId::from("ava")));
        assert!(arrivals
            .iter()
            .any(|push| push.agent_id == AgentId::from("cora")));

        let records = feed.current_agents();
        let ava = records
            .iter()
            .find(|record| record.id.as_str() == "ava")
            .expect("ava record");
        assert_eq!((ava.x, ava.y), (6, 2));
        assert_eq!(ava.activity, Activity::Working);

        let ben = records
            .iter()
            .find(|record| record.id.as_str() == "ben")
            .expect("ben record");
        assert_eq!(ben.activity, Activity::Moving);
    }

    #[test]
    fn night_sends_the_placeholder_and_residents_sleep() {
        let mut feed = ScriptedTownFeed::new(default_scenario());
        feed.clock_minutes = 21 * 60 + 50;

        feed.step_once();
        feed.rebuild_snapshot();

        let mut out = Vec::new();
        feed.drain_thoughts(&mut out);
        assert_eq!(out.len(), 6);
        assert!(out.iter().all(|push| push.text == THOUGHT_PLACEHOLDER_TEXT));

        for record in feed.current_agents() {
            assert!(record.sleeping);
            assert_eq!(record.activity, Activity::Sleeping);
        }
    }

    #[test]
    fn selection_push_dedupes_and_reacts() {
        let mut feed = ScriptedTownFeed::new(default_scenario());
        let ava = AgentId::from("ava");

        feed.push_selection(Some(&ava));
        assert_eq!(feed.thought_outbox.len(), 1);
        assert_eq!(feed.thought_outbox[0].text, "Oh, hello there");

        feed.push_selection(Some(&ava));
        assert_eq!(feed.thought_outbox.len(), 1);

        feed.push_selection(None);
        assert_eq!(feed.selected, None);
        assert_eq!(feed.thought_outbox.len(), 1);

        feed.push_selection(Some(&ava));
        assert_eq!(feed.thought_outbox.len(), 2);
    }

    #[test]
    fn record_for_phase_reflects_travel_and_rest() {
        let mut resident = Resident {
            id: AgentId::from("ava"),
            home: (1, 1),
            workplace: (6, 2),
            diner: (5, 5),
            leisure: (15, 1),
            tile: (6, 2),
        };

        let at_work = record_for_phase(DayPhase::Work, &resident);
        assert_eq!(at_work.activity, Activity::Working);
        assert!(!at_work.sleeping);

        resident.tile = (3, 1);
        let en_route = record_for_phase(DayPhase::Work, &resident);
        assert_eq!(en_route.activity, Activity::Moving);

        resident.tile = resident.home;
        let asleep = record_for_phase(DayPhase::Night, &resident);
        assert_eq!(asleep.activity, Activity::Sleeping);
        assert!(asleep.sleeping);
    }

    #[test]
    fn load_builds_the_town_and_frames_the_camera() {
        let (_scene, world, _handles) = loaded_scene(vec![record("ava", 5, 5), record("ben", 6, 5)]);

        let grid = world.grid().expect("grid");
        assert_eq!((grid.width(), grid.height()), (20, 20));
        assert_eq!(world.camera().position, Vec2 { x: 320.0, y: 320.0 });
        assert!((world.camera().effective_zoom() - 1.5).abs() < 1e-4);

        assert_eq!(world.roster().len(), 2);
        let ava = world
            .roster()
            .get(&AgentId::from("ava"))
            .expect("ava visual");
        assert_eq!(ava.current, tile_center_px(5, 5));
        assert_eq!(ava.tag, DisplayTag::Idle);
    }

    #[test]
    fn quit_request_short_circuits_the_tick() {
        let (mut scene, mut world, _handles) = loaded_scene(vec![record("ava", 5, 5)]);

        let command = scene.update(0.5, &idle_input().with_quit_requested(true), &mut world);

        assert_eq!(command, SceneCommand::Exit);
        assert_eq!(scene.sim_elapsed_seconds, 0.0);
    }

    #[test]
    fn snapshot_changes_flow_through_reconcile() {
        let (mut scene, mut world, handles) = loaded_scene(vec![record("ava", 5, 5)]);

        handles.records.borrow_mut()[0] = record("ava", 6, 5);
        handles.records.borrow_mut().push(record("ben", 8, 5));

        let command = scene.update(0.5, &idle_input(), &mut world);
        assert_eq!(command, SceneCommand::None);

        assert_eq!(world.roster().len(), 2);
        let ava = world
            .roster()
            .get(&AgentId::from("ava"))
            .expect("ava visual");
        assert_eq!(ava.target, tile_center_px(6, 5));
        assert!((ava.current.x - 179.2).abs() < 1e-3);
        assert_eq!(ava.current.y, 176.0);

        let ben = world
            .roster()
            .get(&AgentId::from("ben"))
            .expect("ben visual");
        assert_eq!(ben.current, tile_center_px(8, 5));
    }

    #[test]
    fn dropping_an_agent_cascades_bubble_and_selection() {
        let (mut scene, mut world, handles) =
            loaded_scene(vec![record("ava", 5, 5), record("ben", 6, 5)]);
        let ben = AgentId::from("ben");

        handles.thoughts.borrow_mut().push(ThoughtPush {
            agent_id: ben.clone(),
            text: "I wonder what ava is doing".to_string(),
        });
        scene.update(0.5, &idle_input(), &mut world);
        assert!(world.thoughts().get(&ben).is_some());

        world.set_selected_agent(Some(ben.clone()));
        handles
            .records
            .borrow_mut()
            .retain(|record| record.id.as_str() == "ava");
        scene.update(0.5, &idle_input(), &mut world);

        assert_eq!(world.roster().len(), 1);
        assert!(world.thoughts().is_empty());
        assert_eq!(world.selected_agent(), None);
    }

    #[test]
    fn bubbles_expire_after_five_seconds_of_scene_time() {
        let (mut scene, mut world, handles) = loaded_scene(vec![record("ava", 5, 5)]);
        let ava = AgentId::from("ava");

        handles.thoughts.borrow_mut().push(ThoughtPush {
            agent_id: ava.clone(),
            text: "Nice weather today".to_string(),
        });

        for _ in 0..11 {
            scene.update(0.5, &idle_input(), &mut world);
        }
        assert!(world.thoughts().get(&ava).is_some());

        scene.update(0.5, &idle_input(), &mut world);
        assert!(world.thoughts().get(&ava).is_none());
    }

    #[test]
    fn thought_for_unknown_agent_is_dropped() {
        let (mut scene, mut world, handles) = loaded_scene(vec![record("ava", 5, 5)]);

        handles.thoughts.borrow_mut().push(ThoughtPush {
            agent_id: AgentId::from("ghost"),
            text: "Boo".to_string(),
        });
        scene.update(0.5, &idle_input(), &mut world);

        assert!(world.thoughts().is_empty());
    }

    #[test]
    fn clicking_an_agent_selects_and_glides() {
        let (mut scene, mut world, handles) = loaded_scene(vec![record("ava", 5, 5)]);

        scene.update(0.5, &click_at(264.0, 144.0), &mut world);

        assert_eq!(world.selected_agent(), Some(&AgentId::from("ava")));
        assert_eq!(
            handles.selections.borrow().as_slice(),
            &[Some(AgentId::from("ava"))]
        );
        // Close enough for a single glide step to land on the target.
        assert_eq!(world.camera().position, tile_center_px(5, 5));
        assert!(scene.camera_glide_target.is_none());
    }

    #[test]
    fn clicking_empty_ground_clears_selection() {
        let (mut scene, mut world, handles) = loaded_scene(vec![record("ava", 5, 5)]);

        scene.update(0.5, &click_at(264.0, 144.0), &mut world);
        assert_eq!(world.selected_agent(), Some(&AgentId::from("ava")));

        // Camera now sits on ava's tile; screen (720, 600) maps to tile (10, 10).
        scene.update(0.5, &click_at(720.0, 600.0), &mut world);

        assert_eq!(world.selected_agent(), None);
        assert_eq!(
            handles.selections.borrow().as_slice(),
            &[Some(AgentId::from("ava")), None]
        );
        assert!(scene.camera_glide_target.is_none());
    }

    #[test]
    fn clicks_beyond_the_town_edge_clear_the_selection() {
        let (mut scene, mut world, handles) = loaded_scene(vec![record("ava", 5, 5)]);
        world.camera_mut().set_zoom_clamped(0.5);

        scene.update(0.5, &click_at(408.0, 288.0), &mut world);
        assert_eq!(world.selected_agent(), Some(&AgentId::from("ava")));

        // Camera now sits on ava's tile; screen (0, 0) maps to tile (-25, -17).
        scene.update(0.5, &click_at(0.0, 0.0), &mut world);

        assert_eq!(world.selected_agent(), None);
        assert_eq!(
            handles.selections.borrow().as_slice(),
            &[Some(AgentId::from("ava")), None]
        );
        assert!(scene.camera_glide_target.is_none());
    }

    #[test]
    fn manual_pan_overrides_a_glide_in_flight() {
        let (mut scene, mut world, _handles) = loaded_scene(vec![record("ava", 1, 1)]);
        world.camera_mut().set_zoom_clamped(1.0);

        scene.update(0.5, &click_at(208.0, 88.0), &mut world);
        assert_eq!(world.selected_agent(), Some(&AgentId::from("ava")));
        assert!(scene.camera_glide_target.is_some());
        let mid_glide_x = world.camera().position.x;
        assert!(mid_glide_x < 320.0);

        let pan = idle_input().with_action_down(InputAction::PanRight, true);
        scene.update(0.5, &pan, &mut world);

        assert!(scene.camera_glide_target.is_none());
        assert!((world.camera().position.x - (mid_glide_x + 120.0)).abs() < 1e-3);
    }

    #[test]
    fn zoom_steps_apply_through_the_scene() {
        let (mut scene, mut world, _handles) = loaded_scene(vec![record("ava", 5, 5)]);

        scene.update(0.5, &idle_input().with_zoom_delta_steps(2), &mut world);
        assert!((world.camera().effective_zoom() - 1.7).abs() < 1e-4);

        scene.update(0.5, &idle_input().with_zoom_delta_steps(-20), &mut world);
        assert!((world.camera().effective_zoom() - 0.5).abs() < 1e-4);
    }

    #[test]
    fn hud_reports_clock_weather_and_selection() {
        let (scene, mut world, _handles) = loaded_scene(vec![record("ava", 5, 5)]);

        let hud = scene.hud_status(&world).expect("hud status");
        assert_eq!(hud.clock, "08:05");
        assert_eq!(hud.weather, "Sunny");
        assert_eq!(hud.active_agents, 1);
        assert_eq!(hud.selected_detail, None);

        world.set_selected_agent(Some(AgentId::from("ava")));
        let hud = scene.hud_status(&world).expect("hud status");
        assert_eq!(hud.selected_detail.as_deref(), Some("ava IDLE @ 5,5"));
    }

    #[test]
    fn window_title_tracks_clock_and_headcount() {
        let (scene, world, _handles) = loaded_scene(vec![record("ava", 5, 5)]);

        assert_eq!(
            scene.window_title(&world).as_deref(),
            Some("Agent Town | 08:05 | agents 1")
        );
    }

    #[test]
    fn unload_resets_scene_state() {
        let (mut scene, mut world, _handles) = loaded_scene(vec![record("ava", 5, 5)]);
        scene.update(0.5, &click_at(264.0, 144.0), &mut world);
        scene.update(0.5, &idle_input(), &mut world);

        scene.unload(&mut world);

        assert!(scene.latest.is_empty());
        assert!(scene.camera_glide_target.is_none());
        assert_eq!(scene.sim_elapsed_seconds, 0.0);
    }
