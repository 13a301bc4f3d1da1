#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DayPhase {
    Morning,
    Work,
    Dinner,
    Leisure,
    Night,
}

fn phase_for_minutes(clock_minutes: u32) -> DayPhase {
    match clock_minutes / 60 {
        6..=8 => DayPhase::Morning,
        9..=16 => DayPhase::Work,
        17..=18 => DayPhase::Dinner,
        19..=21 => DayPhase::Leisure,
        _ => DayPhase::Night,
    }
}

fn weather_for_clock(clock_minutes: u32) -> WeatherKind {
    match (clock_minutes / WEATHER_CYCLE_MINUTES) % 3 {
        0 => WeatherKind::Sunny,
        1 => WeatherKind::Cloudy,
        _ => WeatherKind::Rainy,
    }
}

#[derive(Debug)]
struct Resident {
    id: AgentId,
    home: (i32, i32),
    workplace: (i32, i32),
    diner: (i32, i32),
    leisure: (i32, i32),
    tile: (i32, i32),
}

fn destination_for_phase(phase: DayPhase, resident: &Resident) -> (i32, i32) {
    match phase {
        DayPhase::Morning | DayPhase::Night => resident.home,
        DayPhase::Work => resident.workplace,
        DayPhase::Dinner => resident.diner,
        DayPhase::Leisure => resident.leisure,
    }
}

/// One tile per step, x axis before y. Residents walk an L shape instead of
/// cutting diagonals.
fn step_tile_toward(current: (i32, i32), target: (i32, i32)) -> (i32, i32) {
    if current.0 != target.0 {
        (current.0 + (target.0 - current.0).signum(), current.1)
    } else if current.1 != target.1 {
        (current.0, current.1 + (target.1 - current.1).signum())
    } else {
        current
    }
}

fn record_for_phase(phase: DayPhase, resident: &Resident) -> AgentRecord {
    let destination = destination_for_phase(phase, resident);
    let en_route = resident.tile != destination;
    let activity = if en_route {
        Activity::Moving
    } else {
        match phase {
            DayPhase::Morning => Activity::Idle,
            DayPhase::Work => Activity::Working,
            DayPhase::Dinner => Activity::Eating,
            DayPhase::Leisure => Activity::Resting,
            DayPhase::Night => Activity::Sleeping,
        }
    };

    AgentRecord {
        id: resident.id.clone(),
        x: resident.tile.0,
        y: resident.tile.1,
        activity,
        sleeping: phase == DayPhase::Night && !en_route,
    }
}

/// Deterministic stand-in for a live agent backend. It runs the town clock on
/// a fixed cadence, walks every resident through the same daily routine and
/// queues thought pushes at phase changes; the viewer cannot tell it apart
/// from a networked provider.
struct ScriptedTownFeed {
    residents: Vec<Resident>,
    clock_minutes: u32,
    step_accumulator: f32,
    phase: DayPhase,
    selected: Option<AgentId>,
    thought_outbox: Vec<ThoughtPush>,
    snapshot: Vec<AgentRecord>,
}

impl ScriptedTownFeed {
    fn new(scenario: ScenarioFile) -> Self {
        let residents: Vec<Resident> = scenario
            .residents
            .iter()
            .enumerate()
            .map(|(index, spec)| Resident {
                id: AgentId::from(spec.id.as_str()),
                home: (spec.home[0], spec.home[1]),
                workplace: (spec.workplace[0], spec.workplace[1]),
                diner: diner_spot(index),
                leisure: leisure_spot(index),
                tile: (spec.home[0], spec.home[1]),
            })
            .collect();

        let mut feed = Self {
            residents,
            clock_minutes: CLOCK_START_MINUTES,
            step_accumulator: 0.0,
            phase: phase_for_minutes(CLOCK_START_MINUTES),
            selected: None,
            thought_outbox: Vec::new(),
            snapshot: Vec::new(),
        };
        feed.rebuild_snapshot();
        feed
    }

    fn step_once(&mut self) {
        self.clock_minutes = (self.clock_minutes + MINUTES_PER_SIM_STEP) % MINUTES_PER_DAY;
        let phase = phase_for_minutes(self.clock_minutes);
        if phase != self.phase {
            self.phase = phase;
            self.announce_phase(phase);
            debug!(clock_minutes = self.clock_minutes, phase = ?phase, "day_phase_changed");
        }
        for index in 0..self.residents.len() {
            self.step_resident(index);
        }
    }

    fn announce_phase(&mut self, phase: DayPhase) {
        let text = match phase {
            DayPhase::Morning => "Another day in town",
            DayPhase::Work => "Off to work",
            DayPhase::Dinner => "Time for dinner",
            DayPhase::Leisure => "Heading out to relax",
            DayPhase::Night => THOUGHT_PLACEHOLDER_TEXT,
        };
        for resident in &self.residents {
            self.thought_outbox.push(ThoughtPush {
                agent_id: resident.id.clone(),
                text: text.to_string(),
            });
        }
    }

    fn step_resident(&mut self, index: usize) {
        let phase = self.phase;
        let destination = destination_for_phase(phase, &self.residents[index]);
        let resident = &mut self.residents[index];
        if resident.tile == destination {
            return;
        }

        resident.tile = step_tile_toward(resident.tile, destination);
        if resident.tile == destination && phase == DayPhase::Work {
            let agent_id = resident.id.clone();
            self.thought_outbox.push(ThoughtPush {
                agent_id,
                text: "Made it to work".to_string(),
            });
        }
    }

    fn rebuild_snapshot(&mut self) {
        let phase = self.phase;
        self.snapshot = self
            .residents
            .iter()
            .map(|resident| record_for_phase(phase, resident))
            .collect();
    }
}

impl AgentFeed for ScriptedTownFeed {
    fn advance(&mut self, dt_seconds: f32) {
        self.step_accumulator += dt_seconds;
        let mut stepped = false;
        while self.step_accumulator >= SIM_STEP_SECONDS {
            self.step_accumulator -= SIM_STEP_SECONDS;
            self.step_once();
            stepped = true;
        }
        if stepped {
            self.rebuild_snapshot();
        }
    }

    fn current_agents(&self) -> &[AgentRecord] {
        &self.snapshot
    }

    fn drain_thoughts(&mut self, out: &mut Vec<ThoughtPush>) {
        out.append(&mut self.thought_outbox);
    }

    fn push_selection(&mut self, selection: Option<&AgentId>) {
        if self.selected.as_ref() == selection {
            return;
        }
        match selection {
            Some(agent_id) => {
                info!(agent = %agent_id, "selection_changed");
                self.thought_outbox.push(ThoughtPush {
                    agent_id: agent_id.clone(),
                    text: "Oh, hello there".to_string(),
                });
            }
            None => info!("selection_cleared"),
        }
        self.selected = selection.cloned();
    }

    fn status(&self) -> FeedStatus {
        FeedStatus {
            hour: self.clock_minutes / 60,
            minute: self.clock_minutes % 60,
            weather: weather_for_clock(self.clock_minutes),
            active_agents: self.residents.len(),
        }
    }
}
