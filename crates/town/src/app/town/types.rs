type ScenarioResult<T> = Result<T, String>;

/// On-disk town description. Residents carry only their fixed anchors; where
/// they eat and unwind is assigned from their position in the list so two
/// loads of the same file always produce the same town.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct ScenarioFile {
    version: u32,
    residents: Vec<ResidentSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct ResidentSpec {
    id: String,
    home: [i32; 2],
    workplace: [i32; 2],
}

/// A missing or broken scenario file downgrades to the built-in town with a
/// warning; startup never fails over scenario content.
fn load_scenario_or_default() -> ScenarioFile {
    let path = match resolve_scenario_path() {
        Ok(path) => path,
        Err(error) => {
            warn!(error = %error, "scenario_path_unresolved_using_builtin");
            return default_scenario();
        }
    };

    match read_scenario_file(&path) {
        Ok(scenario) => {
            info!(
                path = %path.display(),
                residents = scenario.residents.len(),
                "scenario_loaded"
            );
            scenario
        }
        Err(error) => {
            warn!(path = %path.display(), error = %error, "scenario_load_failed_using_builtin");
            default_scenario()
        }
    }
}

fn resolve_scenario_path() -> ScenarioResult<PathBuf> {
    if let Ok(raw) = std::env::var(SCENARIO_ENV_VAR) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return Ok(PathBuf::from(trimmed));
        }
    }

    let app_paths = resolve_app_paths().map_err(|error| format!("resolve app paths: {error}"))?;
    Ok(app_paths.scenario_dir.join(SCENARIO_FILE_NAME))
}

fn read_scenario_file(path: &Path) -> ScenarioResult<ScenarioFile> {
    let raw = fs::read_to_string(path)
        .map_err(|error| format!("read scenario '{}': {error}", path.display()))?;
    let scenario = parse_scenario_json(&raw)?;
    validate_scenario(&scenario)?;
    Ok(scenario)
}

fn parse_scenario_json(raw: &str) -> ScenarioResult<ScenarioFile> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    match serde_path_to_error::deserialize::<_, ScenarioFile>(&mut deserializer) {
        Ok(scenario) => Ok(scenario),
        Err(error) => {
            let path = error.path().to_string();
            let source = error.into_inner();
            if path.is_empty() || path == "." {
                Err(format!("parse scenario json: {source}"))
            } else {
                Err(format!("parse scenario json at {path}: {source}"))
            }
        }
    }
}

fn validation_err(path: &str, message: impl Into<String>) -> String {
    format!("validation failed at {path}: {}", message.into())
}

fn expected_actual(path: &str, expected: impl Display, actual: impl Display) -> String {
    validation_err(path, format!("expected {expected}, got {actual}"))
}

fn validate_scenario(scenario: &ScenarioFile) -> ScenarioResult<()> {
    if scenario.version != SCENARIO_VERSION {
        return Err(expected_actual(
            "version",
            SCENARIO_VERSION,
            scenario.version,
        ));
    }
    if scenario.residents.is_empty() {
        return Err(validation_err("residents", "scenario has no residents"));
    }

    let mut known_ids: HashMap<&str, usize> = HashMap::with_capacity(scenario.residents.len());
    for (index, resident) in scenario.residents.iter().enumerate() {
        let id_path = format!("residents[{index}].id");
        if resident.id.trim().is_empty() {
            return Err(validation_err(&id_path, "id must not be empty"));
        }
        if let Some(first_index) = known_ids.insert(resident.id.as_str(), index) {
            return Err(validation_err(
                &id_path,
                format!(
                    "duplicate id '{}' first used at residents[{first_index}]",
                    resident.id
                ),
            ));
        }
        if !tile_in_town_interior(resident.home) {
            return Err(validation_err(
                &format!("residents[{index}].home"),
                format!(
                    "tile [{}, {}] is outside the walkable town interior",
                    resident.home[0], resident.home[1]
                ),
            ));
        }
        if !tile_in_town_interior(resident.workplace) {
            return Err(validation_err(
                &format!("residents[{index}].workplace"),
                format!(
                    "tile [{}, {}] is outside the walkable town interior",
                    resident.workplace[0], resident.workplace[1]
                ),
            ));
        }
    }

    Ok(())
}

fn default_scenario() -> ScenarioFile {
    let residents = [
        ("ava", [1, 1], [6, 2]),
        ("ben", [2, 1], [11, 2]),
        ("cora", [3, 2], [7, 3]),
        ("dev", [1, 3], [12, 3]),
        ("eli", [2, 3], [8, 1]),
        ("fern", [4, 4], [13, 1]),
    ]
    .into_iter()
    .map(|(id, home, workplace)| ResidentSpec {
        id: id.to_string(),
        home,
        workplace,
    })
    .collect();

    ScenarioFile {
        version: SCENARIO_VERSION,
        residents,
    }
}
