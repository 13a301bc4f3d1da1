use tracing::info;
use tracing_subscriber::EnvFilter;
use viewer::{LoopConfig, Scene};

use super::town;

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) scene: Box<dyn Scene>,
}

pub(crate) fn build_app() -> AppWiring {
    init_tracing();
    info!("=== Agent Town Startup ===");

    let scene = town::build_town_scene();
    let config = LoopConfig::default();

    AppWiring { config, scene }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}
