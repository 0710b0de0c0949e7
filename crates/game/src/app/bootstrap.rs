use handheld_engine::{ControlSurface, KeyBindings, LoopConfig, Scene};
use tracing::info;
use tracing_subscriber::EnvFilter;

use super::chrome::{self, BUFFER_HEIGHT, BUFFER_WIDTH};
use super::config::{self, ConfigError};
use super::games;
use super::shell::Shell;

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) bindings: KeyBindings,
    pub(crate) controls: ControlSurface,
    pub(crate) root: Box<dyn Scene>,
}

pub(crate) fn build_app() -> Result<AppWiring, ConfigError> {
    init_tracing();
    info!("=== Handheld Startup ===");

    let settings = config::settings_from_env()?;

    let mut bindings = KeyBindings::standard();
    config::apply_bindings(&settings, &mut bindings);

    let mut loop_config = LoopConfig {
        window_title: "Handheld".to_string(),
        buffer_width: BUFFER_WIDTH,
        buffer_height: BUFFER_HEIGHT,
        window_width: BUFFER_WIDTH * 2,
        window_height: BUFFER_HEIGHT * 2,
        ..LoopConfig::default()
    };
    config::apply_loop_config(&settings, &mut loop_config);

    let seed = settings.seed.unwrap_or_else(rand::random);
    info!(seed, "rng_seeded");

    let controls = chrome::build_control_surface();
    let root = Shell::new(games::build_library(seed), controls.clone());

    Ok(AppWiring {
        config: loop_config,
        bindings,
        controls,
        root: Box::new(root),
    })
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
