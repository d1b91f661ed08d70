//! Driftwatch engine binary.
//!
//! This is the main entry point that wires together the movement
//! simulation, wander alerting, category clustering, and viewport sync.
//! It loads configuration, spawns the seed roster, and runs the tick
//! loop until teardown (Ctrl-C) or the configured tick limit.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `driftwatch-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Spawn the seed roster
//! 4. Create loop control and hook Ctrl-C to teardown
//! 5. Assemble the tick callback (clusters + viewport tracker)
//! 6. Run the simulation loop
//! 7. Log the result

mod callback;
mod error;
mod spawner;
mod surface;

use std::path::Path;
use std::sync::Arc;

use driftwatch_sim::runner::{self, LoopControl};
use driftwatch_sim::tick::{SimulationState, TickParams};
use driftwatch_sim::{DEFAULT_CONFIG_PATH, SimulationConfig};
use driftwatch_viewport::{ViewportTracker, ZoomLimits};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::callback::DashboardCallback;
use crate::error::EngineError;
use crate::surface::{FixedSurfaceSize, LogMapSurface, TracingAlertSink};

/// Application entry point for the Driftwatch engine.
///
/// Initializes all subsystems and runs the simulation loop.
///
/// # Errors
///
/// Returns an error if any initialization step or the simulation itself
/// fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration (before logging, so the level can come from it).
    let config = load_config()?;

    // 2. Initialize structured logging. RUST_LOG overrides the config level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!(
        world_name = config.world.name,
        seed = config.world.seed,
        tick_interval_ms = config.world.tick_interval_ms,
        max_ticks = config.simulation.max_ticks,
        "Configuration loaded"
    );

    // 3. Spawn the seed roster.
    let spawn_result = spawner::spawn_roster(&config.roster);
    info!(
        points = spawn_result.points.len(),
        mobile = spawn_result.mobile,
        at_risk = spawn_result.at_risk,
        "Seed roster spawned"
    );

    // 4. Create loop control and hook Ctrl-C to teardown.
    let control = Arc::new(LoopControl::new(
        config.world.tick_interval_ms,
        config.simulation.max_ticks,
    ));
    {
        let teardown = Arc::clone(&control);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Ctrl-C received, requesting teardown");
                teardown.request_stop();
            }
        });
    }

    // 5. Assemble the tick callback: clusters + viewport tracker against
    //    the headless surface.
    let tracker = ViewportTracker::new(
        FixedSurfaceSize::new(config.viewport.surface_width, config.viewport.surface_height),
        ZoomLimits::new(config.viewport.min_zoom, config.viewport.max_zoom),
        config.viewport.padding_px,
    );
    let mut tick_callback = DashboardCallback::new(tracker, LogMapSurface::new());

    // 6. Assemble simulation state and run.
    let mut state = SimulationState::new(spawn_result.points);
    let params = TickParams::from_config(&config);
    let mut rng = SmallRng::seed_from_u64(config.world.seed);
    let mut sink = TracingAlertSink::new();

    info!("Simulation state assembled, entering tick loop");

    let result = runner::run_simulation(
        &mut state,
        &params,
        &mut rng,
        &mut sink,
        &control,
        &mut tick_callback,
    )
    .await
    .map_err(EngineError::from)?;

    // 7. Log results.
    runner::log_simulation_end(&result);

    info!(
        end_reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        "driftwatch-engine shutdown complete"
    );

    Ok(())
}

/// Load the simulation configuration.
///
/// The path defaults to `driftwatch-config.yaml` in the working
/// directory and can be overridden with the `DRIFTWATCH_CONFIG`
/// environment variable. A missing file is not an error: defaults cover
/// everything, including the seed roster.
fn load_config() -> Result<SimulationConfig, EngineError> {
    let path = std::env::var("DRIFTWATCH_CONFIG")
        .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_owned());
    let config_path = Path::new(&path);
    if config_path.exists() {
        Ok(SimulationConfig::from_file(config_path)?)
    } else {
        Ok(SimulationConfig::default())
    }
}
