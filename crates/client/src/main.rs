//! Headless combat simulator.
//!
//! Loads content, builds a [`Session`] and drives it with a scripted
//! autopilot until the encounter ends. Combat and narration are reported
//! through `tracing`; set `RUST_LOG=debug` to see every combat event.
//!
//! # Examples
//!
//! ```bash
//! # Embedded content, fixed seed
//! TACTICS_SEED=7 cargo run -p tactics-client
//!
//! # Custom content directory, paced like a real frame loop
//! TACTICS_DATA_DIR=./data TACTICS_REALTIME=1 cargo run -p tactics-client
//! ```

mod autopilot;
mod config;

use anyhow::{Context, Result};
use tactics_content::{
    AbilityCatalog, AbilityLoader, ConfigLoader, ContentFactory, Encounter, EncounterLoader,
    Loadout, LoadoutLoader,
};
use tactics_core::CombatConfig;
use tactics_runtime::{RuntimeConfig, Session, Topic};
use tokio::sync::broadcast::error::RecvError;

use crate::autopilot::Autopilot;
use crate::config::SimConfig;

struct Content {
    config: CombatConfig,
    catalog: AbilityCatalog,
    loadout: Loadout,
    encounter: Encounter,
}

fn load_content(sim: &SimConfig) -> Result<Content> {
    match &sim.data_dir {
        Some(dir) => {
            tracing::info!("Loading content from {}", dir.display());
            let factory = ContentFactory::new(dir);
            Ok(Content {
                config: factory.load_config()?,
                catalog: factory.load_abilities()?,
                loadout: factory.load_loadout()?,
                encounter: factory.load_encounter(&sim.encounter)?,
            })
        }
        None => {
            tracing::info!("Using embedded content");
            Ok(Content {
                config: ConfigLoader::builtin()?,
                catalog: AbilityLoader::builtin()?,
                loadout: LoadoutLoader::builtin()?,
                encounter: EncounterLoader::builtin()?,
            })
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let sim = SimConfig::from_env();
    tracing::debug!("Simulator config: {:?}", sim);

    let content = load_content(&sim).context("failed to load content")?;
    tracing::info!(
        "Loaded {} abilities: {}",
        content.catalog.len(),
        content.catalog.names().collect::<Vec<_>>().join(", ")
    );

    let runtime_config = RuntimeConfig {
        combat: content.config,
        rng_seed: sim.seed,
        ..RuntimeConfig::default()
    };
    let mut session = Session::builder()
        .config(runtime_config)
        .loadout(&content.loadout, &content.catalog)?
        .build()?;

    let mut combat_rx = session.subscribe(Topic::Combat);
    let logger = tokio::spawn(async move {
        loop {
            match combat_rx.recv().await {
                Ok(event) => match event.to_json() {
                    Ok(json) => tracing::debug!(target: "combat", "{}", json),
                    Err(e) => tracing::warn!("Failed to encode combat event: {}", e),
                },
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Combat log fell behind, skipped {} events", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    session.begin_encounter(&content.encounter)?;

    let mut autopilot = Autopilot::new(sim.approach_distance);
    let mut interval = tokio::time::interval(sim.frame);
    let dt = sim.frame.as_secs_f32();
    let mut frames = 0;

    while session.encounter().is_some() {
        if sim.realtime {
            interval.tick().await;
        } else {
            tokio::task::yield_now().await;
        }

        session.tick(dt);
        if let Err(e) = autopilot.step(&mut session) {
            tracing::debug!("Autopilot input rejected: {} ({:?})", e, e.severity());
        }

        frames += 1;
        if frames >= sim.max_frames {
            tracing::warn!("Stopping after {} frames without a result", frames);
            break;
        }
    }

    let player = session.roster().player.unit();
    tracing::info!(
        "Simulation finished after {} frames ({} rounds): player at {}/{} health",
        frames,
        session.director().round(),
        player.current_health(),
        player.max_health()
    );

    drop(session);
    logger.await.context("combat logger task failed")?;
    Ok(())
}
