//! Simulator configuration loaded from the environment.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Settings for a headless simulation run.
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// Directory holding `config.toml`, `abilities.ron`, `loadout.ron` and
    /// `encounters/`. `None` uses the embedded content.
    pub data_dir: Option<PathBuf>,
    /// Encounter file stem, only used with `data_dir`.
    pub encounter: String,
    pub seed: Option<u64>,
    pub frame: Duration,
    /// Sleep between frames instead of running as fast as possible.
    pub realtime: bool,
    pub max_frames: u32,
    /// Distance the autopilot walks at the start of each turn.
    pub approach_distance: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            encounter: "goblin_camp".to_string(),
            seed: None,
            frame: Duration::from_millis(16),
            realtime: false,
            max_frames: 20_000,
            approach_distance: 4.0,
        }
    }
}

impl SimConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `TACTICS_DATA_DIR` - Content directory (default: embedded content)
    /// - `TACTICS_ENCOUNTER` - Encounter to fight (default: goblin_camp)
    /// - `TACTICS_SEED` - Coin-flip RNG seed (default: OS entropy)
    /// - `TACTICS_FRAME_MS` - Frame length in milliseconds (default: 16)
    /// - `TACTICS_REALTIME` - Pace frames in wall-clock time (default: false)
    /// - `TACTICS_MAX_FRAMES` - Safety stop for the frame loop (default: 20000)
    /// - `TACTICS_APPROACH` - Movement per turn (default: 4.0)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("TACTICS_DATA_DIR") {
            config.data_dir = Some(PathBuf::from(dir));
        }
        if let Ok(encounter) = env::var("TACTICS_ENCOUNTER") {
            config.encounter = encounter;
        }
        config.seed = read_env::<u64>("TACTICS_SEED");
        if let Some(ms) = read_env::<u64>("TACTICS_FRAME_MS") {
            config.frame = Duration::from_millis(ms.max(1));
        }
        if let Some(realtime) = read_env_bool("TACTICS_REALTIME") {
            config.realtime = realtime;
        }
        if let Some(frames) = read_env::<u32>("TACTICS_MAX_FRAMES") {
            config.max_frames = frames.max(1);
        }
        if let Some(distance) = read_env::<f32>("TACTICS_APPROACH") {
            config.approach_distance = distance.max(0.0);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    match env::var(key).ok()?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
