//! CLI configuration read from the environment.
use std::env;
use std::path::PathBuf;

use combat_runtime::RuntimeConfig;

/// Settings for one headless encounter.
#[derive(Clone, Debug)]
pub struct CliConfig {
    pub map_width: u32,
    pub map_height: u32,
    /// Turn limit before the encounter is called a stalemate.
    pub max_turns: Option<u64>,
    pub command_buffer_size: usize,
    /// Directory for `combat.log`; logs go to stderr only when unset.
    pub log_dir: Option<PathBuf>,
    /// Let the built-in intent play the player side too.
    pub autopilot: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            map_width: 10,
            map_height: 8,
            max_turns: Some(300),
            command_buffer_size: 32,
            log_dir: None,
            autopilot: true,
        }
    }
}

impl CliConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `COMBAT_MAP_WIDTH` / `COMBAT_MAP_HEIGHT` - board size (min 6 x 4)
    /// - `COMBAT_MAX_TURNS` - turn limit, `0` for none (default: 300)
    /// - `COMBAT_COMMAND_BUFFER` - command channel capacity (default: 32)
    /// - `COMBAT_LOG_DIR` - directory for the log file
    /// - `COMBAT_AUTOPILOT` - `false` to read player commands from stdin
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(width) = read_env::<u32>("COMBAT_MAP_WIDTH") {
            config.map_width = width.max(6);
        }
        if let Some(height) = read_env::<u32>("COMBAT_MAP_HEIGHT") {
            config.map_height = height.max(4);
        }
        if let Some(max_turns) = read_env::<u64>("COMBAT_MAX_TURNS") {
            config.max_turns = (max_turns > 0).then_some(max_turns);
        }
        if let Some(size) = read_env::<usize>("COMBAT_COMMAND_BUFFER") {
            config.command_buffer_size = size.max(1);
        }
        if let Some(dir) = env::var_os("COMBAT_LOG_DIR") {
            config.log_dir = Some(PathBuf::from(dir));
        }
        if let Some(autopilot) = read_env::<bool>("COMBAT_AUTOPILOT") {
            config.autopilot = autopilot;
        }

        config
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            command_buffer_size: self.command_buffer_size,
            max_turns: self.max_turns,
            ..RuntimeConfig::default()
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
