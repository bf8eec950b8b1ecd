//! Client configuration read from the environment.
//!
//! | Variable           | Default                     |
//! |--------------------|-----------------------------|
//! | `MAZE_CONTENT_DIR` | bundled sample content      |
//! | `MAZE_MAP`         | `tutorial`                  |
//! | `MAZE_TICKS`       | `100`                       |
//! | `MAZE_TICK_MS`     | `500`                       |
//! | `MAZE_DUMMY`       | value from `config.toml`    |
//! | `MAZE_EVENT_BUFFER`| `256`                       |

use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_CONTENT_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../game/content/data");

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub content_dir: PathBuf,
    pub map: String,
    pub ticks: u64,
    pub tick_period: Duration,
    /// Overrides the `dummy` flag of the content's world configuration.
    pub dummy: Option<bool>,
    pub event_buffer: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from(DEFAULT_CONTENT_DIR),
            map: "tutorial".to_owned(),
            ticks: 100,
            tick_period: Duration::from_millis(500),
            dummy: None,
            event_buffer: 256,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let parse = |key: &str| read(key).and_then(|value| value.trim().parse::<u64>().ok());

        let mut config = Self::default();

        if let Some(dir) = read("MAZE_CONTENT_DIR") {
            config.content_dir = PathBuf::from(dir);
        }
        if let Some(map) = read("MAZE_MAP") {
            config.map = map;
        }
        if let Some(ticks) = parse("MAZE_TICKS") {
            config.ticks = ticks;
        }
        if let Some(ms) = parse("MAZE_TICK_MS") {
            config.tick_period = Duration::from_millis(ms.max(1));
        }
        if let Some(capacity) = parse("MAZE_EVENT_BUFFER") {
            config.event_buffer = usize::try_from(capacity).unwrap_or(usize::MAX).max(1);
        }
        config.dummy = read("MAZE_DUMMY").map(|value| {
            matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            )
        });

        config
    }
}
