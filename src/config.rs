//! Runner configuration read from the environment.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `ONET_LEVEL` | 1 | Level preselected on the menu (1-based) |
//! | `ONET_THEME` | `symbols` | Theme id preselected on the menu |
//! | `ONET_SEED` | wall clock | Board RNG seed |
//! | `ONET_STATS_PATH` | `./onet_stats.json` | Stats file |
//! | `ONET_LOG_PATH` | unset | Log file; logging is off when unset |
//! | `ONET_LOG` | `info` | Log filter directives |
//!
//! Rule overrides (`ONET_MAX_TURNS`, `ONET_HINTS`, ...) are read by
//! [`crate::core::GameConfig::from_env`].

use std::path::PathBuf;

use crate::types::{LEVELS, THEMES};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// 0-based index into `LEVELS`.
    pub level_index: usize,
    /// 0-based index into `THEMES`.
    pub theme_index: usize,
    pub seed: Option<u64>,
    pub stats_path: PathBuf,
    pub log_path: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            level_index: 0,
            theme_index: 0,
            seed: None,
            stats_path: PathBuf::from("./onet_stats.json"),
            log_path: None,
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let level_index = get("ONET_LEVEL")
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|n| (1..=LEVELS.len()).contains(n))
            .map_or(defaults.level_index, |n| n - 1);
        let theme_index = get("ONET_THEME")
            .and_then(|id| THEMES.iter().position(|t| t.id.eq_ignore_ascii_case(&id)))
            .unwrap_or(defaults.theme_index);

        Self {
            level_index,
            theme_index,
            seed: get("ONET_SEED").and_then(|v| v.parse().ok()),
            stats_path: get("ONET_STATS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.stats_path),
            log_path: get("ONET_LOG_PATH").map(PathBuf::from),
            log_filter: get("ONET_LOG").unwrap_or(defaults.log_filter),
        }
    }
}
