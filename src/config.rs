//! Process configuration, read from `COLOR_BLOCKS_*` environment variables

use anyhow::{Context, Result};

use crate::adapter::{parse_flag, ServerConfig};
use crate::core::{EngineConfig, Palette};
use crate::types::{Color, DEFAULT_GRID_SIZE, MIN_GRID_SIZE, MIN_PALETTE_SIZE};

#[derive(Debug, Clone)]
pub struct Config {
    pub engine: EngineConfig,
    pub server: ServerConfig,
    /// Skip the TCP adapter entirely
    pub adapter_disabled: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let grid_size: usize = match get("COLOR_BLOCKS_GRID_SIZE") {
            Some(s) => s
                .trim()
                .parse()
                .context("COLOR_BLOCKS_GRID_SIZE must be a number")?,
            None => DEFAULT_GRID_SIZE,
        };
        if grid_size < MIN_GRID_SIZE {
            anyhow::bail!("COLOR_BLOCKS_GRID_SIZE must be at least {MIN_GRID_SIZE}, got {grid_size}");
        }

        let palette_size: usize = match get("COLOR_BLOCKS_PALETTE_SIZE") {
            Some(s) => s
                .trim()
                .parse()
                .context("COLOR_BLOCKS_PALETTE_SIZE must be a number")?,
            None => Color::ALL.len(),
        };
        if !(MIN_PALETTE_SIZE..=Color::ALL.len()).contains(&palette_size) {
            anyhow::bail!(
                "COLOR_BLOCKS_PALETTE_SIZE must be between {} and {}, got {}",
                MIN_PALETTE_SIZE,
                Color::ALL.len(),
                palette_size
            );
        }
        let palette = Palette::first(palette_size).context("invalid palette")?;

        let seed: u32 = match get("COLOR_BLOCKS_SEED") {
            Some(s) => s
                .trim()
                .parse()
                .context("COLOR_BLOCKS_SEED must be a 32-bit unsigned number")?,
            None => rand::random(),
        };

        let settle_on_start = get("COLOR_BLOCKS_SETTLE_ON_START")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        let adapter_disabled = get("COLOR_BLOCKS_DISABLED")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        Ok(Self {
            engine: EngineConfig {
                grid_size,
                palette,
                seed,
                settle_on_start,
            },
            server: ServerConfig::from_lookup(get)?,
            adapter_disabled,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|k: &str| map.get(k).cloned())
    }

    #[test]
    fn defaults() {
        let c = config(&[("COLOR_BLOCKS_SEED", "5")]).unwrap();
        assert_eq!(c.engine.grid_size, 8);
        assert_eq!(c.engine.palette.len(), 6);
        assert_eq!(c.engine.seed, 5);
        assert!(!c.engine.settle_on_start);
        assert!(!c.adapter_disabled);
        assert_eq!(c.server.port, 7878);
    }

    #[test]
    fn overrides() {
        let c = config(&[
            ("COLOR_BLOCKS_GRID_SIZE", "10"),
            ("COLOR_BLOCKS_PALETTE_SIZE", "4"),
            ("COLOR_BLOCKS_SETTLE_ON_START", "true"),
            ("COLOR_BLOCKS_DISABLED", "1"),
            ("COLOR_BLOCKS_PORT", "0"),
        ])
        .unwrap();
        assert_eq!(c.engine.grid_size, 10);
        assert_eq!(
            c.engine.palette.colors(),
            &[Color::Red, Color::Green, Color::Blue, Color::Yellow]
        );
        assert!(c.engine.settle_on_start);
        assert!(c.adapter_disabled);
        assert_eq!(c.server.port, 0);
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(config(&[("COLOR_BLOCKS_GRID_SIZE", "2")]).is_err());
        assert!(config(&[("COLOR_BLOCKS_PALETTE_SIZE", "2")]).is_err());
        assert!(config(&[("COLOR_BLOCKS_PALETTE_SIZE", "7")]).is_err());
        assert!(config(&[("COLOR_BLOCKS_SEED", "-1")]).is_err());
    }
}
