use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use block_world_system_grid_view::GridConfig;
use serde::Deserialize;

/// Seed used when neither the config file nor the command line provides one.
pub(crate) const DEFAULT_SEED: u64 = 0x42f0_e1eb_d4a5_3c21;

/// Largest number of columns or rows in a generated world.
pub(crate) const MAX_WORLD_SIDE: u32 = 1024;

/// Settings read from the optional TOML file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    pub(crate) world: WorldConfig,
    pub(crate) view: ViewConfig,
}

/// Shape and seed of the generated demo world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct WorldConfig {
    pub(crate) columns: u32,
    pub(crate) rows: u32,
    pub(crate) seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            columns: 12,
            rows: 12,
            seed: DEFAULT_SEED,
        }
    }
}

/// Size of the visible grid window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct ViewConfig {
    pub(crate) columns: u32,
    pub(crate) rows: u32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            columns: 9,
            rows: 9,
        }
    }
}

impl Config {
    /// Reads and validates the TOML file at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid config at {}", path.display()))
    }

    /// Parses and validates TOML contents.
    pub(crate) fn parse(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).context("failed to parse config toml")?;
        config.validate()?;
        Ok(config)
    }

    /// Replaces world settings with the ones given on the command line.
    #[must_use]
    pub(crate) fn with_overrides(
        mut self,
        columns: Option<u32>,
        rows: Option<u32>,
        seed: Option<u64>,
    ) -> Self {
        if let Some(columns) = columns {
            self.world.columns = columns;
        }
        if let Some(rows) = rows {
            self.world.rows = rows;
        }
        if let Some(seed) = seed {
            self.world.seed = seed;
        }
        self
    }

    /// Rejects dimensions that cannot produce a world or a window.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.world.columns == 0 || self.world.rows == 0 {
            bail!(
                "world must have at least one tile, got {}x{}",
                self.world.columns,
                self.world.rows
            );
        }
        if self.world.columns > MAX_WORLD_SIDE || self.world.rows > MAX_WORLD_SIDE {
            bail!(
                "world sides are limited to {MAX_WORLD_SIDE} tiles, got {}x{}",
                self.world.columns,
                self.world.rows
            );
        }
        if self.view.columns == 0 || self.view.rows == 0 {
            bail!(
                "view must show at least one tile, got {}x{}",
                self.view.columns,
                self.view.rows
            );
        }
        if self.view.columns > GridConfig::MAX_SIDE || self.view.rows > GridConfig::MAX_SIDE {
            bail!(
                "view sides are limited to {} tiles, got {}x{}",
                GridConfig::MAX_SIDE,
                self.view.columns,
                self.view.rows
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = Config::parse(
            r#"
            [world]
            seed = 7

            [view]
            columns = 5
            "#,
        )
        .expect("config parses");

        assert_eq!(config.world.seed, 7);
        assert_eq!((config.world.columns, config.world.rows), (12, 12));
        assert_eq!((config.view.columns, config.view.rows), (5, 9));
    }

    #[test]
    fn empty_file_is_the_default_config() {
        assert_eq!(Config::parse("").expect("config parses"), Config::default());
    }

    #[test]
    fn command_line_overrides_win() {
        let config = Config::default().with_overrides(Some(4), None, Some(99));

        assert_eq!(config.world.columns, 4);
        assert_eq!(config.world.rows, 12);
        assert_eq!(config.world.seed, 99);
    }

    #[test]
    fn unknown_keys_and_empty_worlds_are_rejected() {
        assert!(Config::parse("[world]\nheight = 3\n").is_err());
        assert!(Config::parse("[world]\ncolumns = 0\n").is_err());
        assert!(Config::default()
            .with_overrides(None, Some(0), None)
            .validate()
            .is_err());
    }

    #[test]
    fn oversized_worlds_and_views_are_rejected() {
        let error = Config::parse("[view]\ncolumns = 4294967295\n").expect_err("view too wide");
        assert!(error.to_string().contains("view sides"), "unexpected error: {error}");

        let largest = format!("[view]\ncolumns = {}\nrows = 1\n", GridConfig::MAX_SIDE);
        assert!(Config::parse(&largest).is_ok(), "the limit itself is allowed");

        assert!(Config::default()
            .with_overrides(Some(MAX_WORLD_SIDE + 1), None, None)
            .validate()
            .is_err());
    }
}
