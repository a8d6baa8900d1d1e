use anyhow::Context;
use peyote_core::{BeadType, Color, Session, sample_collection};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Startup settings for the shell, read from `config.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Collection documents imported into the catalog at startup, in order.
    pub collections: Vec<PathBuf>,

    /// Seed the catalog with the small "Test set" collection.
    pub sample_collection: bool,

    /// Color of the default bead that marks empty cells.
    pub blank_color: Color,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            collections: Vec::new(),
            sample_collection: true,
            blank_color: peyote_core::bead::BLANK_COLOR,
        }
    }
}

impl CliConfig {
    /// `$PEYOTE_CONFIG`, else `<config dir>/openpeyote/config.json`.
    pub fn path() -> PathBuf {
        if let Some(path) = env::var_os("PEYOTE_CONFIG") {
            return PathBuf::from(path);
        }
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("openpeyote");
        path.push("config.json");
        path
    }

    /// Missing file means defaults; a file that does not parse is an error.
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::path();
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = fs::read_to_string(&path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let config = serde_json::from_str::<CliConfig>(&text)
            .with_context(|| format!("parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Build the session: default bead, then catalog collections.
    pub fn session(&self) -> anyhow::Result<Session> {
        let mut session = Session::with_default_bead(BeadType::blank_with_color(self.blank_color));

        if self.sample_collection {
            session.catalog.add_collection(sample_collection());
        }
        for path in &self.collections {
            let count = session
                .import_collection(path)
                .with_context(|| format!("import collection {}", path.display()))?;
            log::info!("imported {count} bead types from {}", path.display());
        }

        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() -> anyhow::Result<()> {
        let config: CliConfig = serde_json::from_str(r##"{ "blank_color": "#ffffff" }"##)?;
        assert!(config.sample_collection);
        assert!(config.collections.is_empty());
        assert_eq!(config.blank_color, Color::rgb(255, 255, 255));
        Ok(())
    }

    #[test]
    fn bad_color_is_rejected() {
        assert!(serde_json::from_str::<CliConfig>(r#"{ "blank_color": "white" }"#).is_err());
    }

    #[test]
    fn session_seeds_sample_and_blank() -> anyhow::Result<()> {
        let config = CliConfig {
            blank_color: Color::rgb(1, 2, 3),
            ..CliConfig::default()
        };
        let session = config.session()?;
        assert_eq!(session.default_bead().base_color(), Color::rgb(1, 2, 3));
        assert!(session.catalog.find_by_name("Test red").is_some());
        Ok(())
    }
}
