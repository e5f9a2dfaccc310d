const APP_PREFIX: &str = "tickoff";
const LOG_FILE: &str = "tickoff.log";
const CONFIG: &str = "config.toml";
use crate::{clock::ElapsedMode, error::Result};
use log::debug;
use serde::Deserialize;
use std::{fs, path::PathBuf, time::Duration};

fn xdg_dirs() -> Result<xdg::BaseDirectories> {
    Ok(xdg::BaseDirectories::with_prefix(APP_PREFIX)?)
}

pub(crate) fn get_log_file() -> Result<PathBuf> {
    Ok(xdg_dirs()?.place_state_file(LOG_FILE)?)
}

pub(crate) fn find_config_file() -> Result<Option<PathBuf>> {
    Ok(xdg_dirs()?.find_config_file(CONFIG))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    /// Theme key or name selected at start-up.
    pub(crate) theme: String,
    /// Initial list title. Defaults to "<theme name> To-Do List".
    pub(crate) title: Option<String>,
    pub(crate) tick_millis: u64,
    pub(crate) elapsed: ElapsedMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            theme: "calm".to_string(),
            title: None,
            tick_millis: 1000,
            elapsed: ElapsedMode::Present,
        }
    }
}

impl Config {
    /// Reads the user's config file if there is one, else the defaults.
    pub(crate) fn load() -> Result<Config> {
        match find_config_file()? {
            Some(path) => {
                debug!("Loading config from {path:?}");
                Self::parse(&fs::read_to_string(path)?)
            }
            None => {
                debug!("No config file, using defaults");
                Ok(Config::default())
            }
        }
    }

    pub(crate) fn parse(text: &str) -> Result<Config> {
        Ok(toml::from_str(text)?)
    }

    pub(crate) fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_millis.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
        assert_eq!(Config::default().tick_period(), Duration::from_secs(1));
    }

    #[test]
    fn all_keys() {
        let config = Config::parse(
            r#"
            theme = "dark"
            title = "Groceries"
            tick_millis = 250
            elapsed = "session"
            "#,
        )
        .unwrap();
        assert_eq!(config.theme, "dark");
        assert_eq!(config.title.as_deref(), Some("Groceries"));
        assert_eq!(config.tick_period(), Duration::from_millis(250));
        assert_eq!(config.elapsed, ElapsedMode::Session);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            Config::parse("colour = \"red\""),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::parse("elapsed = \"forever\""),
            Err(Error::Config(_))
        ));
    }
}
