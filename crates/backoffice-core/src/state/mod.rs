//! Application scoped state.

use crate::{error::Error, LazyLock};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use toml::value::Table;

mod env;

pub use self::env::Env;

/// A state is a record of the env and the config.
#[derive(Debug, Clone)]
pub struct State {
    /// Environment.
    env: Env,
    /// Configuration.
    config: Table,
}

impl State {
    /// Creates a new instance.
    #[inline]
    pub fn new(env: Env) -> Self {
        Self {
            env,
            config: Table::new(),
        }
    }

    /// Loads the config file `config.{env}.toml` from the directory.
    /// A missing file leaves the config empty.
    pub fn load_config(&mut self, config_dir: &Path) -> Result<(), Error> {
        let env = self.env.as_str();
        let config_file = config_dir.join(format!("config.{env}.toml"));
        match fs::read_to_string(&config_file) {
            Ok(data) => {
                self.config = data.parse::<Table>().map_err(|err| {
                    let config_file = config_file.display();
                    Error::with_source(format!("fail to parse the config file `{config_file}`"), err)
                })?;
                tracing::info!(env, "`{}` loaded", config_file.display());
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::warn!(env, "config file `{}` does not exist", config_file.display());
                Ok(())
            }
            Err(err) => {
                let config_file = config_file.display();
                Err(Error::with_source(
                    format!("fail to read the config file `{config_file}`"),
                    err,
                ))
            }
        }
    }

    /// Sets the config.
    #[inline]
    pub fn set_config(&mut self, config: Table) {
        self.config = config;
    }

    /// Returns the env.
    #[inline]
    pub fn env(&self) -> Env {
        self.env
    }

    /// Returns a reference to the config.
    #[inline]
    pub fn config(&self) -> &Table {
        &self.config
    }

    /// Returns a reference to the config corresponding to the `key`.
    #[inline]
    pub fn get_config(&self, key: &str) -> Option<&Table> {
        self.config.get(key).and_then(|v| v.as_table())
    }

    /// Returns the directory where config files and locale catalogs reside.
    /// It can be specified by the `BACKOFFICE_CONFIG_DIR` environment variable.
    #[inline]
    pub fn config_dir() -> &'static Path {
        CONFIG_DIR.as_path()
    }

    /// Returns a reference to the shared state.
    #[inline]
    pub fn shared() -> &'static Self {
        LazyLock::force(&SHARED_STATE)
    }
}

impl Default for State {
    #[inline]
    fn default() -> Self {
        Self::new(Env::default())
    }
}

/// Config directory.
static CONFIG_DIR: LazyLock<PathBuf> = LazyLock::new(|| {
    std::env::var("BACKOFFICE_CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config"))
});

/// Shared application state.
static SHARED_STATE: LazyLock<State> = LazyLock::new(|| {
    let app_env = match std::env::var("BACKOFFICE_APP_ENV") {
        Ok(env) => Env::from(env.leak() as &'static str),
        Err(_) => Env::default(),
    };
    let mut state = State::new(app_env);
    if let Err(err) = state.load_config(State::config_dir()) {
        tracing::error!("{err}");
    }
    state
});

#[cfg(test)]
mod tests {
    use super::{Env, State};
    use crate::extension::TomlTableExt;
    use std::{env, fs};

    #[test]
    fn it_loads_config() {
        let config_dir = env::temp_dir().join(format!("backoffice-state-{}", std::process::id()));
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(
            config_dir.join("config.staging.toml"),
            "[i18n]\ndefault-locale = \"zh-CN\"\n",
        )
        .unwrap();

        let mut state = State::new(Env::from("staging"));
        state.load_config(&config_dir).unwrap();
        let i18n = state.get_config("i18n").unwrap();
        assert_eq!(i18n.get_str("default-locale"), Some("zh-CN"));

        let mut state = State::new(Env::Prod);
        assert!(state.load_config(&config_dir).is_ok());
        assert!(state.config().is_empty());

        fs::write(config_dir.join("config.prod.toml"), "[i18n\n").unwrap();
        assert!(state.load_config(&config_dir).is_err());
        fs::remove_dir_all(&config_dir).unwrap();
    }
}
