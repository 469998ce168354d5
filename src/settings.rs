//! Runtime configuration lookups used while serving requests.

use config::{Config, ConfigError};

/// Configuration values read on every listing request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigKey {
    PaginationMaxLimit,
    PaginationDefaultLimit,
}

impl ConfigKey {
    /// Dotted path of the key inside the configuration tree.
    pub const fn as_str(self) -> &'static str {
        match self {
            ConfigKey::PaginationMaxLimit => "pagination.max_limit",
            ConfigKey::PaginationDefaultLimit => "pagination.default_limit",
        }
    }
}

/// Source of configuration values.
pub trait ConfigProvider {
    fn get_value(&self, key: ConfigKey) -> Result<usize, ConfigError>;
}

/// [`ConfigProvider`] backed by the layered `config` sources loaded at startup.
pub struct SettingsProvider {
    settings: Config,
}

impl SettingsProvider {
    pub fn new(settings: Config) -> Self {
        Self { settings }
    }
}

impl ConfigProvider for SettingsProvider {
    fn get_value(&self, key: ConfigKey) -> Result<usize, ConfigError> {
        self.settings.get::<usize>(key.as_str())
    }
}

/// Loads `config/default.yaml`, the optional `config/{app_env}.yaml` and
/// `APP_`-prefixed environment variables, in that order of precedence.
pub fn load_settings(app_env: &str) -> Result<Config, ConfigError> {
    Config::builder()
        .add_source(config::File::with_name("config/default"))
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        .add_source(config::Environment::with_prefix("APP").separator("__"))
        .build()
}

#[cfg(any(test, feature = "test-mocks"))]
pub mod mock {
    use mockall::mock;

    use super::*;

    mock! {
        pub Settings {}

        impl ConfigProvider for Settings {
            fn get_value(&self, key: ConfigKey) -> Result<usize, ConfigError>;
        }
    }
}
