//! Connection configuration.

use dirmap_core::normalize_dn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::ConfigError;

/// Connection parameters and user-defined entries.
///
/// ```json
/// {
///     "url": "ldaps://ldap.example.com:636",
///     "base_dn": "dc=example,dc=com",
///     "username": "cn=admin,dc=example,dc=com",
///     "userconfig": { "people_dn": "ou=People,dc=example,dc=com" }
/// }
/// ```
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server url, `scheme://hostname:port`.
    #[serde(default)]
    pub url: Option<String>,
    /// Base for searches and the `base_dn` model constant.
    #[serde(default)]
    pub base_dn: String,
    /// Account for simple bind.
    #[serde(default)]
    pub username: Option<String>,
    /// Never serialized.
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    /// Free-form user entries.
    #[serde(default)]
    pub userconfig: BTreeMap<String, serde_json::Value>,
}

impl Config {
    /// Parse a JSON configuration. Unknown parameters are rejected.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: Config = serde_json::from_str(json)?;
        config.base_dn = normalize_dn(&config.base_dn).map_err(|source| {
            ConfigError::InvalidBaseDn {
                base_dn: config.base_dn.clone(),
                source,
            }
        })?;
        Ok(config)
    }

    /// Values for model constants: string `userconfig` entries and `base_dn`.
    ///
    /// `base_dn` wins over a `userconfig` entry of the same name.
    pub fn constants(&self) -> BTreeMap<String, String> {
        let mut constants: BTreeMap<String, String> = self
            .userconfig
            .iter()
            .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
            .collect();
        constants.insert("base_dn".to_string(), self.base_dn.clone());
        constants
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("url", &self.url)
            .field("base_dn", &self.base_dn)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("userconfig", &self.userconfig)
            .finish()
    }
}
