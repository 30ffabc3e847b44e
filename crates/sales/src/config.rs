//! Resolver configuration.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ENV_DEFAULT_PACKAGE_POLICY: &str = "SALEPACK_DEFAULT_PACKAGE_POLICY";
pub const ENV_REQUIRE_PACKAGE_ON_CONFIRM: &str = "SALEPACK_REQUIRE_PACKAGE_ON_CONFIRM";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}

/// What happens to a line's package when its product changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultPackagePolicy {
    /// Drop the current package and pick the new template's default, if any.
    #[default]
    ResetToDefault,
    /// Keep the current package when it belongs to the new product's template,
    /// otherwise behave like `ResetToDefault`.
    KeepIfValid,
    /// Leave `product_package` untouched.
    Disabled,
}

impl FromStr for DefaultPackagePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reset_to_default" => Ok(Self::ResetToDefault),
            "keep_if_valid" => Ok(Self::KeepIfValid),
            "disabled" => Ok(Self::Disabled),
            _ => Err(ConfigError::InvalidValue {
                key: ENV_DEFAULT_PACKAGE_POLICY,
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub default_package_policy: DefaultPackagePolicy,
    /// Refuse confirmation while a package-carrying line has no package.
    pub require_package_on_confirm: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_package_policy: DefaultPackagePolicy::ResetToDefault,
            require_package_on_confirm: true,
        }
    }
}

impl ResolverConfig {
    /// Read overrides from the process environment; unset keys keep defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_DEFAULT_PACKAGE_POLICY) {
            config.default_package_policy = raw.parse()?;
        }

        if let Some(raw) = lookup(ENV_REQUIRE_PACKAGE_ON_CONFIRM) {
            config.require_package_on_confirm = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: ENV_REQUIRE_PACKAGE_ON_CONFIRM,
                        value: raw,
                    });
                }
            };
        }

        Ok(config)
    }

    pub fn with_default_package_policy(mut self, policy: DefaultPackagePolicy) -> Self {
        self.default_package_policy = policy;
        self
    }

    pub fn with_require_package_on_confirm(mut self, required: bool) -> Self {
        self.require_package_on_confirm = required;
        self
    }
}
