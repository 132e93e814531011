//! Client configuration loaded via OrthoConfig.
//!
//! Values layer as defaults, then a config file, then `MYCOLLEGEBOOK_*`
//! environment variables, then command-line flags.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::{Platform, UnknownPlatform};
use crate::outbound::http::resolve_base_url;

const TOKEN_DIR_NAME: &str = ".mycollegebook";

fn default_token_dir() -> PathBuf {
    env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(env::temp_dir)
        .join(TOKEN_DIR_NAME)
}

/// Errors raised while turning raw settings into client parameters.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error(transparent)]
    Platform(#[from] UnknownPlatform),
    #[error("invalid base URL `{url}`: {source}")]
    BaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("request timeout must be at least one second")]
    ZeroTimeout,
}

/// Configuration values for the marketplace client.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MYCOLLEGEBOOK")]
pub struct ClientSettings {
    /// Platform whose default backend address is used.
    pub platform: Option<String>,
    /// Explicit backend base URL, overriding the platform default.
    pub base_url: Option<String>,
    /// Per-request timeout in seconds.
    #[ortho_config(default = 30)]
    pub timeout_secs: u64,
    /// Directory holding the persisted session tokens.
    pub token_dir: Option<PathBuf>,
}

impl ClientSettings {
    /// Configured platform, falling back to the build target's.
    pub fn platform(&self) -> Result<Platform, SettingsError> {
        match self.platform.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => Ok(value.parse()?),
            _ => Ok(Platform::current()),
        }
    }

    /// Backend base URL for the configured platform and override.
    pub fn base_url(&self) -> Result<Url, SettingsError> {
        let platform = self.platform()?;
        resolve_base_url(platform, self.base_url.as_deref()).map_err(|source| {
            SettingsError::BaseUrl {
                url: self.base_url.clone().unwrap_or_default(),
                source,
            }
        })
    }

    pub fn timeout(&self) -> Result<Duration, SettingsError> {
        match self.timeout_secs {
            0 => Err(SettingsError::ZeroTimeout),
            secs => Ok(Duration::from_secs(secs)),
        }
    }

    /// Token directory, falling back to `$HOME/.mycollegebook`.
    pub fn token_dir(&self) -> PathBuf {
        self.token_dir.clone().unwrap_or_else(default_token_dir)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for client configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const DEFAULT_TIMEOUT_SECS: u64 = 30;

    const VARS: [&str; 4] = [
        "MYCOLLEGEBOOK_PLATFORM",
        "MYCOLLEGEBOOK_BASE_URL",
        "MYCOLLEGEBOOK_TIMEOUT_SECS",
        "MYCOLLEGEBOOK_TOKEN_DIR",
    ];

    fn defaults() -> ClientSettings {
        ClientSettings {
            platform: None,
            base_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            token_dir: None,
        }
    }

    fn load_from_empty_args() -> ClientSettings {
        ClientSettings::load_from_iter([OsString::from("mycollegebook")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(settings.timeout().expect("timeout"), Duration::from_secs(30));
        assert_eq!(settings.platform().expect("platform"), Platform::current());
        assert!(settings.token_dir().ends_with(TOKEN_DIR_NAME));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("MYCOLLEGEBOOK_PLATFORM", Some("android".to_owned())),
            ("MYCOLLEGEBOOK_BASE_URL", None),
            ("MYCOLLEGEBOOK_TIMEOUT_SECS", Some("5".to_owned())),
            ("MYCOLLEGEBOOK_TOKEN_DIR", Some("/tmp/mcb-tokens".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.platform().expect("platform"), Platform::Android);
        assert_eq!(
            settings.base_url().expect("url").as_str(),
            "http://10.0.2.2:8000/api/"
        );
        assert_eq!(settings.timeout().expect("timeout"), Duration::from_secs(5));
        assert_eq!(settings.token_dir(), PathBuf::from("/tmp/mcb-tokens"));
    }

    #[rstest]
    fn explicit_base_url_wins_over_the_platform() {
        let settings = ClientSettings {
            platform: Some("android".to_owned()),
            base_url: Some("https://books.example/api".to_owned()),
            ..defaults()
        };

        assert_eq!(
            settings.base_url().expect("url").as_str(),
            "https://books.example/api/"
        );
    }

    #[rstest]
    #[case::platform(ClientSettings { platform: Some("palm".to_owned()), ..defaults() })]
    #[case::url(ClientSettings { base_url: Some("not a url".to_owned()), ..defaults() })]
    fn bad_values_are_reported(#[case] settings: ClientSettings) {
        assert!(settings.base_url().is_err());
    }

    #[rstest]
    fn zero_timeout_is_rejected() {
        let settings = ClientSettings {
            timeout_secs: 0,
            ..defaults()
        };
        assert!(matches!(settings.timeout(), Err(SettingsError::ZeroTimeout)));
    }
}
