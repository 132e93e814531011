//! JSON file token storage under a configured directory.
//!
//! Both tokens live in one file keyed by
//! [`ACCESS_TOKEN_KEY`](crate::domain::ports::ACCESS_TOKEN_KEY) and
//! [`REFRESH_TOKEN_KEY`](crate::domain::ports::REFRESH_TOKEN_KEY), so they
//! are always written and removed together.
//! File access goes through `cap_std` rooted at the configured directory.
//! On unix the file is readable by its owner only.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::TokenPair;
use crate::domain::ports::{TokenStore, TokenStoreError};

/// Name of the token file inside the store directory.
pub const TOKEN_FILE_NAME: &str = "tokens.json";

/// Mode of the token file on unix.
#[cfg(unix)]
pub const TOKEN_FILE_MODE: u32 = 0o600;

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredTokens {
    #[serde(rename = "accessToken", default, skip_serializing_if = "Option::is_none")]
    access: Option<String>,
    #[serde(rename = "refreshToken", default, skip_serializing_if = "Option::is_none")]
    refresh: Option<String>,
}

/// Create or truncate the token file, then write `contents`.
fn write_private(dir: &Dir, contents: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use cap_std::fs::OpenOptionsExt;
        options.mode(TOKEN_FILE_MODE);
    }

    let mut file = dir.open_with(TOKEN_FILE_NAME, &options)?;
    // An existing file keeps its old mode on open.
    #[cfg(unix)]
    {
        use cap_std::fs::{Permissions, PermissionsExt};
        file.set_permissions(Permissions::from_mode(TOKEN_FILE_MODE))?;
    }
    file.write_all(contents)?;
    file.flush()
}

fn io_error(action: &str, path: &Path, error: io::Error) -> TokenStoreError {
    TokenStoreError::io(format!("{action} {}: {error}", path.display()))
}

/// Token store backed by `<dir>/tokens.json`.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    dir: PathBuf,
}

impl FileTokenStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Full path of the token file.
    pub fn path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE_NAME)
    }

    fn open_dir(&self) -> io::Result<Dir> {
        Dir::open_ambient_dir(&self.dir, ambient_authority())
    }

    fn load(&self) -> Result<StoredTokens, TokenStoreError> {
        let contents = match self
            .open_dir()
            .and_then(|dir| dir.read_to_string(TOKEN_FILE_NAME))
        {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                return Ok(StoredTokens::default());
            }
            Err(error) => return Err(io_error("could not read", &self.path(), error)),
        };
        serde_json::from_str(&contents).map_err(|error| {
            TokenStoreError::corrupt(format!("{}: {error}", self.path().display()))
        })
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn access_token(&self) -> Result<Option<String>, TokenStoreError> {
        Ok(self.load()?.access.filter(|token| !token.is_empty()))
    }

    async fn refresh_token(&self) -> Result<Option<String>, TokenStoreError> {
        Ok(self.load()?.refresh.filter(|token| !token.is_empty()))
    }

    async fn store(&self, tokens: &TokenPair) -> Result<(), TokenStoreError> {
        let stored = StoredTokens {
            access: Some(tokens.access().to_owned()),
            refresh: Some(tokens.refresh().to_owned()),
        };
        let contents = serde_json::to_vec_pretty(&stored)
            .map_err(|error| TokenStoreError::io(error.to_string()))?;

        Dir::create_ambient_dir_all(&self.dir, ambient_authority())
            .map_err(|error| io_error("could not create", &self.dir, error))?;
        self.open_dir()
            .and_then(|dir| write_private(&dir, &contents))
            .map_err(|error| io_error("could not write", &self.path(), error))?;
        debug!(path = %self.path().display(), "tokens stored");
        Ok(())
    }

    async fn clear(&self) -> Result<(), TokenStoreError> {
        match self
            .open_dir()
            .and_then(|dir| dir.remove_file(TOKEN_FILE_NAME))
        {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(io_error("could not remove", &self.path(), error)),
        }
    }
}
