use std::path::{Path, PathBuf};

use crate::{parse_profile, Profile, ProfileError};

const DEFAULT_WORKSPACE_PATH: &str = ".config/vivevents";
const PROFILE_FILE_NAME: &str = "profile.yaml";

/// Directory that holds the user's profile.
pub struct Workspace {
    path: PathBuf,
}

impl Workspace {
    pub fn new(path: Option<&Path>) -> Result<Self, ProfileError> {
        let path = match path {
            Some(path) => path.to_owned(),
            None => Self::default_path()?,
        };

        if path.exists() && !path.is_dir() {
            return Err(ProfileError::PathIsNotDirectory(
                path.display().to_string(),
            ));
        }

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn profile_path(&self) -> PathBuf {
        self.path.join(PROFILE_FILE_NAME)
    }

    /// Load the workspace profile. A missing file is not an error.
    pub fn load_profile(&self) -> Result<Option<Profile>, ProfileError> {
        let path = self.profile_path();
        if !path.exists() {
            return Ok(None);
        }
        Self::load_profile_from(&path).map(Some)
    }

    /// Load a profile from an explicit file.
    pub fn load_profile_from(path: &Path) -> Result<Profile, ProfileError> {
        if !path.is_file() {
            return Err(ProfileError::ProfileNotFound(path.display().to_string()));
        }
        let input = std::fs::read_to_string(path)?;
        parse_profile(&input)
    }

    pub fn default_path() -> Result<PathBuf, ProfileError> {
        let path = std::env::var("HOME")
            .map(PathBuf::from)
            .map(|p| p.join(DEFAULT_WORKSPACE_PATH))
            .map_err(|_| ProfileError::EnvVarNotSet("HOME".to_string()))?;

        Ok(path)
    }
}
