mod parse;
mod profile;
mod v1;
mod workspace;

use thiserror::Error;

pub use parse::parse_profile;
pub use profile::{Profile, Thresholds};
pub use workspace::Workspace;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("yaml deserialize error: {0}")]
    YamlDeserializeError(#[from] serde_yaml::Error),
    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),
    #[error("v1 profile error: {0}")]
    V1ProfileError(#[from] v1::Error),

    #[error("environment variable not set: {0}")]
    EnvVarNotSet(String),
    #[error("profile not found: {0}")]
    ProfileNotFound(String),
    #[error("path is not a directory: {0}")]
    PathIsNotDirectory(String),
    #[error("path error: {0}")]
    PathError(#[from] std::io::Error),
}
