use serde::Deserialize;

use crate::{v1::ProfileV1, Profile, ProfileError};

/// Parse yaml profile.
pub fn parse_profile(input: &str) -> Result<Profile, ProfileError> {
    let version = parse_version(input)?;
    match version {
        1 => {
            let profile: ProfileV1 = serde_yaml::from_str(input)?;
            Ok(profile.parse()?)
        }
        _ => Err(ProfileError::UnsupportedVersion(version)),
    }
}

/// A profile with a version.
#[derive(Debug, Clone, Deserialize)]
struct VersionedProfile {
    version: u8,
}

/// Parse the version of yaml profile.
fn parse_version(input: &str) -> Result<u8, ProfileError> {
    let raw: VersionedProfile = serde_yaml::from_str(input)?;
    Ok(raw.version)
}
