use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ProfileV1 {
    pub version: u8,
    #[serde(default)]
    pub thresholds: ProfileV1Thresholds,
    #[serde(default)]
    pub trace: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ProfileV1Thresholds {
    #[serde(default)]
    pub click_time_ms: Option<u64>,
    #[serde(default)]
    pub swipe_time_ms: Option<u64>,
    #[serde(default)]
    pub swipe_distance: Option<f32>,
}
