use std::time::Duration;

use crate::profile::{Profile, Thresholds};

use super::profile::{ProfileV1, ProfileV1Thresholds};
use super::Error;

const MAX_SWIPE_DISTANCE: f32 = 2.0;

impl ProfileV1 {
    pub(crate) fn parse(&self) -> Result<Profile, Error> {
        // Dispatched by version in `parse_profile`.
        debug_assert_eq!(self.version, 1);

        Ok(Profile {
            thresholds: parse_thresholds(&self.thresholds)?,
            trace: self.trace,
        })
    }
}

fn parse_thresholds(raw: &ProfileV1Thresholds) -> Result<Thresholds, Error> {
    let defaults = Thresholds::default();
    let click_time = parse_window("click_time_ms", raw.click_time_ms)?
        .unwrap_or(defaults.click_time);
    let swipe_time = parse_window("swipe_time_ms", raw.swipe_time_ms)?
        .unwrap_or(defaults.swipe_time);

    let swipe_distance = match raw.swipe_distance {
        None => defaults.swipe_distance,
        Some(d) if !d.is_finite() => {
            return Err(Error::InvalidThreshold {
                name: "swipe_distance",
                reason: "must be a finite number",
            })
        }
        Some(d) if d <= 0.0 || d > MAX_SWIPE_DISTANCE => {
            return Err(Error::InvalidThreshold {
                name: "swipe_distance",
                reason: "must be within (0, 2]",
            })
        }
        Some(d) => d,
    };

    Ok(Thresholds {
        click_time,
        swipe_time,
        swipe_distance,
    })
}

fn parse_window(
    name: &'static str,
    value: Option<u64>,
) -> Result<Option<Duration>, Error> {
    match value {
        Some(0) => Err(Error::InvalidThreshold {
            name,
            reason: "must be greater than zero",
        }),
        Some(ms) => Ok(Some(Duration::from_millis(ms))),
        None => Ok(None),
    }
}
