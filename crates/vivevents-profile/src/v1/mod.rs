mod parse;
mod profile;

use thiserror::Error;

pub(crate) use profile::ProfileV1;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid threshold {name}: {reason}")]
    InvalidThreshold {
        name: &'static str,
        reason: &'static str,
    },
}
