use std::io;

use thiserror::Error;

/// Failures that can occur while talking to the host.
///
/// Only [`Error::Output`] ever reaches a caller of this crate; the other
/// variants are produced by host adapters and absorbed into a degraded
/// rendering.
#[derive(Debug, Error)]
pub enum Error {
    /// The frame has no lexical block, typically because of missing debug
    /// info.
    #[error("no block available for frame")]
    NoBlock,

    /// Any other failure reported by the host's inspection API.
    #[error("host error: {0}")]
    Host(String),

    /// The output channel rejected the rendered backtrace.
    #[error("failed to write backtrace: {0}")]
    Output(#[from] io::Error),
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
