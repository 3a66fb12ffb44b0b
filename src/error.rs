//! Error types for pitchwarp.

use thiserror::Error;

/// Errors raised while configuring or starting the effect, or doing file I/O.
///
/// The real-time `process` paths never return these; broken call contracts
/// there are programmer errors and panic.
#[derive(Debug, Error)]
pub enum WarpError {
    /// Block size must be at least one sample.
    #[error("invalid block size: {0}")]
    InvalidBlockSize(usize),

    /// Shift must be a finite, non-negative number of Hz.
    #[error("invalid frequency shift: {0} Hz")]
    InvalidShift(f64),

    /// Sample rate must be finite and positive.
    #[error("invalid sample rate: {0} Hz")]
    InvalidSampleRate(f64),

    /// `start` was called on an effect that is already running.
    #[error("effect is already active")]
    AlreadyActive,

    /// Configuration file could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// WAV decoding or encoding failed.
    #[error("wav error: {0}")]
    Wav(#[from] hound::Error),

    /// WAV layout we don't read.
    #[error("unsupported wav format: {bits} bit {format}")]
    UnsupportedFormat {
        /// Bits per sample.
        bits: u16,
        /// "int" or "float".
        format: &'static str,
    },
}
