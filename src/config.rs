//! Effect configuration.
//!
//! Everything here is fixed for the life of one effect instance. The sample
//! rate is not part of it: it belongs to the audio session and is handed to
//! [`crate::effect::WarpEffect::start`].

use std::path::Path;

use serde::Deserialize;

use crate::{error::WarpError, windows::WindowKind};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WarpConfig {
    /// Samples per callback. The transform runs over twice this many.
    #[serde(default = "default_block_size")]
    pub block_size: usize,
    /// Downward shift in Hz.
    #[serde(default = "default_shift_hz")]
    pub shift_hz: f64,
    #[serde(default)]
    pub window: WindowKind,
    /// Scale the synthesis window for unity overlap-add gain.
    #[serde(default = "default_true")]
    pub normalize_window: bool,
    /// Keep shifted content in phase across hops. Turning this off gives
    /// the warbling sound of a plain bin shift whenever the shift is an odd
    /// number of bins.
    #[serde(default = "default_true")]
    pub phase_coherent: bool,
}

impl Default for WarpConfig {
    fn default() -> Self {
        Self {
            block_size: default_block_size(),
            shift_hz: default_shift_hz(),
            window: WindowKind::default(),
            normalize_window: true,
            phase_coherent: true,
        }
    }
}

fn default_block_size() -> usize {
    1024
}

fn default_shift_hz() -> f64 {
    200.0
}

fn default_true() -> bool {
    true
}

impl WarpConfig {
    pub fn new(block_size: usize, shift_hz: f64) -> Self {
        Self {
            block_size,
            shift_hz,
            ..Self::default()
        }
    }

    pub fn with_window(mut self, window: WindowKind) -> Self {
        self.window = window;
        self
    }

    pub fn with_phase_coherent(mut self, phase_coherent: bool) -> Self {
        self.phase_coherent = phase_coherent;
        self
    }

    pub fn with_normalize_window(mut self, normalize_window: bool) -> Self {
        self.normalize_window = normalize_window;
        self
    }

    #[inline]
    pub fn fft_size(&self) -> usize {
        2 * self.block_size
    }

    pub fn validate(&self) -> Result<(), WarpError> {
        if self.block_size == 0 {
            return Err(WarpError::InvalidBlockSize(self.block_size));
        }
        if !self.shift_hz.is_finite() || self.shift_hz < 0.0 {
            return Err(WarpError::InvalidShift(self.shift_hz));
        }
        Ok(())
    }

    pub fn from_toml_str(s: &str) -> Result<Self, WarpError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, WarpError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
