//! Start/process/stop lifecycle around [`FrequencyShiftProcessor`].

use crate::{
    config::WarpConfig,
    error::WarpError,
    float::Float,
    frequency_shift::{shift_bins, FrequencyShiftProcessor},
};

enum State<T: Float> {
    Idle,
    Active {
        sample_rate: T,
        processor: FrequencyShiftProcessor<T>,
        blocks: u64,
    },
}

/// A frequency shift effect that is either idle or running at one sample
/// rate.
///
/// All buffers are allocated in [`WarpEffect::start`] and released in
/// [`WarpEffect::stop`]. Samples still held in the histories at `stop` are
/// dropped, not flushed.
pub struct WarpEffect<T: Float> {
    config: WarpConfig,
    state: State<T>,
}

impl<T: Float> WarpEffect<T> {
    pub fn new(config: WarpConfig) -> Result<Self, WarpError> {
        config.validate()?;
        Ok(Self {
            config,
            state: State::Idle,
        })
    }

    pub fn config(&self) -> &WarpConfig {
        &self.config
    }

    #[inline]
    pub fn block_size(&self) -> usize {
        self.config.block_size
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, State::Active { .. })
    }

    pub fn sample_rate(&self) -> Option<T> {
        match &self.state {
            State::Active { sample_rate, .. } => Some(*sample_rate),
            State::Idle => None,
        }
    }

    /// Bins moved per block at the running sample rate.
    pub fn shift_bins(&self) -> Option<usize> {
        match &self.state {
            State::Active {
                sample_rate,
                processor,
                ..
            } => Some(shift_bins(
                processor.shift_hz(),
                processor.fft_size(),
                *sample_rate,
            )),
            State::Idle => None,
        }
    }

    pub fn blocks_processed(&self) -> u64 {
        match &self.state {
            State::Active { blocks, .. } => *blocks,
            State::Idle => 0,
        }
    }

    pub fn start(&mut self, sample_rate: f64) -> Result<(), WarpError> {
        if self.is_active() {
            return Err(WarpError::AlreadyActive);
        }
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(WarpError::InvalidSampleRate(sample_rate));
        }
        let sr = T::from(sample_rate).ok_or(WarpError::InvalidSampleRate(sample_rate))?;

        let processor = FrequencyShiftProcessor::<T>::new(&self.config)?;
        let fft_size = processor.fft_size();
        let bins = shift_bins(processor.shift_hz(), fft_size, sr);
        let unclamped = (self.config.shift_hz * fft_size as f64 / sample_rate).ceil();
        if unclamped > bins as f64 {
            log::warn!(
                "shift of {} Hz needs {} bins but only {} fit below Nyquist; output keeps little more than DC",
                self.config.shift_hz,
                unclamped,
                bins
            );
        }

        log::info!(
            "starting frequency shift: sample_rate={}, block_size={}, fft_size={}, shift_hz={}, shift_bins={}, window={:?}",
            sample_rate,
            self.config.block_size,
            fft_size,
            self.config.shift_hz,
            bins,
            self.config.window
        );

        self.state = State::Active {
            sample_rate: sr,
            processor,
            blocks: 0,
        };
        Ok(())
    }

    /// Shifts one block at the sample rate given to `start`.
    ///
    /// # Panics
    /// If the effect is not active, or either slice is not `block_size` long.
    pub fn process(&mut self, input: &[T], output: &mut [T]) {
        match &mut self.state {
            State::Active {
                sample_rate,
                processor,
                blocks,
            } => {
                processor.process(input, *sample_rate, output);
                *blocks += 1;
            }
            State::Idle => panic!("process called on an effect that is not started"),
        }
    }

    /// Runs a whole signal through the effect offline and returns output
    /// aligned with the input (the one block of latency is trimmed).
    ///
    /// # Panics
    /// If the effect is not active.
    pub fn render(&mut self, signal: &[T]) -> Vec<T> {
        let block_size = self.block_size();
        let blocks = signal.len().div_ceil(block_size) + 1;

        let mut padded = signal.to_vec();
        padded.resize(blocks * block_size, T::zero());
        let mut output = vec![T::zero(); padded.len()];
        for (i, o) in padded
            .chunks_exact(block_size)
            .zip(output.chunks_exact_mut(block_size))
        {
            self.process(i, o);
        }

        output.drain(..block_size);
        output.truncate(signal.len());
        output
    }

    /// Releases all buffers. A no-op when already idle.
    pub fn stop(&mut self) {
        match std::mem::replace(&mut self.state, State::Idle) {
            State::Active { blocks, .. } => {
                log::info!("stopped frequency shift after {} blocks", blocks);
            }
            State::Idle => log::debug!("stop called on an idle effect"),
        }
    }
}
