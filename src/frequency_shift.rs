//! Block-based downward frequency shift.
//!
//! Each call takes one block of new samples, transforms the frame made of
//! the previous and the new block, moves every bin `N` places toward DC,
//! transforms back, windows, and overlap-adds into the output history. The
//! result lags the input by exactly one block.

use rustfft::num_complex::Complex;

use crate::{
    config::WarpConfig,
    error::WarpError,
    fft::{fill_right_part_of_spectrum, fix_scale, Fft},
    float::Float,
    frame_buffer::SpectralFrameBuffer,
    windows::{apply_window, normalize_for_overlap_add},
};

/// Number of bins a `shift_hz` downward shift moves the spectrum at
/// `sample_rate`, capped at `fft_size / 2 - 1`.
///
/// At the cap every bin except DC is zeroed, so the effect degrades to
/// passing only the DC component.
///
/// # Panics
/// If `sample_rate` is not finite and positive.
pub fn shift_bins<T: Float>(shift_hz: T, fft_size: usize, sample_rate: T) -> usize {
    assert!(
        sample_rate.is_finite() && sample_rate > T::zero(),
        "sample rate must be finite and positive"
    );
    let max = (fft_size / 2).saturating_sub(1);
    (shift_hz * T::from(fft_size).unwrap() / sample_rate)
        .ceil()
        .to_usize()
        .map_or(max, |n| n.min(max))
}

/// Moves bins `1..len/2 - n` down by `n` and zeroes `len/2 - n ..= len/2`.
/// Only the lower half is touched; DC stays where it is.
fn translate_bins<T: Float>(spectrum: &mut [Complex<T>], n: usize) {
    let half = spectrum.len() / 2;
    for i in 1..half - n {
        spectrum[i] = spectrum[i + n];
    }
    if n > 0 {
        spectrum[half - n..=half].fill(Complex::new(T::zero(), T::zero()));
    }
}

/// Shifts a conjugate-symmetric spectrum `n` bins toward DC, keeping it
/// conjugate symmetric. `n` is capped the same way as [`shift_bins`].
pub fn shift_spectrum<T: Float>(spectrum: &mut [Complex<T>], n: usize) {
    let n = n.min((spectrum.len() / 2).saturating_sub(1));
    translate_bins(spectrum, n);
    fill_right_part_of_spectrum(spectrum);
}

pub struct FrequencyShiftProcessor<T: Float> {
    shift_hz: T,
    phase_coherent: bool,
    frames: SpectralFrameBuffer<T>,
    window: Vec<T>,
    fft: Fft<T>,
    spectrum: Vec<Complex<T>>,
    windowed: Vec<T>,
    // Whether the shifted bins of the next frame need negating. Moving `n`
    // bins over a hop of half the frame rotates their phase by `n * PI`.
    odd_hop_phase: bool,
}

impl<T: Float> FrequencyShiftProcessor<T> {
    pub fn new(config: &WarpConfig) -> Result<Self, WarpError> {
        config.validate()?;
        let block_size = config.block_size;
        let fft_size = config.fft_size();

        let mut window: Vec<T> = config.window.generate(fft_size);
        if config.normalize_window {
            normalize_for_overlap_add(&mut window, block_size);
        }

        Ok(Self {
            shift_hz: T::from(config.shift_hz).ok_or(WarpError::InvalidShift(config.shift_hz))?,
            phase_coherent: config.phase_coherent,
            frames: SpectralFrameBuffer::new(block_size),
            window,
            fft: Fft::new(fft_size),
            spectrum: vec![Complex::new(T::zero(), T::zero()); fft_size],
            windowed: vec![T::zero(); fft_size],
            odd_hop_phase: false,
        })
    }

    #[inline]
    pub fn block_size(&self) -> usize {
        self.frames.block_size()
    }

    #[inline]
    pub fn fft_size(&self) -> usize {
        self.frames.frame_size()
    }

    pub fn shift_hz(&self) -> T {
        self.shift_hz
    }

    pub fn window(&self) -> &[T] {
        &self.window
    }

    /// Output delay in samples.
    pub fn latency(&self) -> usize {
        self.block_size()
    }

    /// Shifts one block. `input` and `output` must both be `block_size`
    /// long. Never allocates.
    pub fn process(&mut self, input: &[T], sample_rate: T, output: &mut [T]) {
        assert_eq!(output.len(), self.block_size(), "output block length");
        let fft_size = self.fft_size();
        let half = fft_size / 2;

        self.frames.append_input(input);

        for (c, &x) in self.spectrum.iter_mut().zip(self.frames.input_frame()) {
            *c = Complex::new(x, T::zero());
        }
        self.fft.forward(&mut self.spectrum);

        let n = shift_bins(self.shift_hz, fft_size, sample_rate);
        translate_bins(&mut self.spectrum, n);
        if self.phase_coherent {
            if self.odd_hop_phase {
                for c in self.spectrum[1..half - n].iter_mut() {
                    *c = -*c;
                }
            }
            if n % 2 == 1 {
                self.odd_hop_phase = !self.odd_hop_phase;
            }
        }
        fill_right_part_of_spectrum(&mut self.spectrum);

        self.fft.inverse(&mut self.spectrum);
        fix_scale(&mut self.spectrum);
        for (w, c) in self.windowed.iter_mut().zip(&self.spectrum) {
            *w = c.re;
        }
        apply_window(&mut self.windowed, &self.window);

        self.frames.accumulate_output(&self.windowed);
        output.copy_from_slice(self.frames.emit_output());
        self.frames.advance();
    }

    /// Forgets all history, as if freshly constructed.
    pub fn reset(&mut self) {
        self.frames.reset();
        self.odd_hop_phase = false;
    }
}
