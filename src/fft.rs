use std::sync::Arc;

use rustfft::num_complex::Complex;

use crate::float::Float;

/// Forward and inverse transforms of one size, planned up front, with their
/// scratch space. Running them never allocates.
pub struct Fft<T: Float> {
    forward: Arc<dyn rustfft::Fft<T>>,
    inverse: Arc<dyn rustfft::Fft<T>>,
    scratch: Vec<Complex<T>>,
}

impl<T: Float> Fft<T> {
    pub fn new(size: usize) -> Self {
        let mut planner = rustfft::FftPlanner::new();
        let forward = planner.plan_fft_forward(size);
        let inverse = planner.plan_fft_inverse(size);
        let scratch_len = forward
            .get_inplace_scratch_len()
            .max(inverse.get_inplace_scratch_len());
        Self {
            forward,
            inverse,
            scratch: vec![Complex::new(T::zero(), T::zero()); scratch_len],
        }
    }

    pub fn forward(&mut self, buffer: &mut [Complex<T>]) {
        self.forward.process_with_scratch(buffer, &mut self.scratch);
    }

    /// Unnormalized; follow with [`fix_scale`].
    pub fn inverse(&mut self, buffer: &mut [Complex<T>]) {
        self.inverse.process_with_scratch(buffer, &mut self.scratch);
    }
}

pub fn fix_scale<T: Float>(buf: &mut [Complex<T>]) {
    let scale = T::one() / T::from(buf.len()).unwrap();
    for x in buf.iter_mut() {
        *x = *x * scale;
    }
}

/// Rewrites bins above Nyquist as the conjugate mirror of the bins below it,
/// so the inverse transform of `spectrum` is real.
pub fn fill_right_part_of_spectrum<T: Float>(spectrum: &mut [Complex<T>]) {
    let len = spectrum.len();
    for i in 1..(len + 1) / 2 {
        spectrum[len - i] = spectrum[i].conj();
    }
}
