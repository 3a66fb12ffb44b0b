pub mod config;
pub mod effect;
pub mod error;
pub mod fft;
pub mod float;
pub mod frame_buffer;
pub mod frequency_shift;
pub mod ring_buffer;
pub mod stream;
pub mod wav;
pub mod windows;

pub use config::WarpConfig;
pub use effect::WarpEffect;
pub use error::WarpError;
pub use frame_buffer::SpectralFrameBuffer;
pub use frequency_shift::{shift_bins, shift_spectrum, FrequencyShiftProcessor};
pub use stream::WarpStream;
pub use windows::WindowKind;

/// Root mean square level of `buf`.
pub fn power<T: float::Float + std::iter::Sum>(buf: &[T]) -> T {
    if buf.is_empty() {
        return T::zero();
    }
    (buf.iter().map(|&x| x.powi(2)).sum::<T>() / T::from(buf.len()).unwrap()).sqrt()
}
