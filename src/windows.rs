use rustfft::num_traits;
use serde::Deserialize;

/// Raised-cosine window shapes for the synthesis window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowKind {
    #[default]
    Hamming,
    Hann,
}

impl WindowKind {
    pub fn generate<T: num_traits::Float + num_traits::FloatConst>(self, size: usize) -> Vec<T> {
        match self {
            WindowKind::Hamming => hamming_window(size),
            WindowKind::Hann => hann_window(size),
        }
    }
}

impl std::str::FromStr for WindowKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hamming" => Ok(WindowKind::Hamming),
            "hann" => Ok(WindowKind::Hann),
            _ => Err(format!("unknown window: {}", s)),
        }
    }
}

pub fn hann_window<T: num_traits::Float + num_traits::FloatConst>(size: usize) -> Vec<T> {
    (0..size)
        .map(|i| {
            T::from(0.5).unwrap()
                * (T::one() - (T::from(i).unwrap() * T::TAU() / T::from(size).unwrap()).cos())
        })
        .collect()
}

/// Periodic Hamming window. Two copies offset by half their length sum to a
/// constant 1.08.
pub fn hamming_window<T: num_traits::Float + num_traits::FloatConst>(size: usize) -> Vec<T> {
    let a0 = T::from(0.54).unwrap();
    let a1 = T::from(0.46).unwrap();
    (0..size)
        .map(|i| a0 - a1 * (T::from(i).unwrap() * T::TAU() / T::from(size).unwrap()).cos())
        .collect()
}

/// Multiplies every coefficient by `hop / sum(window)`, giving unity gain when
/// frames spaced `hop` apart are overlap-added.
pub fn normalize_for_overlap_add<T: num_traits::Float>(window: &mut [T], hop: usize) {
    let sum = window.iter().fold(T::zero(), |a, &w| a + w);
    if sum <= T::zero() {
        return;
    }
    let scale = T::from(hop).unwrap() / sum;
    for w in window.iter_mut() {
        *w = *w * scale;
    }
}

#[inline]
pub fn apply_window<T: num_traits::Float>(data: &mut [T], window: &[T]) {
    for (sample, &w) in data.iter_mut().zip(window.iter()) {
        *sample = *sample * w;
    }
}
