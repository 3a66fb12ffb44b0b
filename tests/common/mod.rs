#![allow(dead_code)]

use std::f64::consts::PI;

use pitchwarp::{WarpConfig, WarpEffect};
use rustfft::{num_complex::Complex, FftPlanner};

pub fn gen_sine(freq_hz: f64, sr: f64, n: usize, amp: f32) -> Vec<f32> {
    (0..n)
        .map(|i| amp * (2.0 * PI * freq_hz * i as f64 / sr).sin() as f32)
        .collect()
}

/// Runs `signal` through a freshly started effect block by block and returns
/// the raw output (one block of latency included).
pub fn run_blocks(config: WarpConfig, sr: f64, signal: &[f32]) -> Vec<f32> {
    let block_size = config.block_size;
    let mut effect = WarpEffect::<f32>::new(config).expect("valid config");
    effect.start(sr).expect("valid sample rate");
    let mut output = vec![0.0f32; signal.len()];
    for (i, o) in signal
        .chunks_exact(block_size)
        .zip(output.chunks_exact_mut(block_size))
    {
        effect.process(i, o);
    }
    effect.stop();
    output
}

fn hann(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 0.5 - 0.5 * (2.0 * PI * i as f64 / n as f64).cos())
        .collect()
}

/// Hann-windowed magnitude spectrum, bins `0..=len/2`.
pub fn magnitude_spectrum(signal: &[f32]) -> Vec<f64> {
    let n = signal.len();
    let window = hann(n);
    let mut buf: Vec<Complex<f64>> = signal
        .iter()
        .zip(&window)
        .map(|(&x, &w)| Complex::new(x as f64 * w, 0.0))
        .collect();
    FftPlanner::new().plan_fft_forward(n).process(&mut buf);
    buf[..=n / 2].iter().map(|c| c.norm()).collect()
}

/// Frequency of the strongest bin above DC.
pub fn peak_frequency(signal: &[f32], sr: f64) -> f64 {
    let spectrum = magnitude_spectrum(signal);
    let (bin, _) = spectrum
        .iter()
        .enumerate()
        .skip(1)
        .fold((0, 0.0), |best, (i, &m)| if m > best.1 { (i, m) } else { best });
    bin as f64 * sr / signal.len() as f64
}

/// Hann-windowed single-frequency DFT magnitude.
pub fn energy_at(signal: &[f32], sr: f64, freq: f64) -> f64 {
    let window = hann(signal.len());
    let (re, im) = signal
        .iter()
        .zip(&window)
        .enumerate()
        .fold((0.0, 0.0), |(re, im), (i, (&x, &w))| {
            let angle = 2.0 * PI * freq * i as f64 / sr;
            let v = x as f64 * w;
            (re + v * angle.cos(), im - v * angle.sin())
        });
    (re * re + im * im).sqrt()
}

pub fn rms(signal: &[f32]) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }
    (signal.iter().map(|&x| (x as f64) * (x as f64)).sum::<f64>() / signal.len() as f64).sqrt()
}
