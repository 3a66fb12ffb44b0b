use std::path::Path;

use hound::{SampleFormat, WavSpec};

use crate::error::WarpError;

/// Reads the first channel of a WAV file as `f32` in `[-1, 1]`.
pub fn load(p: impl AsRef<Path>) -> Result<(WavSpec, Vec<f32>), WarpError> {
    let mut reader = hound::WavReader::open(&p)?;
    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;
    log::debug!("loading {}: {:?}", p.as_ref().display(), spec);

    let buf = match spec {
        WavSpec {
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
            ..
        } => reader
            .samples::<f32>()
            .step_by(channels)
            .collect::<Result<Vec<_>, _>>()?,
        WavSpec {
            bits_per_sample: bits @ (8 | 16 | 24 | 32),
            sample_format: SampleFormat::Int,
            ..
        } => {
            let scale = 1.0 / (1i64 << (bits - 1)) as f32;
            reader
                .samples::<i32>()
                .step_by(channels)
                .map(|x| x.map(|x| x as f32 * scale))
                .collect::<Result<Vec<_>, _>>()?
        }
        WavSpec {
            bits_per_sample,
            sample_format,
            ..
        } => {
            return Err(WarpError::UnsupportedFormat {
                bits: bits_per_sample,
                format: match sample_format {
                    SampleFormat::Float => "float",
                    SampleFormat::Int => "int",
                },
            })
        }
    };
    Ok((spec, buf))
}

/// Writes `buf` as a mono 32-bit float WAV at `sample_rate`.
pub fn save(p: impl AsRef<Path>, sample_rate: u32, buf: &[f32]) -> Result<(), WarpError> {
    let mut writer = hound::WavWriter::create(
        p,
        WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        },
    )?;
    for &x in buf.iter() {
        writer.write_sample(x)?;
    }
    writer.finalize()?;
    Ok(())
}
