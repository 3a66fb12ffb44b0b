// parec -r --raw --format=s16ne --channels=1 | pitchwarp stream --sample-rate 44100 | pacat --raw --format=s16ne --channels=1

use std::{
    io::{ErrorKind, Read, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use pitchwarp::{power, wav, WarpConfig, WarpEffect, WarpError, WarpStream, WindowKind};

#[derive(Parser)]
#[command(
    name = "pitchwarp",
    version,
    about = "Shift the spectrum of mono audio down by a fixed number of Hz"
)]
struct Cli {
    #[command(flatten)]
    overrides: Overrides,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct Overrides {
    /// TOML file with effect settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Downward shift in Hz
    #[arg(long, global = true)]
    shift_hz: Option<f64>,

    /// Samples per processing block
    #[arg(long, global = true)]
    block_size: Option<usize>,

    /// Synthesis window: hamming or hann
    #[arg(long, global = true)]
    window: Option<WindowKind>,

    /// Plain bin shift without hop phase correction (warbles on odd shifts)
    #[arg(long, global = true)]
    legacy_phase: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Process a WAV file (first channel only)
    File { input: PathBuf, output: PathBuf },
    /// Filter raw s16 native-endian mono PCM from stdin to stdout
    Stream {
        #[arg(long, default_value_t = 48000)]
        sample_rate: u32,
    },
}

impl Overrides {
    fn resolve(&self) -> Result<WarpConfig, WarpError> {
        let mut config = match &self.config {
            Some(path) => {
                let config = WarpConfig::load(path)?;
                log::info!("Loaded config from {}", path.display());
                config
            }
            None => WarpConfig::default(),
        };
        if let Some(shift_hz) = self.shift_hz {
            config.shift_hz = shift_hz;
        }
        if let Some(block_size) = self.block_size {
            config.block_size = block_size;
        }
        if let Some(window) = self.window {
            config.window = window;
        }
        if self.legacy_phase {
            config.phase_coherent = false;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.overrides.resolve()?;

    match cli.command {
        Command::File { input, output } => run_file(config, &input, &output),
        Command::Stream { sample_rate } => run_stream(config, sample_rate),
    }
}

fn run_file(config: WarpConfig, input: &Path, output: &Path) -> anyhow::Result<()> {
    let (spec, buf) =
        wav::load(input).with_context(|| format!("failed to read {}", input.display()))?;
    log::info!(
        "Input: {} ({} samples at {} Hz, rms {:.4})",
        input.display(),
        buf.len(),
        spec.sample_rate,
        power(&buf)
    );

    let mut effect = WarpEffect::<f32>::new(config)?;
    effect.start(spec.sample_rate as f64)?;
    let start = std::time::Instant::now();
    let out = effect.render(&buf);
    log::info!("Processed in {:?}, output rms {:.4}", start.elapsed(), power(&out));
    effect.stop();

    wav::save(output, spec.sample_rate, &out)
        .with_context(|| format!("failed to write {}", output.display()))?;
    log::info!("Output: {}", output.display());
    Ok(())
}

fn run_stream(config: WarpConfig, sample_rate: u32) -> anyhow::Result<()> {
    let mut stream = WarpStream::<f32>::start(config, sample_rate as f64)?;
    log::info!("Streaming with {} samples of latency", stream.latency());

    let mut stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout().lock();
    let mut bytes = vec![0u8; 4096];
    let mut samples = Vec::with_capacity(bytes.len() / 2);
    let mut out = Vec::with_capacity(bytes.len());
    // A read can end halfway through a sample; the stray byte waits at the
    // front of `bytes`.
    let mut pending = 0;

    loop {
        let size = match stdin.read(&mut bytes[pending..]) {
            Ok(0) => break,
            Ok(size) => size,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e).context("failed to read stdin"),
        };
        let total = pending + size;
        let usable = total - total % 2;

        samples.clear();
        samples.extend(
            bytes[..usable]
                .chunks_exact(2)
                .map(|c| i16::from_ne_bytes([c[0], c[1]]) as f32 / i16::MAX as f32),
        );
        stream.process(&mut samples);

        out.clear();
        out.extend(samples.iter().flat_map(|&x| {
            ((x * i16::MAX as f32)
                .round()
                .clamp(i16::MIN as f32, i16::MAX as f32) as i16)
                .to_ne_bytes()
        }));
        stdout.write_all(&out).context("failed to write stdout")?;
        stdout.flush()?;

        pending = total % 2;
        if pending == 1 {
            bytes[0] = bytes[usable];
        }
    }

    log::info!(
        "End of input after {} blocks",
        stream.effect().blocks_processed()
    );
    stream.stop();
    Ok(())
}
