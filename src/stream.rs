//! Runs the fixed-block effect over host buffers of any length.
//!
//! Plugin hosts and pipes rarely hand over exactly `block_size` samples at a
//! time. [`WarpStream`] queues input until a full block is ready and serves
//! output from a queue that starts one block ahead, so every call returns as
//! many samples as it was given.

use crate::{
    config::WarpConfig, effect::WarpEffect, error::WarpError, float::Float,
    ring_buffer::RingBuffer,
};

pub struct WarpStream<T: Float> {
    effect: WarpEffect<T>,
    input: RingBuffer<T>,
    output: RingBuffer<T>,
    block_in: Vec<T>,
    block_out: Vec<T>,
}

impl<T: Float> WarpStream<T> {
    /// Builds and starts an effect for `config` at `sample_rate`.
    pub fn start(config: WarpConfig, sample_rate: f64) -> Result<Self, WarpError> {
        let mut effect = WarpEffect::new(config)?;
        effect.start(sample_rate)?;
        let block_size = effect.block_size();

        let input = RingBuffer::new(block_size, T::zero());
        let mut output = RingBuffer::new(2 * block_size, T::zero());
        output.fill(block_size, T::zero());

        Ok(Self {
            effect,
            input,
            output,
            block_in: vec![T::zero(); block_size],
            block_out: vec![T::zero(); block_size],
        })
    }

    pub fn effect(&self) -> &WarpEffect<T> {
        &self.effect
    }

    /// Delay from input to output in samples: one block of queueing plus the
    /// effect's own block of latency.
    pub fn latency(&self) -> usize {
        2 * self.effect.block_size()
    }

    /// Filters `buffer` in place. Never allocates.
    pub fn process(&mut self, buffer: &mut [T]) {
        let mut processed = 0;
        while processed < buffer.len() {
            let num_to_write = self.input.num_writable().min(buffer.len() - processed);
            let chunk = &mut buffer[processed..processed + num_to_write];

            let written = self.input.write(chunk);
            debug_assert!(written);

            if self.input.is_full() {
                self.input.read(&mut self.block_in);
                self.input.discard_all();
                self.effect.process(&self.block_in, &mut self.block_out);
                let queued = self.output.write(&self.block_out);
                debug_assert!(queued);
            }

            let read = self.output.read(chunk) && self.output.discard(num_to_write);
            debug_assert!(read);

            processed += num_to_write;
        }
    }

    /// Stops the effect, dropping any queued samples.
    pub fn stop(mut self) {
        self.effect.stop();
    }
}
