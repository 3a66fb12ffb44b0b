//! Input and output sample histories for 50%-overlap block processing.

use crate::float::Float;

/// Two `2 * block_size` histories carried across invocations.
///
/// The input history is in time order: the previous block, then the newest
/// one, so it is exactly the frame the forward transform needs. The first
/// half of the output history accumulates overlap-add contributions and is
/// what gets emitted; the second half holds the tail of the latest frame,
/// which the next invocation adds onto.
///
/// Nothing here allocates after construction.
pub struct SpectralFrameBuffer<T: Float> {
    block_size: usize,
    input: Vec<T>,
    output: Vec<T>,
}

impl<T: Float> SpectralFrameBuffer<T> {
    pub fn new(block_size: usize) -> Self {
        Self {
            block_size,
            input: vec![T::zero(); 2 * block_size],
            output: vec![T::zero(); 2 * block_size],
        }
    }

    #[inline]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    #[inline]
    pub fn frame_size(&self) -> usize {
        2 * self.block_size
    }

    /// Writes the newest block behind the previous one.
    pub fn append_input(&mut self, block: &[T]) {
        assert_eq!(block.len(), self.block_size, "input block length");
        self.input[self.block_size..].copy_from_slice(block);
    }

    /// The whole input frame, oldest sample first.
    #[inline]
    pub fn input_frame(&self) -> &[T] {
        &self.input
    }

    /// Overlap-adds one windowed frame: its first half onto the pending
    /// output, its second half stored as the tail for next time.
    pub fn accumulate_output(&mut self, windowed: &[T]) {
        assert_eq!(windowed.len(), self.frame_size(), "windowed frame length");
        let (head, tail) = self.output.split_at_mut(self.block_size);
        for (o, &w) in head.iter_mut().zip(&windowed[..self.block_size]) {
            *o += w;
        }
        tail.copy_from_slice(&windowed[self.block_size..]);
    }

    /// The finished output block. Valid until the next [`Self::advance`].
    #[inline]
    pub fn emit_output(&self) -> &[T] {
        &self.output[..self.block_size]
    }

    /// Moves the newer half of both histories into the older half.
    ///
    /// The vacated halves are left stale: the next `append_input` and
    /// `accumulate_output` overwrite them completely.
    pub fn advance(&mut self) {
        self.input.copy_within(self.block_size.., 0);
        self.output.copy_within(self.block_size.., 0);
    }

    pub fn reset(&mut self) {
        self.input.fill(T::zero());
        self.output.fill(T::zero());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_frame_is_time_ordered() {
        let mut frames = SpectralFrameBuffer::<f32>::new(3);
        frames.append_input(&[1.0, 2.0, 3.0]);
        assert_eq!(frames.input_frame(), &[0.0, 0.0, 0.0, 1.0, 2.0, 3.0]);
        frames.advance();
        frames.append_input(&[4.0, 5.0, 6.0]);
        assert_eq!(frames.input_frame(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_overlap_add_carries_tail() {
        let mut frames = SpectralFrameBuffer::<f64>::new(2);

        frames.accumulate_output(&[1.0, 1.0, 10.0, 20.0]);
        assert_eq!(frames.emit_output(), &[1.0, 1.0]);
        frames.advance();

        frames.accumulate_output(&[1.0, 2.0, 30.0, 40.0]);
        assert_eq!(frames.emit_output(), &[11.0, 22.0]);
        frames.advance();

        frames.accumulate_output(&[0.0, 0.0, 0.0, 0.0]);
        assert_eq!(frames.emit_output(), &[30.0, 40.0]);
    }

    #[test]
    fn test_histories_keep_their_length() {
        let mut frames = SpectralFrameBuffer::<f32>::new(8);
        for _ in 0..5 {
            frames.append_input(&[0.5; 8]);
            frames.accumulate_output(&[0.25; 16]);
            frames.advance();
            assert_eq!(frames.input_frame().len(), 16);
            assert_eq!(frames.emit_output().len(), 8);
        }
    }

    #[test]
    fn test_reset_clears_history() {
        let mut frames = SpectralFrameBuffer::<f32>::new(2);
        frames.append_input(&[1.0, 1.0]);
        frames.accumulate_output(&[1.0; 4]);
        frames.reset();
        assert!(frames.input_frame().iter().all(|&x| x == 0.0));
        assert!(frames.emit_output().iter().all(|&x| x == 0.0));
    }

    #[test]
    #[should_panic(expected = "input block length")]
    fn test_wrong_block_length_panics() {
        let mut frames = SpectralFrameBuffer::<f32>::new(4);
        frames.append_input(&[0.0; 3]);
    }
}
