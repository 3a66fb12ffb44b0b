/// Fixed-capacity FIFO of samples. One slot is kept free to tell full from
/// empty, so the backing storage is `capacity + 1` long.
///
/// Every operation either completes entirely or returns `false` without
/// touching the buffer. Nothing allocates after `new`.
pub struct RingBuffer<T: Copy> {
    buffer: Vec<T>,
    capacity: usize,
    read_pos: usize,
    write_pos: usize,
}

impl<T: Copy> RingBuffer<T> {
    pub fn new(capacity: usize, value: T) -> RingBuffer<T> {
        RingBuffer {
            buffer: vec![value; capacity + 1],
            capacity,
            read_pos: 0,
            write_pos: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn num_readable(&self) -> usize {
        if self.read_pos <= self.write_pos {
            self.write_pos - self.read_pos
        } else {
            self.write_pos + (self.capacity + 1) - self.read_pos
        }
    }

    pub fn num_writable(&self) -> usize {
        self.capacity - self.num_readable()
    }

    pub fn is_full(&self) -> bool {
        self.num_writable() == 0
    }

    pub fn is_empty(&self) -> bool {
        self.num_readable() == 0
    }

    /// Copies the oldest `dest.len()` samples into `dest` without consuming
    /// them.
    pub fn read(&self, dest: &mut [T]) -> bool {
        let length = dest.len();
        if self.num_readable() < length {
            return false;
        }

        let buffer_length = self.capacity + 1;
        let copy1 = std::cmp::min(buffer_length - self.read_pos, length);
        dest[..copy1].copy_from_slice(&self.buffer[self.read_pos..self.read_pos + copy1]);
        if copy1 < length {
            dest[copy1..].copy_from_slice(&self.buffer[..length - copy1]);
        }
        true
    }

    pub fn write(&mut self, src: &[T]) -> bool {
        let length = src.len();
        if self.num_writable() < length {
            return false;
        }

        let buffer_length = self.capacity + 1;
        let copy1 = std::cmp::min(buffer_length - self.write_pos, length);
        self.buffer[self.write_pos..self.write_pos + copy1].copy_from_slice(&src[..copy1]);
        if copy1 < length {
            let copy2 = length - copy1;
            self.buffer[..copy2].copy_from_slice(&src[copy1..]);
            self.write_pos = copy2;
        } else {
            self.write_pos = (self.write_pos + copy1) % buffer_length;
        }
        true
    }

    /// Appends `length` copies of `value`.
    pub fn fill(&mut self, length: usize, value: T) -> bool {
        if self.num_writable() < length {
            return false;
        }

        let buffer_length = self.capacity + 1;
        let copy1 = std::cmp::min(buffer_length - self.write_pos, length);
        self.buffer[self.write_pos..self.write_pos + copy1].fill(value);
        if copy1 < length {
            let copy2 = length - copy1;
            self.buffer[..copy2].fill(value);
            self.write_pos = copy2;
        } else {
            self.write_pos = (self.write_pos + copy1) % buffer_length;
        }
        true
    }

    /// Drops the oldest `length` samples.
    pub fn discard(&mut self, length: usize) -> bool {
        if self.num_readable() < length {
            return false;
        }
        self.read_pos = (self.read_pos + length) % (self.capacity + 1);
        true
    }

    pub fn discard_all(&mut self) {
        self.read_pos = self.write_pos;
    }
}
