use super::RingBufferError;
use tracing::{debug, trace};

/// Fixed-capacity FIFO buffer. Pushing into a full buffer overwrites the
/// oldest element.
///
/// Storage is allocated once in [`RingBuffer::new`] and never grows. Slots
/// outside the live range `head..head + len` (mod capacity) are always `None`.
#[derive(Clone, Debug)]
pub struct RingBuffer<T> {
    buf: Box<[Option<T>]>,
    head: usize,
    tail: usize,
    len: usize,
}

impl<T> RingBuffer<T> {
    pub fn new(capacity: usize) -> Result<Self, RingBufferError> {
        if capacity == 0 {
            return Err(RingBufferError::InvalidCapacity);
        }
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|_| RingBufferError::CapacityTooLarge { capacity })?;
        slots.resize_with(capacity, || None);
        let buf = slots.into_boxed_slice();
        debug!(capacity, "ring buffer allocated");
        Ok(Self {
            buf,
            head: 0,
            tail: 0,
            len: 0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Appends `value` as the newest element.
    ///
    /// When the buffer is already full the oldest element is discarded to make
    /// room and handed back to the caller; otherwise returns `None`.
    pub fn push(&mut self, value: T) -> Option<T> {
        let overwritten = self.buf[self.tail].replace(value);
        self.tail = self.advance(self.tail);

        if self.len == self.capacity() {
            self.head = self.advance(self.head);
            trace!(head = self.head, tail = self.tail, "overwrote oldest element");
        } else {
            self.len += 1;
        }
        overwritten
    }

    /// Removes and returns the oldest element.
    pub fn pop(&mut self) -> Result<T, RingBufferError> {
        if self.len == 0 {
            return Err(RingBufferError::BufferEmpty);
        }
        let value = self.buf[self.head]
            .take()
            .ok_or(RingBufferError::BufferEmpty)?;
        self.head = self.advance(self.head);
        self.len -= 1;
        trace!(head = self.head, len = self.len, "popped element");
        Ok(value)
    }

    /// Returns the oldest element without removing it.
    pub fn front(&self) -> Result<&T, RingBufferError> {
        self.get(0).ok_or(RingBufferError::BufferEmpty)
    }

    pub fn get(&self, index_from_oldest: usize) -> Option<&T> {
        if index_from_oldest >= self.len {
            return None;
        }
        let idx = (self.head + index_from_oldest) % self.capacity();
        self.buf[idx].as_ref()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        (0..self.len).filter_map(move |i| self.get(i))
    }

    /// Drops every live element and rewinds to the empty state.
    pub fn clear(&mut self) {
        for slot in self.buf.iter_mut() {
            *slot = None;
        }
        self.head = 0;
        self.tail = 0;
        self.len = 0;
        trace!("cleared");
    }

    fn advance(&self, idx: usize) -> usize {
        (idx + 1) % self.capacity()
    }
}

impl<T: Clone> RingBuffer<T> {
    /// Copies the live elements out, oldest first.
    pub fn snapshot(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}
