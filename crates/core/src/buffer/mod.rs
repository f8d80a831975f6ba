mod ring;

pub use ring::RingBuffer;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingBufferError {
    #[error("capacity must be > 0")]
    InvalidCapacity,
    #[error("cannot allocate storage for {capacity} elements")]
    CapacityTooLarge { capacity: usize },
    #[error("buffer is empty")]
    BufferEmpty,
}
