use thiserror::Error;

/// Failures raised by [`RandomizedQueue`](crate::RandomizedQueue) and its iterators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("cannot add an absent item")]
    InvalidArgument,
    #[error("queue underflow")]
    Underflow,
    #[error("no more items in the iteration")]
    EndOfSequence,
    #[error("operation not supported by this iterator")]
    Unsupported,
}

pub type Result<T> = std::result::Result<T, QueueError>;

/// Failures surfaced by the command line client.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Queue(#[from] QueueError),
    #[error("failed to read or write tokens: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot select {k} items out of {available} tokens")]
    InvalidCount { k: usize, available: usize },
}
