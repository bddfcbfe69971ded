pub mod client;
pub mod cmd;
pub mod error;
pub mod utils;

pub use error::{Error, QueueError, Result};
pub use utils::queues::{IntoIter, Iter, RandomizedQueue};
