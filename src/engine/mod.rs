//! Low-level mechanics the pipeline is built from: hashing, concurrency primitives, and
//! path/filter helpers.

pub mod buffer_pool;
pub mod hashing;
pub mod parallel;
pub mod semaphore;
pub mod tools;

pub use buffer_pool::BufferPool;
pub use parallel::{build_directory_pool, build_hashing_pool};
pub use semaphore::CountingSemaphore;
