//! Shared pool of reusable hashing buffers.
//!
//! The default runtime copy buffer is ~32 KiB, which issues an order of magnitude more
//! `read` syscalls than necessary for a sequential, CPU-bound hash. A 1 MiB buffer moves
//! the bottleneck off syscall count and onto media bandwidth or hash throughput. Pool
//! sizing is unbounded in principle; in practice it is bounded by the descriptor
//! semaphore, since a buffer is only checked out for the lifetime of one hash.

use std::sync::Mutex;

pub const BUFFER_SIZE: usize = 1024 * 1024;

#[derive(Default)]
pub struct BufferPool {
    free: Mutex<Vec<Vec<u8>>>,
}

impl BufferPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check out a buffer, allocating a fresh one if the pool is empty.
    pub fn checkout(&self) -> PooledBuffer<'_> {
        let buf = self
            .free
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| vec![0u8; BUFFER_SIZE]);
        PooledBuffer {
            pool: self,
            buf: Some(buf),
        }
    }

    fn checkin(&self, buf: Vec<u8>) {
        self.free.lock().unwrap().push(buf);
    }
}

/// RAII handle: returns its buffer to the pool on drop, including on an early return from
/// a hashing error.
pub struct PooledBuffer<'a> {
    pool: &'a BufferPool,
    buf: Option<Vec<u8>>,
}

impl std::ops::Deref for PooledBuffer<'_> {
    type Target = Vec<u8>;
    fn deref(&self) -> &Vec<u8> {
        self.buf.as_ref().unwrap()
    }
}

impl std::ops::DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut Vec<u8> {
        self.buf.as_mut().unwrap()
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        if let Some(buf) = self.buf.take() {
            self.pool.checkin(buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkout_gives_right_sized_buffer() {
        let pool = BufferPool::new();
        let buf = pool.checkout();
        assert_eq!(buf.len(), BUFFER_SIZE);
    }

    #[test]
    fn buffer_is_reused_after_drop() {
        let pool = BufferPool::new();
        {
            let _buf = pool.checkout();
        }
        assert_eq!(pool.free.lock().unwrap().len(), 1);
        let _buf2 = pool.checkout();
        assert_eq!(pool.free.lock().unwrap().len(), 0);
    }
}
