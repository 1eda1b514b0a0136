//! Turns a candidate path into a [`FileDescriptor`] by opening, canonicalizing, and hashing it.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest as _, Sha256};

use crate::cancel::CancellationToken;
use crate::engine::buffer_pool::BufferPool;
use crate::engine::semaphore::CountingSemaphore;
use crate::error::HashError;
use crate::types::{Digest, FileDescriptor, HashAlgorithm};

/// Open, hash, and describe one file.
///
/// Acquires a permit from `descriptors` before opening the file and holds it for the
/// duration of the read, bounding how many file descriptors the hashing stage has open at
/// once independent of how many directory-read descriptors the walker is holding. Returns
/// `Ok(None)` (not an error) if `cancel` fires while waiting for a permit — callers should
/// treat that as "stop, don't count this as a failure".
pub fn build(
    path: &Path,
    size: u64,
    algorithm: HashAlgorithm,
    descriptors: &CountingSemaphore,
    buffers: &BufferPool,
    cancel: &CancellationToken,
) -> Result<Option<FileDescriptor>, HashError> {
    if path.as_os_str().is_empty() {
        return Err(HashError::EmptyPath);
    }

    let canonical = path
        .canonicalize()
        .map_err(|source| HashError::Canonicalize {
            path: path.to_path_buf(),
            source,
        })?;

    let Some(_permit) = descriptors.acquire(cancel) else {
        return Ok(None);
    };

    let mut file = File::open(&canonical).map_err(|source| HashError::Open {
        path: canonical.clone(),
        source,
    })?;

    let digest = match algorithm {
        HashAlgorithm::Sha256 => hash_with(&mut file, &canonical, buffers, Sha256::new(), |h, b| {
            h.update(b)
        })?,
        HashAlgorithm::Blake3 => {
            hash_with(&mut file, &canonical, buffers, blake3::Hasher::new(), |h, b| {
                h.update(b);
            })?
        }
    };

    Ok(Some(FileDescriptor {
        path: canonical,
        size,
        digest,
    }))
}

/// Stream the file through `buffers`-pooled 1 MiB chunks into `hasher`, finalizing to a
/// [`Digest`]. Generic over the hasher so SHA-256 and BLAKE3 share one read loop.
fn hash_with<H>(
    file: &mut File,
    path: &Path,
    buffers: &BufferPool,
    mut hasher: H,
    update: impl Fn(&mut H, &[u8]),
) -> Result<Digest, HashError>
where
    H: Finalize32,
{
    let mut buf = buffers.checkout();
    loop {
        let n = file.read(&mut buf).map_err(|source| HashError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if n == 0 {
            break;
        }
        update(&mut hasher, &buf[..n]);
    }
    Ok(Digest(hasher.finalize32()))
}

/// Bridges SHA-256's and BLAKE3's differently-shaped `finalize` methods to one 32-byte
/// output so [`hash_with`] can stay generic.
trait Finalize32 {
    fn finalize32(self) -> [u8; 32];
}

impl Finalize32 for Sha256 {
    fn finalize32(self) -> [u8; 32] {
        self.finalize().into()
    }
}

impl Finalize32 for blake3::Hasher {
    fn finalize32(self) -> [u8; 32] {
        *self.finalize().as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::buffer_pool::BufferPool;
    use std::io::Write;

    fn build_with(algorithm: HashAlgorithm, contents: &[u8]) -> FileDescriptor {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("f.bin");
        std::fs::File::create(&path).unwrap().write_all(contents).unwrap();

        let descriptors = CountingSemaphore::new(4);
        let buffers = BufferPool::new();
        let cancel = CancellationToken::new();
        build(
            &path,
            contents.len() as u64,
            algorithm,
            &descriptors,
            &buffers,
            &cancel,
        )
        .unwrap()
        .unwrap()
    }

    #[test]
    fn sha256_is_deterministic() {
        let a = build_with(HashAlgorithm::Sha256, b"hello world");
        let b = build_with(HashAlgorithm::Sha256, b"hello world");
        assert_eq!(a.digest, b.digest);
    }

    #[test]
    fn different_content_differs() {
        let a = build_with(HashAlgorithm::Sha256, b"hello world");
        let b = build_with(HashAlgorithm::Sha256, b"hello there");
        assert_ne!(a.digest, b.digest);
    }

    #[test]
    fn algorithms_disagree_on_the_same_bytes() {
        let sha = build_with(HashAlgorithm::Sha256, b"hello world");
        let blake = build_with(HashAlgorithm::Blake3, b"hello world");
        assert_ne!(sha.digest, blake.digest);
    }

    #[test]
    fn cancelled_wait_for_a_descriptor_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("f.bin");
        std::fs::File::create(&path).unwrap().write_all(b"x").unwrap();

        let descriptors = CountingSemaphore::new(0);
        let buffers = BufferPool::new();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = build(&path, 1, HashAlgorithm::Sha256, &descriptors, &buffers, &cancel).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn empty_path_is_rejected_before_canonicalizing() {
        let descriptors = CountingSemaphore::new(4);
        let buffers = BufferPool::new();
        let cancel = CancellationToken::new();
        let err = build(
            Path::new(""),
            0,
            HashAlgorithm::Sha256,
            &descriptors,
            &buffers,
            &cancel,
        )
        .unwrap_err();
        assert!(matches!(err, HashError::EmptyPath));
    }

    #[test]
    fn missing_file_reports_canonicalize_error() {
        let descriptors = CountingSemaphore::new(4);
        let buffers = BufferPool::new();
        let cancel = CancellationToken::new();
        let err = build(
            Path::new("/nonexistent/path/for/dupescan/tests"),
            0,
            HashAlgorithm::Sha256,
            &descriptors,
            &buffers,
            &cancel,
        )
        .unwrap_err();
        assert!(matches!(err, HashError::Canonicalize { .. }));
    }
}
