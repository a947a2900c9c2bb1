use std::io::{Seek, SeekFrom, Write};
use std::path::Path;

use rand::RngCore;

use crate::error::{Error, Result};

const CHUNK_SIZE: usize = 65536;

/// Default number of overwrite passes.
pub const DEFAULT_PASSES: u32 = 3;

/// Securely shred a file: overwrite its full length with random bytes
/// `passes` times, syncing after each pass, then unlink it.
/// Returns bytes freed on success.
pub fn shred_file(path: &Path, passes: u32) -> Result<u64> {
    let size = std::fs::metadata(path)
        .map_err(|e| Error::from_io(e, path))?
        .len();

    if size == 0 {
        std::fs::remove_file(path).map_err(|e| Error::from_io(e, path))?;
        return Ok(0);
    }

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .open(path)
        .map_err(|e| Error::from_io(e, path))?;

    let mut rng = rand::rng();
    let mut buf = vec![0u8; CHUNK_SIZE];

    for _ in 0..passes {
        file.seek(SeekFrom::Start(0))
            .map_err(|e| Error::from_io(e, path))?;
        let mut remaining = size;

        while remaining > 0 {
            let chunk = remaining.min(CHUNK_SIZE as u64) as usize;
            rng.fill_bytes(&mut buf[..chunk]);
            file.write_all(&buf[..chunk])
                .map_err(|e| Error::from_io(e, path))?;
            remaining -= chunk as u64;
        }

        file.flush().map_err(|e| Error::from_io(e, path))?;
        file.sync_all().map_err(|e| Error::from_io(e, path))?;
    }

    drop(file);
    std::fs::remove_file(path).map_err(|e| Error::from_io(e, path))?;
    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shreds_and_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("secret.bin");
        std::fs::write(&target, vec![0xAB; 200_000]).unwrap();

        let freed = shred_file(&target, DEFAULT_PASSES).unwrap();
        assert_eq!(freed, 200_000);
        assert!(!target.exists());
    }

    #[test]
    fn empty_file_is_just_removed() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("empty");
        std::fs::write(&target, b"").unwrap();

        assert_eq!(shred_file(&target, DEFAULT_PASSES).unwrap(), 0);
        assert!(!target.exists());
    }

    #[test]
    fn missing_file_reports_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = shred_file(&dir.path().join("gone"), DEFAULT_PASSES).unwrap_err();
        assert!(err.is_not_found());
    }
}
