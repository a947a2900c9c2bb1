use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Where a file lands inside the backup directory: the original path with
/// its drive prefix / root stripped, so the tree structure is preserved.
pub fn mirror_path(backup_dir: &Path, original: &Path) -> PathBuf {
    let relative: PathBuf = original
        .components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .collect();
    backup_dir.join(relative)
}

/// Copy a file into the backup directory, preserving its relative
/// structure, then unlink the original. Returns bytes freed.
///
/// Not transactional: if the unlink fails after a successful copy the
/// backup is kept and the error is returned for logging.
pub fn backup_and_delete(path: &Path, backup_dir: &Path) -> Result<u64> {
    let dest = mirror_path(backup_dir, path);
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::from_io(e, parent))?;
    }
    let copied = std::fs::copy(path, &dest).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            // source vanished; the destination parents were just created
            Error::FileNotFound(path.to_path_buf())
        } else {
            Error::Backup {
                from: path.to_path_buf(),
                to: dest.clone(),
                source: e,
            }
        }
    })?;
    std::fs::remove_file(path).map_err(|e| Error::from_io(e, path))?;
    Ok(copied)
}

/// Resolve the default backup directory next to the executable and
/// create it if missing, matching where the desktop build keeps it.
pub fn setup_backup_directory() -> Result<PathBuf> {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));
    let backup_dir = exe_dir.join("backup");
    std::fs::create_dir_all(&backup_dir).map_err(|e| Error::from_io(e, &backup_dir))?;
    Ok(backup_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirror_path_strips_root() {
        let dest = mirror_path(Path::new("/backups"), Path::new("/tmp/cache/a.txt"));
        assert_eq!(dest, Path::new("/backups/tmp/cache/a.txt"));
    }

    #[test]
    fn backup_then_delete_moves_content() {
        let src_dir = tempfile::tempdir().unwrap();
        let backup_dir = tempfile::tempdir().unwrap();
        let file = src_dir.path().join("report.log");
        std::fs::write(&file, b"important bytes").unwrap();

        let freed = backup_and_delete(&file, backup_dir.path()).unwrap();
        assert_eq!(freed, 15);
        assert!(!file.exists());

        let copy = mirror_path(backup_dir.path(), &file);
        assert_eq!(std::fs::read(copy).unwrap(), b"important bytes");
    }

    #[test]
    fn blocked_destination_names_both_paths() {
        let src_dir = tempfile::tempdir().unwrap();
        let backup_dir = tempfile::tempdir().unwrap();
        let file = src_dir.path().join("data.txt");
        std::fs::write(&file, b"payload").unwrap();

        // occupy the mirror destination with a directory so the copy fails
        let dest = mirror_path(backup_dir.path(), &file);
        std::fs::create_dir_all(&dest).unwrap();

        let err = backup_and_delete(&file, backup_dir.path()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains(src_dir.path().to_str().unwrap()));
        assert!(msg.contains(backup_dir.path().to_str().unwrap()));
        assert!(!err.is_not_found());

        // original stays put when the backup copy fails
        assert_eq!(std::fs::read(&file).unwrap(), b"payload");
    }

    #[test]
    fn missing_source_reports_not_found() {
        let backup_dir = tempfile::tempdir().unwrap();
        let err = backup_and_delete(Path::new("/no/such/file.txt"), backup_dir.path())
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
