use std::fs;
use std::path::{Path, PathBuf};

use crate::backup;
use crate::error::Error;
use crate::report::{emit, ReportSink, Severity};
use crate::shredder;
use crate::utils;

/// How each file encountered during a pass is disposed of.
/// Chosen once per request and applied uniformly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisposalStrategy {
    /// Unlink directly.
    Plain,
    /// Overwrite with random bytes before unlinking.
    Secure { passes: u32 },
    /// Copy into the target directory, mirroring the original path
    /// structure, then unlink.
    Backup { target: PathBuf },
}

impl DisposalStrategy {
    /// Build from the legacy flag pair used by the config file.
    /// When both are set, backup wins and the secure flag is ignored;
    /// `strategy_precedence` in the tests pins this down.
    pub fn from_flags(secure: bool, backup_dir: Option<PathBuf>) -> Self {
        match backup_dir {
            Some(target) => DisposalStrategy::Backup { target },
            None if secure => DisposalStrategy::Secure {
                passes: shredder::DEFAULT_PASSES,
            },
            None => DisposalStrategy::Plain,
        }
    }
}

/// One cleanup pass over a single root directory.
#[derive(Debug, Clone)]
pub struct CleanupRequest {
    pub root: PathBuf,
    pub exclusions: Vec<PathBuf>,
    pub strategy: DisposalStrategy,
}

impl CleanupRequest {
    /// Build a request from raw path strings. Root and exclusions get
    /// environment variables expanded and are made absolute so that
    /// exclusion matching compares like with like.
    pub fn new(root: &str, exclusions: &[String], strategy: DisposalStrategy) -> Self {
        CleanupRequest {
            root: utils::normalize_path(root),
            exclusions: exclusions.iter().map(|e| utils::normalize_path(e)).collect(),
            strategy,
        }
    }
}

/// The deletion engine. Walks the requested root, disposes files per
/// strategy, removes subdirectories wholesale, and reports every
/// outcome through the tracing log plus the optional sink.
pub struct Engine<'a> {
    sink: Option<&'a mut dyn ReportSink>,
    files_removed: u64,
    dirs_removed: u64,
    bytes_freed: u64,
}

impl<'a> Engine<'a> {
    pub fn new(sink: Option<&'a mut dyn ReportSink>) -> Self {
        Engine {
            sink,
            files_removed: 0,
            dirs_removed: 0,
            bytes_freed: 0,
        }
    }

    /// Run one cleanup pass. Every per-item failure is caught, logged
    /// and skipped; this never fails as a whole. A missing root is a
    /// logged no-op.
    pub fn run(&mut self, request: &CleanupRequest) {
        if !request.root.exists() {
            self.emit(
                Severity::Warning,
                &format!("directory {} does not exist", request.root.display()),
            );
            return;
        }

        self.walk(&request.root, request);

        self.emit(
            Severity::Info,
            &format!(
                "cleanup of {} complete: {} files and {} directories removed, {} freed",
                request.root.display(),
                self.files_removed,
                self.dirs_removed,
                utils::format_size(self.bytes_freed)
            ),
        );
    }

    /// Top-down walk: dispose this directory's files one by one, then
    /// remove each non-excluded subdirectory in a single recursive call.
    fn walk(&mut self, dir: &Path, request: &CleanupRequest) {
        let entries = match fs::read_dir(dir) {
            Ok(it) => it,
            Err(e) => {
                self.report_failure(&Error::from_io_dir(e, dir));
                return;
            }
        };

        let mut files = Vec::new();
        let mut subdirs = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    self.emit(
                        Severity::Warning,
                        &format!("could not read an entry in {}: {e}", dir.display()),
                    );
                    continue;
                }
            };
            // symlinks are unlinked like files, never followed
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            if is_dir {
                subdirs.push(entry.path());
            } else {
                files.push(entry.path());
            }
        }

        for file in files {
            if request.exclusions.contains(&file) {
                self.emit(Severity::Debug, &format!("excluded: {}", file.display()));
                continue;
            }
            self.dispose_file(&file, &request.strategy);
        }

        for sub in subdirs {
            if request.exclusions.contains(&sub) {
                self.emit(
                    Severity::Info,
                    &format!("directory {} excluded from deletion", sub.display()),
                );
                continue;
            }
            self.remove_subdir(&sub, request);
        }
    }

    fn dispose_file(&mut self, path: &Path, strategy: &DisposalStrategy) {
        let outcome = match strategy {
            DisposalStrategy::Plain => {
                let size = path.metadata().map(|m| m.len()).unwrap_or(0);
                fs::remove_file(path)
                    .map(|_| size)
                    .map_err(|e| Error::from_io(e, path))
            }
            DisposalStrategy::Secure { passes } => shredder::shred_file(path, *passes),
            DisposalStrategy::Backup { target } => backup::backup_and_delete(path, target),
        };

        match outcome {
            Ok(freed) => {
                self.files_removed += 1;
                self.bytes_freed += freed;
                let verb = match strategy {
                    DisposalStrategy::Plain => "deleted",
                    DisposalStrategy::Secure { .. } => "securely deleted",
                    DisposalStrategy::Backup { .. } => "backed up and deleted",
                };
                self.emit(Severity::Info, &format!("{verb}: {}", path.display()));
            }
            Err(e) if e.is_not_found() => {
                self.emit(
                    Severity::Warning,
                    &format!("file {} was already gone", path.display()),
                );
            }
            Err(e) => self.report_failure(&e),
        }
    }

    fn remove_subdir(&mut self, path: &Path, request: &CleanupRequest) {
        let size = utils::dir_size(path);
        match fs::remove_dir_all(path) {
            Ok(()) => {
                self.dirs_removed += 1;
                self.bytes_freed += size;
                self.emit(
                    Severity::Info,
                    &format!("removed directory: {}", path.display()),
                );
            }
            Err(e) => {
                let err = Error::from_io_dir(e, path);
                if err.is_not_found() {
                    self.emit(
                        Severity::Warning,
                        &format!("directory {} was already gone", path.display()),
                    );
                    return;
                }
                self.report_failure(&err);
                // best effort: keep going file by file inside whatever
                // the failed removal left behind
                self.walk(path, request);
            }
        }
    }

    fn report_failure(&mut self, err: &Error) {
        match err {
            Error::PermissionDenied(path) => self.emit(
                Severity::Error,
                &format!(
                    "access denied: {}. Try running as administrator.",
                    path.display()
                ),
            ),
            other => self.emit(Severity::Error, &other.to_string()),
        }
    }

    fn emit(&mut self, severity: Severity, message: &str) {
        emit(&mut self.sink, severity, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::MemorySink;

    #[test]
    fn strategy_precedence() {
        // observed behavior of the original flag pair: backup beats secure
        let strategy = DisposalStrategy::from_flags(true, Some(PathBuf::from("/backups")));
        assert_eq!(
            strategy,
            DisposalStrategy::Backup {
                target: PathBuf::from("/backups")
            }
        );

        assert_eq!(
            DisposalStrategy::from_flags(true, None),
            DisposalStrategy::Secure { passes: 3 }
        );
        assert_eq!(
            DisposalStrategy::from_flags(false, None),
            DisposalStrategy::Plain
        );
    }

    #[test]
    fn permission_failures_carry_admin_hint() {
        let mut mem = MemorySink::default();
        let mut engine = Engine::new(Some(&mut mem));
        engine.report_failure(&Error::PermissionDenied(PathBuf::from("/locked/file.tmp")));

        assert!(mem.lines[0].starts_with("ERROR:"));
        assert!(mem.lines[0].contains("Try running as administrator"));
    }

    #[test]
    fn generic_failures_have_no_admin_hint() {
        let mut mem = MemorySink::default();
        let mut engine = Engine::new(Some(&mut mem));
        engine.report_failure(&Error::Io {
            path: PathBuf::from("/busy/file.tmp"),
            source: std::io::Error::other("device busy"),
        });

        assert!(mem.lines[0].starts_with("ERROR:"));
        assert!(mem.lines[0].contains("device busy"));
        assert!(!mem.lines[0].contains("administrator"));
    }

    #[test]
    fn vanished_file_is_benign() {
        let dir = tempfile::tempdir().unwrap();
        let ghost = dir.path().join("ghost.tmp");

        let mut mem = MemorySink::default();
        let mut engine = Engine::new(Some(&mut mem));
        engine.dispose_file(&ghost, &DisposalStrategy::Plain);

        assert_eq!(engine.files_removed, 0);
        assert!(mem.lines[0].starts_with("WARNING:"));
        assert!(mem.lines[0].contains("already gone"));
    }

    #[test]
    fn missing_root_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let request = CleanupRequest {
            root: dir.path().join("never-created"),
            exclusions: vec![],
            strategy: DisposalStrategy::Plain,
        };

        let mut mem = MemorySink::default();
        Engine::new(Some(&mut mem)).run(&request);

        assert_eq!(mem.lines.len(), 1);
        assert!(mem.lines[0].starts_with("WARNING:"));
        assert!(mem.lines[0].contains("does not exist"));
    }
}
