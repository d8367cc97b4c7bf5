//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "fleet";
const APPLICATION: &str = "fleet";

/// Name of the log file written by the current run.
const LATEST_LOG: &str = "latest.log";

/// Maximum number of old log files to keep.
const MAX_OLD_LOGS: usize = 25;

/// Get project directories, or None if home directory cannot be determined.
fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the cache directory for logs.
///
/// - Linux: `$XDG_CACHE_HOME/fleet` or `~/.cache/fleet`
/// - macOS: `~/Library/Caches/dev.fleet.fleet`
/// - Windows: `C:\Users\<User>\AppData\Local\fleet\fleet\cache`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Get the config directory for the settings file.
///
/// - Linux: `$XDG_CONFIG_HOME/fleet` or `~/.config/fleet`
/// - macOS: `~/Library/Application Support/dev.fleet.fleet`
/// - Windows: `C:\Users\<User>\AppData\Roaming\fleet\fleet\config`
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the settings file.
pub fn settings_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("settings.json"))
}

/// Get the path to the latest log file.
pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(LATEST_LOG))
}

/// Archives the previous run's log and prunes old archives.
///
/// Fails when the previous log cannot be moved aside, in which case the
/// caller must not truncate it.
pub fn rotate_logs() -> io::Result<()> {
    let Some(cache) = cache_dir() else {
        return Ok(());
    };
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
    archive_latest(&cache, &stamp)?;
    prune_archives(&cache, MAX_OLD_LOGS)
}

fn archive_latest(cache: &Path, stamp: &str) -> io::Result<()> {
    let latest = cache.join(LATEST_LOG);
    if !latest.exists() {
        return Ok(());
    }
    fs::rename(&latest, cache.join(format!("{}.log", stamp)))
}

/// Deletes archived logs beyond the newest `keep`. Every archive is
/// attempted; the first failure is returned.
fn prune_archives(cache: &Path, keep: usize) -> io::Result<()> {
    let mut archives = Vec::new();
    for entry in fs::read_dir(cache)? {
        let entry = entry?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if !name.ends_with(".log") || name == LATEST_LOG {
            continue;
        }
        let modified = entry.metadata()?.modified()?;
        archives.push((modified, entry.path()));
    }

    // newest first
    archives.sort_by(|a, b| b.0.cmp(&a.0));

    let mut first_err = None;
    for (_, path) in archives.into_iter().skip(keep) {
        if let Err(e) = fs::remove_file(&path) {
            first_err.get_or_insert(e);
        }
    }
    first_err.map_or(Ok(()), Err)
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, UNIX_EPOCH};

    use super::*;

    #[test]
    fn test_archive_moves_latest_aside() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(LATEST_LOG), "old run").unwrap();

        archive_latest(dir.path(), "20240101_120000").unwrap();

        assert!(!dir.path().join(LATEST_LOG).exists());
        let archived = fs::read_to_string(dir.path().join("20240101_120000.log")).unwrap();
        assert_eq!(archived, "old run");
    }

    #[test]
    fn test_archive_without_latest_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        assert!(archive_latest(dir.path(), "20240101_120000").is_ok());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_archive_failure_keeps_latest() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(LATEST_LOG), "old run").unwrap();
        // a non-empty directory at the target path makes the rename fail
        let blocker = dir.path().join("20240101_120000.log");
        fs::create_dir(&blocker).unwrap();
        fs::write(blocker.join("keep"), "").unwrap();

        assert!(archive_latest(dir.path(), "20240101_120000").is_err());

        let latest = fs::read_to_string(dir.path().join(LATEST_LOG)).unwrap();
        assert_eq!(latest, "old run");
    }

    #[test]
    fn test_prune_keeps_newest_and_latest() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..5 {
            let path = dir.path().join(format!("2024010{}_000000.log", i));
            fs::write(&path, "").unwrap();
            let mtime = UNIX_EPOCH + Duration::from_secs(1_000 * (i + 1));
            let file = fs::File::options().write(true).open(&path).unwrap();
            file.set_modified(mtime).unwrap();
        }
        fs::write(dir.path().join(LATEST_LOG), "").unwrap();
        fs::write(dir.path().join("settings.json"), "{}").unwrap();

        prune_archives(dir.path(), 2).unwrap();

        let mut remaining: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        remaining.sort();
        assert_eq!(
            remaining,
            vec![
                "20240103_000000.log".to_string(),
                "20240104_000000.log".to_string(),
                LATEST_LOG.to_string(),
                "settings.json".to_string(),
            ]
        );
    }
}
