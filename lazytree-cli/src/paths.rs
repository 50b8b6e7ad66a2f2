//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::SystemTime;

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "lazytree";
const APPLICATION: &str = "lazytree";

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
/// - Linux: `$XDG_CACHE_HOME/lazytree` or `~/.cache/lazytree`
/// - macOS: `~/Library/Caches/dev.lazytree.lazytree`
/// - Windows: `C:\Users\<User>\AppData\Local\lazytree\lazytree\cache`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Get the path to the latest log file.
pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(LATEST_LOG))
}

/// Archives the previous run's log and prunes old archives.
///
/// `latest.log` is renamed after the current local time
/// (`YYYYmmdd_HHMMSS.log`, with a `-N` suffix if that name is taken) and
/// only the newest [`MAX_OLD_LOGS`] archives are kept. Call this before the
/// new log file is created. Errors are ignored: logging is not up yet.
pub fn rotate_logs(dir: &Path) {
    let latest = dir.join(LATEST_LOG);
    if latest.is_file() {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
        let _ = fs::rename(&latest, free_archive_path(dir, &stamp));
    }
    prune_archives(dir, MAX_OLD_LOGS);
}

fn free_archive_path(dir: &Path, stamp: &str) -> PathBuf {
    let mut path = dir.join(format!("{stamp}.log"));
    let mut n = 1;
    while path.exists() {
        path = dir.join(format!("{stamp}-{n}.log"));
        n += 1;
    }
    path
}

/// Archived logs are every `.log` file except the one being written.
fn is_archive(path: &Path) -> bool {
    path.is_file()
        && path.extension().is_some_and(|ext| ext == "log")
        && path.file_name().is_some_and(|name| name != LATEST_LOG)
}

/// Deletes all but the `keep` newest archives. Returns how many were removed.
///
/// Archive names sort chronologically, so the name breaks ties between
/// files written within the same second.
fn prune_archives(dir: &Path, keep: usize) -> usize {
    let Ok(entries) = fs::read_dir(dir) else {
        return 0;
    };

    let mut archives: Vec<(Option<SystemTime>, PathBuf)> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| is_archive(path))
        .map(|path| (fs::metadata(&path).and_then(|m| m.modified()).ok(), path))
        .collect();
    archives.sort_by(|a, b| b.cmp(a));

    archives
        .into_iter()
        .skip(keep)
        .filter(|(_, path)| fs::remove_file(path).is_ok())
        .count()
}
