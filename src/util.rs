use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::Result;

/// Formats the given [Duration] as "MM:SSs"
pub fn format_time(t: Duration) -> String {
    let minutes = t.as_secs() / 60;
    let seconds = t.as_secs() % 60;
    format!("{:02}:{:02}s", minutes, seconds)
}

/// Formats a number of seconds as "MM:SSs".
///
/// Values that do not fit in a [Duration] (negative, NaN or too large) are printed as plain
/// seconds instead.
pub fn format_secs(secs: f64) -> String {
    match Duration::try_from_secs_f64(secs) {
        Ok(t) => format_time(t),
        Err(_) => format!("{:e}s", secs),
    }
}

/// Expands a list of files and directories into a sorted list of fingerprint files.
///
/// Directories are not searched recursively. Hidden files (starting with a `.`) found inside a
/// directory are ignored; files passed in directly are always kept.
pub fn find_fingerprint_files(paths: &[impl AsRef<Path>]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        let path = path.as_ref();
        if !path.is_dir() {
            files.push(path.to_owned());
            continue;
        }

        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            let is_hidden = entry.file_name().to_string_lossy().starts_with('.');
            if entry.file_type()?.is_file() && !is_hidden {
                files.push(entry.path());
            }
        }
    }

    files.sort();
    files.dedup();

    Ok(files)
}
