//! CV download: copies the configured CV into the user's downloads folder

use crate::error::{AppError, Result};
use directories::UserDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Where downloads land: the platform download dir, else the home dir
pub fn downloads_dir() -> Option<PathBuf> {
    let dirs = UserDirs::new()?;
    Some(
        dirs.download_dir()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| dirs.home_dir().to_path_buf()),
    )
}

/// Copy `source` into `dest_dir` without overwriting existing files.
///
/// Returns the path written.
pub fn copy_cv(source: &Path, dest_dir: &Path) -> Result<PathBuf> {
    if !source.is_file() {
        return Err(AppError::FileNotFound(source.display().to_string()));
    }

    let file_name = source
        .file_name()
        .ok_or_else(|| AppError::DownloadError(format!("{} has no file name", source.display())))?;

    fs::create_dir_all(dest_dir).map_err(|e| {
        AppError::DownloadError(format!("cannot create {}: {}", dest_dir.display(), e))
    })?;

    let target = unique_target(dest_dir, Path::new(file_name));
    fs::copy(source, &target)?;
    tracing::info!("CV copied to {}", target.display());
    Ok(target)
}

/// `name.pdf`, then `name (1).pdf`, `name (2).pdf`, ...
fn unique_target(dir: &Path, file_name: &Path) -> PathBuf {
    let candidate = dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }

    let stem = file_name
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = file_name
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    (1..)
        .map(|n| dir.join(format!("{} ({}){}", stem, n, extension)))
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_into_new_directory() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("Resume.pdf");
        fs::write(&source, b"%PDF-1.4").unwrap();

        let dest = dir.path().join("Downloads");
        let written = copy_cv(&source, &dest).unwrap();

        assert_eq!(written, dest.join("Resume.pdf"));
        assert_eq!(fs::read(&written).unwrap(), b"%PDF-1.4");
    }

    #[test]
    fn test_existing_file_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("Resume.pdf");
        fs::write(&source, b"new").unwrap();
        let dest = dir.path().join("out");
        fs::create_dir_all(&dest).unwrap();
        fs::write(dest.join("Resume.pdf"), b"old").unwrap();

        let first = copy_cv(&source, &dest).unwrap();
        let second = copy_cv(&source, &dest).unwrap();

        assert_eq!(first, dest.join("Resume (1).pdf"));
        assert_eq!(second, dest.join("Resume (2).pdf"));
        assert_eq!(fs::read(dest.join("Resume.pdf")).unwrap(), b"old");
    }

    #[test]
    fn test_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let result = copy_cv(&dir.path().join("nope.pdf"), dir.path());
        assert!(matches!(result, Err(AppError::FileNotFound(_))));
    }
}
