//! All-or-nothing output: every file is staged next to its destination before any of them is
//! moved into place.

use std::io::Write;
use std::path::{Path, PathBuf};

use log::warn;
use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// Writes every `(path, contents)` pair, or none of them.
///
/// Contents are first written to temporary files in each destination's directory, so an
/// unwritable destination fails before anything is visible. The staged files are then renamed
/// into place; if a rename fails, the files already moved are removed again.
pub fn write_all(files: &[(PathBuf, Vec<u8>)]) -> Result<()> {
    let mut staged = Vec::with_capacity(files.len());
    for (path, contents) in files {
        staged.push(stage(path, contents)?);
    }

    let mut placed: Vec<&Path> = Vec::with_capacity(files.len());
    for (file, (path, _)) in staged.into_iter().zip(files) {
        if let Err(err) = file.persist(path) {
            for done in placed {
                if let Err(e) = std::fs::remove_file(done) {
                    warn!("could not remove {}: {}", done.display(), e);
                }
            }
            return Err(Error::Write {
                path: path.clone(),
                source: err.error,
            });
        }
        placed.push(path);
    }
    Ok(())
}

fn stage(path: &Path, contents: &[u8]) -> Result<NamedTempFile> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let write_err = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut file = NamedTempFile::new_in(dir).map_err(write_err)?;
    file.write_all(contents).map_err(write_err)?;
    file.flush().map_err(write_err)?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_every_file() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.svg");
        let b = dir.path().join("b.json");
        write_all(&[(a.clone(), b"<svg/>".to_vec()), (b.clone(), b"{}".to_vec())]).unwrap();
        assert_eq!(std::fs::read(&a).unwrap(), b"<svg/>");
        assert_eq!(std::fs::read(&b).unwrap(), b"{}");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_unwritable_destination_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("out.svg");
        let bad = dir.path().join("missing").join("preview.png");
        let files = [(good.clone(), b"<svg/>".to_vec()), (bad.clone(), vec![1, 2, 3])];
        let err = write_all(&files).unwrap_err();
        assert!(matches!(err, Error::Write { path, .. } if path == bad));
        assert!(!good.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_failed_rename_removes_placed_files() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("out.svg");
        // A directory cannot be replaced by a file, so staging succeeds but the rename fails.
        let blocked = dir.path().join("report.json");
        std::fs::create_dir_all(blocked.join("inner")).unwrap();
        let files = [
            (good.clone(), b"<svg/>".to_vec()),
            (blocked.clone(), b"{}".to_vec()),
        ];
        let err = write_all(&files).unwrap_err();
        assert!(matches!(err, Error::Write { path, .. } if path == blocked));
        assert!(!good.exists());
        assert!(blocked.is_dir());
    }
}
