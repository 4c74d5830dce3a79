//! Loads the archive file to upload. The whole file is buffered in
//! memory; swapping in a streaming reader later only has to honour the
//! [`ArchivePayload`] contract.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// The loaded archive. `length` always equals the stat-reported size at
/// the moment the content was read; the content is not touched again for
/// the rest of the run.
#[derive(Debug)]
pub struct ArchivePayload {
    pub content: Vec<u8>,
    pub length: u64,
    pub base_name: String,
}

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("error opening {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not stat file {}: {source}", .path.display())]
    Stat {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{} changed size during read (stat reported {expected} bytes, read {actual})", .path.display())]
    SizeMismatch {
        path: PathBuf,
        expected: u64,
        actual: u64,
    },
}

/// Opens, stats and fully reads the file at `path`. The file handle is
/// dropped (closed) on every path out of this function.
pub fn load(path: &Path) -> Result<ArchivePayload, ArchiveError> {
    let mut file = File::open(path).map_err(|source| ArchiveError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let length = file
        .metadata()
        .map_err(|source| ArchiveError::Stat {
            path: path.to_path_buf(),
            source,
        })?
        .len();

    let mut content = Vec::with_capacity(length as usize);
    file.read_to_end(&mut content)
        .map_err(|source| ArchiveError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    if content.len() as u64 != length {
        return Err(ArchiveError::SizeMismatch {
            path: path.to_path_buf(),
            expected: length,
            actual: content.len() as u64,
        });
    }

    let base_name = path
        .file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned();

    Ok(ArchivePayload {
        content,
        length,
        base_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_content_length_and_base_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("capture.zip");
        let mut file = File::create(&path).unwrap();
        file.write_all(b"PK\x03\x04payload bytes").unwrap();
        drop(file);

        let payload = load(&path).unwrap();
        assert_eq!(payload.content, b"PK\x03\x04payload bytes");
        assert_eq!(payload.length, payload.content.len() as u64);
        assert_eq!(payload.base_name, "capture.zip");
    }

    #[test]
    fn empty_file_loads_as_empty_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.zip");
        File::create(&path).unwrap();

        let payload = load(&path).unwrap();
        assert!(payload.content.is_empty());
        assert_eq!(payload.length, 0);
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("absent.zip")).unwrap_err();
        assert!(matches!(err, ArchiveError::Open { .. }));
        assert!(err.to_string().contains("absent.zip"));
    }
}
