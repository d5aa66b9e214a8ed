use std::io::Write;
use std::path::Path;

use super::ExportError;

/// Writes `bytes` to `path`, replacing it atomically.
///
/// The data goes to a temporary file in the destination directory which is
/// then renamed over `path`, so readers see either the previous artifact or
/// the complete new one.
pub fn write_file(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    let io_err = |source: std::io::Error| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(bytes).map_err(io_err)?;
    tmp.flush().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;
    Ok(())
}

pub fn read_file(path: &Path) -> Result<Vec<u8>, ExportError> {
    std::fs::read(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("frame.bin");

        write_file(&path, b"first").unwrap();
        assert_eq!(read_file(&path).unwrap(), b"first");

        write_file(&path, b"second, longer").unwrap();
        assert_eq!(read_file(&path).unwrap(), b"second, longer");
    }

    #[test]
    fn overwrite_leaves_no_temporaries() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.png");
        for i in 0..3u8 {
            write_file(&path, &[i; 16]).unwrap();
        }
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing").join("out.png");
        let err = write_file(&path, b"x").unwrap_err();
        match err {
            ExportError::Io { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!path.exists());
    }

    #[test]
    fn reading_missing_file_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(matches!(
            read_file(&dir.path().join("nope.png")),
            Err(ExportError::Io { .. })
        ));
    }
}
