use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::parsing::{ParsedDoc, ReadError, parse_reader};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Reading stopped partway; the lines before the failure were still parsed.
    #[error(transparent)]
    Read(Box<ReadError>),
}

impl IoError {
    /// The best-effort document parsed before a mid-file read failure.
    pub fn partial(&self) -> Option<&ParsedDoc> {
        match self {
            IoError::Read(err) => Some(&err.partial),
            _ => None,
        }
    }
}

impl From<ReadError> for IoError {
    fn from(err: ReadError) -> Self {
        IoError::Read(Box::new(err))
    }
}

/// Open and parse a libretto file.
///
/// The file handle is owned by this call and closed on return, whether the
/// parse ran to the end or halted on a diagnostic.
pub fn read_libretto(path: &Path) -> Result<ParsedDoc, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let file = File::open(path)?;
    log::debug!("reading libretto from {}", path.display());
    Ok(parse_reader(BufReader::new(file))?)
}
