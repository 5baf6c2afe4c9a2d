use std::io::Error as IoError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IOEntry {
    #[error("Unable to create directory {0}: {1}")]
    CreateDirectoryError(String, IoError),
    #[error("Unable to delete directory {0}: {1}")]
    DeleteDirectoryError(String, IoError),
    #[error("Unable to write file {0}: {1}")]
    WriteFileError(String, IoError),
    #[error("Unable to delete file {0}: {1}")]
    DeleteFileError(String, IoError),
}

impl From<IOEntry> for String {
    #[inline(always)]
    fn from(value: IOEntry) -> Self {
        value.to_string()
    }
}
