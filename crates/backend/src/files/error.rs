//! Error type for Finder operations.

use std::io;

use thiserror::Error;
use zip::result::ZipError;

/// Errors returned by Finder operations.
///
/// Store failures are carried through untouched: [`FinderError::Store`]
/// displays and sources exactly like the `io::Error` the transport
/// produced. Items skipped by the safety guard never show up here.
#[derive(Debug, Error)]
pub enum FinderError {
    /// The remote store reported a failure.
    #[error(transparent)]
    Store(#[from] io::Error),

    /// The zip writer rejected an entry or could not finish the archive.
    #[error("archive failed: {0}")]
    Archive(ZipError),
}

/// Result type alias for Finder operations.
pub type FinderResult<T> = std::result::Result<T, FinderError>;

impl From<ZipError> for FinderError {
    fn from(err: ZipError) -> Self {
        match err {
            ZipError::Io(io_err) => FinderError::Store(io_err),
            other => FinderError::Archive(other),
        }
    }
}

impl FinderError {
    /// The underlying store error, if this failure came from the store.
    pub fn as_store_error(&self) -> Option<&io::Error> {
        match self {
            FinderError::Store(err) => Some(err),
            FinderError::Archive(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_is_transparent() {
        let err: FinderError = io::Error::new(io::ErrorKind::NotFound, "no such file").into();
        assert_eq!(err.to_string(), "no such file");
        assert_eq!(err.as_store_error().unwrap().kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_zip_io_error_becomes_store_error() {
        let zip_err = ZipError::Io(io::Error::new(io::ErrorKind::BrokenPipe, "connection lost"));
        let err: FinderError = zip_err.into();
        assert!(matches!(err, FinderError::Store(_)));
        assert_eq!(err.to_string(), "connection lost");
    }

    #[test]
    fn test_zip_format_error_stays_archive_error() {
        let err: FinderError = ZipError::FileNotFound.into();
        assert!(matches!(err, FinderError::Archive(_)));
        assert!(err.as_store_error().is_none());
        assert!(err.to_string().starts_with("archive failed: "));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FinderError>();
    }
}
