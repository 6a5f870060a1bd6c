//! Adapter error types

use std::io;

use crate::domain::AttemptFailure;

/// Failure of a catalog, shell or process-control call
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    #[error("OS surface unavailable: {0}")]
    Unavailable(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("malformed name: {0}")]
    MalformedName(String),

    #[error("command timed out after {0:?}")]
    TimedOut(std::time::Duration),

    #[error("rejected: {0}")]
    Rejected(String),
}

impl AdapterError {
    /// Classify an I/O error raised while spawning or talking to a program
    pub fn from_io(context: &str, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => AdapterError::NotFound(format!("{}: {}", context, err)),
            io::ErrorKind::PermissionDenied => {
                AdapterError::PermissionDenied(format!("{}: {}", context, err))
            }
            io::ErrorKind::InvalidInput => {
                AdapterError::MalformedName(format!("{}: {}", context, err))
            }
            _ => AdapterError::Rejected(format!("{}: {}", context, err)),
        }
    }
}

impl From<AdapterError> for AttemptFailure {
    fn from(err: AdapterError) -> Self {
        match err {
            AdapterError::Unavailable(detail) => AttemptFailure::Unavailable(detail),
            AdapterError::NotFound(detail) => AttemptFailure::NotFound(detail),
            AdapterError::PermissionDenied(detail) => AttemptFailure::PermissionDenied(detail),
            AdapterError::MalformedName(detail) => AttemptFailure::MalformedName(detail),
            AdapterError::TimedOut(after) => {
                AttemptFailure::Rejected(format!("timed out after {:?}", after))
            }
            AdapterError::Rejected(detail) => AttemptFailure::Rejected(detail),
        }
    }
}

/// Failure to terminate a single process
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TerminateError {
    /// The process exited between enumeration and the signal
    #[error("process no longer exists")]
    NotFound,

    #[error("permission denied")]
    PermissionDenied,

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_classification() {
        let err = AdapterError::from_io("spawn", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, AdapterError::NotFound(_)));

        let err = AdapterError::from_io("spawn", io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, AdapterError::PermissionDenied(_)));

        let err = AdapterError::from_io("spawn", io::Error::from(io::ErrorKind::InvalidInput));
        assert!(matches!(err, AdapterError::MalformedName(_)));

        let err = AdapterError::from_io("spawn", io::Error::from(io::ErrorKind::BrokenPipe));
        assert!(matches!(err, AdapterError::Rejected(_)));
    }

    #[test]
    fn test_timeout_maps_to_rejected_attempt() {
        let failure: AttemptFailure =
            AdapterError::TimedOut(std::time::Duration::from_secs(3)).into();
        assert!(matches!(failure, AttemptFailure::Rejected(d) if d.contains("timed out")));
    }
}
