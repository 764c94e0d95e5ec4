use std::sync::Arc;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when configuring or writing a text cascade.
#[derive(thiserror::Error, Debug, Clone)]
pub enum Error {
    /// Step count in `steps(N, ...)` is not a positive integer.
    #[error("invalid number of steps '{0}' in timing function")]
    InvalidStepCount(String),
    /// Step position in `steps(N, position)` is not a known jump term.
    #[error("invalid step position '{0}' in timing function")]
    InvalidStepPosition(String),
    /// `steps(N)` was given without a step position.
    #[error("steps() requires a step position: {0}")]
    MissingStepPosition(String),
    /// Value is neither a known keyword nor a `steps()` function.
    #[error("unsupported timing function: {0}")]
    UnsupportedTimingFunction(String),

    /// Animation duration is negative or not a finite number.
    #[error("animation duration must be a non-negative number, got {0}")]
    InvalidDuration(f64),

    /// I/O error occurred while writing the document.
    #[error(transparent)]
    Io(Arc<std::io::Error>),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failed_rule() {
        assert!(Error::InvalidStepCount("0".into())
            .to_string()
            .contains("number of steps"));
        assert!(Error::InvalidStepPosition("middle".into())
            .to_string()
            .contains("step position"));
        assert!(Error::MissingStepPosition("steps(3)".into())
            .to_string()
            .contains("requires a step position"));
        assert!(Error::UnsupportedTimingFunction("cubic".into())
            .to_string()
            .starts_with("unsupported timing function"));
    }

    #[test]
    fn io_errors_convert() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone").into();
        assert_eq!(err.to_string(), "gone");
    }
}
