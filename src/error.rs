use std::backtrace::Backtrace;
pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    /// The puzzle definition could not be read or parsed.
    #[error("puzzle data is missing or corrupt: {0}")]
    MissingData(String),

    /// The puzzle declares more colours than this engine supports.
    #[error("puzzle declares {colours} colours, but only 2 are supported")]
    IncompatiblePuzzle { colours: usize },

    /// The requested worker-pool configuration cannot be honoured.
    #[error("invalid worker configuration: {0}")]
    InvalidWorkerConfig(String),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Inner: {inner}\n{backtrace}")]
    Inner {
        inner: Box<SolverError>,
        backtrace: Box<Backtrace>,
    },
}

impl From<SolverError> for Error {
    fn from(inner: SolverError) -> Self {
        Error::Inner {
            inner: Box::new(inner),
            backtrace: Box::new(std::backtrace::Backtrace::capture()),
        }
    }
}

impl Error {
    /// The domain error this wrapper was built from.
    pub fn inner(&self) -> &SolverError {
        match self {
            Error::Inner { inner, .. } => inner,
        }
    }
}
