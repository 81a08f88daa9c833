use std::backtrace::Backtrace;
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Rejections raised while validating a puzzle description, before any
/// search work starts. These are recoverable and carry a reason the caller
/// can report verbatim.
#[derive(Debug, thiserror::Error)]
pub enum PuzzleError {
    #[error("bottle {index}: capacity must be a positive integer")]
    ZeroCapacity { index: usize },

    #[error("bottle {index}: holds {layers} layers but capacity is {capacity}")]
    Overfilled {
        index: usize,
        layers: usize,
        capacity: usize,
    },

    #[error("puzzle uses more than {limit} distinct colors")]
    TooManyColors { limit: usize },

    #[error("move ({from}, {to}) is out of range for {bottles} bottles")]
    MoveOutOfRange {
        from: usize,
        to: usize,
        bottles: usize,
    },

    #[error("move ({0}, {0}) pours a bottle into itself")]
    SelfPour(usize),

    #[error("{0}")]
    Custom(String),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Inner: {inner}\n{backtrace}")]
    Inner {
        inner: Box<PuzzleError>,
        backtrace: Box<Backtrace>,
    },
}

impl Error {
    /// The validation failure behind this error, without the backtrace.
    pub fn puzzle_error(&self) -> &PuzzleError {
        match self {
            Error::Inner { inner, .. } => inner,
        }
    }
}

impl From<PuzzleError> for Error {
    fn from(inner: PuzzleError) -> Self {
        Error::Inner {
            inner: Box::new(inner),
            backtrace: Box::new(std::backtrace::Backtrace::capture()),
        }
    }
}
