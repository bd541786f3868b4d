use thiserror::Error;

/// Errors produced while seeding a grid or loading it into an engine.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read seed source: {0}")]
    Io(#[from] std::io::Error),

    /// The seed source is not valid text in the expected format.
    #[error("malformed seed at line {line}: {message}")]
    Format { line: usize, message: String },

    /// A coordinate lies outside the grid. Coordinates are kept signed
    /// so that negative values from seed files can be reported as given.
    #[error("cell ({x}, {y}) is outside the {cols}x{rows} grid")]
    OutOfBounds {
        x: i64,
        y: i64,
        cols: usize,
        rows: usize,
    },

    #[error("grid is {actual_cols}x{actual_rows}, engine expects {cols}x{rows}")]
    DimensionMismatch {
        cols: usize,
        rows: usize,
        actual_cols: usize,
        actual_rows: usize,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn format(line: usize, message: impl Into<String>) -> Self {
        Self::Format {
            line,
            message: message.into(),
        }
    }
}
