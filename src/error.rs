//! Error taxonomy for a conversion run.
//!
//! Every failure terminates the whole run: there is no partial output mode
//! and no retry. Argument errors carry distinct process exit codes so shell
//! scripts can tell the categories apart.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// All the ways a conversion run can fail.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Path mode was selected but no points file was given.
    #[error("no input points file was given")]
    MissingPointsFile,

    /// The requested duration is not a positive number of seconds.
    #[error("signal duration must be a positive number of seconds")]
    InvalidSeconds,

    /// The playback frequency is outside (0, 24000] Hz.
    #[error("frequency must be positive and at most 24000 Hz, got {0}")]
    InvalidFrequency(f64),

    /// The sample rate is not one of the supported set.
    #[error("unsupported sample rate {0} Hz (supported: 44100, 48000)")]
    UnsupportedSampleRate(u32),

    /// A line in the points file is neither a coordinate pair, a dimension
    /// line, nor the `#` terminator.
    #[error("line {line}: expected `x,y`, `height|width` or `#`, got `{content}`")]
    MalformedLine { line: usize, content: String },

    /// A canvas dimension is zero.
    #[error("canvas dimensions must be positive, got {height}x{width}")]
    InvalidCanvas { height: u32, width: u32 },

    /// The traced path has fewer than two points, so there is nothing to
    /// interpolate between.
    #[error("a path needs at least 2 points, got {0}")]
    InsufficientPoints(usize),

    /// The lookup table is longer than the signal that would play it.
    #[error("lookup table of {table_len} samples does not fit in {num_samples} output samples")]
    TableExceedsSignal {
        table_len: usize,
        num_samples: usize,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Process exit code for this error, one per argument category.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::MissingPointsFile => 1,
            Error::InvalidSeconds => 2,
            Error::InvalidFrequency(_) => 3,
            Error::UnsupportedSampleRate(_) => 4,
            Error::MalformedLine { .. } | Error::InvalidCanvas { .. } => 5,
            Error::InsufficientPoints(_) | Error::TableExceedsSignal { .. } => 6,
            Error::Io(_) => 7,
        }
    }
}
