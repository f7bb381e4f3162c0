use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    SizeMismatch {
        expected: usize,
        actual: usize,
    },
    InvalidStride,
    ImageTooSmall {
        width: usize,
        height: usize,
    },
    InvalidStrip {
        lower: usize,
        upper: usize,
        height: usize,
    },
    InvalidThreadCount,
    WorkerPanicked,
    SpawnFailed,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => {
                write!(f, "size mismatch: expected {expected}, got {actual}")
            }
            Self::InvalidStride => write!(f, "invalid stride"),
            Self::ImageTooSmall { width, height } => {
                write!(
                    f,
                    "image too small: {width}x{height} has no valid 3x3 neighborhood"
                )
            }
            Self::InvalidStrip {
                lower,
                upper,
                height,
            } => write!(
                f,
                "invalid strip [{lower}, {upper}) for input height {height}"
            ),
            Self::InvalidThreadCount => write!(f, "thread count must be at least 1"),
            Self::WorkerPanicked => write!(f, "strip worker panicked"),
            Self::SpawnFailed => write!(f, "could not spawn a strip worker thread"),
        }
    }
}

impl std::error::Error for Error {}
