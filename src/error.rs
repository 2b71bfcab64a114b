use std::{fmt, io};

#[derive(Debug)]
pub enum ManifestError {
    Io(io::Error),
    Json(serde_json::Error),
    /// The runtime was built for a different target than this toolchain.
    TargetMismatch {
        expected: String,
        found: String,
    },
}

impl fmt::Display for ManifestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to access runtime manifest: {err}"),
            Self::Json(err) => write!(f, "malformed runtime manifest: {err}"),
            Self::TargetMismatch { expected, found } => write!(
                f,
                "runtime was built for `{found}` but the toolchain targets `{expected}`"
            ),
        }
    }
}

impl std::error::Error for ManifestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::TargetMismatch { .. } => None,
        }
    }
}

impl From<io::Error> for ManifestError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for ManifestError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}
