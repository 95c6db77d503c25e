use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("image could not be decoded: {0}")]
    Decode(String),

    #[error("no face detected")]
    NoFaceDetected,

    #[error("region provider failed: {0}")]
    Provider(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid rectangle: width {w} and height {h} must both be positive")]
    InvalidRect { w: i32, h: i32 },
}

impl Error {
    /// Process exit status reported for this failure.
    ///
    /// Decode failures and missing faces keep distinct statuses so a caller
    /// can tell a bad upload from a photo without a face.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Decode(_) => 1,
            Error::NoFaceDetected => 2,
            _ => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
