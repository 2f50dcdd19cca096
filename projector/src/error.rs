pub type Result<T> = std::result::Result<T, ProjectorError>;

/// Struct to represent IO errors.
#[derive(Debug)]
pub struct IoErrorStruct {
    /// The type of IO error.
    error_type: String,

    /// The error message.
    msg: String,
}

/// Struct to represent validation errors.
#[derive(Debug)]
pub struct ValidationErrorStruct {
    /// The error message.
    msg: String,
}

/// Struct to represent request errors.
#[derive(Debug)]
pub struct RequestErrorStruct {
    /// The error message.
    msg: String,
}

/// Struct to represent frame encoding errors.
#[derive(Debug)]
pub struct EncodingErrorStruct {
    /// The error message.
    msg: String,
}

/// Enum to represent different types of projector errors.
#[derive(Debug)]
pub enum ProjectorError {
    IoError(IoErrorStruct),
    ValidationError(ValidationErrorStruct),
    RequestError(RequestErrorStruct),
    EncodingError(EncodingErrorStruct),
}

impl ProjectorError {
    /// Create a new validation error.
    ///
    /// # Arguments
    /// * `msg` - The error message.
    ///
    /// # Returns
    /// A `ProjectorError` instance representing a validation error.
    pub fn validation_error(msg: &str) -> Self {
        ProjectorError::ValidationError(ValidationErrorStruct {
            msg: msg.to_string(),
        })
    }
}

impl std::fmt::Display for ProjectorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectorError::IoError(io_err) => {
                write!(f, "IO {} Error: {}", io_err.error_type, io_err.msg)
            }
            ProjectorError::ValidationError(validation_err) => {
                write!(f, "Validation Error: {}", validation_err.msg)
            }
            ProjectorError::RequestError(request_err) => {
                write!(f, "Request Error: {}", request_err.msg)
            }
            ProjectorError::EncodingError(encoding_err) => {
                write!(f, "Encoding Error: {}", encoding_err.msg)
            }
        }
    }
}

impl std::error::Error for ProjectorError {}

impl From<std::io::Error> for ProjectorError {
    fn from(error: std::io::Error) -> Self {
        ProjectorError::IoError(IoErrorStruct {
            error_type: error.kind().to_string(),
            msg: error.to_string(),
        })
    }
}

impl From<reqwest::Error> for ProjectorError {
    fn from(error: reqwest::Error) -> Self {
        ProjectorError::RequestError(RequestErrorStruct {
            msg: error.to_string(),
        })
    }
}

impl From<serde_json::Error> for ProjectorError {
    fn from(error: serde_json::Error) -> Self {
        ProjectorError::EncodingError(EncodingErrorStruct {
            msg: error.to_string(),
        })
    }
}
