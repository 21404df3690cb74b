use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn out_of_range(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::OutOfRange {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn invalid_state(name: impl Into<String>) -> Error {
        Error(ErrorKind::InvalidState { name: name.into() }.into())
    }

    pub fn missing_arg(name: impl Into<String>) -> Error {
        Error(ErrorKind::MissingArgument { name: name.into() }.into())
    }

    pub fn incompatible_type(
        source_type: impl Into<String>,
        target_type: impl Into<String>,
    ) -> Error {
        Error(
            ErrorKind::IncompatibleType {
                source_type: source_type.into(),
                target_type: target_type.into(),
            }
            .into(),
        )
    }

    /// Returns `true` if this is an [`ErrorKind::OutOfRange`] error.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self.kind(), ErrorKind::OutOfRange { .. })
    }

    /// Returns `true` if this is an [`ErrorKind::InvalidState`] error.
    pub fn is_invalid_state(&self) -> bool {
        matches!(self.kind(), ErrorKind::InvalidState { .. })
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("argument {name} is out of range: {message}")]
    OutOfRange { name: String, message: String },

    #[error("invalid state for {name}: the instance is not initialized")]
    InvalidState { name: String },

    #[error("required argument {name} is missing")]
    MissingArgument { name: String },

    #[error("element type '{source_type}' is not assignable to '{target_type}'")]
    IncompatibleType {
        source_type: String,
        target_type: String,
    },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}
