use thiserror::Error;

use crate::{Id, IdRange};

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

    pub fn id_out_of_range(id: Id, range: IdRange) -> Error {
        Error(ErrorKind::IdOutOfRange { id, range }.into())
    }

    pub fn range_out_of_domain(range: IdRange, max: Id) -> Error {
        Error(ErrorKind::RangeOutOfDomain { range, max }.into())
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("id {id} lies outside of the no-skip range {range}")]
    IdOutOfRange { id: Id, range: IdRange },

    #[error("range {range} exceeds the id domain upper bound {max}")]
    RangeOutOfDomain { range: IdRange, max: Id },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}
