use crate::Error;

/// Classified failures of the materializer.
///
/// Every other failure (query, column introspection, conversion) is returned
/// as the `anyhow::Error` produced by the executor or by the scan step.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    /// A single row was expected and the query produced none.
    #[error("The query returned no rows")]
    NoRows,
    /// The destination cannot receive the result in the requested mode.
    #[error("Unexpected destination shape: {0}")]
    Shape(String),
    /// A per row callback failed, iteration stopped.
    #[error("Row callback failed")]
    Callback(#[source] Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NoRows,
    Shape,
    Callback,
}

impl MapError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MapError::NoRows => ErrorKind::NoRows,
            MapError::Shape(..) => ErrorKind::Shape,
            MapError::Callback(..) => ErrorKind::Callback,
        }
    }
}

/// Kind of the outermost [`MapError`] in the chain, context layers included.
///
/// The error raised by a callback is not inspected: a callback returning a
/// `MapError::NoRows` is classified as `Callback`.
pub fn error_kind(error: &Error) -> Option<ErrorKind> {
    error
        .chain()
        .find_map(|v| v.downcast_ref::<MapError>())
        .map(MapError::kind)
}

pub fn is_kind(error: &Error, kind: ErrorKind) -> bool {
    error_kind(error) == Some(kind)
}
