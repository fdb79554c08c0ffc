use std::backtrace::Backtrace;

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// A mistake in how the problem was put together, caught before any search
/// runs. Propagation and search failures are never errors; they are ordinary
/// `false`/`None` outcomes of the solving process.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("variable `{0}` is already registered")]
    DuplicateVariable(String),
    #[error("constraint references unknown variable `{0}`")]
    UnknownVariable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Model: {inner}\n{backtrace}")]
    Model {
        inner: Box<ModelError>,
        backtrace: Box<Backtrace>,
    },
}

impl From<ModelError> for Error {
    fn from(inner: ModelError) -> Self {
        Error::Model {
            inner: Box::new(inner),
            backtrace: Box::new(std::backtrace::Backtrace::capture()),
        }
    }
}
