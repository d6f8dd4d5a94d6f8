use thiserror::Error;

/// Rendering and encoding errors
#[derive(Error, Debug)]
pub enum IcalError {
    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error(transparent)]
    CoreError(#[from] icsgen_core::error::CoreError),
}

pub type IcalResult<T> = std::result::Result<T, IcalError>;
