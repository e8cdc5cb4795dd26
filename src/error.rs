use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WmError {
    #[error("no open window with id `{0}`")]
    UnknownWindow(String),
    #[error("invalid window config `{id}`: {reason}")]
    InvalidConfig { id: String, reason: String },
    #[error("`{0}` is not a valid hex color")]
    InvalidHex(String),
}

pub type WmResult<T> = Result<T, WmError>;
