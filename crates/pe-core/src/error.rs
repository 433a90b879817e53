use thiserror::Error;

pub type PeResult<T> = Result<T, PeError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PeError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
