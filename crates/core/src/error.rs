use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Configuration error: missing {0}")]
    MissingConfig(&'static str),
}
