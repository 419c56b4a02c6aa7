use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Upstream API error: {0}")]
    Upstream(String),
    #[error("No audio file uploaded")]
    MissingAudio,
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Upstream(format!("Request timed out: {err}"))
        } else {
            Error::Upstream(err.to_string())
        }
    }
}
