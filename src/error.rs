use thiserror::Error;

#[derive(Error, Debug)]
pub enum BreedError {
    /// The API answered with an explicit `{ "error": ... }` payload.
    #[error("{0}")]
    Upstream(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("page {page} does not exist, last page is {last}")]
    PageOutOfRange { page: u32, last: u32 },

    #[error("Config error: {0}")]
    Config(String),
}

impl BreedError {
    /// Only network-level failures are worth repeating.
    pub fn is_retryable(&self) -> bool {
        matches!(self, BreedError::Transport(_))
    }
}

impl From<reqwest::Error> for BreedError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            BreedError::Decode(err.to_string())
        } else {
            BreedError::Transport(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, BreedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_message_is_shown_verbatim() {
        assert_eq!(BreedError::Upstream("boom".into()).to_string(), "boom");
    }

    #[test]
    fn only_transport_is_retryable() {
        assert!(BreedError::Transport("reset".into()).is_retryable());
        assert!(!BreedError::Upstream("boom".into()).is_retryable());
        assert!(!BreedError::Decode("bad json".into()).is_retryable());
        assert!(!BreedError::Config("zero".into()).is_retryable());
    }
}
