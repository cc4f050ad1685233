use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("missing credential environment variable: {0}")]
    MissingCredential(String),

    #[error("failed to build http client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;
