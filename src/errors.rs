use thiserror::Error;

pub type DeskchatResult<T> = Result<T, DeskchatError>;

#[derive(Debug, Error)]
pub enum DeskchatError {
    #[error("api error: {0}")]
    Api(String),

    #[error("config error: {0}")]
    Config(String),
}

impl DeskchatError {
    pub fn api_error(msg: impl Into<String>) -> Self {
        DeskchatError::Api(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        DeskchatError::Config(msg.into())
    }
}
