use thiserror::Error;

/// Failures a weather request can surface to its caller.
///
/// Cache problems never show up here: the cache is an optimization and its
/// errors are logged and dropped by [`crate::WeatherService`].
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Provider unreachable, body unreadable, or non-success HTTP status.
    #[error("weather provider request failed: {0}")]
    Transport(String),

    /// Payload with an explicit error indicator or a shape we do not accept.
    #[error("malformed weather provider response: {0}")]
    MalformedResponse(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),
}

/// How a [`WeatherError`] is reported to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Server,
    Client,
    NotFound,
}

impl WeatherError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WeatherError::Transport(_) | WeatherError::MalformedResponse(_) => ErrorKind::Server,
            WeatherError::InvalidInput(_) => ErrorKind::Client,
            WeatherError::NotFound(_) => ErrorKind::NotFound,
        }
    }
}
