use thiserror::Error;

/// Every way a search call can fail.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid search server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("limit must be >= 0, got {0}")]
    NegativeLimit(i64),
    #[error("offset must be >= 0, got {0}")]
    NegativeOffset(i64),
    #[error("bad access token")]
    Unauthorized,
    #[error("search server fatal error (status {status})")]
    Server { status: u16 },
    #[error("order field {0:?} is invalid")]
    BadOrderField(String),
    #[error("unknown bad request error: {0}")]
    UnknownBadRequest(String),
    #[error("cannot unpack response JSON: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("request timed out: {0}")]
    Timeout(#[source] reqwest::Error),
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),
}

impl Error {
    /// Split reqwest failures into timeouts and everything else.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err)
        } else {
            Self::Transport(err)
        }
    }

    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    /// Connection-level failure, timeouts included.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout(_))
    }

    /// Rejected before any request was sent.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(
            self,
            Self::InvalidUrl(_) | Self::NegativeLimit(_) | Self::NegativeOffset(_)
        )
    }
}
