use doudizhu_core::ProtocolError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid server url: {0}")]
    BadUrl(#[from] url::ParseError),
    #[error("connect timed out after {0:?}")]
    ConnectTimeout(std::time::Duration),
    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server rejected start: {0}")]
    StartRejected(String),
}
