//! Errors surfaced by the headless client.

use tokio_tungstenite::tungstenite;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid websocket URL `{0}`; expected ws:// or wss://")]
    InvalidUrl(String),
    #[error("invalid movement key `{0}`; expected one of w, a, s, d")]
    InvalidKey(String),
    #[error("websocket connect failed: {0}")]
    Connect(Box<tungstenite::Error>),
    #[error("websocket send failed: {0}")]
    Send(Box<tungstenite::Error>),
    #[error("websocket receive failed: {0}")]
    Receive(Box<tungstenite::Error>),
    #[error("frame decode failed: {0}")]
    Decode(#[from] frames::CodecError),
    #[error("invalid JSON frame: {0}")]
    InvalidJson(#[from] serde_json::Error),
}
