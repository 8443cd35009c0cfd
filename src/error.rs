/// Error type shared by the background, content script and UI
use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum BlockerError {
    #[error("block item {0} not found")]
    NotFound(u32),

    #[error("block item needs a channel id or a channel name")]
    MissingIdentity,

    #[error("storage error: {0}")]
    Storage(String),

    #[error("message error: {0}")]
    Message(String),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_wasm_bindgen::Error),

    #[error("dom error: {0}")]
    Dom(String),
}

impl BlockerError {
    pub fn storage(context: &str, err: JsValue) -> Self {
        BlockerError::Storage(format!("{}: {:?}", context, err))
    }

    pub fn dom(context: &str, err: JsValue) -> Self {
        BlockerError::Dom(format!("{}: {:?}", context, err))
    }
}

pub type Result<T> = std::result::Result<T, BlockerError>;
