/// Typed wrappers over the chrome.* JS bridge
use crate::error::{self, BlockerError};
use crate::message::{Request, Response};
use serde::{Serialize, de::DeserializeOwned};
use wasm_bindgen::prelude::*;

// Import JS bridge functions
#[wasm_bindgen(module = "/js/bridge.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getStorage(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStorage(key: &str, value: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn sendMessage(message: JsValue) -> Result<JsValue, JsValue>;

    fn onStorageChanged(key: &str, callback: &js_sys::Function);

    fn exportToFile(data: &str, filename: &str);
}

/// Read a key from chrome.storage.local, `T::default()` when unset
pub async fn load<T: DeserializeOwned + Default>(key: &str) -> error::Result<T> {
    let value = getStorage(key)
        .await
        .map_err(|e| BlockerError::storage("failed to read storage", e))?;

    if value.is_null() || value.is_undefined() {
        Ok(T::default())
    } else {
        Ok(serde_wasm_bindgen::from_value(value)?)
    }
}

/// Read a key as loosely typed JSON, `Null` when unset
pub async fn load_json(key: &str) -> error::Result<serde_json::Value> {
    let value = getStorage(key)
        .await
        .map_err(|e| BlockerError::storage("failed to read storage", e))?;

    if value.is_null() || value.is_undefined() {
        Ok(serde_json::Value::Null)
    } else {
        Ok(serde_wasm_bindgen::from_value(value)?)
    }
}

pub async fn save<T: Serialize>(key: &str, value: &T) -> error::Result<()> {
    let value = serde_wasm_bindgen::to_value(value)?;
    setStorage(key, value)
        .await
        .map_err(|e| BlockerError::storage("failed to write storage", e))
}

/// Send a request to the background worker and wait for its reply
pub async fn send(request: &Request) -> error::Result<Response> {
    let message = serde_wasm_bindgen::to_value(request)?;
    let reply = sendMessage(message)
        .await
        .map_err(|e| BlockerError::Message(format!("{:?}", e)))?;

    if reply.is_null() || reply.is_undefined() {
        return Err(BlockerError::Message("no reply from background".to_string()));
    }

    Ok(serde_wasm_bindgen::from_value(reply)?)
}

/// Call `callback` with the new value whenever `key` changes in storage
pub fn watch(key: &str, callback: impl FnMut(JsValue) + 'static) {
    let closure = Closure::<dyn FnMut(JsValue)>::new(callback);
    onStorageChanged(key, closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn download(data: &str, filename: &str) {
    exportToFile(data, filename);
}
