/// YouTube Channel Blocker - Chrome Extension that hides blocked channels
/// Built with Rust + WASM + Yew

mod background;
mod block_item;
mod block_list;
mod block_set;
mod bridge;
mod channel;
mod config;
mod content;
mod error;
mod matcher;
mod message;
mod page;
mod reactor;
pub mod ui;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Handle a chrome.runtime message in the background worker
#[wasm_bindgen]
pub fn handle_message(request: JsValue) -> js_sys::Promise {
    future_to_promise(async move {
        let response = match serde_wasm_bindgen::from_value::<message::Request>(request) {
            Ok(request) => background::handle(request).await,
            Err(e) => {
                log::warn!("Ignoring malformed request: {}", e);
                message::Response::error(format!("malformed request: {}", e))
            }
        };

        serde_wasm_bindgen::to_value(&response).map_err(JsValue::from)
    })
}

// Start scanning the page for blocked videos
#[wasm_bindgen]
pub fn start_content_script() {
    content::start();
}

// Start the Yew app for the options page
#[wasm_bindgen]
pub fn start_options() {
    yew::Renderer::<ui::options::OptionsPage>::new().render();
}
