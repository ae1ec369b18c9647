//! Browser-backed host capabilities

use shared::{KeyValueStore, SpeechSynthesizer, StorageError};
use wasm_bindgen::JsValue;
use web_sys::{SpeechSynthesis, SpeechSynthesisUtterance, Storage};

fn js_error(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

/// `KeyValueStore` over `window.localStorage`
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage(&self) -> Result<Storage, StorageError> {
        let window = web_sys::window().ok_or_else(|| StorageError("No window".to_string()))?;
        window
            .local_storage()
            .map_err(|e| StorageError(js_error(e)))?
            .ok_or_else(|| StorageError("localStorage is not available".to_string()))
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| StorageError(js_error(e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| StorageError(js_error(e)))
    }
}

/// `SpeechSynthesizer` over `window.speechSynthesis`
#[derive(Debug, Default, Clone, Copy)]
pub struct WebSpeech;

impl WebSpeech {
    fn engine(&self) -> Option<SpeechSynthesis> {
        web_sys::window()?.speech_synthesis().ok()
    }
}

impl SpeechSynthesizer for WebSpeech {
    fn speak(&self, text: &str) {
        let Some(engine) = self.engine() else {
            web_sys::console::warn_1(&"Speech synthesis is not available".into());
            return;
        };
        match SpeechSynthesisUtterance::new_with_text(text) {
            Ok(utterance) => {
                engine.cancel();
                engine.speak(&utterance);
            }
            Err(e) => web_sys::console::error_1(&e),
        }
    }

    fn stop(&self) {
        if let Some(engine) = self.engine() {
            engine.cancel();
        }
    }

    fn is_speaking(&self) -> bool {
        self.engine().map(|engine| engine.speaking()).unwrap_or(false)
    }
}
