//! Clipboard abstraction used by the copy menu items.

use std::sync::{Arc, RwLock};

/// Text clipboard.
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: String);
    fn read_text(&self) -> Option<String>;
}

/// Process-local clipboard. Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    text: Arc<RwLock<Option<String>>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: String) {
        if let Ok(mut guard) = self.text.write() {
            *guard = Some(text);
        }
    }

    fn read_text(&self) -> Option<String> {
        self.text.read().ok().and_then(|guard| guard.clone())
    }
}
