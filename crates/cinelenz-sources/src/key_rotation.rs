use std::sync::atomic::{AtomicUsize, Ordering};

/// Round-robin rotation over a set of API keys.
///
/// An explicit, injected component rather than module-global state, so
/// callers (and tests) control and reset rotation order deterministically.
#[derive(Debug)]
pub struct KeyRing {
    keys: Vec<String>,
    cursor: AtomicUsize,
}

impl KeyRing {
    pub fn new(keys: Vec<String>) -> Self {
        Self {
            keys,
            cursor: AtomicUsize::new(0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// The next key in rotation. Returns `None` when no keys are loaded.
    pub fn next_key(&self) -> Option<&str> {
        if self.keys.is_empty() {
            return None;
        }
        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % self.keys.len();
        Some(&self.keys[index])
    }

    /// Restart rotation from the first key.
    pub fn reset(&self) {
        self.cursor.store(0, Ordering::Relaxed);
    }
}
