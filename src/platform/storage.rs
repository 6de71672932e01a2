//! Persistent key/value storage
//!
//! LocalStorage-backed on wasm; a no-op fallback elsewhere so persistence
//! stays best-effort. Callers treat a `None`/`false` result as a soft
//! failure - the game proceeds identically without storage.

/// Read a value. `None` when storage is unavailable or the key is missing.
#[cfg(target_arch = "wasm32")]
pub fn get(key: &str) -> Option<String> {
    let storage = web_sys::window()?.local_storage().ok()??;
    storage.get_item(key).ok()?
}

/// Write a value. Returns whether the write succeeded.
#[cfg(target_arch = "wasm32")]
pub fn set(key: &str, value: &str) -> bool {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();
    match storage {
        Some(storage) => storage.set_item(key, value).is_ok(),
        None => false,
    }
}

/// Native stub: nothing persists
#[cfg(not(target_arch = "wasm32"))]
pub fn get(_key: &str) -> Option<String> {
    None
}

/// Native stub: nothing persists
#[cfg(not(target_arch = "wasm32"))]
pub fn set(_key: &str, _value: &str) -> bool {
    false
}
