//! Environment helpers for tests that read `JOLT_*` variables.
//!
//! Callers must serialise access (e.g. `#[serial]`); the process environment
//! is shared by every test thread.

use std::ffi::{OsStr, OsString};

/// Set an environment variable.
pub fn set_var<K: AsRef<OsStr>, V: AsRef<OsStr>>(key: K, value: V) {
    // SAFETY: callers hold the serial test lock.
    unsafe { std::env::set_var(key, value) }
}

/// Remove an environment variable.
pub fn remove_var<K: AsRef<OsStr>>(key: K) {
    // SAFETY: callers hold the serial test lock.
    unsafe { std::env::remove_var(key) }
}

/// Clears a set of variables on creation and restores their previous values
/// on drop.
pub struct EnvGuard {
    saved: Vec<(&'static str, Option<OsString>)>,
}

impl EnvGuard {
    #[must_use]
    pub fn new(keys: &[&'static str]) -> Self {
        let saved = keys
            .iter()
            .map(|&key| {
                let old = std::env::var_os(key);
                remove_var(key);
                (key, old)
            })
            .collect();
        Self { saved }
    }

    /// Set `key` for the lifetime of the guard.
    ///
    /// # Panics
    ///
    /// Panics if `key` was not passed to [`EnvGuard::new`], since it would not
    /// be restored.
    pub fn set<V: AsRef<OsStr>>(&self, key: &'static str, value: V) {
        assert!(
            self.saved.iter().any(|(k, _)| *k == key),
            "{key} is not guarded"
        );
        set_var(key, value);
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, old) in &self.saved {
            match old {
                Some(value) => set_var(key, value),
                None => remove_var(key),
            }
        }
    }
}
