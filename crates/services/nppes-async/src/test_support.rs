//! Test-only helpers for mutating process environment.

/// Restores an environment variable to its previous value on drop.
///
/// Mutating the environment races with other threads, so tests using this
/// guard must be marked `#[serial(env)]`.
pub struct EnvGuard {
    key: &'static str,
    prev: Option<String>,
}

impl EnvGuard {
    /// Set `key` to `val` until the guard is dropped.
    #[must_use]
    pub fn set(key: &'static str, val: &str) -> Self {
        Self::replace(key, Some(val))
    }

    /// Unset `key` until the guard is dropped.
    #[must_use]
    pub fn remove(key: &'static str) -> Self {
        Self::replace(key, None)
    }

    fn replace(key: &'static str, val: Option<&str>) -> Self {
        let prev = std::env::var(key).ok();
        write_var(key, val);
        Self { key, prev }
    }
}

fn write_var(key: &str, val: Option<&str>) {
    // SAFETY: callers serialize environment access with `#[serial(env)]`.
    unsafe {
        match val {
            Some(v) => std::env::set_var(key, v),
            None => std::env::remove_var(key),
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        write_var(self.key, self.prev.as_deref());
    }
}
