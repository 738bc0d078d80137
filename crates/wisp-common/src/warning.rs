//! Deduplicated layout warnings.
//!
//! Malformed or unsupported input never aborts a layout pass; it is reported
//! here and the engine falls back to a default. Each unique message is
//! emitted once as a `tracing` event so a long document cannot flood the log.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Global set of warnings we've already emitted (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about unsupported input (emitted once per unique message).
///
/// Returns `true` if this call emitted the warning, `false` if the same
/// message had already been reported.
///
/// # Example
/// ```
/// use wisp_common::warning::warn_once;
///
/// let _ = warn_once("CSS", "unsupported unit 'vw' in width: 50vw");
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let should_emit = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_emit {
        tracing::warn!(component, "{message}");
    }
    should_emit
}

/// Clear all recorded warnings (call when loading a new page).
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warn_once_deduplicates() {
        let first = warn_once("Test", "dedup-probe-message");
        let second = warn_once("Test", "dedup-probe-message");
        assert!(first);
        assert!(!second, "second identical warning must be suppressed");
    }

    #[test]
    fn test_components_are_distinct_keys() {
        assert!(warn_once("A", "component-key-probe"));
        assert!(warn_once("B", "component-key-probe"));
    }
}
