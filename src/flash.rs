//! Redirect-surviving key/value state ("flash").
//!
//! Anything placed in the flash with [`Flash::set`] is available to the
//! current request and the very next one, then swept. The typical use is a
//! create action setting `flash.set("notice", "Successfully created")`
//! before redirecting to a display action that shows the notice.
//!
//! The store is an explicit value the host injects into the request
//! [`Context`](crate::controller::Context) and persists between requests
//! (it is serde-serializable, so any session mechanism works). Each key
//! carries a used bit; [`Flash::sweep`] deletes used entries and marks the
//! survivors used, which is what makes an entry live exactly one request
//! longer than the one that set it.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Short-lived key/value store with per-key used bits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Flash {
    entries: HashMap<String, Value>,
    used: HashMap<String, bool>,
}

impl Flash {
    /// Create an empty flash.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value that will be available to the current and the next
    /// request.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.keep(key);
        self.entries.insert(key.to_string(), value.into());
    }

    /// Set a value that is only available to the current request; it
    /// vanishes at the next sweep.
    pub fn now(&mut self, key: &str, value: impl Into<Value>) {
        self.discard(key);
        self.entries.insert(key.to_string(), value.into());
    }

    /// Get the value for a key, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Keep one entry available for the next request.
    pub fn keep(&mut self, key: &str) {
        self.used.insert(key.to_string(), false);
    }

    /// Keep the entire flash available for the next request.
    pub fn keep_all(&mut self) {
        for used in self.used.values_mut() {
            *used = false;
        }
    }

    /// Mark one entry to be dropped at the end of the current request. It
    /// stays readable until then.
    pub fn discard(&mut self, key: &str) {
        self.used.insert(key.to_string(), true);
    }

    /// Mark the entire flash to be dropped at the end of the current
    /// request.
    pub fn discard_all(&mut self) {
        for used in self.used.values_mut() {
            *used = true;
        }
    }

    /// Delete entries whose used bit is set and mark the survivors used,
    /// so they disappear at the following sweep. Hosts call this once per
    /// request, after dispatch.
    pub fn sweep(&mut self) {
        let keys: Vec<String> = self.entries.keys().cloned().collect();
        for key in keys {
            if self.used.get(&key).copied().unwrap_or(false) {
                self.entries.remove(&key);
                self.used.remove(&key);
            } else {
                self.used.insert(key, true);
            }
        }
        // Drop used bits whose entry disappeared out from under them.
        self.used.retain(|key, _| self.entries.contains_key(key));
    }

    /// True if the flash holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_survives_one_sweep() {
        let mut flash = Flash::new();
        flash.set("notice", json!("created"));
        assert_eq!(flash.get("notice"), Some(&json!("created")));

        flash.sweep();
        assert_eq!(flash.get("notice"), Some(&json!("created")));

        flash.sweep();
        assert_eq!(flash.get("notice"), None);
        assert!(flash.is_empty());
    }

    #[test]
    fn test_now_vanishes_at_first_sweep() {
        let mut flash = Flash::new();
        flash.now("msg", json!("only here"));
        assert_eq!(flash.get("msg"), Some(&json!("only here")));

        flash.sweep();
        assert_eq!(flash.get("msg"), None);
    }

    #[test]
    fn test_keep_extends_lifetime() {
        let mut flash = Flash::new();
        flash.set("notice", json!("kept"));
        flash.sweep();

        flash.keep("notice");
        flash.sweep();
        assert_eq!(flash.get("notice"), Some(&json!("kept")));

        flash.sweep();
        assert_eq!(flash.get("notice"), None);
    }

    #[test]
    fn test_discard_drops_at_sweep() {
        let mut flash = Flash::new();
        flash.set("warning", json!("gone soon"));
        flash.discard("warning");
        assert_eq!(flash.get("warning"), Some(&json!("gone soon")));

        flash.sweep();
        assert_eq!(flash.get("warning"), None);
    }

    #[test]
    fn test_round_trips_through_serde() {
        let mut flash = Flash::new();
        flash.set("notice", json!({"level": "info"}));
        let serialized = serde_json::to_string(&flash).unwrap();
        let restored: Flash = serde_json::from_str(&serialized).unwrap();
        assert_eq!(restored, flash);
    }
}
