//! DDP sink session manager: snapshot-and-restore around a remote sink's
//! live-mode window (§4.10).
//!
//! The HTTP surface these sinks expose is not part of this specification's
//! grounding material; it is modeled on the JSON state endpoint convention
//! widely used by WLED-style controllers (the same family [`crate`]'s effect
//! registry names as the "wled" engine), documented as an open decision.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde_json::{Value, json};

use crate::error::SessionError;

const REARM_TTL: Duration = Duration::from_secs(5 * 60);
const STATE_PATH: &str = "/json/state";

struct SessionRecord {
    snapshot: Option<Value>,
    activated_at: Instant,
}

/// Serializes HTTP snapshot/restore calls around remote sinks' live-mode
/// windows. One instance is shared by the scheduler across all remote sinks.
#[derive(Default)]
pub struct SessionManager {
    sessions: Mutex<HashMap<String, SessionRecord>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `sink_key` needs (re-)activation: no session recorded, or the
    /// cached activation is older than the 5-minute re-arm TTL.
    pub fn needs_activation(&self, sink_key: &str) -> bool {
        let sessions = self.sessions.lock().expect("session map poisoned");
        match sessions.get(sink_key) {
            Some(record) => record.activated_at.elapsed() >= REARM_TTL,
            None => true,
        }
    }

    /// Activates live mode on `sink_key`, reachable at `base_url` (e.g.
    /// `http://10.0.0.2`). Snapshots the current state first; failures are
    /// logged and do not poison the session table (the sink may come back).
    pub fn activate(&self, sink_key: &str, base_url: &str) -> Result<(), SessionError> {
        let url = format!("{base_url}{STATE_PATH}");

        let snapshot = match ureq::get(&url).call() {
            Ok(response) => match response.into_json::<Value>() {
                Ok(body) => Some(body),
                Err(err) => {
                    tracing::warn!(sink_key, error = %err, "ddp sink snapshot body was not JSON");
                    None
                }
            },
            Err(err) => {
                tracing::warn!(sink_key, error = %err, "ddp sink snapshot request failed");
                None
            }
        };

        let patch = json!({ "on": true, "bri": 255, "live": true, "seg": [{ "fx": 0 }] });
        if let Err(err) = ureq::post(&url).send_json(patch) {
            tracing::warn!(sink_key, error = %err, "ddp sink live-mode activation failed");
        }

        self.sessions
            .lock()
            .expect("session map poisoned")
            .insert(sink_key.to_string(), SessionRecord { snapshot, activated_at: Instant::now() });

        Ok(())
    }

    /// Restores `sink_key` to its pre-activation state and drops its session
    /// record. Falls back to a minimal `{"live":false,"on":true}` patch when
    /// no prior snapshot was captured.
    pub fn deactivate(&self, sink_key: &str, base_url: &str) {
        let record = self.sessions.lock().expect("session map poisoned").remove(sink_key);

        let patch = match record.and_then(|r| r.snapshot) {
            Some(mut snapshot) => {
                if let Value::Object(ref mut map) = snapshot {
                    map.insert("live".to_string(), Value::Bool(false));
                }
                snapshot
            }
            None => json!({ "live": false, "on": true }),
        };

        let url = format!("{base_url}{STATE_PATH}");
        if let Err(err) = ureq::post(&url).send_json(patch) {
            tracing::warn!(sink_key, error = %err, "ddp sink restore failed");
        }
    }

    /// Sink keys currently holding an active session.
    pub fn active_sinks(&self) -> Vec<String> {
        self.sessions.lock().expect("session map poisoned").keys().cloned().collect()
    }

    /// Closes and restores every active session, e.g. on scheduler shutdown
    /// or a global "all bindings disabled" edge.
    pub fn deactivate_all(&self, base_url_for: impl Fn(&str) -> String) {
        for sink_key in self.active_sinks() {
            let base_url = base_url_for(&sink_key);
            self.deactivate(&sink_key, &base_url);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_manager_needs_activation() {
        let mgr = SessionManager::new();
        assert!(mgr.needs_activation("10.0.0.2"));
    }

    #[test]
    fn deactivate_without_prior_session_is_a_noop_on_bookkeeping() {
        let mgr = SessionManager::new();
        mgr.deactivate("nonexistent", "http://127.0.0.1:1");
        assert!(mgr.active_sinks().is_empty());
    }
}
