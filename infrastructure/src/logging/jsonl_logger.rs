//! JSONL file writer for session events.
//!
//! Each notification is serialized as a single JSON line with a `type`
//! field and `timestamp`, appended to the file via a buffered writer.
//!
//! ```text
//! {"type":"verdict","timestamp":"2026-03-01T10:00:00.000Z","eventId":3,"outcome":"passed",...}
//! {"type":"queue_changed","timestamp":"...","motions":[...]}
//! {"type":"motion_resolved","timestamp":"...","motion":{...},"outcome":"failed",...}
//! ```

use mun_application::{SessionNotifier, StoreError};
use mun_domain::{
    AgendaEvent, EventId, QueuedMotion, Resolution, SaveOutcome, Verdict, VotingSessionRecord,
};
use serde_json::{Value, json};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL session journal that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
/// The file is opened in append mode so a resumed session keeps its history.
pub struct JsonlSessionJournal {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlSessionJournal {
    /// Create a journal appending to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create journal directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open journal file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the journal file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, event_type: &str, payload: Value) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        // Merge payload with type + timestamp
        let record = if let Value::Object(mut map) = payload {
            map.insert("type".to_string(), Value::String(event_type.to_string()));
            map.insert("timestamp".to_string(), Value::String(timestamp));
            Value::Object(map)
        } else {
            json!({
                "type": event_type,
                "timestamp": timestamp,
                "data": payload,
            })
        };

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            // JSONL is append-only; flush each record so a crash loses nothing
            let _ = writer.flush();
        }
    }
}

fn to_value<T: serde::Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

impl SessionNotifier for JsonlSessionJournal {
    fn on_verdict(&self, event_id: Option<EventId>, verdict: &Verdict) {
        let mut payload = to_value(verdict);
        if let Value::Object(map) = &mut payload {
            map.insert("eventId".to_string(), to_value(&event_id));
        }
        self.write("verdict", payload);
    }

    fn on_queue_changed(&self, ordered: &[QueuedMotion]) {
        self.write("queue_changed", json!({ "motions": to_value(&ordered) }));
    }

    fn on_motion_resolved(&self, resolution: &Resolution) {
        self.write("motion_resolved", to_value(resolution));
    }

    fn on_event_appended(&self, event: &AgendaEvent) {
        self.write("event_appended", json!({ "event": to_value(event) }));
    }

    fn on_voting_saved(&self, event_id: EventId, record: &VotingSessionRecord, outcome: SaveOutcome) {
        self.write(
            "voting_saved",
            json!({
                "eventId": to_value(&event_id),
                "changed": outcome.is_changed(),
                "record": to_value(record),
            }),
        );
    }

    fn on_autosave_failed(&self, error: &StoreError) {
        self.write("autosave_failed", json!({ "error": error.to_string() }));
    }
}

impl Drop for JsonlSessionJournal {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
