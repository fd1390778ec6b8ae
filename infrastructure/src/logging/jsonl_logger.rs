//! JSONL writer for classification transcripts.
//!
//! Every [`ConversationEvent`] becomes one line: the event payload with
//! `type` and `timestamp` keys merged in.

use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;
use triage_application::ports::conversation_logger::{ConversationEvent, ConversationLogger};

/// Conversation logger writing one JSON object per line.
///
/// Shared across concurrent items via `Mutex<BufWriter<File>>`. Each line is
/// flushed as it is written, so a crashed run keeps everything logged so far.
pub struct JsonlConversationLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlConversationLogger {
    /// Create (or truncate) the log at `path`, creating parent directories.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        Self::open(path.as_ref(), OpenOptions::new().write(true).create(true).truncate(true))
    }

    /// Open the log at `path` for appending.
    pub fn append(path: impl AsRef<Path>) -> io::Result<Self> {
        Self::open(path.as_ref(), OpenOptions::new().create(true).append(true))
    }

    fn open(path: &Path, options: &OpenOptions) -> io::Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let file = options.open(path)?;
        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// The line written for `event`
fn to_record(event: ConversationEvent, timestamp: String) -> Value {
    let mut map = match event.payload {
        Value::Object(map) => map,
        other => {
            let mut map = Map::new();
            map.insert("data".to_string(), other);
            map
        }
    };
    map.insert("type".to_string(), Value::String(event.event_type.to_string()));
    map.insert("timestamp".to_string(), Value::String(timestamp));
    Value::Object(map)
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        let Ok(line) = serde_json::to_string(&to_record(event, timestamp)) else {
            return;
        };

        let Ok(mut writer) = self.writer.lock() else {
            return;
        };
        if let Err(e) = writeln!(writer, "{line}").and_then(|_| writer.flush()) {
            warn!("Could not write to {}: {}", self.path.display(), e);
        }
    }
}

impl Drop for JsonlConversationLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use triage_domain::{ConfidenceTier, Model, StrategyRole, Verdict};

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_line_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("run.jsonl");
        let logger = JsonlConversationLogger::create(&path).unwrap();

        logger.log(ConversationEvent::strategy_response(
            StrategyRole::Primary,
            &Model::ClaudeSonnet37,
            "Classify: my bill",
            "{\"call_type\": \"BILLING\"}",
        ));
        logger.log(ConversationEvent::verdict(
            "c-1",
            &Verdict::labeled("BILLING", ConfidenceTier::High),
            Some("agreement"),
        ));
        logger.log(ConversationEvent::item_failed("c-2", "primary strategy timed out after 60s"));

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 3);
        for line in &lines {
            assert!(line["timestamp"].as_str().unwrap().ends_with('Z'));
        }

        assert_eq!(lines[0]["type"], "strategy_response");
        assert_eq!(lines[0]["role"], "primary");
        assert_eq!(lines[0]["model"], "claude-3-7-sonnet-20250219");
        assert_eq!(lines[1]["type"], "verdict");
        assert_eq!(lines[1]["label"], "BILLING");
        assert_eq!(lines[1]["consensus_rule"], "agreement");
        assert_eq!(lines[2]["type"], "item_failed");
        assert_eq!(lines[2]["id"], "c-2");
    }

    #[test]
    fn test_non_object_payload_goes_under_data() {
        let record = to_record(
            ConversationEvent::new("note", json!("just a string")),
            "2026-01-01T00:00:00.000Z".into(),
        );
        assert_eq!(record["type"], "note");
        assert_eq!(record["data"], "just a string");
        assert_eq!(record["timestamp"], "2026-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_create_truncates_and_append_keeps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.jsonl");

        JsonlConversationLogger::create(&path)
            .unwrap()
            .log(ConversationEvent::item_failed("1", "x"));
        JsonlConversationLogger::append(&path)
            .unwrap()
            .log(ConversationEvent::item_failed("2", "y"));
        assert_eq!(read_lines(&path).len(), 2);

        JsonlConversationLogger::create(&path)
            .unwrap()
            .log(ConversationEvent::item_failed("3", "z"));
        let lines = read_lines(&path);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["id"], "3");
    }

    #[test]
    fn test_unwritable_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();
        assert!(JsonlConversationLogger::create(blocker.join("run.jsonl")).is_err());
    }
}
