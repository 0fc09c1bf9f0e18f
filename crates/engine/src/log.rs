//! Structured event log: one JSON object per line.
//!
//! Records are sent over an unbounded channel to a spawned task that owns the
//! file, so the game loop never waits on disk. Write errors end the task
//! silently; the game keeps running without a log.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::types::GameNotice;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LogEvent {
    SessionStarted {
        seed: u32,
    },
    Spawned {
        piece: &'static str,
        x: i8,
        y: i8,
    },
    Locked {
        piece: &'static str,
        lock: &'static str,
        points: u32,
    },
    LinesCleared {
        count: u32,
        points: u32,
        total_lines: u32,
    },
    LevelChanged {
        level: u32,
        delay_ms: u32,
    },
    GameOver {
        score: u32,
        lines: u32,
        level: u32,
    },
}

impl From<&GameNotice> for LogEvent {
    fn from(notice: &GameNotice) -> Self {
        match *notice {
            GameNotice::Spawned { kind, x, y } => LogEvent::Spawned {
                piece: kind.as_str(),
                x,
                y,
            },
            GameNotice::Locked { kind, lock, points } => LogEvent::Locked {
                piece: kind.as_str(),
                lock: lock.as_str(),
                points,
            },
            GameNotice::LinesCleared {
                count,
                points,
                total_lines,
            } => LogEvent::LinesCleared {
                count,
                points,
                total_lines,
            },
            GameNotice::LevelChanged { level, delay_ms } => {
                LogEvent::LevelChanged { level, delay_ms }
            }
            GameNotice::GameOver {
                score,
                lines,
                level,
            } => LogEvent::GameOver {
                score,
                lines,
                level,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    pub ts_ms: u64,
    #[serde(flatten)]
    pub event: LogEvent,
}

impl LogRecord {
    pub fn now(event: LogEvent) -> Self {
        Self {
            ts_ms: current_timestamp_ms(),
            event,
        }
    }
}

#[derive(Debug, Default)]
pub struct EventLog {
    tx: Option<mpsc::UnboundedSender<LogRecord>>,
    task: Option<JoinHandle<()>>,
}

impl EventLog {
    /// A log that drops every record
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Append records to `path`, creating it if needed.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(path: impl Into<String>) -> Self {
        let path = path.into();
        let (tx, mut rx) = mpsc::unbounded_channel::<LogRecord>();
        let task = tokio::spawn(async move {
            use tokio::fs::OpenOptions;
            use tokio::io::AsyncWriteExt;

            let mut file = match OpenOptions::new().create(true).append(true).open(&path).await {
                Ok(f) => f,
                Err(_) => return,
            };

            let mut buf: Vec<u8> = Vec::with_capacity(256);
            while let Some(rec) = rx.recv().await {
                buf.clear();
                if serde_json::to_writer(&mut buf, &rec).is_err() {
                    continue;
                }
                buf.push(b'\n');
                if file.write_all(&buf).await.is_err() {
                    break;
                }
            }

            let _ = file.flush().await;
        });
        Self {
            tx: Some(tx),
            task: Some(task),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.tx.is_some()
    }

    pub fn record_event(&self, event: LogEvent) {
        if let Some(tx) = self.tx.as_ref() {
            let _ = tx.send(LogRecord::now(event));
        }
    }

    pub fn record(&self, notice: &GameNotice) {
        if self.is_enabled() {
            self.record_event(LogEvent::from(notice));
        }
    }

    /// Stop accepting records and wait until everything queued is written
    pub async fn close(mut self) {
        self.tx = None;
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LockKind, PieceKind};

    #[test]
    fn test_record_serializes_flat_with_event_tag() {
        let rec = LogRecord {
            ts_ms: 7,
            event: LogEvent::from(&GameNotice::Locked {
                kind: PieceKind::T,
                lock: LockKind::HardDrop,
                points: 20,
            }),
        };
        let v = serde_json::to_value(&rec).unwrap();
        assert_eq!(
            v,
            serde_json::json!({
                "ts_ms": 7,
                "event": "locked",
                "piece": "T",
                "lock": "hardDrop",
                "points": 20
            })
        );
    }

    #[test]
    fn test_disabled_log_accepts_records() {
        let log = EventLog::disabled();
        assert!(!log.is_enabled());
        log.record(&GameNotice::GameOver {
            score: 0,
            lines: 0,
            level: 1,
        });
    }

    #[test]
    fn test_log_appends_json_lines() {
        let path = std::env::temp_dir().join(format!(
            "gridfall-log-test-{}-{}.jsonl",
            std::process::id(),
            current_timestamp_ms()
        ));
        let path_str = path.to_string_lossy().to_string();

        tokio_test::block_on(async {
            let log = EventLog::spawn(path_str.clone());
            log.record_event(LogEvent::SessionStarted { seed: 5 });
            log.record(&GameNotice::LevelChanged {
                level: 2,
                delay_ms: 450,
            });
            log.close().await;
        });

        let text = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["event"], "session_started");
        assert_eq!(lines[0]["seed"], 5);
        assert_eq!(lines[1]["event"], "level_changed");
        assert_eq!(lines[1]["delay_ms"], 450);
    }
}
