//! Empfänger für State-Diffs (Darstellungsschicht).

use super::StateDiff;
use std::sync::Mutex;
use tokio::sync::mpsc;

/// Nimmt State-Diffs einer Session entgegen.
///
/// Wird synchron innerhalb der Event-Verarbeitung aufgerufen und darf nicht blockieren.
pub trait StateSink: Send + Sync {
    fn push(&self, diff: StateDiff);
}

/// Schreibt jeden Diff als JSON ins Log (Level `debug`).
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl StateSink for LogSink {
    fn push(&self, diff: StateDiff) {
        if !log::log_enabled!(log::Level::Debug) {
            return;
        }
        match serde_json::to_string(&diff) {
            Ok(json) => log::debug!("State-Diff: {}", json),
            Err(e) => log::warn!(
                "State-Diff ({}) nicht serialisierbar: {}",
                diff.changed_fields().join(", "),
                e
            ),
        }
    }
}

/// Leitet Diffs in einen Tokio-Kanal weiter.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<StateDiff>,
}

impl ChannelSink {
    /// Erstellt Sink und zugehörigen Empfänger.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<StateDiff>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl StateSink for ChannelSink {
    fn push(&self, diff: StateDiff) {
        if self.tx.send(diff).is_err() {
            log::debug!("State-Diff verworfen: Empfänger geschlossen");
        }
    }
}

/// Sammelt alle Diffs im Speicher (Tests, Demo).
#[derive(Debug, Default)]
pub struct CollectingSink {
    diffs: Mutex<Vec<StateDiff>>,
}

impl CollectingSink {
    /// Erstellt einen leeren Sammler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Alle bisher empfangenen Diffs.
    pub fn diffs(&self) -> Vec<StateDiff> {
        self.diffs.lock().map(|d| d.clone()).unwrap_or_default()
    }

    /// Anzahl empfangener Diffs.
    pub fn len(&self) -> usize {
        self.diffs.lock().map(|d| d.len()).unwrap_or(0)
    }

    /// `true`, wenn noch kein Diff empfangen wurde.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Alle Diffs zu einem Gesamtzustand überlagert.
    pub fn merged(&self) -> StateDiff {
        self.diffs().into_iter().fold(StateDiff::default(), |mut acc, diff| {
            acc.merge(diff);
            acc
        })
    }

    /// Verwirft alle gesammelten Diffs.
    pub fn clear(&self) {
        if let Ok(mut diffs) = self.diffs.lock() {
            diffs.clear();
        }
    }
}

impl StateSink for CollectingSink {
    fn push(&self, diff: StateDiff) {
        let Ok(mut diffs) = self.diffs.lock() else {
            log::error!("CollectingSink gesperrt (poisoned), Diff verworfen");
            return;
        };
        diffs.push(diff);
    }
}
