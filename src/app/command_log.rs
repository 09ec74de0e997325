//! Begrenztes Command-Log für Diagnose und Fuzzing.
//!
//! Es werden nur Variantennamen gespeichert, keine Nutzdaten wie
//! Segment-Geometrien oder Trefferlisten.

use super::SessionCommand;

/// Speichert die Namen ausgeführter Commands in Reihenfolge.
#[derive(Debug, Default)]
pub struct CommandLog {
    entries: Vec<&'static str>,
}

impl CommandLog {
    const MAX_ENTRIES: usize = 1000;
}

impl CommandLog {
    /// Erstellt ein leeres Command-Log.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Fügt einen ausgeführten Command hinzu.
    /// Begrenzt auf MAX_ENTRIES, ältere Einträge werden verworfen.
    pub fn record(&mut self, command: &SessionCommand) {
        if self.entries.len() >= Self::MAX_ENTRIES {
            self.entries.drain(..Self::MAX_ENTRIES / 2);
        }
        self.entries.push(command.name());
    }

    /// Gibt die Anzahl der geloggten Commands zurück.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Gibt `true` zurück, wenn keine Commands vorhanden sind.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Liefert eine read-only Sicht auf alle Einträge.
    pub fn entries(&self) -> &[&'static str] {
        &self.entries
    }

    /// Letzter ausgeführter Command.
    pub fn last(&self) -> Option<&'static str> {
        self.entries.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LngLat, SearchResult};

    #[test]
    fn test_record_drains_oldest_half_at_capacity() {
        let mut log = CommandLog::new();
        for _ in 0..CommandLog::MAX_ENTRIES {
            log.record(&SessionCommand::RecomputeView);
        }
        assert_eq!(log.len(), CommandLog::MAX_ENTRIES);

        log.record(&SessionCommand::AppendWaypoint);
        assert_eq!(log.len(), CommandLog::MAX_ENTRIES / 2 + 1);
        assert_eq!(log.last(), Some("AppendWaypoint"));
    }

    #[test]
    fn test_record_keeps_name_without_payload() {
        let mut log = CommandLog::new();
        let results = vec![
            SearchResult {
                description: "Gent".into(),
                coordinate: LngLat::new(3.72, 51.05),
                kind: "city".into(),
                score: 0.9,
            };
            50
        ];

        log.record(&SessionCommand::ApplyForwardResults { results });

        assert_eq!(log.entries(), &["ApplyForwardResults"]);
    }
}
