//! Fehlerkanal der asynchronen Kollaborateure (Routing, Geocoding).

/// Fehler eines Routing- oder Geocoding-Aufrufs.
///
/// Der Session-Kern behandelt diese Fehler nicht weiter: der Scheduler
/// loggt sie, betroffene Segmente bleiben dirty bis zur nächsten Änderung.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ServiceError {
    /// Transport- oder Netzwerkfehler
    #[error("Netzwerkfehler: {0}")]
    Network(String),
    /// Antwort konnte nicht interpretiert werden
    #[error("Ungültige Antwort: {0}")]
    InvalidResponse(String),
    /// Backend unterstützt die Anfrage nicht (z.B. unbekanntes Profil)
    #[error("Nicht unterstützt: {0}")]
    Unsupported(String),
}
