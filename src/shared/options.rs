//! Zentrale Konfiguration für Routing-Session und Scheduler.
//!
//! `SessionOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

// ── Scheduler ───────────────────────────────────────────────────────

/// Tick-Intervall der drei Pending-Work-Kanäle in Millisekunden.
pub const TICK_INTERVAL_MS: u64 = 500;

// ── Routing ─────────────────────────────────────────────────────────

/// Profil beim Start einer Session.
pub const DEFAULT_PROFILE: &str = "car";
/// Maximale Anzahl Alternativrouten (Schlüssel `profile1..=profile3`).
pub const MAX_ALTERNATIVES: usize = 3;

// ── Geocoding ───────────────────────────────────────────────────────

/// Maximale Anzahl Suchtreffer nach dem Zusammenführen.
pub const MAX_RESULTS: usize = 5;
/// Maximaler Abstand (Meter), bis zu dem ein Reverse-Treffer als Beschreibung taugt.
pub const MAX_REVERSE_DISTANCE_M: f64 = 250.0;
/// Mindest-Score eines "sicheren" Treffers; darunter fragt die Kette weiter.
pub const CONFIDENT_SCORE: f64 = 0.6;

// ── Nutzer-Standort ─────────────────────────────────────────────────

/// Platzhalter-Beschreibung für den Nutzer-Standort.
pub const USER_LOCATION_LABEL: &str = "Current location";

/// Grobe Trefferarten, die nie als "sicher" gelten.
fn default_coarse_result_types() -> Vec<String> {
    ["commune", "city", "county", "state", "country"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Reisegeschwindigkeit je Profil in km/h (Offline-Router).
fn default_profile_speeds() -> BTreeMap<String, f64> {
    BTreeMap::from([
        ("car".to_string(), 50.0),
        ("bike".to_string(), 15.0),
        ("foot".to_string(), 5.0),
    ])
}

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Session-Optionen.
/// Wird als `trip_planner.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionOptions {
    // ── Scheduler ───────────────────────────────────────────────
    /// Tick-Intervall der Pending-Work-Kanäle (ms)
    pub tick_interval_ms: u64,

    // ── Routing ─────────────────────────────────────────────────
    /// Profil beim Start
    pub default_profile: String,
    /// km/h je Profil für den Offline-Router
    #[serde(default = "default_profile_speeds")]
    pub profile_speeds_kmh: BTreeMap<String, f64>,

    // ── Geocoding ───────────────────────────────────────────────
    /// Maximale Trefferzahl nach dem Zusammenführen
    pub max_results: usize,
    /// Maximaler Reverse-Abstand in Metern
    pub max_reverse_distance_m: f64,
    /// Mindest-Score für einen sicheren Treffer
    #[serde(default = "default_confident_score")]
    pub confident_score: f64,
    /// Trefferarten, die nie als sicher gelten
    #[serde(default = "default_coarse_result_types")]
    pub coarse_result_types: Vec<String>,

    // ── Nutzer-Standort ─────────────────────────────────────────
    /// Platzhalter-Beschreibung für den Nutzer-Standort
    #[serde(default = "default_user_location_label")]
    pub user_location_label: String,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            tick_interval_ms: TICK_INTERVAL_MS,
            default_profile: DEFAULT_PROFILE.to_string(),
            profile_speeds_kmh: default_profile_speeds(),
            max_results: MAX_RESULTS,
            max_reverse_distance_m: MAX_REVERSE_DISTANCE_M,
            confident_score: CONFIDENT_SCORE,
            coarse_result_types: default_coarse_result_types(),
            user_location_label: USER_LOCATION_LABEL.to_string(),
        }
    }
}

/// Serde-Default für `confident_score` (Abwärtskompatibilität bestehender TOML-Dateien).
fn default_confident_score() -> f64 {
    CONFIDENT_SCORE
}

/// Serde-Default für `user_location_label`.
fn default_user_location_label() -> String {
    USER_LOCATION_LABEL.to_string()
}

impl SessionOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("trip_planner"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("trip_planner.toml")
    }

    /// Tick-Intervall als `Duration` (mindestens 1 ms).
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    /// Reisegeschwindigkeit eines Profils in m/s, `None` bei unbekanntem Profil.
    pub fn speed_mps(&self, profile: &str) -> Option<f64> {
        self.profile_speeds_kmh
            .get(profile)
            .filter(|kmh| **kmh > 0.0)
            .map(|kmh| kmh / 3.6)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_serde_defaults() {
        let toml = r#"
            tick_interval_ms = 250
            default_profile = "bike"
            max_results = 3
            max_reverse_distance_m = 100.0
        "#;
        let opts: SessionOptions = toml::from_str(toml).expect("TOML sollte parsen");
        assert_eq!(opts.tick_interval(), Duration::from_millis(250));
        assert_eq!(opts.confident_score, CONFIDENT_SCORE);
        assert_eq!(opts.user_location_label, USER_LOCATION_LABEL);
        assert!(opts.coarse_result_types.iter().any(|t| t == "commune"));
    }

    #[test]
    fn test_roundtrip_default() {
        let opts = SessionOptions::default();
        let text = toml::to_string_pretty(&opts).expect("serialisierbar");
        let back: SessionOptions = toml::from_str(&text).expect("parsebar");
        assert_eq!(back, opts);
    }

    #[test]
    fn test_speed_mps() {
        let opts = SessionOptions::default();
        assert!((opts.speed_mps("car").unwrap() - 13.888).abs() < 0.01);
        assert!(opts.speed_mps("boat").is_none());
    }

    #[test]
    fn test_save_then_load_keeps_changes() {
        let path = std::env::temp_dir().join(format!(
            "trip_planner_options_{}.toml",
            std::process::id()
        ));
        let opts = SessionOptions {
            tick_interval_ms: 125,
            default_profile: "foot".to_string(),
            user_location_label: "Hier".to_string(),
            ..SessionOptions::default()
        };

        opts.save_to_file(&path).expect("Speichern sollte klappen");
        let loaded = SessionOptions::load_from_file(&path);
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, opts);
    }

    #[test]
    fn test_load_missing_file_falls_back_to_default() {
        let opts = SessionOptions::load_from_file(std::path::Path::new(
            "/nonexistent/trip_planner.toml",
        ));
        assert_eq!(opts, SessionOptions::default());
    }
}
