//! Geocode-Fallback-Kette.
//!
//! Fragt eine geordnete Liste von Providern nacheinander an und führt die
//! Ergebnisse zu einer gemeinsamen, nach Relevanz sortierten Liste zusammen.
//! Jeder Provider kann eine eigene Merge-Funktion (Vorwärtssuche) bzw. eine
//! eigene Akzeptanz-Funktion (Rückwärtssuche) mitbringen, die entscheidet,
//! ob die Kette beim nächsten Provider weitermacht.

use super::GeocodingProvider;
use crate::core::{LngLat, ReverseResult, SearchResult};
use crate::shared::{ServiceError, SessionOptions};
use async_trait::async_trait;
use std::sync::Arc;

/// Merge-Funktion: führt neue Treffer in die Sammlung ein, `true` = weiterfragen.
pub type MergeFn = Arc<dyn Fn(&mut Vec<SearchResult>, Vec<SearchResult>) -> bool + Send + Sync>;

/// Akzeptanz-Funktion (Rückwärtssuche): `true` = Treffer nah genug, Kette beenden.
///
/// Erhält die Treffer des aktuellen Providers und `max_reverse_distance_m`.
pub type ReverseAcceptFn = Arc<dyn Fn(&[ReverseResult], f64) -> bool + Send + Sync>;

/// Ein Glied der Kette
#[derive(Clone)]
pub struct ChainEntry {
    provider: Arc<dyn GeocodingProvider>,
    merge: Option<MergeFn>,
    reverse_accept: Option<ReverseAcceptFn>,
}

impl ChainEntry {
    /// Glied mit Default-Merge und Default-Akzeptanz.
    pub fn new(provider: Arc<dyn GeocodingProvider>) -> Self {
        Self {
            provider,
            merge: None,
            reverse_accept: None,
        }
    }

    /// Setzt eine eigene Merge-Funktion.
    pub fn with_merge(mut self, merge: MergeFn) -> Self {
        self.merge = Some(merge);
        self
    }

    /// Setzt eine eigene Akzeptanz-Funktion für die Rückwärtssuche.
    pub fn with_reverse_accept(mut self, accept: ReverseAcceptFn) -> Self {
        self.reverse_accept = Some(accept);
        self
    }

    /// Akzeptanz: Kette endet erst, wenn der nächste Treffer innerhalb der Maximaldistanz liegt.
    pub fn stop_when_near(self) -> Self {
        self.with_reverse_accept(Arc::new(|results: &[ReverseResult], max_distance: f64| {
            results
                .iter()
                .map(|r| r.distance)
                .min_by(f64::total_cmp)
                .is_some_and(|nearest| nearest <= max_distance)
        }))
    }
}

impl std::fmt::Debug for ChainEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainEntry")
            .field("provider", &self.provider.name())
            .field("custom_merge", &self.merge.is_some())
            .field("custom_reverse_accept", &self.reverse_accept.is_some())
            .finish()
    }
}

/// Provider-Kette mit Zusammenführung und Fallback
#[derive(Debug, Clone)]
pub struct GeocodeFallbackChain {
    entries: Vec<ChainEntry>,
    max_results: usize,
    max_reverse_distance_m: f64,
    confident_score: f64,
    coarse_result_types: Vec<String>,
}

impl GeocodeFallbackChain {
    /// Erstellt eine leere Kette mit Grenzwerten aus den Optionen.
    pub fn new(options: &SessionOptions) -> Self {
        Self {
            entries: Vec::new(),
            max_results: options.max_results,
            max_reverse_distance_m: options.max_reverse_distance_m,
            confident_score: options.confident_score,
            coarse_result_types: options.coarse_result_types.clone(),
        }
    }

    /// Hängt ein Glied an das Ende der Kette.
    pub fn with_entry(mut self, entry: ChainEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Hängt einen Provider mit Default-Verhalten an.
    pub fn with_provider(self, provider: Arc<dyn GeocodingProvider>) -> Self {
        self.with_entry(ChainEntry::new(provider))
    }

    /// Anzahl der Glieder.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true`, wenn kein Provider registriert ist.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ein Treffer gilt als sicher, wenn Score hoch genug und Art nicht grob ist.
    fn is_confident(&self, result: &SearchResult) -> bool {
        result.score >= self.confident_score
            && !self
                .coarse_result_types
                .iter()
                .any(|t| t.eq_ignore_ascii_case(&result.kind))
    }

    /// Default-Merge: anhängen, nach Score absteigend sortieren.
    ///
    /// Liefert `true` (weiterfragen), solange kein sicherer Treffer vorliegt.
    pub fn default_merge(
        &self,
        merged: &mut Vec<SearchResult>,
        results: Vec<SearchResult>,
    ) -> bool {
        merged.extend(results);
        sort_by_score(merged);
        !merged.iter().any(|r| self.is_confident(r))
    }

    /// Vorwärtssuche über alle Glieder.
    ///
    /// Ein fehlerhafter Provider zählt als leere Antwort. Nur wenn kein
    /// einziger Provider geantwortet hat, wird der letzte Fehler geliefert.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ServiceError> {
        let mut merged = Vec::new();
        let mut last_error = None;
        let mut answered = false;

        for entry in &self.entries {
            let results = match entry.provider.forward(query).await {
                Ok(results) => {
                    answered = true;
                    results
                }
                Err(e) => {
                    log::warn!("Geocoder '{}' fehlgeschlagen: {}", entry.provider.name(), e);
                    last_error = Some(e);
                    Vec::new()
                }
            };

            let found = results.len();
            let proceed = match &entry.merge {
                Some(merge) => merge(&mut merged, results),
                None => self.default_merge(&mut merged, results),
            };
            log::debug!(
                "Geocoder '{}': {} Treffer, gesamt {}, weiter: {}",
                entry.provider.name(),
                found,
                merged.len(),
                proceed
            );

            if !proceed {
                break;
            }
        }

        if !answered {
            if let Some(e) = last_error {
                return Err(e);
            }
        }

        merged.truncate(self.max_results);
        sort_by_score(&mut merged);
        Ok(merged)
    }

    /// Rückwärtssuche über alle Glieder.
    ///
    /// Default: die Kette endet beim ersten Provider mit nicht-leerer Antwort.
    /// Treffer jenseits von `max_reverse_distance_m` erhalten die
    /// Roh-Koordinate als Beschreibung.
    pub async fn locate(&self, coordinate: LngLat) -> Result<Vec<ReverseResult>, ServiceError> {
        let mut collected = Vec::new();
        let mut last_error = None;
        let mut answered = false;

        for entry in &self.entries {
            let results = match entry.provider.reverse(coordinate).await {
                Ok(results) => {
                    answered = true;
                    results
                }
                Err(e) => {
                    log::warn!(
                        "Reverse-Geocoder '{}' fehlgeschlagen: {}",
                        entry.provider.name(),
                        e
                    );
                    last_error = Some(e);
                    Vec::new()
                }
            };

            let accepted = match &entry.reverse_accept {
                Some(accept) => accept(&results, self.max_reverse_distance_m),
                None => !results.is_empty(),
            };
            collected.extend(results);
            if accepted {
                break;
            }
        }

        if !answered {
            if let Some(e) = last_error {
                return Err(e);
            }
        }

        collected.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        collected.truncate(self.max_results);
        let fallback_label = coordinate.label();
        for result in &mut collected {
            if result.distance > self.max_reverse_distance_m {
                result.description.clone_from(&fallback_label);
            }
        }
        Ok(collected)
    }
}

fn sort_by_score(results: &mut [SearchResult]) {
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
}

#[async_trait]
impl GeocodingProvider for GeocodeFallbackChain {
    fn name(&self) -> &str {
        "fallback-chain"
    }

    async fn forward(&self, query: &str) -> Result<Vec<SearchResult>, ServiceError> {
        self.search(query).await
    }

    async fn reverse(&self, coordinate: LngLat) -> Result<Vec<ReverseResult>, ServiceError> {
        self.locate(coordinate).await
    }
}
