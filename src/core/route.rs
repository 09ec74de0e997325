//! Routen und ihre Segmente (Route/Segment-Store).
//!
//! Eine Route hält pro aufeinanderfolgendem Wegpunkt-Paar einen Slot.
//! `None` bedeutet "dirty": das Segment muss (neu) berechnet werden.
//! Alternativrouten sind eigenständige `Route`-Einträge neben der
//! Hauptroute, nicht im Segment-Array verschachtelt.

use super::LngLat;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Fehler bei Zugriffen auf den Segment-Store
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// Segment-Index außerhalb der vorhandenen Slots
    #[error("Segment-Index {index} außerhalb (Route hat {len} Segmente)")]
    SegmentOutOfRange { index: usize, len: usize },
}

/// Berechnetes Teilstück zwischen zwei Wegpunkten (Geometrie + Kennzahlen)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SegmentData {
    /// Linienzug vom Start- zum Endpunkt
    pub geometry: Vec<LngLat>,
    /// Länge in Metern
    pub distance_m: f64,
    /// Fahrzeit in Sekunden
    pub duration_s: f64,
    /// Optionale Beschreibung vom Routing-Backend (z.B. Hauptstraßen)
    #[serde(default)]
    pub description: String,
}

/// Aufsummierte Kennzahlen einer Route
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RouteSummary {
    /// Summe der Segmentlängen in Metern
    pub distance_m: f64,
    /// Summe der Fahrzeiten in Sekunden
    pub duration_s: f64,
    /// Anzahl noch offener Segmente
    pub dirty_segments: usize,
}

/// Eine Route aus geordneten Segment-Slots
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Route {
    /// Anzeigetext (bei Alternativen vom Backend geliefert)
    pub description: String,
    segments: Vec<Option<Arc<SegmentData>>>,
}

impl Route {
    /// Erstellt eine Route mit `count` leeren (dirty) Slots.
    pub fn with_segment_count(count: usize) -> Self {
        Self {
            description: String::new(),
            segments: vec![None; count],
        }
    }

    /// Erstellt eine vollständige Route aus genau einem Segment (Alternativroute).
    pub fn single(data: SegmentData) -> Self {
        Self {
            description: data.description.clone(),
            segments: vec![Some(Arc::new(data))],
        }
    }

    /// Anzahl der Segment-Slots.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Setzt das Segment an `index`.
    pub fn set_segment(&mut self, index: usize, data: SegmentData) -> Result<(), RouteError> {
        let len = self.segments.len();
        let slot = self
            .segments
            .get_mut(index)
            .ok_or(RouteError::SegmentOutOfRange { index, len })?;
        *slot = Some(Arc::new(data));
        Ok(())
    }

    /// Liefert das Segment an `index`, falls berechnet.
    pub fn segment(&self, index: usize) -> Option<&SegmentData> {
        self.segments.get(index).and_then(|s| s.as_deref())
    }

    /// `true`, wenn der Slot existiert und noch nicht berechnet ist.
    pub fn is_dirty(&self, index: usize) -> bool {
        matches!(self.segments.get(index), Some(None))
    }

    /// Iteriert über alle Slots.
    pub fn segments(&self) -> impl Iterator<Item = Option<&SegmentData>> {
        self.segments.iter().map(|s| s.as_deref())
    }

    /// Markiert ein- und ausgehendes Segment des Wegpunkts `waypoint_index` als dirty.
    pub fn invalidate_adjacent(&mut self, waypoint_index: usize) {
        if waypoint_index > 0 {
            if let Some(slot) = self.segments.get_mut(waypoint_index - 1) {
                *slot = None;
            }
        }
        if let Some(slot) = self.segments.get_mut(waypoint_index) {
            *slot = None;
        }
    }

    /// Passt die Slots an das Entfernen des Wegpunkts `waypoint_index` an.
    ///
    /// Erster/letzter Wegpunkt: das einzige angrenzende Segment fällt weg.
    /// Mittlerer Wegpunkt: das ausgehende Segment fällt weg, das eingehende
    /// verbindet nun die Nachbarn und wird dirty.
    pub fn remove_at(&mut self, waypoint_index: usize) {
        if self.segments.is_empty() {
            return;
        }
        if waypoint_index == 0 {
            self.segments.remove(0);
        } else if waypoint_index >= self.segments.len() {
            self.segments.pop();
        } else {
            self.segments.remove(waypoint_index);
            self.segments[waypoint_index - 1] = None;
        }
    }

    /// Fügt einen leeren Slot für einen vor `waypoint_index` eingefügten Wegpunkt ein.
    ///
    /// Angrenzende Segmente werden dabei nicht invalidiert, das übernimmt
    /// [`Route::invalidate_adjacent`].
    pub fn insert_at(&mut self, waypoint_index: usize) {
        let at = waypoint_index.min(self.segments.len());
        self.segments.insert(at, None);
    }

    /// Setzt alle Slots auf dirty.
    pub fn clear(&mut self) {
        self.segments.iter_mut().for_each(|s| *s = None);
        self.description.clear();
    }

    /// Summiert alle berechneten Segmente.
    pub fn summary(&self) -> RouteSummary {
        self.segments
            .iter()
            .fold(RouteSummary::default(), |mut acc, slot| {
                match slot {
                    Some(data) => {
                        acc.distance_m += data.distance_m;
                        acc.duration_s += data.duration_s;
                    }
                    None => acc.dirty_segments += 1,
                }
                acc
            })
    }
}
