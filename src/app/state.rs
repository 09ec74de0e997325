//! Session State: zentrale Datenhaltung.
//!
//! Wegpunkte und Routen liegen hinter `Arc` und werden ausschließlich per
//! `Arc::make_mut` verändert (Copy-on-Write). Ein bereits gepushter Diff
//! hält damit eine eigene, unveränderliche Version.

use super::CommandLog;
use crate::core::{
    LngLat, Profile, Route, SearchResult, Waypoint, WaypointSeed, WaypointSnapshot,
};
use crate::shared::SessionOptions;
use serde::Serialize;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

/// Diskriminante der Ansicht (für Vorbedingungen)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    /// Zu wenige aufgelöste Wegpunkte zum Routen
    Start,
    /// Ein Wegpunkt wird gesucht
    Search,
    /// Alle Paare aufgelöst, Routing möglich
    Routes,
}

/// Zustand einer laufenden Suche
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveSearch {
    /// Index des gesuchten Wegpunkts
    pub index: usize,
    /// Aktueller Suchtext
    pub query: String,
    /// Letzte Trefferliste (wird pro Anfrage komplett ersetzt)
    pub results: Arc<Vec<SearchResult>>,
    #[serde(skip)]
    backup: WaypointSnapshot,
}

impl ActiveSearch {
    /// Startet eine Suche mit gesichertem Wegpunkt.
    pub fn new(index: usize, backup: WaypointSnapshot) -> Self {
        Self {
            index,
            query: String::new(),
            results: Arc::new(Vec::new()),
            backup,
        }
    }

    /// Sicherung des Wegpunkts vor Suchbeginn.
    pub fn backup(&self) -> &WaypointSnapshot {
        &self.backup
    }

    /// Verbraucht die Suche und liefert die Sicherung.
    pub fn into_backup(self) -> WaypointSnapshot {
        self.backup
    }
}

/// Ansicht der Session: jede Variante trägt nur die in ihr gültigen Felder
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "view", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionView {
    /// Zu wenige aufgelöste Wegpunkte
    #[default]
    Start,
    /// Aktive Suche
    Search(ActiveSearch),
    /// Routing möglich
    Routes,
}

impl SessionView {
    /// Diskriminante ohne Nutzdaten.
    pub fn kind(&self) -> ViewKind {
        match self {
            SessionView::Start => ViewKind::Start,
            SessionView::Search(_) => ViewKind::Search,
            SessionView::Routes => ViewKind::Routes,
        }
    }
}

/// Ausstehende Arbeit der drei Scheduler-Kanäle
#[derive(Debug, Clone, Default)]
pub struct PendingWork {
    /// Routen-Neuberechnung angefordert
    pub route: bool,
    /// Aktuelle Routing-Sequenz; ältere Antworten werden verworfen
    pub route_sequence: u64,
    /// Nächster Suchtext (ein Slot, neuere Eingaben überschreiben)
    pub forward_query: Option<String>,
    /// Eine Vorwärtssuche ist unterwegs
    pub forward_in_flight: bool,
    /// Rückwärtssuche (FIFO): Wegpunkt-ID mit der Koordinate beim Vormerken
    pub reverse_queue: VecDeque<(u64, LngLat)>,
}

/// Zentrale Session-Datenhaltung
pub struct SessionState {
    /// Aktuelle Ansicht
    pub view: SessionView,
    /// Wegpunkte in Reihenfolge (immer ≥ 2)
    pub waypoints: Arc<Vec<Waypoint>>,
    /// Index 0 = Hauptroute, ≥ 1 = Alternativen
    pub routes: Arc<Vec<Route>>,
    /// Wegpunkt mit Eingabefokus
    pub focus_index: Option<usize>,
    /// Nutzer-Standort wurde angefordert
    pub user_location_requested: bool,
    /// Nutzer-Standort ist grundsätzlich verfügbar
    pub user_location_available: bool,
    /// Aktives Routing-Profil
    pub profile: Profile,
    /// Ausstehende Arbeit für den Scheduler
    pub pending: PendingWork,
    /// Nächster roher Karten-Klick ist ein Drag-Artefakt
    pub suppress_next_map_click: bool,
    /// Laufzeit-Optionen
    pub options: SessionOptions,
    /// Log der ausgeführten Commands
    pub command_log: CommandLog,
    next_waypoint_id: u64,
}

impl SessionState {
    /// Erstellt den Startzustand aus Vorgaben und Profil.
    ///
    /// Fehlende Wegpunkte werden auf zwei leere aufgefüllt.
    pub fn new(seeds: Vec<WaypointSeed>, profile: Profile, options: SessionOptions) -> Self {
        let mut state = Self {
            view: SessionView::Start,
            waypoints: Arc::new(Vec::new()),
            routes: Arc::new(Vec::new()),
            focus_index: None,
            user_location_requested: false,
            user_location_available: true,
            profile,
            pending: PendingWork::default(),
            suppress_next_map_click: false,
            options,
            command_log: CommandLog::new(),
            next_waypoint_id: 1,
        };

        let mut waypoints = Vec::with_capacity(seeds.len().max(2));
        for seed in seeds {
            let id = state.mint_waypoint_id();
            waypoints.push(Waypoint::from_seed(id, seed));
        }
        while waypoints.len() < 2 {
            let id = state.mint_waypoint_id();
            waypoints.push(Waypoint::blank(id));
        }

        state.routes = Arc::new(vec![Route::with_segment_count(waypoints.len() - 1)]);
        state.waypoints = Arc::new(waypoints);
        state.view = state.derived_view();
        if state.view == SessionView::Routes {
            state.request_route_recompute();
        }
        state
    }

    /// Diskriminante der aktuellen Ansicht.
    pub fn view_kind(&self) -> ViewKind {
        self.view.kind()
    }

    /// Vergibt die nächste Wegpunkt-ID (monoton, nie wiederverwendet).
    pub fn mint_waypoint_id(&mut self) -> u64 {
        let id = self.next_waypoint_id;
        self.next_waypoint_id += 1;
        id
    }

    /// Mutable Wegpunkte (CoW: klont nur wenn ein Diff noch darauf zeigt).
    #[inline]
    pub fn waypoints_mut(&mut self) -> &mut Vec<Waypoint> {
        Arc::make_mut(&mut self.waypoints)
    }

    /// Mutable Routen (CoW).
    #[inline]
    pub fn routes_mut(&mut self) -> &mut Vec<Route> {
        Arc::make_mut(&mut self.routes)
    }

    /// Hauptroute.
    pub fn primary_route(&self) -> Option<&Route> {
        self.routes.first()
    }

    /// Mutable Hauptroute; legt sie bei Bedarf an.
    pub fn primary_route_mut(&mut self) -> &mut Route {
        let segment_count = self.waypoints.len().saturating_sub(1);
        let routes = self.routes_mut();
        if routes.is_empty() {
            routes.push(Route::with_segment_count(segment_count));
        }
        &mut routes[0]
    }

    /// Index des Wegpunkts mit `id`.
    pub fn index_of(&self, id: u64) -> Option<usize> {
        self.waypoints.iter().position(|w| w.id == id)
    }

    /// Aktive Suche, falls vorhanden.
    pub fn active_search(&self) -> Option<&ActiveSearch> {
        match &self.view {
            SessionView::Search(search) => Some(search),
            _ => None,
        }
    }

    /// Mutable aktive Suche.
    pub fn active_search_mut(&mut self) -> Option<&mut ActiveSearch> {
        match &mut self.view {
            SessionView::Search(search) => Some(search),
            _ => None,
        }
    }

    /// Abgeleitete Ansicht: `Routes` genau dann, wenn jedes Paar aufgelöst ist.
    pub fn derived_view(&self) -> SessionView {
        let all_pairs_resolved = self
            .waypoints
            .windows(2)
            .all(|pair| pair[0].is_resolved() && pair[1].is_resolved());
        if all_pairs_resolved {
            SessionView::Routes
        } else {
            SessionView::Start
        }
    }

    /// Markiert ein- und ausgehendes Segment als dirty.
    ///
    /// Bei genau zwei Wegpunkten gehören Alternativen zum selben Paar und
    /// werden mit verworfen.
    pub fn invalidate_adjacent(&mut self, index: usize) {
        self.primary_route_mut().invalidate_adjacent(index);
        if self.waypoints.len() == 2 {
            self.drop_alternatives();
        }
    }

    /// `true`, wenn ein an `index` angrenzendes Segment dirty ist.
    pub fn has_dirty_adjacent(&self, index: usize) -> bool {
        self.primary_route().is_some_and(|route| {
            (index > 0 && route.is_dirty(index - 1)) || route.is_dirty(index)
        })
    }

    /// Verwirft alle Alternativrouten.
    pub fn drop_alternatives(&mut self) {
        if self.routes.len() > 1 {
            self.routes_mut().truncate(1);
        }
    }

    /// Fordert eine Routen-Neuberechnung an.
    ///
    /// Erhöht die Sequenz: Antworten auf frühere Anfragen gelten ab jetzt als veraltet.
    pub fn request_route_recompute(&mut self) {
        self.pending.route = true;
        self.pending.route_sequence += 1;
    }

    /// Passt Fokus und Such-Index an einen vor `index` eingefügten Wegpunkt an.
    pub fn shift_indices_after_insert(&mut self, index: usize) {
        if let Some(focus) = self.focus_index.as_mut() {
            if *focus >= index {
                *focus += 1;
            }
        }
        if let Some(search) = self.active_search_mut() {
            if search.index >= index {
                search.index += 1;
            }
        }
    }

    /// Passt Fokus und Such-Index an einen entfernten Wegpunkt an.
    pub fn shift_indices_after_remove(&mut self, index: usize) {
        self.focus_index = match self.focus_index {
            Some(focus) if focus == index => None,
            Some(focus) if focus > index => Some(focus - 1),
            other => other,
        };
        if let Some(search) = self.active_search_mut() {
            if search.index > index {
                search.index -= 1;
            }
        }
    }

    /// Prüft die Session-Invarianten.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.waypoints.len() >= 2,
            "Session hat nur {} Wegpunkt(e)",
            self.waypoints.len()
        );

        let mut ids = HashSet::with_capacity(self.waypoints.len());
        for waypoint in self.waypoints.iter() {
            anyhow::ensure!(ids.insert(waypoint.id), "Doppelte Wegpunkt-ID {}", waypoint.id);
            anyhow::ensure!(
                waypoint.id < self.next_waypoint_id,
                "Wegpunkt-ID {} nicht vom Zähler vergeben",
                waypoint.id
            );
        }

        let segment_count = self.primary_route().map_or(0, Route::segment_count);
        anyhow::ensure!(
            segment_count == self.waypoints.len() - 1,
            "Hauptroute hat {} Segmente bei {} Wegpunkten",
            segment_count,
            self.waypoints.len()
        );

        if self.view == SessionView::Routes {
            anyhow::ensure!(
                self.waypoints.iter().all(Waypoint::is_resolved),
                "Ansicht ROUTES mit unaufgelöstem Wegpunkt"
            );
        }

        if let Some(search) = self.active_search() {
            anyhow::ensure!(
                search.index < self.waypoints.len(),
                "Such-Index {} außerhalb",
                search.index
            );
        }
        Ok(())
    }
}
