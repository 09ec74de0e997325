use crate::core::{LngLat, Profile, SearchResult, SegmentData};

/// Commands sind mutierende Schritte, die zentral ausgeführt werden.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    // === Routing ===
    /// Profil setzen
    SetProfile { profile: Profile },
    /// Alle Segmente und Alternativen verwerfen
    ClearAllSegments,
    /// Neuberechnung anfordern (erhöht die Routing-Sequenz)
    RequestRouteRecompute,
    /// Ein- und ausgehendes Segment eines Wegpunkts invalidieren
    InvalidateAdjacent { index: usize },
    /// Berechnetes Segment der Hauptroute übernehmen
    ApplyRouteSegment {
        segment_index: usize,
        data: SegmentData,
    },
    /// Hauptroute (ein Segment) samt Alternativen übernehmen
    ApplyAlternatives {
        primary: SegmentData,
        alternatives: Vec<SegmentData>,
    },

    // === Wegpunkte ===
    /// Wegpunkt entfernen bzw. leeren
    RemoveOrClearWaypoint { index: usize },
    /// Leeren Wegpunkt anhängen
    AppendWaypoint,
    /// Wegpunkt mit Koordinate an Index einfügen
    InsertWaypoint { index: usize, coordinate: LngLat },
    /// Koordinate eines Wegpunkts setzen (Beschreibung = Platzhalter)
    PlaceWaypoint { index: usize, coordinate: LngLat },
    /// Die ersten beiden Wegpunkte tauschen
    SwapFirstTwo,
    /// Nächsten rohen Karten-Klick ignorieren
    SuppressNextMapClick,
    /// Unterdrückten Karten-Klick verbrauchen
    ConsumeSuppressedMapClick,

    // === Suche ===
    /// Suche für Wegpunkt beginnen (sichert den Wegpunkt)
    BeginSearch { index: usize },
    /// Suche abbrechen, Sicherung zurückschreiben
    RestoreSearchBackup,
    /// Suche bestätigen, Sicherung verwerfen
    ConfirmSearch,
    /// Suchtext setzen und Vorwärtssuche vormerken
    SetSearchQuery { query: String },
    /// Suchtreffer auf den aktiven Wegpunkt anwenden
    ApplySearchResult { result_index: usize },
    /// Trefferliste ersetzen
    ApplyForwardResults { results: Vec<SearchResult> },
    /// Laufende Vorwärtssuche abschließen
    FinishForwardGeocode,
    /// Wegpunkt für Rückwärtssuche vormerken
    EnqueueReverseGeocode { index: usize },
    /// Beschreibung aus Rückwärtssuche übernehmen
    ApplyReverseDescription { index: usize, description: String },

    // === Nutzer-Standort ===
    /// Standort anfordern
    RequestUserLocation,
    /// Wegpunkt auf Nutzer-Standort setzen
    SetUserLocation { index: usize, coordinate: LngLat },
    /// Standort als nicht verfügbar markieren
    MarkUserLocationFailed,

    // === Ansicht ===
    /// Ansicht aus den Wegpunkten ableiten (außer während einer Suche)
    RecomputeView,
    /// Eingabefokus setzen
    SetFocus { index: Option<usize> },
}

impl SessionCommand {
    /// Variantenname ohne Nutzdaten (für das Command-Log).
    pub fn name(&self) -> &'static str {
        match self {
            SessionCommand::SetProfile { .. } => "SetProfile",
            SessionCommand::ClearAllSegments => "ClearAllSegments",
            SessionCommand::RequestRouteRecompute => "RequestRouteRecompute",
            SessionCommand::InvalidateAdjacent { .. } => "InvalidateAdjacent",
            SessionCommand::ApplyRouteSegment { .. } => "ApplyRouteSegment",
            SessionCommand::ApplyAlternatives { .. } => "ApplyAlternatives",
            SessionCommand::RemoveOrClearWaypoint { .. } => "RemoveOrClearWaypoint",
            SessionCommand::AppendWaypoint => "AppendWaypoint",
            SessionCommand::InsertWaypoint { .. } => "InsertWaypoint",
            SessionCommand::PlaceWaypoint { .. } => "PlaceWaypoint",
            SessionCommand::SwapFirstTwo => "SwapFirstTwo",
            SessionCommand::SuppressNextMapClick => "SuppressNextMapClick",
            SessionCommand::ConsumeSuppressedMapClick => "ConsumeSuppressedMapClick",
            SessionCommand::BeginSearch { .. } => "BeginSearch",
            SessionCommand::RestoreSearchBackup => "RestoreSearchBackup",
            SessionCommand::ConfirmSearch => "ConfirmSearch",
            SessionCommand::SetSearchQuery { .. } => "SetSearchQuery",
            SessionCommand::ApplySearchResult { .. } => "ApplySearchResult",
            SessionCommand::ApplyForwardResults { .. } => "ApplyForwardResults",
            SessionCommand::FinishForwardGeocode => "FinishForwardGeocode",
            SessionCommand::EnqueueReverseGeocode { .. } => "EnqueueReverseGeocode",
            SessionCommand::ApplyReverseDescription { .. } => "ApplyReverseDescription",
            SessionCommand::RequestUserLocation => "RequestUserLocation",
            SessionCommand::SetUserLocation { .. } => "SetUserLocation",
            SessionCommand::MarkUserLocationFailed => "MarkUserLocationFailed",
            SessionCommand::RecomputeView => "RecomputeView",
            SessionCommand::SetFocus { .. } => "SetFocus",
        }
    }
}
