//! Scheduler-Schleife: besitzt die Session und leert die Pending-Work-Kanäle.
//!
//! Alle Mutationen laufen in genau diesem Task. Dienst-Aufrufe werden als
//! eigene Tasks gestartet und kehren über einen mpsc-Kanal zurück.

use crate::app::{
    ForwardRequest, ReverseRequest, RouteRequest, RoutingSession, ServiceResponse, SessionIntent,
};
use crate::geocode::GeocodingProvider;
use crate::routing::RoutingService;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

fn drain_interval(period: Duration) -> Interval {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}

/// Verteilt fällige Arbeit an die Dienste.
pub(crate) struct ActionScheduler {
    pub(crate) routing: Option<Arc<dyn RoutingService>>,
    pub(crate) geocoder: Option<Arc<dyn GeocodingProvider>>,
    pub(crate) tick_interval: Duration,
    pub(crate) responses_tx: mpsc::UnboundedSender<ServiceResponse>,
}

impl ActionScheduler {
    /// Läuft bis zum Shutdown und gibt die Session danach zurück.
    pub(crate) async fn run(
        self,
        mut session: RoutingSession,
        mut intents: mpsc::UnboundedReceiver<SessionIntent>,
        mut responses: mpsc::UnboundedReceiver<ServiceResponse>,
        shutdown: CancellationToken,
    ) -> RoutingSession {
        log::info!(
            "Scheduler gestartet (Tick {} ms, Routing: {}, Geocoding: {})",
            self.tick_interval.as_millis(),
            self.routing.is_some(),
            self.geocoder
                .as_ref()
                .map_or("keins", |g| g.name())
        );

        let mut route_tick = drain_interval(self.tick_interval);
        let mut forward_tick = drain_interval(self.tick_interval);
        let mut reverse_tick = drain_interval(self.tick_interval);

        loop {
            tokio::select! {
                biased;

                _ = shutdown.cancelled() => {
                    log::info!("Scheduler wird beendet");
                    break;
                }

                Some(intent) = intents.recv() => session.handle_intent(intent),

                Some(response) = responses.recv() => session.apply_response(response),

                _ = route_tick.tick() => {
                    let requests = session.take_route_requests();
                    self.dispatch_routes(requests);
                }

                _ = forward_tick.tick() => {
                    if let Some(request) = session.take_forward_request() {
                        self.dispatch_forward(&mut session, request);
                    }
                }

                _ = reverse_tick.tick() => {
                    if let Some(request) = session.take_reverse_request() {
                        self.dispatch_reverse(request);
                    }
                }
            }
        }

        session
    }

    fn dispatch_routes(&self, requests: Vec<RouteRequest>) {
        if requests.is_empty() {
            return;
        }
        let Some(routing) = self.routing.as_ref() else {
            log::error!(
                "Kein Routing-Dienst konfiguriert, {} Anfrage(n) übersprungen",
                requests.len()
            );
            return;
        };

        log::debug!(
            "{} Routing-Anfrage(n), Sequenz {}",
            requests.len(),
            requests[0].sequence
        );
        for request in requests {
            let routing = Arc::clone(routing);
            let tx = self.responses_tx.clone();
            tokio::spawn(async move {
                let result = routing
                    .get_route(
                        request.origin,
                        request.destination,
                        &request.profile,
                        request.alternatives,
                    )
                    .await;
                match result {
                    Ok(response) => {
                        let response = ServiceResponse::RouteComputed {
                            sequence: request.sequence,
                            segment_index: request.segment_index,
                            response,
                        };
                        if tx.send(response).is_err() {
                            log::debug!("Session beendet, Routing-Ergebnis verworfen");
                        }
                    }
                    // Segment bleibt dirty bis zur nächsten Bearbeitung
                    Err(e) => log::warn!(
                        "Routing für Segment {} fehlgeschlagen: {}",
                        request.segment_index,
                        e
                    ),
                }
            });
        }
    }

    fn dispatch_forward(&self, session: &mut RoutingSession, request: ForwardRequest) {
        let Some(geocoder) = self.geocoder.as_ref() else {
            log::error!(
                "Kein Geocoder konfiguriert, Suche '{}' übersprungen",
                request.query
            );
            session.apply_response(ServiceResponse::ForwardGeocodeFailed {
                query: request.query,
            });
            return;
        };

        let geocoder = Arc::clone(geocoder);
        let tx = self.responses_tx.clone();
        tokio::spawn(async move {
            let response = match geocoder.forward(&request.query).await {
                Ok(results) => ServiceResponse::ForwardGeocoded {
                    query: request.query,
                    results,
                },
                Err(e) => {
                    log::warn!("Suche '{}' fehlgeschlagen: {}", request.query, e);
                    ServiceResponse::ForwardGeocodeFailed {
                        query: request.query,
                    }
                }
            };
            if tx.send(response).is_err() {
                log::debug!("Session beendet, Suchergebnis verworfen");
            }
        });
    }

    fn dispatch_reverse(&self, request: ReverseRequest) {
        let Some(geocoder) = self.geocoder.as_ref() else {
            log::error!(
                "Kein Geocoder konfiguriert, Rückwärtssuche für Wegpunkt {} übersprungen",
                request.waypoint_id
            );
            return;
        };

        let geocoder = Arc::clone(geocoder);
        let tx = self.responses_tx.clone();
        tokio::spawn(async move {
            match geocoder.reverse(request.coordinate).await {
                Ok(results) => {
                    let response = ServiceResponse::ReverseGeocoded {
                        waypoint_id: request.waypoint_id,
                        coordinate: request.coordinate,
                        results,
                    };
                    if tx.send(response).is_err() {
                        log::debug!("Session beendet, Rückwärtssuche verworfen");
                    }
                }
                Err(e) => log::warn!(
                    "Rückwärtssuche für Wegpunkt {} fehlgeschlagen: {}",
                    request.waypoint_id,
                    e
                ),
            }
        });
    }
}
