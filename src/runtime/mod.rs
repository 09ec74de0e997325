//! Laufzeit einer Routing-Session auf Tokio.
//!
//! Die Session gehört exklusiv einem Scheduler-Task. Events kommen über
//! einen [`SessionHandle`], der Lebenszyklus hängt am [`SessionRuntime`]:
//! `shutdown()` oder Drop beendet den Task.

mod scheduler;

use crate::app::{RoutingSession, SessionIntent};
use crate::core::LngLat;
use crate::geocode::GeocodingProvider;
use crate::routing::RoutingService;
use scheduler::ActionScheduler;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Klonbarer Sender für Session-Events.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    intents: mpsc::UnboundedSender<SessionIntent>,
}

impl SessionHandle {
    /// Stellt ein Event zu. Fehler, wenn die Runtime bereits beendet ist.
    pub fn send(&self, intent: SessionIntent) -> anyhow::Result<()> {
        self.intents
            .send(intent)
            .map_err(|_| anyhow::anyhow!("Session-Runtime ist beendet"))
    }

    /// Kurzform für einen Karten-Klick.
    pub fn map_clicked(&self, coordinate: LngLat) -> anyhow::Result<()> {
        self.send(SessionIntent::MapClicked { coordinate })
    }

    /// `true`, solange die Runtime Events annimmt.
    pub fn is_running(&self) -> bool {
        !self.intents.is_closed()
    }
}

/// Builder für [`SessionRuntime`].
pub struct RuntimeBuilder {
    session: RoutingSession,
    routing: Option<Arc<dyn RoutingService>>,
    geocoder: Option<Arc<dyn GeocodingProvider>>,
    tick_interval: Duration,
}

impl RuntimeBuilder {
    /// Routing-Dienst setzen.
    pub fn routing(mut self, routing: Arc<dyn RoutingService>) -> Self {
        self.routing = Some(routing);
        self
    }

    /// Geocoder (Provider oder Fallback-Kette) setzen.
    pub fn geocoder(mut self, geocoder: Arc<dyn GeocodingProvider>) -> Self {
        self.geocoder = Some(geocoder);
        self
    }

    /// Tick-Intervall überschreiben (Standard aus den Session-Optionen).
    pub fn tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval.max(Duration::from_millis(1));
        self
    }

    /// Startet den Scheduler-Task. Muss innerhalb einer Tokio-Runtime laufen.
    pub fn spawn(self) -> SessionRuntime {
        let (intents_tx, intents_rx) = mpsc::unbounded_channel();
        let (responses_tx, responses_rx) = mpsc::unbounded_channel();
        let shutdown = CancellationToken::new();

        let scheduler = ActionScheduler {
            routing: self.routing,
            geocoder: self.geocoder,
            tick_interval: self.tick_interval,
            responses_tx,
        };
        let task = tokio::spawn(scheduler.run(
            self.session,
            intents_rx,
            responses_rx,
            shutdown.clone(),
        ));

        SessionRuntime {
            handle: SessionHandle {
                intents: intents_tx,
            },
            shutdown,
            task: Some(task),
        }
    }
}

/// Laufende Session samt Scheduler.
pub struct SessionRuntime {
    handle: SessionHandle,
    shutdown: CancellationToken,
    task: Option<JoinHandle<RoutingSession>>,
}

impl SessionRuntime {
    /// Beginnt den Aufbau einer Runtime für `session`.
    pub fn builder(session: RoutingSession) -> RuntimeBuilder {
        let tick_interval = session.options().tick_interval();
        RuntimeBuilder {
            session,
            routing: None,
            geocoder: None,
            tick_interval,
        }
    }

    /// Neuer Handle zum Senden von Events.
    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    /// Beendet den Scheduler und gibt die Session zurück.
    ///
    /// Bereits gesendete, aber noch nicht verarbeitete Events gehen verloren.
    pub async fn shutdown(mut self) -> anyhow::Result<RoutingSession> {
        self.shutdown.cancel();
        let task = self
            .task
            .take()
            .ok_or_else(|| anyhow::anyhow!("Scheduler-Task bereits beendet"))?;
        let session = task.await?;
        log::info!("Session-Runtime beendet");
        Ok(session)
    }
}

impl Drop for SessionRuntime {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
