//! Matchmaker – periodische Raum-Zuordnung
//!
//! Ein einzelner Hintergrund-Task ruft in festem Intervall
//! [`Lobby::tick`] auf. Das Intervall ist kurz genug dass ein Beitritt
//! fuer den Spieler unmittelbar wirkt; die eigentliche Zuordnungslogik
//! liegt vollstaendig in der Lobby.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::registry::Lobby;

/// Standard-Tickintervall
pub const TICK_INTERVALL: Duration = Duration::from_millis(50);

/// Periodischer Matchmaking-Treiber
pub struct Matchmaker {
    lobby: Lobby,
    intervall: Duration,
}

impl Matchmaker {
    /// Erstellt einen Matchmaker mit eigenem Intervall
    pub fn neu(lobby: Lobby, intervall: Duration) -> Self {
        Self { lobby, intervall }
    }

    /// Erstellt einen Matchmaker mit dem Standard-Intervall
    pub fn mit_standard_intervall(lobby: Lobby) -> Self {
        Self::neu(lobby, TICK_INTERVALL)
    }

    /// Startet den Hintergrund-Task
    pub fn starten(self) -> MatchmakerHandle {
        let (stop_tx, mut stop_rx) = watch::channel(false);
        let lobby = self.lobby;
        let intervall = self.intervall;

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(intervall);
            // Verpasste Ticks nicht nachholen
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            tracing::info!(intervall_ms = intervall.as_millis() as u64, "Matchmaker gestartet");

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        lobby.tick();
                    }
                    ergebnis = stop_rx.changed() => {
                        if ergebnis.is_err() || *stop_rx.borrow() {
                            break;
                        }
                    }
                }
            }
            tracing::info!("Matchmaker beendet");
        });

        MatchmakerHandle {
            stop_tx,
            task,
        }
    }
}

/// Handle zum Stoppen des Matchmaker-Tasks
pub struct MatchmakerHandle {
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl MatchmakerHandle {
    /// Stoppt den Task und wartet auf sein Ende
    pub async fn stoppen(self) {
        // Fehler heisst: Task bereits weg
        let _ = self.stop_tx.send(true);
        let _ = self.task.await;
    }
}
