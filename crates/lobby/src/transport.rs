//! Verbindungs-Tabelle – Send-Queues aller aktiven Verbindungen
//!
//! Jede Transport-Verbindung bekommt beim Registrieren eine begrenzte
//! mpsc-Queue. Die Transportschicht liest aus der Queue und kodiert die
//! Ereignisse fuer den Draht; der Kern schiebt nur nicht-blockierend
//! hinein. Eine volle Queue verwirft die Nachricht statt zu warten.

use dashmap::DashMap;
use parlor_core::types::ConnectionId;
use parlor_protocol::ClientEvent;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Groesse der Send-Queue pro Verbindung
const SEND_QUEUE_GROESSE: usize = 64;

// ---------------------------------------------------------------------------
// ClientSender
// ---------------------------------------------------------------------------

/// Handle auf die Send-Queue einer einzelnen Verbindung
#[derive(Clone, Debug)]
pub struct ClientSender {
    pub connection_id: ConnectionId,
    tx: mpsc::Sender<ClientEvent>,
}

impl ClientSender {
    /// Sendet ein Ereignis nicht-blockierend an die Verbindung
    ///
    /// Gibt `false` zurueck wenn die Queue voll oder geschlossen ist.
    pub fn senden(&self, ereignis: ClientEvent) -> bool {
        match self.tx.try_send(ereignis) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(
                    connection_id = %self.connection_id,
                    "Send-Queue voll – Ereignis verworfen"
                );
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                tracing::debug!(
                    connection_id = %self.connection_id,
                    "Send-Queue geschlossen (Verbindung getrennt)"
                );
                false
            }
        }
    }
}

// ---------------------------------------------------------------------------
// ConnectionTable
// ---------------------------------------------------------------------------

/// Tabelle aller aktiven Verbindungen, indiziert nach ConnectionId
///
/// Thread-safe via Arc + DashMap. Clone teilt den inneren Zustand.
/// Sendungen laufen ausserhalb des Registry-Mutex, sodass Fan-outs die
/// strukturellen Mutationen nie blockieren.
#[derive(Clone)]
pub struct ConnectionTable {
    inner: Arc<DashMap<ConnectionId, ClientSender>>,
}

impl ConnectionTable {
    /// Erstellt eine neue leere ConnectionTable
    pub fn neu() -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
        }
    }

    /// Registriert eine neue Verbindung und gibt ihre Empfangs-Queue zurueck
    ///
    /// Die Transportschicht liest aus dieser Queue und sendet zum Client.
    pub fn registrieren(&self, connection_id: ConnectionId) -> mpsc::Receiver<ClientEvent> {
        let (tx, rx) = mpsc::channel(SEND_QUEUE_GROESSE);
        let sender = ClientSender { connection_id, tx };
        self.inner.insert(connection_id, sender);
        tracing::debug!(connection_id = %connection_id, "Verbindung registriert");
        rx
    }

    /// Entfernt eine Verbindung aus der Tabelle
    pub fn entfernen(&self, connection_id: &ConnectionId) {
        if self.inner.remove(connection_id).is_some() {
            tracing::debug!(connection_id = %connection_id, "Verbindung entfernt");
        }
    }

    /// Gibt den Sender einer Verbindung zurueck
    pub fn sender(&self, connection_id: &ConnectionId) -> Option<ClientSender> {
        self.inner.get(connection_id).map(|e| e.clone())
    }

    /// Sendet ein Ereignis an eine einzelne Verbindung
    ///
    /// Gibt `true` zurueck wenn die Verbindung bekannt war und das
    /// Ereignis eingereiht wurde.
    pub fn senden(&self, connection_id: &ConnectionId, ereignis: ClientEvent) -> bool {
        match self.inner.get(connection_id) {
            Some(sender) => sender.senden(ereignis),
            None => {
                tracing::debug!(connection_id = %connection_id, "Senden an unbekannte Verbindung");
                false
            }
        }
    }

    /// Gibt die Anzahl der aktiven Verbindungen zurueck
    pub fn anzahl(&self) -> usize {
        self.inner.len()
    }

    /// Prueft ob eine Verbindung registriert ist
    pub fn ist_registriert(&self, connection_id: &ConnectionId) -> bool {
        self.inner.contains_key(connection_id)
    }
}

impl Default for ConnectionTable {
    fn default() -> Self {
        Self::neu()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn verbindung_registrieren_und_senden() {
        let tabelle = ConnectionTable::neu();
        let cid = ConnectionId::new();

        let mut rx = tabelle.registrieren(cid);
        assert!(tabelle.ist_registriert(&cid));

        let gesendet = tabelle.senden(&cid, ClientEvent::TransitionToLobby);
        assert!(gesendet);

        let empfangen = rx.try_recv().expect("Ereignis muss vorhanden sein");
        assert_eq!(empfangen, ClientEvent::TransitionToLobby);
    }

    #[tokio::test]
    async fn senden_an_unbekannte_verbindung() {
        let tabelle = ConnectionTable::neu();
        let cid = ConnectionId::new();
        assert!(!tabelle.senden(&cid, ClientEvent::TransitionToLobby));
    }

    #[tokio::test]
    async fn entfernen_schliesst_queue_ab() {
        let tabelle = ConnectionTable::neu();
        let cid = ConnectionId::new();

        let _rx = tabelle.registrieren(cid);
        assert_eq!(tabelle.anzahl(), 1);

        tabelle.entfernen(&cid);
        assert_eq!(tabelle.anzahl(), 0);
        assert!(!tabelle.ist_registriert(&cid));
    }

    #[tokio::test]
    async fn volle_queue_verwirft_statt_zu_blockieren() {
        let tabelle = ConnectionTable::neu();
        let cid = ConnectionId::new();
        let _rx = tabelle.registrieren(cid);

        // Queue bis zum Rand fuellen
        for _ in 0..SEND_QUEUE_GROESSE {
            assert!(tabelle.senden(&cid, ClientEvent::TransitionToLobby));
        }
        // Naechstes Ereignis wird verworfen, kein Haengen
        assert!(!tabelle.senden(&cid, ClientEvent::TransitionToLobby));
    }
}
