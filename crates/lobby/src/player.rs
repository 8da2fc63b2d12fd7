//! Player – ein logischer Spielteilnehmer
//!
//! Ein Spieler ist von einzelnen Verbindungen entkoppelt: er haelt bis
//! zu drei gleichzeitige Verbindungen (Tabs) und ueberlebt Reconnects.
//! Nachrichten-Caches, Timerzustand und Abstimmungsdaten bleiben beim
//! Spieler, damit ein neu verbundener Tab auf Gleichstand gebracht
//! werden kann.

use std::collections::VecDeque;
use std::sync::Arc;

use parlor_core::types::{ConnectionId, PlayerId, RoomId, SessionToken};
use parlor_protocol::{ChatLine, ClientEvent, Color};

use crate::room::GameRoom;
use crate::transport::ClientSender;

/// Maximale gleichzeitige Verbindungen pro Spieler (Tabs)
pub const MAX_VERBINDUNGEN: usize = 3;

/// Kapazitaet der Nachrichten-Caches (Center- und Links-Pane)
const CACHE_GROESSE: usize = 50;

/// Ein logischer Spielteilnehmer
pub struct Player {
    /// Stabile Identitaet, unabhaengig von Verbindungen
    pub id: PlayerId,
    /// Session-Token zum Zusammenfuehren mehrerer Tabs
    pub session: SessionToken,
    /// Anzeigename; leer bis zur Registrierung
    username: String,
    /// Geordnete Liste der lebenden Verbindungen
    connections: Vec<ClientSender>,
    /// Hat der Spieler die Registrierung abgeschlossen?
    pub registered: bool,
    /// Registrierung dauerhaft gesperrt (Session spielt in anderem Tab)
    pub registration_banned: bool,
    /// Referenz auf den aktuellen Raum
    pub room: Option<Arc<dyn GameRoom>>,
    /// Sitzt der Spieler in einem Raum? (gekoppelt an `room`)
    pub in_room: bool,
    /// Zuletzt angeklickter Raum (Matchmaking-Ziel und Vorschau)
    pub last_room_click: Option<RoomId>,
    /// Admin-Eskalation erfolgt?
    pub admin: bool,
    /// Start-Vote bereits abgegeben?
    pub start_vote: bool,
    /// Begrenzter Verlauf des zentralen Nachrichten-Pane
    center_cache: VecDeque<ChatLine>,
    /// Begrenzter Verlauf des linken Ereignis-Pane
    left_cache: VecDeque<String>,
    /// Restzeit des aktuellen Raum-Timers (fuer Replay)
    pub time_ms: u64,
    /// Warnschwelle des Timers (fuer Replay)
    pub warn_ms: u64,
    /// Darf der Spieler gerade abstimmen?
    pub vote_eligible: bool,
    /// Zuvor gewaehltes Abstimmungsziel (fuer Replay)
    pub vote_target: Option<String>,
}

impl Player {
    /// Erstellt einen neuen, unregistrierten Spieler
    pub fn neu(session: SessionToken) -> Self {
        Self {
            id: PlayerId::new(),
            session,
            username: String::new(),
            connections: Vec::new(),
            registered: false,
            registration_banned: false,
            room: None,
            in_room: false,
            last_room_click: None,
            admin: false,
            start_vote: false,
            center_cache: VecDeque::new(),
            left_cache: VecDeque::new(),
            time_ms: 0,
            warn_ms: 0,
            vote_eligible: false,
            vote_target: None,
        }
    }

    /// Gibt den Anzeigenamen zurueck (leer bis zur Registrierung)
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Schliesst die Registrierung mit dem normalisierten Namen ab
    pub fn registrieren(&mut self, username: String) {
        self.username = username;
        self.registered = true;
    }

    // -----------------------------------------------------------------------
    // Verbindungen
    // -----------------------------------------------------------------------

    /// Haengt eine Verbindung an den Spieler an
    ///
    /// Gibt `false` zurueck wenn das Limit erreicht ist. Unregistrierte
    /// Spieler halten hoechstens eine Verbindung; erst die Registrierung
    /// erlaubt das Zusammenfuehren weiterer Tabs.
    pub fn verbindung_hinzufuegen(&mut self, sender: ClientSender) -> bool {
        let limit = if self.registered {
            MAX_VERBINDUNGEN
        } else {
            1
        };
        if self.connections.len() >= limit {
            return false;
        }
        self.connections.push(sender);
        true
    }

    /// Loest eine Verbindung vom Spieler
    ///
    /// Der Spielerzustand (Rolle, Votes, Caches) bleibt erhalten.
    pub fn verbindung_entfernen(&mut self, connection_id: &ConnectionId) -> bool {
        let vorher = self.connections.len();
        self.connections
            .retain(|s| s.connection_id != *connection_id);
        self.connections.len() < vorher
    }

    /// Entfernt alle Verbindungen und gibt ihre IDs zurueck
    /// (Disconnect aus laufendem Spiel)
    pub fn alle_verbindungen_entfernen(&mut self) -> Vec<ConnectionId> {
        self.connections
            .drain(..)
            .map(|s| s.connection_id)
            .collect()
    }

    /// Anzahl der lebenden Verbindungen
    pub fn verbindungs_anzahl(&self) -> usize {
        self.connections.len()
    }

    /// Geordnete Sicht auf die lebenden Verbindungen
    pub fn verbindungen(&self) -> &[ClientSender] {
        &self.connections
    }

    // -----------------------------------------------------------------------
    // Senden & Caches
    // -----------------------------------------------------------------------

    /// Sendet ein Ereignis an alle Verbindungen des Spielers
    pub fn senden(&self, ereignis: ClientEvent) {
        for verbindung in &self.connections {
            verbindung.senden(ereignis.clone());
        }
    }

    /// Sendet eine Zeile ins zentrale Pane und legt sie im Cache ab
    pub fn center_nachricht(&mut self, text: impl Into<String>, color: Color) {
        let zeile = ChatLine::new(text, color);
        self.senden(ClientEvent::CenterChat(zeile.clone()));
        if self.center_cache.len() >= CACHE_GROESSE {
            self.center_cache.pop_front();
        }
        self.center_cache.push_back(zeile);
    }

    /// Sendet eine Notiz ins linke Pane und legt sie im Cache ab
    pub fn linke_notiz(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.senden(ClientEvent::LeftNote { text: text.clone() });
        if self.left_cache.len() >= CACHE_GROESSE {
            self.left_cache.pop_front();
        }
        self.left_cache.push_back(text);
    }

    /// Verlauf des zentralen Pane (aelteste zuerst)
    pub fn center_cache(&self) -> &VecDeque<ChatLine> {
        &self.center_cache
    }

    /// Verlauf des linken Pane (aelteste zuerst)
    pub fn left_cache(&self) -> &VecDeque<String> {
        &self.left_cache
    }

    /// Setzt den Timerzustand und informiert alle Verbindungen
    pub fn zeit_setzen(&mut self, time_ms: u64, warn_ms: u64) {
        self.time_ms = time_ms;
        self.warn_ms = warn_ms;
        self.senden(ClientEvent::SetTime { time_ms, warn_ms });
    }

    // -----------------------------------------------------------------------
    // Lebenszyklus
    // -----------------------------------------------------------------------

    /// Setzt den spielbezogenen Zustand nach dem Verlassen eines Raums
    /// zurueck; Name und Registrierung bleiben erhalten
    pub fn nach_spiel_zuruecksetzen(&mut self) {
        self.room = None;
        self.in_room = false;
        self.last_room_click = None;
        self.start_vote = false;
        self.center_cache.clear();
        self.left_cache.clear();
        self.time_ms = 0;
        self.warn_ms = 0;
        self.vote_eligible = false;
        self.vote_target = None;
    }
}
