//! Client-Ereignisse
//!
//! Definiert alle Ereignisse die der Session-Kern an einzelne
//! Verbindungen schickt (Roster, Raumlisten, Chat-Panes, Uebergaenge,
//! Timer, Abstimmungsberechtigung, Fehler).
//!
//! ## Design
//! - Tagged Enum fuer typsichere Ereignistypen
//! - JSON-Serialisierung via serde (Chat-Tempo, nicht zeitkritisch)
//! - Jedes Ereignis ist in sich abgeschlossen; der Client braucht keinen
//!   Zusatzkontext um es darzustellen

use chrono::{DateTime, Utc};
use parlor_core::types::RoomId;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Farben
// ---------------------------------------------------------------------------

/// Farbpalette fuer Chat-Zeilen und Spielerlisten
///
/// Die Zuordnung von Spielern zu Farben trifft der externe
/// Raum-Kollaborateur; der Kern reicht Farben nur durch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Color {
    /// Neutrale Farbe fuer Lobby-Chat und Systemmeldungen
    StandardWhite,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    Brightgreen,
    Brightred,
}

impl Color {
    /// Gibt den Hex-Wert der Farbe zurueck (Darstellung im Client)
    pub fn hex(&self) -> &'static str {
        match self {
            Color::StandardWhite => "#cecece",
            Color::Red => "#ff1b1b",
            Color::Green => "#1bff1b",
            Color::Yellow => "#ffff44",
            Color::Blue => "#3c78ff",
            Color::Magenta => "#ff3cff",
            Color::Cyan => "#3cffff",
            Color::Brightgreen => "#00ff00",
            Color::Brightred => "#ff0000",
        }
    }
}

// ---------------------------------------------------------------------------
// Chat-Zeilen
// ---------------------------------------------------------------------------

/// Eine einzelne Chat-Zeile (Text + Farbe)
///
/// Wird sowohl live versendet als auch in den begrenzten Caches
/// (Lobby-Chat, Center-Pane) abgelegt und bei Reconnects wortgleich
/// wiederholt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatLine {
    /// Anzeigetext
    pub text: String,
    /// Darstellungsfarbe
    pub color: Color,
    /// Entstehungszeitpunkt (nur informativ, keine Ordnungsgarantie)
    pub timestamp: DateTime<Utc>,
}

impl ChatLine {
    /// Erstellt eine neue Chat-Zeile mit aktuellem Zeitstempel
    pub fn new(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            color,
            timestamp: Utc::now(),
        }
    }

    /// Erstellt eine neutrale (weisse) Chat-Zeile
    pub fn neutral(text: impl Into<String>) -> Self {
        Self::new(text, Color::StandardWhite)
    }
}

// ---------------------------------------------------------------------------
// Raumlisten-Eintraege
// ---------------------------------------------------------------------------

/// Ein Spieler-Eintrag in der Raumliste (Name + Farbe)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomListingEntry {
    pub username: String,
    pub color: Color,
}

// ---------------------------------------------------------------------------
// Client-Ereignisse
// ---------------------------------------------------------------------------

/// Alle Ereignisse die der Kern an eine einzelne Verbindung schickt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ClientEvent {
    // --- Lobby-Roster ---
    /// Registrierter Spieler zur Lobby-Liste hinzufuegen
    RosterAdd { username: String },
    /// Spieler aus der Lobby-Liste entfernen
    RosterRemove { username: String },

    // --- Raumlisten ---
    /// Neuer Raum in der Lobby-Uebersicht
    RoomListingAdd {
        room_id: RoomId,
        name: String,
        game_type: String,
    },
    /// Raum aus der Lobby-Uebersicht entfernen
    RoomListingRemove { room_id: RoomId },
    /// Vollstaendige Aktualisierung eines Raum-Eintrags
    /// (nach Abwesenheit des Clients, z.B. Reload)
    RoomListingUpdate {
        room_id: RoomId,
        name: String,
        players: Vec<RoomListingEntry>,
        in_play: bool,
    },
    /// Status-Banner eines Raums in der Lobby ("open", "in play", ...)
    RoomStatus { room_id: RoomId, status: String },
    /// Spieler im "Wer ist in diesem Raum"-Panel eines Raums listen
    ListPlayerInRoom {
        room_id: RoomId,
        entry: RoomListingEntry,
    },
    /// Spieler aus dem Raum-Panel entfernen
    UnlistPlayerInRoom { room_id: RoomId, username: String },

    // --- Chat-Panes ---
    /// Lobby-weite Chat-Zeile
    LobbyChat(ChatLine),
    /// Zeile fuer das zentrale Nachrichten-Pane (im Raum)
    CenterChat(ChatLine),
    /// Notiz fuer das linke Ereignis-Pane
    LeftNote { text: String },
    /// Eintrag fuer das rechte Spieler-Panel
    RightListAdd { entry: RoomListingEntry },
    /// Eintrag aus dem rechten Spieler-Panel entfernen
    RightListRemove { username: String },

    // --- Uebergaenge ---
    /// Client in die Lobby schicken
    TransitionToLobby,
    /// Client in einen Raum schicken
    TransitionToRoom {
        name: String,
        room_id: RoomId,
        in_play: bool,
    },
    /// Client-Neuladen anstossen (nach Disconnect aus laufendem Spiel)
    Reload,

    // --- Timer & Abstimmung ---
    /// Aktuelle Restzeit und Warnschwelle setzen
    SetTime { time_ms: u64, warn_ms: u64 },
    /// Abstimmungsberechtigung umschalten
    VoteEligibility { eligible: bool },
    /// Zuvor gewaehltes Abstimmungsziel wiederherstellen
    VoteTarget { username: String },

    // --- Fehler ---
    /// Registrierung abgelehnt (nur an die betroffene Verbindung)
    RegistrationRejected { reason: String },
    /// Verbindungslimit der Session erreicht (4. Tab)
    CapacityExceeded { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_line_neutral_ist_weiss() {
        let zeile = ChatLine::neutral("hallo");
        assert_eq!(zeile.color, Color::StandardWhite);
        assert_eq!(zeile.text, "hallo");
    }

    #[test]
    fn ereignis_serde_tagged() {
        let ev = ClientEvent::RosterAdd {
            username: "alice".into(),
        };
        let json = serde_json::to_string(&ev).unwrap();
        assert!(json.contains("\"event\":\"rosterAdd\""), "json war: {json}");

        let zurueck: ClientEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(ev, zurueck);
    }

    #[test]
    fn transition_ereignis_traegt_raumdaten() {
        let rid = RoomId::new();
        let ev = ClientEvent::TransitionToRoom {
            name: "Raum 1".into(),
            room_id: rid,
            in_play: false,
        };
        let json = serde_json::to_string(&ev).unwrap();
        let zurueck: ClientEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(ev, zurueck);
    }

    #[test]
    fn farben_haben_hex_werte() {
        assert_eq!(Color::StandardWhite.hex(), "#cecece");
        assert!(Color::Red.hex().starts_with('#'));
    }
}
