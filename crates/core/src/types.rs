//! Gemeinsame Identifikationstypen fuer Parlor
//!
//! Alle IDs verwenden das Newtype-Pattern um Verwechslungen zwischen
//! verschiedenen ID-Arten zur Compilezeit auszuschliessen.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Eindeutige ID eines logischen Spielers
///
/// Ein Spieler ueberlebt einzelne Verbindungen; die ID bleibt ueber
/// Reconnects hinweg stabil.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    /// Erstellt eine neue zufaellige PlayerId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Gibt die innere UUID zurueck
    pub fn inner(&self) -> Uuid {
        self.0
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "player:{}", self.0)
    }
}

/// Eindeutige Raum-ID (eine Spielinstanz in der Lobby oder im Spiel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomId(pub Uuid);

impl RoomId {
    /// Erstellt eine neue zufaellige RoomId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Gibt die innere UUID zurueck
    pub fn inner(&self) -> Uuid {
        self.0
    }
}

impl Default for RoomId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "room:{}", self.0)
    }
}

/// Eindeutige ID einer einzelnen Transport-Verbindung
///
/// Wird von der Transportschicht vergeben und ist fuer den Kern opak.
/// Ein Spieler kann bis zu drei gleichzeitige Verbindungen halten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(pub Uuid);

impl ConnectionId {
    /// Erstellt eine neue zufaellige ConnectionId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Gibt die innere UUID zurueck
    pub fn inner(&self) -> Uuid {
        self.0
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "conn:{}", self.0)
    }
}

/// Session-Token eines Clients
///
/// Stabil ueber Reconnects und Browser-Tabs hinweg; dient dazu, mehrere
/// Verbindungen demselben logischen Spieler zuzuordnen. Der Inhalt wird
/// vom Client geliefert und hier nur verglichen, nie interpretiert.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionToken(pub String);

impl SessionToken {
    /// Erstellt ein SessionToken aus einem beliebigen String
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Gibt den inneren String zurueck
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session:{}", self.0)
    }
}

impl From<&str> for SessionToken {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_id_eindeutig() {
        let a = PlayerId::new();
        let b = PlayerId::new();
        assert_ne!(a, b, "Zwei neue PlayerIds muessen verschieden sein");
    }

    #[test]
    fn room_id_eindeutig() {
        let a = RoomId::new();
        let b = RoomId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn connection_id_display() {
        let id = ConnectionId(Uuid::nil());
        assert!(id.to_string().starts_with("conn:"));
    }

    #[test]
    fn session_token_vergleich() {
        let a = SessionToken::from("s1");
        let b = SessionToken::from("s1");
        let c = SessionToken::from("s2");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn ids_sind_serde_kompatibel() {
        let pid = PlayerId::new();
        let json = serde_json::to_string(&pid).unwrap();
        let pid2: PlayerId = serde_json::from_str(&json).unwrap();
        assert_eq!(pid, pid2);
    }
}
