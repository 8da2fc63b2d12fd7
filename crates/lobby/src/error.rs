//! Fehlertypen fuer den Lobby-Kern

use parlor_core::types::{ConnectionId, PlayerId, RoomId};
use thiserror::Error;

/// Ablehnungsgruende der Registrierung
///
/// Die Display-Texte sind die Client-sichtbaren Meldungen und werden
/// unveraendert an die betroffene Verbindung geschickt. Registrierung
/// bleibt nach jedem dieser Fehler wiederholbar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("This username has already been taken by someone")]
    NameTaken,

    #[error("Cannot be 0 letters long")]
    Empty,

    #[error("Must be no more than 12 letters long")]
    TooLong,

    #[error("Can't contain punctuation/special characters")]
    InvalidCharacters,

    #[error("Usernames can't contain profanity")]
    Obscene,

    #[error("This game has already started, please join a different one.")]
    RoomAlreadyStarted,

    #[error("You're already playing in a different tab, so you can't join again.")]
    RegistrationBanned,

    #[error("You're already playing a game in a different tab, so you cannot join this one.")]
    SessionAlreadyInGame,

    #[error("You're already registered in a different tab, so you can't register again.")]
    SessionAlreadyRegistered,
}

/// Fehlertyp fuer den Lobby-Kern
///
/// Kein Fehler hier ist fatal fuer den Prozess; unbekannte Referenzen
/// degradieren zu einem Log-Eintrag und einem No-op beim Aufrufer.
#[derive(Debug, Error)]
pub enum LobbyError {
    /// Vierte gleichzeitige Verbindung einer Session
    #[error("Verbindungslimit erreicht: maximal {0} Tabs pro Session")]
    Kapazitaet(usize),

    /// Verbindung wurde nie in der ConnectionTable registriert
    #[error("Verbindung nicht registriert: {0}")]
    VerbindungNichtRegistriert(ConnectionId),

    /// Spieler-Referenz konnte nicht aufgeloest werden
    #[error("Spieler nicht gefunden: {0}")]
    SpielerNichtGefunden(PlayerId),

    /// Raum-Referenz konnte nicht aufgeloest werden
    #[error("Raum nicht gefunden: {0}")]
    RaumNichtGefunden(RoomId),

    /// Registrierung abgelehnt
    #[error(transparent)]
    Registrierung(#[from] RegistrationError),
}

/// Result-Typ fuer den Lobby-Kern
pub type LobbyResult<T> = Result<T, LobbyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registrierungsfehler_sind_client_meldungen() {
        assert_eq!(
            RegistrationError::Empty.to_string(),
            "Cannot be 0 letters long"
        );
        assert_eq!(
            RegistrationError::TooLong.to_string(),
            "Must be no more than 12 letters long"
        );
    }

    #[test]
    fn lobby_fehler_anzeige() {
        let e = LobbyError::Kapazitaet(3);
        assert!(e.to_string().contains("3 Tabs"));
    }
}
