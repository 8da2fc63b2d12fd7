//! GameRoom-Trait – Schnittstelle zum externen Spiel-Kollaborateur
//!
//! Der Lobby-Kern kennt keine Spielregeln. Alles was ein Spieler *im*
//! Spiel tut laeuft ueber diese schmale Schnittstelle; der Kern liest
//! nur Metadaten (Name, gesuchte Spieler, Phase) und reicht Nachrichten
//! sowie Mitgliedschafts-Aenderungen durch.
//!
//! Alle Methoden muessen schnell und nicht-blockierend sein: sie werden
//! innerhalb des Registry-Mutex aufgerufen (siehe Crate-Dokumentation)
//! und duerfen deshalb nicht in die Lobby zurueckrufen. Die
//! Panel-Listung bei Beitritt, Verlassen und Kick uebernimmt die Lobby
//! selbst; `spieler_listen`/`spieler_entlisten` sind fuer Aenderungen
//! gedacht die der Raum aus einem eigenen Task heraus ausloest.

use parlor_core::types::{PlayerId, RoomId};
use parlor_protocol::RoomListingEntry;

use crate::player::Player;

/// Phase eines Raum-Timers
///
/// Wird an `set_all_time` uebergeben wenn der Kern einen raum-eigenen
/// Countdown anstossen will (z.B. die Startfrist nach Erreichen der
/// Mindestspielerzahl).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomPhase {
    /// Wartefrist vor Spielbeginn
    StartWait,
    /// Laufendes Spiel
    InProgress,
    /// Nachspiel-Chat
    EndChat,
}

/// Eine Spielinstanz aus Sicht des Lobby-Kerns
///
/// Implementierungen verwalten ihre Mitglieder- und Timerzustaende
/// selbst (innere Synchronisation); der Kern haelt nur `Arc`-Referenzen.
pub trait GameRoom: Send + Sync {
    /// Eindeutige Raum-ID
    fn uid(&self) -> RoomId;

    /// Anzeigename des Raums
    fn name(&self) -> String;

    /// Spieltyp-Kennung (z.B. "classic")
    fn game_type(&self) -> String;

    /// Wie viele Spieler der Raum noch aufnimmt (0 = voll/gestartet)
    fn players_wanted(&self) -> u32;

    /// Wie viele Spieler bis zur Mindestanzahl noch fehlen
    fn minimum_players_needed(&self) -> u32;

    /// Laeuft das Spiel gerade?
    fn in_play(&self) -> bool;

    /// Befindet sich der Raum im Nachspiel-Chat?
    fn in_end_chat(&self) -> bool;

    /// Geordnete Name-zu-Farbe-Zuordnung fuer die Anzeige
    fn username_color_pairs(&self) -> Vec<RoomListingEntry>;

    /// Sendet eine Textzeile an alle Mitglieder des Raums
    fn broadcast(&self, text: &str);

    /// Nimmt einen Spieler in den Raum auf
    fn add_user(&self, player: &Player);

    /// Prueft ob ein Spieler aktuell Mitglied ist
    fn is_user(&self, id: PlayerId) -> bool;

    /// Reicht eine Chat-Nachricht eines Mitglieds ins Spiel durch
    fn receive(&self, player: &Player, text: &str);

    /// Reicht eine Admin-Nachricht ins Spiel durch
    fn admin_receive(&self, player: &Player, text: &str);

    /// Entfernt einen Spieler vollstaendig aus dem Raum
    fn kick(&self, player: &Player);

    /// Trennt einen Spieler ohne seine Spieldaten zu verwerfen
    /// (Reconnect waehrend des laufenden Spiels bleibt moeglich)
    fn disconnect(&self, player: &Player);

    /// Spielt den aktuellen Raumzustand an einen (wieder) verbundenen
    /// Spieler zurueck
    fn resend_data(&self, player: &Player);

    /// Setzt den Raum-Timer fuer die gegebene Phase
    fn set_all_time(&self, phase: RoomPhase, duration_ms: u64);
}
