//! parlor-lobby – Session- und Matchmaking-Kern
//!
//! Dieser Crate implementiert die Orchestrierung zwischen Netzwerk-
//! Verbindungen und logischen Spielern: Registrierung, Matchmaking,
//! Nachrichten-Routing und Raum-Lebenszyklus. Die Spielregeln selbst
//! liegen beim externen `GameRoom`-Kollaborateur.
//!
//! ## Architektur
//!
//! ```text
//! Transport (Connect / Message / Disconnect)
//!     |
//!     v
//! Lobby (Session Registry)
//!     |  Session-Token -> Spieler aufloesen, max. 3 Verbindungen
//!     |
//!     +-- MessageRouter   (Registrierung, Admin, Start-Vote, Chat)
//!     +-- Matchmaker      (periodischer Tick, wartende Spieler -> Raeume)
//!     +-- Chat-Relay      (Lobby-Chat, begrenzter Verlaufscache)
//!     +-- Raum-Lebenszyklus (Add/Remove, Leave/Kick, Listen-Fanout)
//!
//! ConnectionTable – Send-Queues aller Verbindungen (nicht-blockierend)
//! GameRoom (Trait) – externe Spielinstanz (broadcast, receive, kick, ...)
//! ProfanityFilter (Trait) – externe Obszoenitaets-Pruefung
//! ```
//!
//! ## Nebenlaeufigkeit
//!
//! Der gesamte veraenderliche Zustand (Spielerliste, Raumliste,
//! Chat-Cache) liegt hinter einem einzigen Mutex in [`Lobby`]. Der
//! Matchmaker-Tick und die Nachrichtenverarbeitung serialisieren sich
//! darueber; Sendungen an Clients laufen ueber nicht-blockierende
//! Queues und halten den Mutex nie laenger als noetig. Der Mutex ist
//! nicht reentrant: [`GameRoom`]-Methoden werden unter ihm aufgerufen
//! und duerfen deshalb nicht in die [`Lobby`] zurueckrufen; die
//! Panel-Listung von Beitritt und Kick uebernimmt die Lobby selbst.

pub mod error;
pub mod matchmaker;
pub mod player;
pub mod profanity;
pub mod registration;
pub mod registry;
pub mod room;
pub mod router;
pub mod transport;

#[cfg(test)]
mod tests;

// Bequeme Re-Exporte
pub use error::{LobbyError, LobbyResult, RegistrationError};
pub use matchmaker::{Matchmaker, MatchmakerHandle};
pub use player::Player;
pub use profanity::{ProfanityFilter, WordListFilter};
pub use registry::{Lobby, LobbyConfig};
pub use room::{GameRoom, RoomPhase};
pub use transport::{ClientSender, ConnectionTable};
