//! Lobby – Session Registry, Chat-Relay und Raum-Lebenszyklus
//!
//! Die [`Lobby`] ist der einzige Schreiber der Spieler- und Raumlisten.
//! Alle strukturellen Mutationen (Spieler/Raum einfuegen oder
//! entfernen, Raum-Mitgliedschaft) laufen ueber ihre Methoden und
//! serialisieren sich ueber einen Mutex; der Matchmaker-Tick und die
//! Nachrichtenverarbeitung teilen sich diese Ordnung.
//!
//! ## Session-Aufloesung
//! ```text
//! Connect(connection, session)
//!     |
//!     +-- registrierter Spieler mit gleicher Session, < 3 Tabs
//!     |       -> anheften, Roster/Caches/Timer/Vote an neuen Tab
//!     +-- registrierter Spieler mit 3 Tabs
//!     |       -> CapacityExceeded, Verbindung bleibt unangebunden
//!     +-- keine Uebereinstimmung (oder Debug-Modus)
//!             -> neuer unregistrierter Spieler
//!
//! In allen Zweigen: Lobby-Chat-Cache + Raumlisten an den neuen Tab
//! ```

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use parlor_core::types::{ConnectionId, PlayerId, RoomId, SessionToken};
use parlor_protocol::{ChatLine, ClientEvent, Color, RoomListingEntry};

use crate::error::{LobbyError, LobbyResult, RegistrationError};
use crate::player::{Player, MAX_VERBINDUNGEN};
use crate::profanity::ProfanityFilter;
use crate::registration;
use crate::room::{GameRoom, RoomPhase};
use crate::router::{self, Inbound, RouterState};
use crate::transport::{ClientSender, ConnectionTable};

// ---------------------------------------------------------------------------
// Konfiguration
// ---------------------------------------------------------------------------

/// Konfiguration des Lobby-Kerns
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LobbyConfig {
    /// Kapazitaet des Lobby-Chat-Verlaufs
    pub chat_cache_groesse: usize,
    /// Startfrist nach Erreichen der Mindestspielerzahl (ms)
    pub start_grace_ms: u64,
    /// Admin-Passwort fuer die `!`-Eskalation (None = deaktiviert)
    pub admin_passwort: Option<String>,
    /// Debug-Modus: Session-Zusammenfuehrung deaktiviert
    pub debug: bool,
}

impl Default for LobbyConfig {
    fn default() -> Self {
        Self {
            chat_cache_groesse: 50,
            start_grace_ms: 30_000,
            admin_passwort: None,
            debug: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Lobby
// ---------------------------------------------------------------------------

/// Session Registry + Raum-Lebenszyklus + Lobby-Chat-Relay
///
/// Thread-safe; Clone teilt den inneren Zustand.
#[derive(Clone)]
pub struct Lobby {
    inner: Arc<Mutex<LobbyInner>>,
    connections: ConnectionTable,
    filter: Arc<dyn ProfanityFilter>,
    config: Arc<LobbyConfig>,
}

struct LobbyInner {
    /// Alle logischen Spieler, Einfuegereihenfolge
    players: Vec<Player>,
    /// Alle Raeume, Einfuegereihenfolge
    rooms: Vec<Arc<dyn GameRoom>>,
    /// Begrenzter Lobby-Chat-Verlauf (FIFO)
    chat_cache: VecDeque<ChatLine>,
    /// Debug-Modus zur Laufzeit aktiviert
    debug_mode: bool,
}

impl Lobby {
    /// Erstellt eine neue Lobby
    pub fn neu(config: LobbyConfig, filter: Arc<dyn ProfanityFilter>) -> Self {
        let debug = config.debug;
        Self {
            inner: Arc::new(Mutex::new(LobbyInner {
                players: Vec::new(),
                rooms: Vec::new(),
                chat_cache: VecDeque::new(),
                debug_mode: debug,
            })),
            connections: ConnectionTable::neu(),
            filter,
            config: Arc::new(config),
        }
    }

    /// Zugriff auf die Verbindungs-Tabelle (Transport-Seite)
    pub fn connections(&self) -> &ConnectionTable {
        &self.connections
    }

    /// Aktiviert den Debug-Modus (jede Verbindung wird ein eigener Spieler)
    pub fn debug_aktivieren(&self) {
        self.inner.lock().debug_mode = true;
    }

    // -----------------------------------------------------------------------
    // Session Registry: Connect / Disconnect
    // -----------------------------------------------------------------------

    /// Loest eine neue Verbindung zu einem Spieler auf
    ///
    /// Gibt die PlayerId zurueck an die die Verbindung gebunden wurde.
    /// Beim Tab-Limit der Session bleibt die Verbindung unangebunden
    /// und erhaelt nur den Kapazitaetsfehler plus Chat-/Raumlisten-
    /// Replay; der Aufrufer sieht [`LobbyError::Kapazitaet`].
    pub fn verbinden(
        &self,
        connection_id: ConnectionId,
        session: SessionToken,
    ) -> LobbyResult<PlayerId> {
        let sender = match self.connections.sender(&connection_id) {
            Some(s) => s,
            None => {
                tracing::warn!(
                    connection_id = %connection_id,
                    "Connect fuer unregistrierte Verbindung"
                );
                return Err(LobbyError::VerbindungNichtRegistriert(connection_id));
            }
        };

        let mut inner = self.inner.lock();
        let debug = inner.debug_mode;

        let bestehend = if debug {
            None
        } else {
            inner
                .players
                .iter()
                .position(|p| p.registered && p.session == session)
        };

        let ergebnis = match bestehend {
            // Reconnect: Tab an bestehenden Spieler anheften
            Some(idx) if inner.players[idx].verbindungs_anzahl() < MAX_VERBINDUNGEN => {
                inner.players[idx].verbindung_hinzufuegen(sender.clone());

                // Lobby-Roster an den neuen Tab
                let roster: Vec<String> = inner
                    .players
                    .iter()
                    .filter(|p| p.registered)
                    .map(|p| p.username().to_string())
                    .collect();
                for username in roster {
                    sender.senden(ClientEvent::RosterAdd { username });
                }

                let spieler = &inner.players[idx];
                if !spieler.in_room {
                    sender.senden(ClientEvent::TransitionToLobby);
                } else if let Some(raum) = spieler.room.clone() {
                    self.raum_replay(&sender, spieler, &raum);
                }

                tracing::info!(
                    player_id = %spieler.id,
                    tabs = spieler.verbindungs_anzahl(),
                    "Verbindung an bestehenden Spieler angeheftet"
                );
                Ok(spieler.id)
            }

            // Tab-Limit erreicht: abweisen, keinen Spieler anlegen
            Some(_) => {
                sender.senden(ClientEvent::CapacityExceeded {
                    reason: "You can't have more than 3 game tabs open at once.".into(),
                });
                tracing::debug!(
                    connection_id = %connection_id,
                    "Vierter Tab einer Session abgewiesen"
                );
                Err(LobbyError::Kapazitaet(MAX_VERBINDUNGEN))
            }

            // Unbekannte Session (oder Debug): neuer unregistrierter Spieler
            None => {
                let mut neu = Player::neu(session);
                neu.verbindung_hinzufuegen(sender.clone());
                let id = neu.id;
                inner.players.push(neu);
                tracing::info!(
                    player_id = %id,
                    spieler = inner.players.len(),
                    "Neuer Spieler angelegt"
                );
                Ok(id)
            }
        };

        // In allen Zweigen: Chat-Verlauf und Raumlisten an den neuen Tab
        for zeile in &inner.chat_cache {
            sender.senden(ClientEvent::LobbyChat(zeile.clone()));
        }
        for raum in &inner.rooms {
            sender.senden(ClientEvent::RoomListingUpdate {
                room_id: raum.uid(),
                name: raum.name(),
                players: raum.username_color_pairs(),
                in_play: raum.in_play(),
            });
        }

        ergebnis
    }

    /// Spielt den Raum-Zustand eines Spielers an einen neuen Tab zurueck
    fn raum_replay(&self, sender: &ClientSender, spieler: &Player, raum: &Arc<dyn GameRoom>) {
        sender.senden(ClientEvent::TransitionToRoom {
            name: raum.name(),
            room_id: raum.uid(),
            in_play: raum.in_play(),
        });
        for zeile in spieler.center_cache() {
            sender.senden(ClientEvent::CenterChat(zeile.clone()));
        }
        for text in spieler.left_cache() {
            sender.senden(ClientEvent::LeftNote { text: text.clone() });
        }
        raum.resend_data(spieler);
        sender.senden(ClientEvent::SetTime {
            time_ms: spieler.time_ms,
            warn_ms: spieler.warn_ms,
        });
        // Abstimmungs-Replay nur fuer Spieler die tatsaechlich im Raum
        // sitzen; Lobby-Reconnects bekommen keinen Vote-Zustand
        sender.senden(ClientEvent::VoteEligibility {
            eligible: spieler.vote_eligible,
        });
        if spieler.vote_eligible {
            if let Some(ziel) = &spieler.vote_target {
                sender.senden(ClientEvent::VoteTarget {
                    username: ziel.clone(),
                });
            }
        }
    }

    /// Loest eine Verbindung von ihrem Spieler
    ///
    /// Der Spielerzustand ueberlebt; erreicht der Spieler null
    /// Verbindungen, entscheidet [`Lobby::kicken`] ueber die endgueltige
    /// Entfernung.
    pub fn verbindung_trennen(&self, connection_id: ConnectionId) {
        self.connections.entfernen(&connection_id);

        let spieler_id = {
            let mut inner = self.inner.lock();
            let mut gefunden = None;
            for spieler in inner.players.iter_mut() {
                if spieler.verbindung_entfernen(&connection_id) {
                    gefunden = Some(spieler.id);
                    break;
                }
            }
            gefunden
        };

        if let Some(id) = spieler_id {
            tracing::debug!(player_id = %id, connection_id = %connection_id, "Verbindung getrennt");
            self.kicken(id);
        }
    }

    // -----------------------------------------------------------------------
    // Raum-Lebenszyklus
    // -----------------------------------------------------------------------

    /// Registriert einen Raum und kuendigt ihn allen Spielern an
    pub fn raum_hinzufuegen(&self, raum: Arc<dyn GameRoom>) {
        let mut inner = self.inner.lock();
        let ereignis = ClientEvent::RoomListingAdd {
            room_id: raum.uid(),
            name: raum.name(),
            game_type: raum.game_type(),
        };
        for spieler in &inner.players {
            spieler.senden(ereignis.clone());
        }
        tracing::info!(room_id = %raum.uid(), name = %raum.name(), "Raum hinzugefuegt");
        inner.rooms.push(raum);
    }

    /// Entfernt einen Raum aus Registry und allen Lobby-Listen
    /// (No-op wenn der Raum unbekannt ist)
    pub fn raum_entfernen(&self, room_id: RoomId) {
        let mut inner = self.inner.lock();
        let Some(idx) = inner.rooms.iter().position(|r| r.uid() == room_id) else {
            tracing::debug!(room_id = %room_id, "Entfernen eines unbekannten Raums ignoriert");
            return;
        };
        for spieler in &inner.players {
            spieler.senden(ClientEvent::RoomListingRemove { room_id });
        }
        inner.rooms.remove(idx);
        tracing::info!(room_id = %room_id, "Raum entfernt");
    }

    /// Merkt sich den zuletzt angeklickten Raum eines Spielers
    /// (Matchmaking-Ziel und Vorschau fuer das rechte Panel)
    pub fn raum_klick(&self, player_id: PlayerId, room_id: RoomId) {
        let mut inner = self.inner.lock();
        if let Some(spieler) = inner.players.iter_mut().find(|p| p.id == player_id) {
            spieler.last_room_click = Some(room_id);
        }
    }

    /// Spieler verlaesst seinen Raum (explizite Aktion)
    ///
    /// Vor Spielbeginn oder im Nachspiel-Chat: vollstaendiger Kick plus
    /// Zuruecksetzen des Spielzustands. Im laufenden Spiel: nur die
    /// Verbindungen werden getrennt, Rolle/Votes/Caches bleiben fuer
    /// einen Reconnect erhalten.
    pub fn verlassen(&self, player_id: PlayerId) {
        let mut inner = self.inner.lock();
        let Some(idx) = inner.players.iter().position(|p| p.id == player_id) else {
            tracing::warn!(player_id = %player_id, "Verlassen: Spieler nicht gefunden");
            return;
        };
        if !inner.players[idx].registered || !inner.players[idx].in_room {
            return;
        }
        let Some(raum) = inner.players[idx].room.clone() else {
            return;
        };

        if !raum.in_play() || raum.in_end_chat() {
            let username = {
                let spieler = &mut inner.players[idx];
                let username = spieler.username().to_string();
                raum.kick(spieler);
                spieler.nach_spiel_zuruecksetzen();
                username
            };
            Self::entlisten_fanout(&inner, raum.uid(), &username);
            tracing::info!(player_id = %player_id, room_id = %raum.uid(), "Raum verlassen");
        } else {
            // Laufendes Spiel: trennen ohne Daten zu verwerfen
            let spieler = &mut inner.players[idx];
            raum.disconnect(spieler);
            spieler.senden(ClientEvent::Reload);
            let verbindungen = spieler.alle_verbindungen_entfernen();
            for cid in &verbindungen {
                self.connections.entfernen(cid);
            }
            tracing::info!(
                player_id = %player_id,
                room_id = %raum.uid(),
                "Aus laufendem Spiel getrennt, Zustand bleibt erhalten"
            );
        }
    }

    /// Entfernt einen vollstaendig getrennten Spieler endgueltig
    ///
    /// No-op solange der Spieler noch lebende Verbindungen hat oder in
    /// einem laufenden Spiel sitzt (dessen Teilnehmer werden nie
    /// entfernt, nur getrennt). Idempotent.
    pub fn kicken(&self, player_id: PlayerId) {
        let mut inner = self.inner.lock();
        let Some(idx) = inner.players.iter().position(|p| p.id == player_id) else {
            tracing::error!(player_id = %player_id, "Kick: Spieler existiert nicht");
            return;
        };
        if inner.players[idx].verbindungs_anzahl() > 0 {
            return;
        }

        let registered = inner.players[idx].registered;
        let in_room = inner.players[idx].in_room;
        let raum = inner.players[idx].room.clone();

        if !in_room || !registered {
            let entfernt = inner.players.remove(idx);
            if entfernt.registered {
                self.roster_entfernen(&inner, entfernt.username());
            }
            tracing::info!(player_id = %player_id, "Spieler entfernt");
        } else if let Some(raum) = raum {
            if !raum.in_play() {
                let entfernt = inner.players.remove(idx);
                self.roster_entfernen(&inner, entfernt.username());
                raum.kick(&entfernt);
                Self::entlisten_fanout(&inner, raum.uid(), entfernt.username());
                tracing::info!(
                    player_id = %player_id,
                    room_id = %raum.uid(),
                    "Spieler aus wartendem Raum entfernt"
                );
            } else {
                // Aktive Teilnehmer werden nie entfernt, nur getrennt
                tracing::debug!(
                    player_id = %player_id,
                    room_id = %raum.uid(),
                    "Kick verweigert: Raum spielt"
                );
            }
        }
    }

    fn roster_entfernen(&self, inner: &LobbyInner, username: &str) {
        for spieler in &inner.players {
            spieler.senden(ClientEvent::RosterRemove {
                username: username.to_string(),
            });
        }
    }

    // -----------------------------------------------------------------------
    // Matchmaker-Tick
    // -----------------------------------------------------------------------

    /// Eine Matchmaking-Runde: wartende Spieler ihren Wunschraeumen zuordnen
    ///
    /// Beruecksichtigt registrierte Spieler ohne Raum mit gesetztem
    /// Raum-Klick. Pro Tick wird jeder Spieler hoechstens einem Raum
    /// zugeordnet; Raeume ohne Bedarf (`players_wanted == 0`) bleiben
    /// unberuehrt. Die Panel-Listung des Beitritts uebernimmt die Lobby
    /// selbst, der Raum ruft dafuer nichts zurueck.
    pub fn tick(&self) {
        let mut inner = self.inner.lock();

        for idx in 0..inner.players.len() {
            {
                let spieler = &inner.players[idx];
                if !spieler.registered || spieler.in_room {
                    continue;
                }
            }
            let Some(ziel) = inner.players[idx].last_room_click else {
                continue;
            };
            let Some(raum) = inner.rooms.iter().find(|r| r.uid() == ziel).cloned() else {
                continue;
            };
            if raum.players_wanted() == 0 {
                continue;
            }

            // Mindestbedarf vor diesem Beitritt entscheidet die
            // Schwellen-Nachricht
            let minimum_vorher = raum.minimum_players_needed();

            let (spieler_id, username) = {
                let spieler = &mut inner.players[idx];
                spieler.in_room = true;
                spieler.room = Some(raum.clone());

                let begruessung = format!(
                    "Hi, {}! You have joined '{}'.",
                    spieler.username(),
                    raum.name()
                );
                spieler.center_nachricht(begruessung, Color::StandardWhite);

                raum.add_user(spieler);
                (spieler.id, spieler.username().to_string())
            };

            raum.broadcast(&format!("{username} has joined the game"));

            match minimum_vorher {
                0 => {}
                1 => {
                    raum.broadcast(&format!(
                        "The game will start in {} seconds. Type \"/start\" to start the game now",
                        self.config.start_grace_ms / 1000
                    ));
                    raum.set_all_time(RoomPhase::StartWait, self.config.start_grace_ms);
                }
                n => {
                    raum.broadcast(&format!(
                        "The game will begin when at least {} more players have joined",
                        n - 1
                    ));
                }
            }

            // Beitritt in den Panels aller Betrachter listen; die
            // Farbe liefert der Raum, Rueckfall ist neutrales Weiss
            let farbe = raum
                .username_color_pairs()
                .iter()
                .find(|e| e.username == username)
                .map(|e| e.color)
                .unwrap_or(Color::StandardWhite);
            Self::listen_fanout(
                &inner,
                raum.uid(),
                RoomListingEntry {
                    username,
                    color: farbe,
                },
            );

            tracing::debug!(
                player_id = %spieler_id,
                room_id = %raum.uid(),
                "Spieler dem Raum zugeordnet"
            );
        }
    }

    // -----------------------------------------------------------------------
    // Lobby-Chat-Relay
    // -----------------------------------------------------------------------

    /// Lobby-weite Chat-Nachricht eines registrierten Spielers
    ///
    /// Fan-out an alle Spieler plus Ablage im begrenzten Verlauf;
    /// unregistrierte Absender werden ignoriert.
    pub fn lobby_nachricht(&self, player_id: PlayerId, text: &str) {
        let mut inner = self.inner.lock();
        let username = match inner.players.iter().find(|p| p.id == player_id) {
            Some(p) if p.registered => p.username().to_string(),
            Some(_) => return,
            None => {
                tracing::warn!(player_id = %player_id, "Lobby-Chat: Spieler nicht gefunden");
                return;
            }
        };

        let zeile = ChatLine::neutral(format!("{username} : {text}"));
        for spieler in &inner.players {
            spieler.senden(ClientEvent::LobbyChat(zeile.clone()));
        }

        if inner.chat_cache.len() >= self.config.chat_cache_groesse {
            inner.chat_cache.pop_front();
        }
        inner.chat_cache.push_back(zeile);
    }

    // -----------------------------------------------------------------------
    // Nachrichten-Routing
    // -----------------------------------------------------------------------

    /// Verarbeitet eine eingehende Chat-/Kommandonachricht
    pub fn empfangen(&self, player_id: PlayerId, text: &str) {
        let eingabe = {
            let inner = self.inner.lock();
            let Some(spieler) = inner.players.iter().find(|p| p.id == player_id) else {
                tracing::warn!(player_id = %player_id, "Nachricht von unbekanntem Spieler");
                return;
            };
            let zustand = RouterState {
                registered: spieler.registered,
                in_room: spieler.in_room,
                room_in_play: spieler.room.as_ref().map(|r| r.in_play()).unwrap_or(false),
                start_vote_cast: spieler.start_vote,
            };
            router::klassifizieren(zustand, text)
        };

        match eingabe {
            Inbound::Register(wunschname) => self.registrieren_pfad(player_id, &wunschname),
            Inbound::AdminLogin(msg) => self.admin_pfad(player_id, &msg),
            Inbound::StartVote => self.start_vote_pfad(player_id),
            Inbound::Chat(msg) => self.raum_chat_pfad(player_id, &msg),
            Inbound::Drop => {}
        }
    }

    /// Registrierungsversuch eines unregistrierten Spielers
    fn registrieren_pfad(&self, player_id: PlayerId, wunschname: &str) {
        let mut inner = self.inner.lock();
        let debug = inner.debug_mode;
        let Some(idx) = inner.players.iter().position(|p| p.id == player_id) else {
            return;
        };

        if !debug {
            if inner.players[idx].registration_banned {
                inner.players[idx].senden(ClientEvent::RegistrationRejected {
                    reason: RegistrationError::RegistrationBanned.to_string(),
                });
                return;
            }
            // Spielt dieselbe Session bereits in einem anderen Tab?
            let session = inner.players[idx].session.clone();
            let anderswo = inner
                .players
                .iter()
                .any(|p| p.id != player_id && p.in_room && p.session == session);
            if anderswo {
                let spieler = &mut inner.players[idx];
                spieler.senden(ClientEvent::CenterChat(ChatLine::new(
                    RegistrationError::SessionAlreadyInGame.to_string(),
                    Color::Red,
                )));
                spieler.registration_banned = true;
                return;
            }
            // Session-Tokens sind unter registrierten Spielern eindeutig;
            // ein zweiter unregistrierter Tab derselben Session kann sich
            // deshalb nicht ebenfalls registrieren
            let registriert_anderswo = inner
                .players
                .iter()
                .any(|p| p.id != player_id && p.registered && p.session == session);
            if registriert_anderswo {
                inner.players[idx].senden(ClientEvent::RegistrationRejected {
                    reason: RegistrationError::SessionAlreadyRegistered.to_string(),
                });
                return;
            }
        }

        // Vorpruefung: angeklickter Raum inzwischen gestartet?
        // Laeuft vor den Format-Regeln und verbraucht keinen Zustand.
        if let Some(ziel) = inner.players[idx].last_room_click {
            if let Some(raum) = inner.rooms.iter().find(|r| r.uid() == ziel) {
                if raum.players_wanted() == 0 {
                    inner.players[idx].senden(ClientEvent::RegistrationRejected {
                        reason: RegistrationError::RoomAlreadyStarted.to_string(),
                    });
                    return;
                }
            }
        }

        let kandidat = registration::normalisieren(wunschname);
        let vergeben: Vec<String> = inner
            .players
            .iter()
            .filter(|p| p.registered)
            .map(|p| p.username().to_string())
            .collect();

        match registration::validieren(&kandidat, &vergeben, self.filter.as_ref()) {
            Err(fehler) => {
                inner.players[idx].senden(ClientEvent::RegistrationRejected {
                    reason: fehler.to_string(),
                });
                tracing::debug!(player_id = %player_id, fehler = %fehler, "Registrierung abgelehnt");
            }
            Ok(()) => {
                // Bestehendes Roster an den Registranten
                for username in &vergeben {
                    inner.players[idx].senden(ClientEvent::RosterAdd {
                        username: username.clone(),
                    });
                }
                inner.players[idx].registrieren(kandidat.clone());
                for spieler in &inner.players {
                    spieler.senden(ClientEvent::RosterAdd {
                        username: kandidat.clone(),
                    });
                }
                tracing::info!(player_id = %player_id, username = %kandidat, "Spieler registriert");
            }
        }
    }

    /// Admin-Login bzw. Admin-Kommando (Praefix `!`)
    fn admin_pfad(&self, player_id: PlayerId, msg: &str) {
        let Some(passwort) = self.config.admin_passwort.as_deref() else {
            // Eskalation deaktiviert
            return;
        };

        let mut inner = self.inner.lock();
        let Some(spieler) = inner.players.iter_mut().find(|p| p.id == player_id) else {
            return;
        };
        if !spieler.in_room {
            return;
        }

        if !spieler.admin && msg.strip_prefix('!') == Some(passwort) {
            spieler.admin = true;
            spieler.center_nachricht("You have been granted administrator access", Color::Green);
            tracing::info!(player_id = %player_id, "Admin-Zugriff gewaehrt");
        }

        if spieler.admin {
            if let Some(raum) = spieler.room.clone() {
                if raum.is_user(spieler.id) {
                    raum.admin_receive(spieler, msg);
                }
            }
        }
    }

    /// `/start`-Vote eines Raummitglieds
    fn start_vote_pfad(&self, player_id: PlayerId) {
        let mut inner = self.inner.lock();
        let Some(spieler) = inner.players.iter_mut().find(|p| p.id == player_id) else {
            return;
        };
        // Zustand seit der Klassifikation erneut pruefen
        if !spieler.in_room || spieler.start_vote {
            return;
        }
        let Some(raum) = spieler.room.clone() else {
            return;
        };
        if raum.in_play() {
            return;
        }

        spieler.start_vote = true;
        raum.broadcast(&format!(
            "{} has voted to start the game immediately by typing \"/start\"",
            spieler.username()
        ));
        tracing::debug!(player_id = %player_id, room_id = %raum.uid(), "Start-Vote abgegeben");
    }

    /// Validierte Chat-Nachricht in den Raum weiterleiten
    fn raum_chat_pfad(&self, player_id: PlayerId, msg: &str) {
        let gefiltert = self.filter.filter(msg);

        let inner = self.inner.lock();
        let Some(spieler) = inner.players.iter().find(|p| p.id == player_id) else {
            return;
        };
        let Some(raum) = spieler.room.clone() else {
            return;
        };
        // Mitgliedschaft zum Weiterleitungszeitpunkt erneut pruefen;
        // veraltete Mitgliedschaft verwirft die Nachricht still
        if raum.is_user(spieler.id) {
            raum.receive(spieler, &gefiltert);
        }
    }

    // -----------------------------------------------------------------------
    // Listen-Fanout
    // -----------------------------------------------------------------------

    /// Listet einen Spieler im Raum-Panel aller Betrachter
    ///
    /// Aktualisiert (a) Spieler die im Raum sitzen und (b) Spieler die
    /// den Raum aus der Lobby heraus betrachten (letzter Klick) –
    /// unabhaengig von der Raumphase identisch. Beitritt und Kick
    /// listet die Lobby intern selbst; diese Methode ist fuer vom Raum
    /// selbst ausgeloeste Aenderungen (etwa Farbwechsel) und darf NICHT
    /// aus einer [`GameRoom`]-Methode heraus aufgerufen werden, die
    /// laeuft bereits unter dem Registry-Mutex.
    pub fn spieler_listen(&self, username: &str, color: Color, room_id: RoomId) {
        let inner = self.inner.lock();
        Self::listen_fanout(
            &inner,
            room_id,
            RoomListingEntry {
                username: username.to_string(),
                color,
            },
        );
    }

    /// Entfernt einen Spieler aus dem Raum-Panel aller Betrachter
    ///
    /// Gleiche Aufruf-Regel wie [`Lobby::spieler_listen`]: nie aus
    /// einer [`GameRoom`]-Methode heraus.
    pub fn spieler_entlisten(&self, username: &str, room_id: RoomId) {
        let inner = self.inner.lock();
        Self::entlisten_fanout(&inner, room_id, username);
    }

    fn listen_fanout(inner: &LobbyInner, room_id: RoomId, eintrag: RoomListingEntry) {
        for spieler in &inner.players {
            spieler.senden(ClientEvent::ListPlayerInRoom {
                room_id,
                entry: eintrag.clone(),
            });
            if Self::betrachtet_raum(spieler, room_id) {
                spieler.senden(ClientEvent::RightListAdd {
                    entry: eintrag.clone(),
                });
            }
        }
    }

    fn entlisten_fanout(inner: &LobbyInner, room_id: RoomId, username: &str) {
        for spieler in &inner.players {
            spieler.senden(ClientEvent::UnlistPlayerInRoom {
                room_id,
                username: username.to_string(),
            });
            if Self::betrachtet_raum(spieler, room_id) {
                spieler.senden(ClientEvent::RightListRemove {
                    username: username.to_string(),
                });
            }
        }
    }

    /// Sitzt der Spieler im Raum oder betrachtet ihn aus der Lobby?
    fn betrachtet_raum(spieler: &Player, room_id: RoomId) -> bool {
        let sitzt_drin = spieler
            .room
            .as_ref()
            .map(|r| r.uid() == room_id)
            .unwrap_or(false);
        let schaut_zu = !spieler.in_room && spieler.last_room_click == Some(room_id);
        sitzt_drin || schaut_zu
    }

    /// Setzt das Status-Banner eines Raums in allen Lobby-Listen
    pub fn raum_status_markieren(&self, room_id: RoomId, status: &str) -> LobbyResult<()> {
        let inner = self.inner.lock();
        if !inner.rooms.iter().any(|r| r.uid() == room_id) {
            tracing::warn!(room_id = %room_id, "Status fuer unbekannten Raum");
            return Err(LobbyError::RaumNichtGefunden(room_id));
        }
        for spieler in &inner.players {
            spieler.senden(ClientEvent::RoomStatus {
                room_id,
                status: status.to_string(),
            });
        }
        Ok(())
    }

    /// Stossen ein Client-Neuladen fuer alle Tabs eines Spielers an
    pub fn client_neu_laden(&self, player_id: PlayerId) -> LobbyResult<()> {
        let inner = self.inner.lock();
        let Some(spieler) = inner.players.iter().find(|p| p.id == player_id) else {
            tracing::warn!(player_id = %player_id, "Neuladen fuer unbekannten Spieler");
            return Err(LobbyError::SpielerNichtGefunden(player_id));
        };
        spieler.senden(ClientEvent::Reload);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Abfragen
    // -----------------------------------------------------------------------

    /// Anzahl der logischen Spieler
    pub fn spieler_anzahl(&self) -> usize {
        self.inner.lock().players.len()
    }

    /// Anzahl der registrierten Raeume
    pub fn raum_anzahl(&self) -> usize {
        self.inner.lock().rooms.len()
    }

    /// Laenge des Lobby-Chat-Verlaufs
    pub fn chat_cache_laenge(&self) -> usize {
        self.inner.lock().chat_cache.len()
    }

    /// Existiert ein Spieler mit dieser ID?
    pub fn ist_spieler(&self, player_id: PlayerId) -> bool {
        self.inner.lock().players.iter().any(|p| p.id == player_id)
    }

    /// Ist der Spieler registriert?
    pub fn ist_registriert(&self, player_id: PlayerId) -> bool {
        self.inner
            .lock()
            .players
            .iter()
            .any(|p| p.id == player_id && p.registered)
    }

    /// Raum-ID des Spielers, falls er in einem Raum sitzt
    pub fn raum_von_spieler(&self, player_id: PlayerId) -> Option<RoomId> {
        self.inner
            .lock()
            .players
            .iter()
            .find(|p| p.id == player_id)
            .and_then(|p| p.room.as_ref().map(|r| r.uid()))
    }

    /// Anzahl der lebenden Verbindungen eines Spielers
    pub fn verbindungs_anzahl(&self, player_id: PlayerId) -> usize {
        self.inner
            .lock()
            .players
            .iter()
            .find(|p| p.id == player_id)
            .map(|p| p.verbindungs_anzahl())
            .unwrap_or(0)
    }

    /// Anzeigename eines Spielers (None wenn unbekannt oder unregistriert)
    pub fn benutzername(&self, player_id: PlayerId) -> Option<String> {
        self.inner
            .lock()
            .players
            .iter()
            .find(|p| p.id == player_id && p.registered)
            .map(|p| p.username().to_string())
    }
}
