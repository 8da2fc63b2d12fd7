//! Nachrichten-Klassifikation
//!
//! Jede eingehende Chat-/Kommandonachricht wird genau einmal anhand
//! des Spielerzustands klassifiziert und danach explizit gematcht,
//! statt sequenziell auf String-Praefixe zu pruefen. Die Ausfuehrung
//! der Pfade (Registrierung, Admin, Vote, Chat-Weiterleitung) liegt
//! in der [`crate::registry::Lobby`].

/// Maximale Laenge einer Raum-Chat-Nachricht
pub const NACHRICHT_MAX_LAENGE: usize = 151;

/// Klassifiziertes Ziel einer eingehenden Nachricht
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// Unregistrierter Spieler: gesamter Text ist ein Wunschname
    Register(String),
    /// Admin-Login-Versuch bzw. Admin-Kommando (Praefix `!`)
    AdminLogin(String),
    /// Gueltiges `/start`-Vote
    StartVote,
    /// Normale Chat-Nachricht fuer den Raum (validiert, ungefiltert)
    Chat(String),
    /// Nachricht wird stillschweigend verworfen
    Drop,
}

/// Zustand des Spielers zum Klassifikationszeitpunkt
#[derive(Debug, Clone, Copy)]
pub struct RouterState {
    /// Registrierung abgeschlossen?
    pub registered: bool,
    /// Sitzt der Spieler in einem Raum?
    pub in_room: bool,
    /// Laeuft das Spiel des Raums bereits?
    pub room_in_play: bool,
    /// Start-Vote bereits abgegeben?
    pub start_vote_cast: bool,
}

/// Klassifiziert eine eingehende Nachricht
///
/// Reihenfolge der Pruefungen entspricht dem Protokollverhalten:
/// Registrierung vor allem anderen, `!` vor `/`, Slash-Kommandos nur
/// solange der Raum nicht spielt und kein Vote abgegeben wurde. Im
/// laufenden Spiel ist Slash-Text gewoehnlicher Chat.
pub fn klassifizieren(zustand: RouterState, msg: &str) -> Inbound {
    if !zustand.registered {
        return Inbound::Register(msg.to_string());
    }
    if !zustand.in_room {
        // Kein Raum, nichts zu routen; Lobby-Chat hat einen eigenen
        // Eingang (PostLobbyMessage)
        return Inbound::Drop;
    }
    if msg.starts_with('!') {
        return Inbound::AdminLogin(msg.to_string());
    }
    if msg.starts_with('/') && !zustand.room_in_play && !zustand.start_vote_cast {
        return if ist_kommando(msg, "/start") {
            Inbound::StartVote
        } else {
            Inbound::Drop
        };
    }
    if nachricht_gueltig(msg) {
        Inbound::Chat(msg.to_string())
    } else {
        Inbound::Drop
    }
}

/// Prueft ob eine Nachricht ein bestimmtes Kommando ist
/// (erstes Whitespace-Token muss exakt uebereinstimmen)
fn ist_kommando(msg: &str, kommando: &str) -> bool {
    msg.split_whitespace().next() == Some(kommando)
}

/// Validiert eine Chat-Nachricht: getrimmt nicht leer, Laenge begrenzt
/// (Zeichen, nicht Bytes)
fn nachricht_gueltig(msg: &str) -> bool {
    !msg.trim().is_empty() && msg.chars().count() <= NACHRICHT_MAX_LAENGE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zustand(registered: bool, in_room: bool, in_play: bool, voted: bool) -> RouterState {
        RouterState {
            registered,
            in_room,
            room_in_play: in_play,
            start_vote_cast: voted,
        }
    }

    #[test]
    fn unregistriert_wird_wunschname() {
        let e = klassifizieren(zustand(false, false, false, false), "Alice");
        assert_eq!(e, Inbound::Register("Alice".into()));
    }

    #[test]
    fn registriert_ohne_raum_wird_verworfen() {
        let e = klassifizieren(zustand(true, false, false, false), "hallo");
        assert_eq!(e, Inbound::Drop);
    }

    #[test]
    fn ausrufezeichen_ist_admin_login() {
        let e = klassifizieren(zustand(true, true, false, false), "!geheim");
        assert_eq!(e, Inbound::AdminLogin("!geheim".into()));
    }

    #[test]
    fn start_vote_vor_spielbeginn() {
        let e = klassifizieren(zustand(true, true, false, false), "/start");
        assert_eq!(e, Inbound::StartVote);
    }

    #[test]
    fn anderes_slash_kommando_wird_verworfen() {
        let e = klassifizieren(zustand(true, true, false, false), "/help");
        assert_eq!(e, Inbound::Drop);
        // "/started" ist kein "/start"
        let e = klassifizieren(zustand(true, true, false, false), "/started");
        assert_eq!(e, Inbound::Drop);
    }

    #[test]
    fn doppeltes_vote_faellt_in_chat_pfad() {
        // Vote bereits abgegeben: "/start" ist jetzt gewoehnlicher Text
        let e = klassifizieren(zustand(true, true, false, true), "/start");
        assert_eq!(e, Inbound::Chat("/start".into()));
    }

    #[test]
    fn slash_im_laufenden_spiel_ist_chat() {
        let e = klassifizieren(zustand(true, true, true, false), "/huch");
        assert_eq!(e, Inbound::Chat("/huch".into()));
    }

    #[test]
    fn leere_und_ueberlange_nachrichten_verworfen() {
        let e = klassifizieren(zustand(true, true, true, false), "   ");
        assert_eq!(e, Inbound::Drop);

        let zu_lang = "x".repeat(NACHRICHT_MAX_LAENGE + 1);
        let e = klassifizieren(zustand(true, true, true, false), &zu_lang);
        assert_eq!(e, Inbound::Drop);

        let genau = "x".repeat(NACHRICHT_MAX_LAENGE);
        let e = klassifizieren(zustand(true, true, true, false), &genau);
        assert!(matches!(e, Inbound::Chat(_)));
    }

    #[test]
    fn laenge_zaehlt_zeichen_nicht_bytes() {
        // 151 Umlaute sind 302 Bytes, aber eine gueltige Nachricht
        let umlaute = "ä".repeat(NACHRICHT_MAX_LAENGE);
        let e = klassifizieren(zustand(true, true, true, false), &umlaute);
        assert!(matches!(e, Inbound::Chat(_)));
    }
}
