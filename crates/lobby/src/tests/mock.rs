//! MockRoom – aufzeichnende GameRoom-Implementierung fuer Tests

use std::sync::Arc;

use parking_lot::Mutex;

use parlor_core::types::{PlayerId, RoomId};
use parlor_protocol::{Color, RoomListingEntry};

use crate::player::Player;
use crate::room::{GameRoom, RoomPhase};

/// Zeichnet alle Aufrufe des Lobby-Kerns auf statt zu spielen
pub struct MockRoom {
    uid: RoomId,
    name: String,
    zustand: Mutex<MockZustand>,
}

#[derive(Default)]
struct MockZustand {
    players_wanted: u32,
    minimum_needed: u32,
    in_play: bool,
    in_end_chat: bool,
    mitglieder: Vec<(PlayerId, String)>,
    broadcasts: Vec<String>,
    empfangen: Vec<(PlayerId, String)>,
    admin_empfangen: Vec<(PlayerId, String)>,
    kicks: Vec<PlayerId>,
    disconnects: Vec<PlayerId>,
    resends: Vec<PlayerId>,
    timer: Vec<(RoomPhase, u64)>,
}

impl MockRoom {
    pub fn neu(name: &str, players_wanted: u32, minimum_needed: u32) -> Arc<Self> {
        Arc::new(Self {
            uid: RoomId::new(),
            name: name.to_string(),
            zustand: Mutex::new(MockZustand {
                players_wanted,
                minimum_needed,
                ..Default::default()
            }),
        })
    }

    pub fn in_play_setzen(&self, wert: bool) {
        self.zustand.lock().in_play = wert;
    }

    pub fn end_chat_setzen(&self, wert: bool) {
        self.zustand.lock().in_end_chat = wert;
    }

    pub fn broadcasts(&self) -> Vec<String> {
        self.zustand.lock().broadcasts.clone()
    }

    pub fn empfangene(&self) -> Vec<(PlayerId, String)> {
        self.zustand.lock().empfangen.clone()
    }

    pub fn admin_empfangene(&self) -> Vec<(PlayerId, String)> {
        self.zustand.lock().admin_empfangen.clone()
    }

    pub fn kicks(&self) -> Vec<PlayerId> {
        self.zustand.lock().kicks.clone()
    }

    pub fn disconnects(&self) -> Vec<PlayerId> {
        self.zustand.lock().disconnects.clone()
    }

    pub fn resends(&self) -> Vec<PlayerId> {
        self.zustand.lock().resends.clone()
    }

    pub fn timer(&self) -> Vec<(RoomPhase, u64)> {
        self.zustand.lock().timer.clone()
    }

    pub fn mitglieder(&self) -> Vec<PlayerId> {
        self.zustand.lock().mitglieder.iter().map(|(id, _)| *id).collect()
    }
}

impl GameRoom for MockRoom {
    fn uid(&self) -> RoomId {
        self.uid
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn game_type(&self) -> String {
        "classic".into()
    }

    fn players_wanted(&self) -> u32 {
        self.zustand.lock().players_wanted
    }

    fn minimum_players_needed(&self) -> u32 {
        self.zustand.lock().minimum_needed
    }

    fn in_play(&self) -> bool {
        self.zustand.lock().in_play
    }

    fn in_end_chat(&self) -> bool {
        self.zustand.lock().in_end_chat
    }

    fn username_color_pairs(&self) -> Vec<RoomListingEntry> {
        self.zustand
            .lock()
            .mitglieder
            .iter()
            .map(|(_, name)| RoomListingEntry {
                username: name.clone(),
                color: Color::StandardWhite,
            })
            .collect()
    }

    fn broadcast(&self, text: &str) {
        self.zustand.lock().broadcasts.push(text.to_string());
    }

    fn add_user(&self, player: &Player) {
        let mut zustand = self.zustand.lock();
        zustand
            .mitglieder
            .push((player.id, player.username().to_string()));
        zustand.players_wanted = zustand.players_wanted.saturating_sub(1);
        zustand.minimum_needed = zustand.minimum_needed.saturating_sub(1);
    }

    fn is_user(&self, id: PlayerId) -> bool {
        self.zustand.lock().mitglieder.iter().any(|(m, _)| *m == id)
    }

    fn receive(&self, player: &Player, text: &str) {
        self.zustand
            .lock()
            .empfangen
            .push((player.id, text.to_string()));
    }

    fn admin_receive(&self, player: &Player, text: &str) {
        self.zustand
            .lock()
            .admin_empfangen
            .push((player.id, text.to_string()));
    }

    fn kick(&self, player: &Player) {
        let mut zustand = self.zustand.lock();
        zustand.kicks.push(player.id);
        zustand.mitglieder.retain(|(m, _)| *m != player.id);
    }

    fn disconnect(&self, player: &Player) {
        self.zustand.lock().disconnects.push(player.id);
    }

    fn resend_data(&self, player: &Player) {
        self.zustand.lock().resends.push(player.id);
    }

    fn set_all_time(&self, phase: RoomPhase, duration_ms: u64) {
        self.zustand.lock().timer.push((phase, duration_ms));
    }
}
