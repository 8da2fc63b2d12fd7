//! Tests fuer den Matchmaker-Hintergrundtask

use std::sync::Arc;
use std::time::Duration;

use parlor_core::types::{ConnectionId, SessionToken};

use super::mock::MockRoom;
use crate::matchmaker::Matchmaker;
use crate::profanity::WordListFilter;
use crate::registry::{Lobby, LobbyConfig};
use crate::room::GameRoom;

fn test_lobby() -> Lobby {
    Lobby::neu(LobbyConfig::default(), Arc::new(WordListFilter::default()))
}

#[tokio::test(start_paused = true)]
async fn matchmaker_ordnet_periodisch_zu() {
    let lobby = test_lobby();
    let cid = ConnectionId::new();
    let _rx = lobby.connections().registrieren(cid);
    let pid = lobby
        .verbinden(cid, SessionToken::from("s1"))
        .expect("Verbindung muss angenommen werden");
    lobby.empfangen(pid, "alice");

    let raum = MockRoom::neu("dorf", 5, 3);
    lobby.raum_hinzufuegen(raum.clone());
    lobby.raum_klick(pid, raum.uid());

    let handle = Matchmaker::neu(lobby.clone(), Duration::from_millis(10)).starten();

    // Gepauste Zeit: der Sleep springt vor und laesst Ticks feuern
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(lobby.raum_von_spieler(pid), Some(raum.uid()));
    handle.stoppen().await;
}

#[tokio::test(start_paused = true)]
async fn stoppen_beendet_den_task() {
    let lobby = test_lobby();
    let handle = Matchmaker::neu(lobby, Duration::from_millis(10)).starten();

    tokio::time::sleep(Duration::from_millis(25)).await;
    // Kehrt nur zurueck wenn der Task tatsaechlich endet
    handle.stoppen().await;
}
