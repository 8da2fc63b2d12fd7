//! parlor-server – Bibliotheks-Root
//!
//! Verdrahtet den Lobby-Kern mit dem Matchmaker und stellt den
//! oeffentlichen Einstiegspunkt fuer Integrationstests bereit. Die
//! Transport-Schicht (Websockets o.ae.) haengt sich ueber
//! [`parlor_lobby::ConnectionTable`] und die [`parlor_lobby::Lobby`]
//! an; der Server selbst besitzt keine Socket-Details.

pub mod config;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use parlor_lobby::{Lobby, Matchmaker, WordListFilter};

use config::ServerConfig;

/// Haelt den laufenden Server-Zustand zusammen
pub struct Server {
    pub config: ServerConfig,
    lobby: Lobby,
}

impl Server {
    /// Erstellt einen neuen Server aus der gegebenen Konfiguration
    pub fn neu(config: ServerConfig) -> Self {
        let filter = if config.moderation.woerter.is_empty() {
            WordListFilter::default()
        } else {
            WordListFilter::neu(config.moderation.woerter.clone())
        };
        let lobby = Lobby::neu(config.lobby.clone(), Arc::new(filter));
        Self { config, lobby }
    }

    /// Zugriff auf die Lobby (fuer Transport-Anbindung und Tests)
    pub fn lobby(&self) -> &Lobby {
        &self.lobby
    }

    /// Startet alle Server-Subsysteme und laeuft bis zum Shutdown-Signal
    ///
    /// Reihenfolge:
    /// 1. Matchmaker-Task starten
    /// 2. Auf Ctrl-C / SIGTERM warten
    /// 3. Matchmaker geordnet stoppen
    pub async fn starten(self) -> Result<()> {
        tracing::info!(
            server_name = %self.config.server.name,
            tick_ms = self.config.matchmaking.tick_ms,
            "Server startet"
        );

        let matchmaker = Matchmaker::neu(
            self.lobby.clone(),
            Duration::from_millis(self.config.matchmaking.tick_ms),
        );
        let handle = matchmaker.starten();

        tracing::info!("Server laeuft. Warte auf Shutdown-Signal (Ctrl-C)...");
        tokio::signal::ctrl_c().await?;
        tracing::info!("Shutdown-Signal empfangen, Server wird beendet");

        handle.stoppen().await;
        Ok(())
    }
}
