//! Fehlertypen fuer Parlor
//!
//! Zentraler Fehler-Enum der alle moeglichen Fehlerzustaende abdeckt.
//! Untermodule koennen eigene Fehler definieren und via `#[from]` konvertieren.

use thiserror::Error;

/// Globaler Result-Alias fuer Parlor
pub type Result<T> = std::result::Result<T, ParlorError>;

/// Alle moeglichen Fehler im Parlor-System
#[derive(Debug, Error)]
pub enum ParlorError {
    // --- Verbindung & Session ---
    #[error("Verbindung fehlgeschlagen: {0}")]
    Verbindung(String),

    #[error("Verbindungslimit erreicht: maximal {0} Tabs pro Session")]
    Kapazitaet(u32),

    // --- Ressourcen ---
    #[error("Raum nicht gefunden: {0}")]
    RaumNichtGefunden(String),

    #[error("Spieler nicht gefunden: {0}")]
    SpielerNichtGefunden(String),

    // --- Konfiguration ---
    #[error("Konfigurationsfehler: {0}")]
    Konfiguration(String),

    // --- Intern ---
    #[error("Interner Fehler: {0}")]
    Intern(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl ParlorError {
    /// Erstellt einen internen Fehler aus einer beliebigen Nachricht
    pub fn intern(msg: impl Into<String>) -> Self {
        Self::Intern(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fehler_anzeige() {
        let e = ParlorError::RaumNichtGefunden("room:123".into());
        assert_eq!(e.to_string(), "Raum nicht gefunden: room:123");
    }

    #[test]
    fn kapazitaets_fehler() {
        let e = ParlorError::Kapazitaet(3);
        assert!(e.to_string().contains("3"));
    }
}
