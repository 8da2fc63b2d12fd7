//! Obszoenitaets-Filter – Schnittstelle und Wortlisten-Standard
//!
//! Die eigentliche Klassifikation ist ein externer Kollaborateur; der
//! Kern ruft nur `is_obscene` (Registrierung) und `filter` (Raum-Chat)
//! auf. Beide Aufrufe muessen schnell und nicht-blockierend sein.

/// Externe Obszoenitaets-Pruefung
pub trait ProfanityFilter: Send + Sync {
    /// Prueft ob ein Text als obszoen eingestuft wird
    fn is_obscene(&self, text: &str) -> bool;

    /// Maskiert obszoene Teile des Texts (Rest bleibt unveraendert)
    fn filter(&self, text: &str) -> String;
}

// ---------------------------------------------------------------------------
// WordListFilter
// ---------------------------------------------------------------------------

/// Einfacher Wortlisten-Filter als mitgelieferter Standard
///
/// Vergleicht case-insensitiv auf Teilstring-Basis und ersetzt Treffer
/// durch Sternchen gleicher Laenge.
pub struct WordListFilter {
    woerter: Vec<String>,
}

impl WordListFilter {
    /// Erstellt einen Filter mit eigener Wortliste
    pub fn neu(woerter: Vec<String>) -> Self {
        Self {
            woerter: woerter.into_iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Erstellt einen leeren Filter (laesst alles durch)
    pub fn leer() -> Self {
        Self { woerter: vec![] }
    }
}

impl Default for WordListFilter {
    fn default() -> Self {
        Self::neu(
            ["damn", "hell", "crap", "bugger", "bollocks"]
                .into_iter()
                .map(String::from)
                .collect(),
        )
    }
}

impl ProfanityFilter for WordListFilter {
    fn is_obscene(&self, text: &str) -> bool {
        let klein = text.to_lowercase();
        self.woerter.iter().any(|w| klein.contains(w.as_str()))
    }

    fn filter(&self, text: &str) -> String {
        let mut ergebnis = text.to_string();
        let klein = text.to_lowercase();

        // Treffer-Positionen auf dem normalisierten Text suchen, dann im
        // Original maskieren. Die Laengen stimmen ueberein weil beide
        // Texte Zeichen fuer Zeichen korrespondieren (to_lowercase auf
        // ASCII-Chat-Text).
        for wort in &self.woerter {
            let mut start = 0;
            while let Some(pos) = klein[start..].find(wort.as_str()) {
                let von = start + pos;
                let bis = von + wort.len();
                if ergebnis.is_char_boundary(von) && ergebnis.is_char_boundary(bis) {
                    ergebnis.replace_range(von..bis, &"*".repeat(wort.len()));
                }
                start = bis;
            }
        }
        ergebnis
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn erkennt_obszoene_woerter() {
        let filter = WordListFilter::default();
        assert!(filter.is_obscene("oh damn"));
        assert!(filter.is_obscene("DAMN"));
        assert!(!filter.is_obscene("harmlos"));
    }

    #[test]
    fn maskiert_mit_sternchen() {
        let filter = WordListFilter::neu(vec!["mist".into()]);
        assert_eq!(filter.filter("so ein Mist hier"), "so ein **** hier");
    }

    #[test]
    fn maskiert_mehrfache_treffer() {
        let filter = WordListFilter::neu(vec!["mist".into()]);
        assert_eq!(filter.filter("mist mist"), "**** ****");
    }

    #[test]
    fn leerer_filter_laesst_alles_durch() {
        let filter = WordListFilter::leer();
        assert!(!filter.is_obscene("damn"));
        assert_eq!(filter.filter("damn"), "damn");
    }
}
