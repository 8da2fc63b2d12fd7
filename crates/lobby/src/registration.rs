//! Registrierungs-Validierung
//!
//! Normalisiert Wunschnamen und prueft sie in fester Reihenfolge:
//! Eindeutigkeit, Laenge, Zeichensatz, Obszoenitaet. Der erste Fehler
//! gewinnt; gespeichert und verglichen wird immer die normalisierte
//! Form (Kleinschreibung, getrimmt).

use crate::error::RegistrationError;
use crate::profanity::ProfanityFilter;

/// Maximale Laenge eines Anzeigenamens
pub const NAME_MAX_LAENGE: usize = 12;

/// Normalisiert einen Wunschnamen (Kleinschreibung + Trimmen)
pub fn normalisieren(name: &str) -> String {
    name.to_lowercase().trim().to_string()
}

/// Prueft einen bereits normalisierten Wunschnamen
///
/// `vergebene_namen` sind die Namen aller aktuell registrierten
/// Spieler (ebenfalls normalisiert). Reihenfolge der Regeln wie im
/// Protokollverhalten festgelegt; der erste Verstoss gewinnt.
pub fn validieren(
    kandidat: &str,
    vergebene_namen: &[String],
    filter: &dyn ProfanityFilter,
) -> Result<(), RegistrationError> {
    if vergebene_namen.iter().any(|n| n == kandidat) {
        return Err(RegistrationError::NameTaken);
    }
    if kandidat.is_empty() {
        return Err(RegistrationError::Empty);
    }
    // Zeichen zaehlen, nicht Bytes
    if kandidat.chars().count() > NAME_MAX_LAENGE {
        return Err(RegistrationError::TooLong);
    }
    if !kandidat
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c.is_ascii_whitespace())
    {
        return Err(RegistrationError::InvalidCharacters);
    }
    if filter.is_obscene(kandidat) {
        return Err(RegistrationError::Obscene);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profanity::WordListFilter;

    fn pruefen(name: &str, vergeben: &[&str]) -> Result<(), RegistrationError> {
        let filter = WordListFilter::default();
        let vergeben: Vec<String> = vergeben.iter().map(|s| s.to_string()).collect();
        validieren(&normalisieren(name), &vergeben, &filter)
    }

    #[test]
    fn gueltiger_name() {
        assert!(pruefen("Alice", &[]).is_ok());
        assert!(pruefen("spieler 12", &[]).is_ok());
    }

    #[test]
    fn leerer_name_abgelehnt() {
        assert_eq!(pruefen("", &[]), Err(RegistrationError::Empty));
        assert_eq!(pruefen("   ", &[]), Err(RegistrationError::Empty));
    }

    #[test]
    fn dreizehn_zeichen_abgelehnt() {
        assert!(pruefen("zwoelfzeichen", &[]).is_err());
        assert_eq!(
            pruefen("abcdefghijklm", &[]),
            Err(RegistrationError::TooLong)
        );
        // Zwoelf Zeichen sind noch erlaubt
        assert!(pruefen("abcdefghijkl", &[]).is_ok());
    }

    #[test]
    fn umlaute_scheitern_am_zeichensatz_nicht_an_der_laenge() {
        // "müller" hat 6 Zeichen aber 7 Bytes; die Laengenpruefung darf
        // nicht auf Byte-Basis zuschlagen
        assert_eq!(
            pruefen("müller", &[]),
            Err(RegistrationError::InvalidCharacters)
        );
    }

    #[test]
    fn sonderzeichen_abgelehnt() {
        assert_eq!(
            pruefen("al!ce", &[]),
            Err(RegistrationError::InvalidCharacters)
        );
        assert_eq!(
            pruefen("a.b", &[]),
            Err(RegistrationError::InvalidCharacters)
        );
    }

    #[test]
    fn vergebener_name_abgelehnt() {
        assert_eq!(
            pruefen("Alice", &["alice"]),
            Err(RegistrationError::NameTaken)
        );
        // Normalisierung: Gross-/Kleinschreibung und Rand-Whitespace
        assert_eq!(
            pruefen("  ALICE ", &["alice"]),
            Err(RegistrationError::NameTaken)
        );
    }

    #[test]
    fn obszoener_name_abgelehnt() {
        assert_eq!(pruefen("damn", &[]), Err(RegistrationError::Obscene));
    }

    #[test]
    fn eindeutigkeit_schlaegt_laengenpruefung() {
        // Reihenfolge der Regeln: Eindeutigkeit zuerst
        assert_eq!(pruefen("", &[""]), Err(RegistrationError::NameTaken));
    }
}
