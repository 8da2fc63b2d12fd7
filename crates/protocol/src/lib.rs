//! parlor-protocol – Client-Ereignis-Definitionen
//!
//! Dieses Crate definiert alle Ereignisse die der Kern an verbundene
//! Clients schickt, sowie die Farbpalette und Chat-Zeilen. Die konkrete
//! Drahtkodierung des Transports liegt ausserhalb dieses Kerns; hier
//! wird nur die typsichere Ereignisoberflaeche festgelegt.

pub mod events;

pub use events::{ChatLine, ClientEvent, Color, RoomListingEntry};
