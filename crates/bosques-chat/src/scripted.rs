//! Scripted answers used when no relay endpoint is configured.

use bosques_core::locale::scripted;

/// Keyword-routed canned answers. First matching rule wins.
#[derive(Debug, Clone, Default)]
pub struct ScriptedResponder;

const PRICE_WORDS: &[&str] = &["precio", "costo", "cuesta"];
const LOCATION_WORDS: &[&str] = &["ubicacion", "ubicación", "donde", "dónde", "mapa"];
const HANDOFF_WORDS: &[&str] = &["cita", "visita", "humano", "contacto"];

impl ScriptedResponder {
    pub fn respond(&self, query: &str) -> &'static str {
        let q = query.to_lowercase();
        let has_any = |words: &[&str]| words.iter().any(|w| q.contains(w));

        if has_any(PRICE_WORDS) {
            scripted::PRICE
        } else if has_any(LOCATION_WORDS) {
            scripted::LOCATION
        } else if has_any(HANDOFF_WORDS) {
            scripted::HANDOFF
        } else {
            scripted::GENERIC
        }
    }
}
