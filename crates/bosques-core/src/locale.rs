//! User-facing strings (es-MX).

/// First transcript entry shown when the concierge opens.
pub const WELCOME: &str =
    "Bienvenido. Soy su Concierge Virtual de Bosques California. ¿Cómo puedo asesorarle hoy?";

/// Reply shown when the relay cannot be reached or answers with an error.
pub const FALLBACK_APOLOGY: &str = "Una disculpa, en este momento no me es posible responder. Por favor, intente nuevamente en unos instantes o escríbanos por WhatsApp para atenderle personalmente.";

/// Relay body for an upstream rate limit (HTTP 429).
pub const HIGH_DEMAND: &str =
    "El servicio está experimentando alta demanda. Por favor, intente nuevamente en un momento.";

/// Relay body for a malformed request.
pub const INVALID_REQUEST: &str = "Invalid request: messages array required";

/// Relay body for a request over the body size limit.
pub const PAYLOAD_TOO_LARGE: &str = "Request body too large";

/// Relay body for every other failure.
pub const UPSTREAM_FAILURE: &str = "Error contacting AI service";

/// Relay body when the provider credential is not configured.
pub const INTERNAL_ERROR: &str = "Internal server error";

/// Label of the escalation banner.
pub const ESCALATION_LABEL: &str = "HABLAR CON UN ASESOR HUMANO";

pub mod scripted {
    //! Canned answers used when no relay endpoint is configured.

    pub const PRICE: &str = "Nuestras residencias inician desde $3.8 MDP. El valor varía según el modelo y ubicación. ¿Le gustaría agendar una visita para cotizar?";

    pub const LOCATION: &str = "Nos encontramos en la zona sur de mayor plusvalía, a 2 minutos de Galerías Santa Anita y 5 minutos de Punto Sur.";

    pub const HANDOFF: &str = "He habilitado el enlace directo con nuestro equipo comercial. Por favor, utilice el botón superior para conectar vía WhatsApp.";

    pub const GENERIC: &str = "Entiendo su interés. Como Concierge Virtual, puedo ofrecerle detalles sobre nuestros modelos (Ciprés, Roble, Secuoya) o nuestra ubicación privilegiada. ¿Qué prefiere explorar?";
}
