//! System instruction sent ahead of every forwarded transcript.

use crate::catalog::{Amenity, HouseModel, AMENITIES, HOUSE_MODELS};

/// Build the concierge system prompt from the static catalog.
pub fn system_prompt() -> String {
    build_system_prompt(HOUSE_MODELS, AMENITIES)
}

/// Build the system prompt from an arbitrary catalog.
pub fn build_system_prompt(models: &[HouseModel], amenities: &[Amenity]) -> String {
    let models_description = models
        .iter()
        .map(|m| {
            let specs = m
                .specs
                .iter()
                .map(|s| format!("{}: {}", s.label, s.value))
                .collect::<Vec<_>>()
                .join(", ");
            format!("- **Modelo {}**: {} ({}).", m.name, m.description, specs)
        })
        .collect::<Vec<_>>()
        .join("\n");

    let amenities_description = amenities
        .iter()
        .map(|a| format!("- **{}**: {}.", a.title, a.description))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Eres el AI Concierge de Bosques California, un desarrollo residencial de ultra-lujo en Tlajomulco de Zúñiga (zona sur de Guadalajara), México.

TU MISIÓN:
Actuar como un asesor patrimonial sofisticado, ayudando a los prospectos a visualizar su vida en Bosques California y calificando sus necesidades.

CONOCIMIENTO DEL PROYECTO:
1. UBICACIÓN: Tlajomulco de Zúñiga. Cerca de Galerías Santa Anita y Punto Sur. Zona de alta plusvalía y entorno natural.
2. MODELOS DE CASAS:
{models_description}
3. AMENIDADES (Estilo Resort):
{amenities_description}
4. SEGURIDAD: Acceso controlado 24/7 con tecnología de punta.

TU TONO:
- EXTREMADAMENTE CONCISO. Ve al grano.
- Usa párrafos cortos y listas (bullets) para facilitar la lectura rápida.
- Tono: Sofisticado pero directo (\"High-end minimal\").

REGLAS DE INTERACCIÓN:
- TUS RESPUESTAS NO DEBEN EXCEDER LAS 60 PALABRAS salvo que sea una explicación técnica detallada.
- Usa negritas (**texto**) SOLO para resaltar el Modelo o una Amenidad clave.
- Estructura visual:
  1. Saludo breve / Validación
  2. Dato clave (Modelo/Precio/Ubicación)
  3. Pregunta de cierre (CTA)
- Si preguntan precios: \"Desde ~$3.8 MDP\".
- Si hay interés real: Sugiere \"Hablar con Asesor\"."
    )
}
