//! Static property catalog: house models and amenities.
//!
//! This is the only source the concierge system prompt draws project facts
//! from, so edits here change what the concierge knows.

/// A labelled specification line of a house model (e.g. "Recámaras: 3").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelSpec {
    pub label: &'static str,
    pub value: &'static str,
}

/// A house model offered by the development.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HouseModel {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub specs: &'static [ModelSpec],
}

/// A shared amenity of the development.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amenity {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub const HOUSE_MODELS: &[HouseModel] = &[
    HouseModel {
        id: "cipres",
        name: "Ciprés",
        description: "Diseño inteligente en 125.49 m². La opción ideal para iniciar una nueva vida con jardín privado, vestidor y todas las amenidades.",
        specs: &[
            ModelSpec { label: "Construcción", value: "125.49 m²" },
            ModelSpec { label: "Terreno", value: "96.00 m²" },
            ModelSpec { label: "Recámaras", value: "3" },
            ModelSpec { label: "Baños", value: "2.5" },
        ],
    },
    HouseModel {
        id: "roble",
        name: "Roble",
        description: "El equilibrio perfecto entre funcionalidad y elegancia. Espacios diseñados con 140.55 m² de construcción, cochera para 2 autos y una planta alta optimizada.",
        specs: &[
            ModelSpec { label: "Construcción", value: "140.55 m²" },
            ModelSpec { label: "Recámaras", value: "3" },
            ModelSpec { label: "Baños", value: "3.5" },
        ],
    },
    HouseModel {
        id: "secuoya",
        name: "Secuoya",
        description: "Nuestra propuesta más imponente con 173.90 m². Excelencia arquitectónica en gran formato con acabados premium y espacios generosos.",
        specs: &[
            ModelSpec { label: "Construcción", value: "173.90 m²" },
            ModelSpec { label: "Recámaras", value: "3" },
            ModelSpec { label: "Baños", value: "3.5" },
        ],
    },
];

pub const AMENITIES: &[Amenity] = &[
    Amenity {
        id: "padel",
        title: "Cancha de Pádel",
        description: "Disfruta de uno de los deportes de mayor crecimiento en instalaciones de primer nivel.",
    },
    Amenity {
        id: "pool",
        title: "Alberca Tipo Resort",
        description: "Relájate y disfruta el lujo en una alberca diseñada para tu descanso total.",
    },
    Amenity {
        id: "gym",
        title: "Gimnasio Equipado",
        description: "Todo lo necesario para mantener tu estilo de vida saludable sin salir de casa.",
    },
    Amenity {
        id: "terraza",
        title: "Terraza para Eventos",
        description: "El espacio ideal para celebraciones y momentos especiales con amigos y familia.",
    },
    Amenity {
        id: "dog-park",
        title: "Dog Park",
        description: "Un espacio seguro y divertido diseñado especialmente para tus mascotas.",
    },
    Amenity {
        id: "seguridad",
        title: "Acceso Controlado 24/7",
        description: "Tu tranquilidad es nuestra prioridad con vigilancia y tecnología de punta.",
    },
];
