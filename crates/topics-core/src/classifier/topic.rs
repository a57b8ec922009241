//! Topics of the Arequipe x LATAM campaign.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Topics that a campaign comment can be classified into.
///
/// Variants are declared in rule priority order; [`Topic::Other`] is the
/// fallback when no rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    /// Praise for the Arequipe/Alpina product.
    PositiveProduct,
    /// Complaints about the product (taste, sugar content, health).
    NegativeProduct,
    /// Praise for LATAM.
    PositiveAirline,
    /// Insults or complaints aimed at LATAM.
    NegativeAirline,
    /// Positive details of the flight (snacks, crew, cabin).
    FlightExperience,
    /// Mentions of competing airlines.
    AirlineComparison,
    /// General complaints about air travel service.
    ServiceComplaint,
    /// Reactions to the video itself.
    VideoReaction,
    /// Filler, laughter, noise or too-short comments.
    OffTopic,
    /// Nothing matched.
    Other,
}

impl Topic {
    /// Returns all topics in priority order.
    pub fn all() -> &'static [Topic] {
        &[
            Topic::PositiveProduct,
            Topic::NegativeProduct,
            Topic::PositiveAirline,
            Topic::NegativeAirline,
            Topic::FlightExperience,
            Topic::AirlineComparison,
            Topic::ServiceComplaint,
            Topic::VideoReaction,
            Topic::OffTopic,
            Topic::Other,
        ]
    }

    /// Returns the report label for this topic.
    pub fn label(&self) -> &'static str {
        match self {
            Topic::PositiveProduct => "Opinión Positiva - Arequipe/Alpina",
            Topic::NegativeProduct => "Opinión Negativa - Arequipe/Alpina",
            Topic::PositiveAirline => "Opinión Positiva - LATAM",
            Topic::NegativeAirline => "Opinión Negativa - LATAM",
            Topic::FlightExperience => "Experiencia de Vuelo - Detalles Positivos",
            Topic::AirlineComparison => "Comparación con Otras Aerolíneas",
            Topic::ServiceComplaint => "Quejas sobre Servicio Aéreo",
            Topic::VideoReaction => "Reacciones al Contenido del Video",
            Topic::OffTopic => "Fuera de Tema / No Relevante",
            Topic::Other => "Otros",
        }
    }

    /// Looks up a topic by its report label.
    pub fn from_label(label: &str) -> Option<Topic> {
        Topic::all().iter().copied().find(|t| t.label() == label)
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
