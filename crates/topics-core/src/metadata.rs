//! Campaign metadata.
//!
//! Descriptive record consumed by reporting tooling. It plays no part in
//! classification.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Static campaign metadata.
///
/// Note: this record describes the Alpina Kéfir campaign while the built-in
/// rules target Arequipe x LATAM. Both are kept as shipped; use
/// [`CampaignMetadata::undeclared_labels`] to surface the mismatch.
static CAMPAIGN_METADATA: Lazy<CampaignMetadata> = Lazy::new(|| CampaignMetadata {
    campaign_name: "Alpina - Kéfir".to_string(),
    product: "Kéfir Alpina".to_string(),
    categories: [
        "Preguntas sobre el Producto",
        "Comparación con Kéfir Casero/Artesanal",
        "Ingredientes y Salud",
        "Competencia y Disponibilidad",
        "Opinión General del Producto",
        "Fuera de Tema / No Relevante",
        "Otros",
    ]
    .iter()
    .map(|c| c.to_string())
    .collect(),
    version: "1.0".to_string(),
    last_updated: NaiveDate::from_ymd_opt(2025, 11, 20).unwrap_or_default(),
});

/// Descriptive record of a campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignMetadata {
    /// Campaign name.
    pub campaign_name: String,
    /// Product promoted by the campaign.
    pub product: String,
    /// Declared topic categories.
    pub categories: Vec<String>,
    /// Metadata version.
    pub version: String,
    /// Last update date.
    pub last_updated: NaiveDate,
}

impl CampaignMetadata {
    /// Returns the classifier labels that this metadata does not declare.
    pub fn undeclared_labels<'a, I>(&self, labels: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        labels
            .into_iter()
            .filter(|label| !self.categories.iter().any(|c| c == label))
            .collect()
    }
}

/// Returns a copy of the campaign metadata.
///
/// Callers own the returned value; changing it does not affect later calls.
pub fn campaign_metadata() -> CampaignMetadata {
    CAMPAIGN_METADATA.clone()
}
