//! Rule set definitions.
//!
//! A [`RuleSet`] is plain data: an ordered list of [`TopicRule`]s, one
//! [`NoContentRule`] and a default label. It is compiled into a
//! [`TopicClassifier`](super::TopicClassifier) before use, and can be stored
//! as JSON so each campaign can ship its own rules.

use serde::{Deserialize, Serialize};

use super::Topic;

/// Minimum number of whitespace-separated tokens for a comment to count as
/// content.
pub const DEFAULT_MIN_TOKENS: usize = 3;

/// A single topic rule: if any pattern is found in the lower-cased comment,
/// the comment gets `label`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicRule {
    /// Identifier used in logs and explanations.
    pub name: String,
    /// Label assigned when the rule matches.
    pub label: String,
    /// Regex alternatives, searched anywhere in the text.
    pub patterns: Vec<String>,
}

impl TopicRule {
    /// Creates a new topic rule.
    pub fn new(name: impl Into<String>, label: impl Into<String>, patterns: &[&str]) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Catch-all for comments without real content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoContentRule {
    /// Label assigned to filler comments.
    pub label: String,
    /// Filler patterns (laughter, noise, greetings).
    #[serde(default)]
    pub patterns: Vec<String>,
    /// Comments with fewer tokens than this are filler.
    #[serde(default = "default_min_tokens")]
    pub min_tokens: usize,
}

fn default_min_tokens() -> usize {
    DEFAULT_MIN_TOKENS
}

/// Complete, ordered rule configuration for one campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Rules in priority order; the first match wins.
    #[serde(default)]
    pub rules: Vec<TopicRule>,
    /// Applied after all topic rules.
    pub no_content: NoContentRule,
    /// Returned when nothing matched.
    pub default_label: String,
}

impl RuleSet {
    /// Rule set of the Arequipe x LATAM activation campaign (Arequipitos
    /// Alpina served on LATAM flights).
    pub fn arequipe_latam() -> Self {
        let rules = vec![
            TopicRule::new(
                "positive_product",
                Topic::PositiveProduct.label(),
                &[
                    r"arequipe.*\brico\b",
                    r"arequipe.*\bdelicioso\b",
                    r"arequipe.*\bbueno\b",
                    r"arequipe.*\bencanta\b",
                    r"arequipe.*\bsabroso\b",
                    r"arequipe.*\bdedo\b",
                    r"alpina.*\brico\b",
                    r"alpina.*\bbueno\b",
                    r"me.*encanta.*arequipe",
                ],
            ),
            TopicRule::new(
                "negative_product",
                Topic::NegativeProduct.label(),
                &[
                    r"arequipe.*\bmalo\b",
                    r"arequipe.*\bazúcar\b",
                    r"arequipe.*\benfermar\b",
                    r"azúcar.*\barequipe\b",
                    r"dulce.*exceso",
                    r"demasiado.*dulce",
                ],
            ),
            TopicRule::new(
                "positive_airline",
                Topic::PositiveAirline.label(),
                &[
                    r"latam.*\bmejor\b",
                    r"latam.*\bbuena\b",
                    r"latam.*\bexcelente\b",
                    r"latam.*\bencanta\b",
                    r"latam.*\bnúmero\s*1\b",
                    r"latam.*\bpreferida\b",
                    r"me\s*l\s*amo.*latam",
                    r"latam.*detallistas",
                    r"latam.*atención",
                    r"latam.*seguridad",
                    r"nunca.*sentido.*bien.*aerolínea",
                ],
            ),
            TopicRule::new(
                "negative_airline",
                Topic::NegativeAirline.label(),
                &[
                    r"latam.*\bmierda\b",
                    r"latam.*\bporquería\b",
                    r"latam.*\bmala\b",
                    r"latam.*\bpésim[oa]\b",
                    r"latam.*\broban\b",
                    r"latam.*\bmaleta\b",
                    r"latam.*\bmalo\b",
                    r"latam.*control",
                ],
            ),
            TopicRule::new(
                "flight_experience",
                Topic::FlightExperience.label(),
                &[
                    r"\bdetalle[s]?\b.*\bbonito[s]?\b",
                    r"\brefrigerio\b",
                    r"\bcafé\b",
                    r"juan\s*valdez",
                    r"\batención\b.*\bbuena\b",
                    r"viajamos.*dieron",
                    r"tripulantes",
                    r"cabina",
                    r"clase.*bisnes",
                    r"business",
                ],
            ),
            TopicRule::new(
                "airline_comparison",
                Topic::AirlineComparison.label(),
                &[
                    r"\bavianca\b",
                    r"\biberia\b",
                    r"otra.*aerolínea",
                    r"mejor.*que.*avianca",
                    r"decadencia",
                    r"comparación",
                ],
            ),
            // Overlaps with negative_airline on luggage; order decides.
            TopicRule::new(
                "service_complaint",
                Topic::ServiceComplaint.label(),
                &[
                    r"roben.*maleta",
                    r"robar.*equipaje",
                    r"ni.*tinto.*ofrecen",
                    r"no.*ofrecen",
                    r"mal.*servicio",
                    r"equipaje",
                ],
            ),
            TopicRule::new(
                "video_reaction",
                Topic::VideoReaction.label(),
                &[
                    r"el\s*man",
                    r"video",
                    r"aparece",
                    r"charlie\s*kirk",
                    r"bobo",
                    r"deja.*familia.*perro",
                    r"jajaja.*arequipe",
                    r"en\s*serio",
                ],
            ),
        ];

        let no_content = NoContentRule {
            label: Topic::OffTopic.label().to_string(),
            patterns: [
                r"^jaja+$",
                r"^ja+ja+ja+$",
                r"^0q",
                r"^10\s*q+",
                r"^\d+\s*[qa]+\s*\d+",
                r"^[qoa\s\d]+$",
                r"^que\s*bien$",
                r"^saludos$",
            ]
            .iter()
            .map(|p| p.to_string())
            .collect(),
            min_tokens: DEFAULT_MIN_TOKENS,
        };

        Self {
            rules,
            no_content,
            default_label: Topic::Other.label().to_string(),
        }
    }

    /// Parses a rule set from JSON.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the rule set to pretty JSON.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::arequipe_latam()
    }
}
