//! Ordered regex topic classifier.
//!
//! Each rule is compiled into a [`RegexSet`] for the match test plus the
//! individual [`Regex`]es for reporting the matched text. Rules are scanned
//! in order and the first match wins.

use std::fmt;
use std::path::Path;
use std::time::Instant;

use regex::{Regex, RegexSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::rules::RuleSet;
use super::tally::TopicTally;
use super::text::{comment_text, normalize, token_count};
use super::Topic;
use crate::error::{ClassifierError, Result};

/// Rule name reported when the no-content rule fires.
pub const NO_CONTENT_RULE: &str = "no_content";

/// Compiled patterns for one rule.
struct CompiledPatterns {
    /// Regex set for the fast "does anything match" test.
    regex_set: RegexSet,
    /// Individual regexes for extracting matched text.
    regexes: Vec<Regex>,
}

impl CompiledPatterns {
    fn compile(rule: &str, patterns: &[String]) -> Result<Self> {
        let regexes = patterns
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|source| ClassifierError::InvalidPattern {
                    rule: rule.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let regex_set =
            RegexSet::new(patterns).map_err(|source| ClassifierError::InvalidPattern {
                rule: rule.to_string(),
                source,
            })?;

        Ok(Self { regex_set, regexes })
    }

    fn is_match(&self, text: &str) -> bool {
        self.regex_set.is_match(text)
    }

    fn first_match(&self, text: &str) -> Option<String> {
        self.regexes
            .iter()
            .find_map(|r| r.find(text))
            .map(|m| m.as_str().to_string())
    }
}

struct CompiledRule {
    name: String,
    label: String,
    patterns: CompiledPatterns,
}

struct CompiledNoContent {
    label: String,
    patterns: CompiledPatterns,
    min_tokens: usize,
}

/// Which part of the rule set decided a comment.
enum Verdict {
    Rule(usize),
    NoContent,
    Default,
}

/// Explanation of a single classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicMatch {
    /// The assigned label.
    pub label: String,
    /// Name of the rule that fired; `None` when the default label was used.
    pub rule: Option<String>,
    /// The text fragment that matched, if a pattern matched.
    pub matched_text: Option<String>,
    /// Classification duration in microseconds.
    pub duration_us: u64,
}

impl TopicMatch {
    /// Returns true if the default label was assigned.
    pub fn is_default(&self) -> bool {
        self.rule.is_none()
    }
}

/// Rule-based topic classifier for campaign comments.
///
/// The rule set is compiled once at construction and never mutated, so a
/// classifier can be shared freely between threads.
pub struct TopicClassifier {
    rules: Vec<CompiledRule>,
    no_content: CompiledNoContent,
    default_label: String,
}

impl TopicClassifier {
    /// Creates a classifier for the Arequipe x LATAM campaign.
    pub fn new() -> Self {
        Self::from_rule_set(RuleSet::arequipe_latam())
            .expect("Invalid built-in campaign patterns")
    }

    /// Compiles a custom rule set.
    pub fn from_rule_set(set: RuleSet) -> Result<Self> {
        if set.default_label.trim().is_empty() {
            return Err(ClassifierError::InvalidRule(
                "default label must not be blank".to_string(),
            ));
        }
        if set.no_content.label.trim().is_empty() {
            return Err(ClassifierError::InvalidRule(
                "no-content label must not be blank".to_string(),
            ));
        }

        let mut rules = Vec::with_capacity(set.rules.len());
        for rule in set.rules {
            if rule.label.trim().is_empty() {
                return Err(ClassifierError::InvalidRule(format!(
                    "rule '{}' has a blank label",
                    rule.name
                )));
            }
            if rule.patterns.is_empty() {
                tracing::warn!("Rule '{}' has no patterns and will never match", rule.name);
            }
            let patterns = CompiledPatterns::compile(&rule.name, &rule.patterns)?;
            rules.push(CompiledRule {
                name: rule.name,
                label: rule.label,
                patterns,
            });
        }

        if rules.is_empty() {
            tracing::warn!("Rule set has no topic rules; only the fallbacks will apply");
        }

        let no_content = CompiledNoContent {
            patterns: CompiledPatterns::compile(NO_CONTENT_RULE, &set.no_content.patterns)?,
            label: set.no_content.label,
            min_tokens: set.no_content.min_tokens,
        };

        tracing::debug!(
            "Compiled topic classifier with {} rules (default: {})",
            rules.len(),
            set.default_label
        );

        Ok(Self {
            rules,
            no_content,
            default_label: set.default_label,
        })
    }

    /// Compiles a rule set stored as JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_rule_set(RuleSet::from_json(json)?)
    }

    /// Loads and compiles a JSON rule set file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Classifies a comment and returns its label.
    ///
    /// Any displayable value is accepted; numbers and other non-string
    /// inputs are classified by their string form.
    pub fn classify<C: fmt::Display + ?Sized>(&self, comment: &C) -> &str {
        self.classify_text(&comment.to_string())
    }

    /// Classifies a loosely typed value (see [`comment_text`]).
    pub fn classify_value(&self, value: &Value) -> &str {
        self.classify_text(&comment_text(value))
    }

    /// Classifies a comment into a built-in [`Topic`].
    ///
    /// Returns `None` when this classifier was built from a custom rule set
    /// whose label is not one of the built-in topics.
    pub fn classify_topic<C: fmt::Display + ?Sized>(&self, comment: &C) -> Option<Topic> {
        Topic::from_label(self.classify(comment))
    }

    /// Classifies a comment and reports which rule fired.
    pub fn explain<C: fmt::Display + ?Sized>(&self, comment: &C) -> TopicMatch {
        let start = Instant::now();
        let text = normalize(&comment.to_string());

        let (label, rule, matched_text) = match self.verdict(&text) {
            Verdict::Rule(index) => {
                let rule = &self.rules[index];
                (
                    rule.label.clone(),
                    Some(rule.name.clone()),
                    rule.patterns.first_match(&text),
                )
            }
            Verdict::NoContent => (
                self.no_content.label.clone(),
                Some(NO_CONTENT_RULE.to_string()),
                self.no_content.patterns.first_match(&text),
            ),
            Verdict::Default => (self.default_label.clone(), None, None),
        };

        TopicMatch {
            label,
            rule,
            matched_text,
            duration_us: start.elapsed().as_micros() as u64,
        }
    }

    /// Classifies a batch of comments into a tally.
    pub fn tally<I, C>(&self, comments: I) -> TopicTally
    where
        I: IntoIterator<Item = C>,
        C: fmt::Display,
    {
        let mut tally = TopicTally::new(self.labels());
        for comment in comments {
            tally.record(self.classify(&comment));
        }
        tally
    }

    /// Returns every label this classifier can produce, in priority order.
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::with_capacity(self.rules.len() + 2);
        let candidates = self
            .rules
            .iter()
            .map(|r| r.label.as_str())
            .chain([self.no_content.label.as_str(), self.default_label.as_str()]);
        for label in candidates {
            if !labels.contains(&label) {
                labels.push(label);
            }
        }
        labels
    }

    /// Returns the label used when nothing matches.
    pub fn default_label(&self) -> &str {
        &self.default_label
    }

    /// Returns the number of topic rules (excluding the fallbacks).
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    fn classify_text(&self, comment: &str) -> &str {
        let text = normalize(comment);
        match self.verdict(&text) {
            Verdict::Rule(index) => &self.rules[index].label,
            Verdict::NoContent => &self.no_content.label,
            Verdict::Default => &self.default_label,
        }
    }

    fn verdict(&self, text: &str) -> Verdict {
        if let Some(index) = self.rules.iter().position(|r| r.patterns.is_match(text)) {
            return Verdict::Rule(index);
        }

        if self.no_content.patterns.is_match(text) || token_count(text) < self.no_content.min_tokens
        {
            return Verdict::NoContent;
        }

        Verdict::Default
    }
}

impl Default for TopicClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TopicClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TopicClassifier")
            .field("rules", &self.rules.iter().map(|r| &r.name).collect::<Vec<_>>())
            .field("no_content", &self.no_content.label)
            .field("min_tokens", &self.no_content.min_tokens)
            .field("default_label", &self.default_label)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::rules::{NoContentRule, TopicRule};
    use serde_json::json;

    fn classifier() -> TopicClassifier {
        TopicClassifier::new()
    }

    fn topic(text: &str) -> Topic {
        classifier().classify_topic(text).unwrap()
    }

    // === Reference examples ===

    #[test]
    fn praises_arequipe() {
        assert_eq!(
            classifier().classify("El arequipe estaba muy rico en mi vuelo"),
            "Opinión Positiva - Arequipe/Alpina"
        );
    }

    #[test]
    fn insults_latam() {
        assert_eq!(
            classifier().classify("Latam es una porquería, perdieron mi maleta"),
            "Opinión Negativa - LATAM"
        );
    }

    #[test]
    fn laughter_is_off_topic() {
        assert_eq!(classifier().classify("jajajaja"), "Fuera de Tema / No Relevante");
    }

    #[test]
    fn empty_comment_is_off_topic() {
        assert_eq!(classifier().classify(""), "Fuera de Tema / No Relevante");
    }

    #[test]
    fn numbers_are_stringified() {
        assert_eq!(classifier().classify(&12345), Topic::OffTopic.label());
        assert_eq!(classifier().classify(&3.5_f64), Topic::OffTopic.label());
    }

    #[test]
    fn json_values_are_stringified() {
        let c = classifier();
        assert_eq!(c.classify_value(&Value::Null), Topic::OffTopic.label());
        assert_eq!(c.classify_value(&json!(12345)), Topic::OffTopic.label());
        assert_eq!(
            c.classify_value(&json!("LATAM es la mejor aerolínea")),
            Topic::PositiveAirline.label()
        );
    }

    // === One comment per rule ===

    #[test]
    fn detects_negative_product() {
        assert_eq!(topic("El arequipe tiene mucha azúcar"), Topic::NegativeProduct);
        assert_eq!(topic("Demasiado dulce para mi gusto"), Topic::NegativeProduct);
    }

    #[test]
    fn detects_positive_airline() {
        assert_eq!(topic("LATAM es la mejor aerolínea"), Topic::PositiveAirline);
        assert_eq!(topic("Latam número 1 siempre"), Topic::PositiveAirline);
    }

    #[test]
    fn detects_flight_experience() {
        assert_eq!(topic("Los tripulantes fueron muy amables"), Topic::FlightExperience);
        assert_eq!(topic("Nos dieron café Juan Valdez"), Topic::FlightExperience);
    }

    #[test]
    fn detects_airline_comparison() {
        assert_eq!(topic("Avianca es peor que todo esto"), Topic::AirlineComparison);
    }

    #[test]
    fn detects_service_complaint() {
        assert_eq!(topic("Se perdió mi equipaje otra vez"), Topic::ServiceComplaint);
        assert_eq!(topic("Qué mal servicio el de hoy"), Topic::ServiceComplaint);
    }

    #[test]
    fn detects_video_reaction() {
        assert_eq!(topic("Quién es el man del video"), Topic::VideoReaction);
    }

    #[test]
    fn filler_patterns_apply_to_long_noise() {
        assert_eq!(topic("10 qqq 20"), Topic::OffTopic);
        assert_eq!(topic("0q esto no tiene nada"), Topic::OffTopic);
        assert_eq!(topic("12 aaa 34 x"), Topic::OffTopic);
        assert_eq!(topic("1 2 3 4"), Topic::OffTopic);
    }

    #[test]
    fn combining_dot_joins_words() {
        // Lower-cased "İ" keeps U+0307, which the regex engine treats as a
        // word character, so no boundary precedes "café".
        assert_eq!(normalize("İcafé"), "i\u{307}café");
        assert_eq!(topic("İcafé"), Topic::OffTopic);
        assert_eq!(topic("İ café con leche"), Topic::FlightExperience);
    }

    #[test]
    fn short_text_is_off_topic() {
        assert_eq!(topic("hola"), Topic::OffTopic);
        assert_eq!(topic("ok gracias"), Topic::OffTopic);
    }

    #[test]
    fn unmatched_text_is_other() {
        assert_eq!(
            classifier().classify("el cielo está nublado hoy en la tarde"),
            "Otros"
        );
    }

    // === Matching semantics ===

    #[test]
    fn matching_is_case_insensitive() {
        let c = classifier();
        assert_eq!(c.classify("AREQUIPE RICO"), c.classify("arequipe rico"));
        assert_eq!(c.classify("AREQUIPE RICO"), Topic::PositiveProduct.label());
    }

    #[test]
    fn earlier_rule_wins() {
        // Matches positive and negative product rules.
        assert_eq!(
            topic("El arequipe es rico pero tiene azúcar"),
            Topic::PositiveProduct
        );
        // Matches positive airline and video reaction rules.
        assert_eq!(topic("latam es la mejor, qué buen video"), Topic::PositiveAirline);
        // Luggage complaints naming LATAM go to the airline rule.
        assert_eq!(
            topic("latam perdió mi maleta y no ofrecen nada"),
            Topic::NegativeAirline
        );
    }

    #[test]
    fn word_boundaries_reject_longer_words() {
        // "ricos" is not "rico".
        assert_eq!(topic("arequipe con ricos amigos hoy"), Topic::Other);
    }

    #[test]
    fn classification_is_deterministic() {
        let c = classifier();
        let text = "Latam es una porquería, perdieron mi maleta";
        assert_eq!(c.classify(text), c.classify(text));
    }

    // === Explanations ===

    #[test]
    fn explain_reports_rule_and_text() {
        let m = classifier().explain("El arequipe estaba muy rico en mi vuelo");
        assert_eq!(m.label, Topic::PositiveProduct.label());
        assert_eq!(m.rule.as_deref(), Some("positive_product"));
        assert_eq!(m.matched_text.as_deref(), Some("arequipe estaba muy rico"));
        assert!(!m.is_default());
    }

    #[test]
    fn explain_short_text_has_no_matched_text() {
        let m = classifier().explain("ok gracias");
        assert_eq!(m.label, Topic::OffTopic.label());
        assert_eq!(m.rule.as_deref(), Some(NO_CONTENT_RULE));
        assert_eq!(m.matched_text, None);
    }

    #[test]
    fn explain_default() {
        let m = classifier().explain("el cielo está nublado hoy en la tarde");
        assert!(m.is_default());
        assert_eq!(m.label, "Otros");
    }

    // === Custom rule sets ===

    fn custom_set() -> RuleSet {
        RuleSet {
            rules: vec![TopicRule::new("kefir", "Kéfir", &[r"\bkéfir\b"])],
            no_content: NoContentRule {
                label: "Ruido".to_string(),
                patterns: vec![],
                min_tokens: 2,
            },
            default_label: "Resto".to_string(),
        }
    }

    #[test]
    fn custom_rule_set_is_independent() {
        let custom = TopicClassifier::from_rule_set(custom_set()).unwrap();
        let builtin = classifier();

        assert_eq!(custom.classify("me gusta el KÉFIR casero"), "Kéfir");
        assert_eq!(custom.classify("hola"), "Ruido");
        assert_eq!(custom.classify("el arequipe es rico"), "Resto");
        assert_eq!(custom.classify_topic("hola"), None);
        assert_eq!(builtin.classify("el arequipe es rico"), Topic::PositiveProduct.label());
    }

    #[test]
    fn empty_rule_set_falls_back() {
        let mut set = custom_set();
        set.rules.clear();
        let c = TopicClassifier::from_rule_set(set).unwrap();
        assert_eq!(c.rule_count(), 0);
        assert_eq!(c.classify("uno dos tres"), "Resto");
        assert_eq!(c.classify(""), "Ruido");
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let mut set = custom_set();
        set.rules.push(TopicRule::new("broken", "Roto", &["(unclosed"]));
        let err = TopicClassifier::from_rule_set(set).unwrap_err();
        assert!(matches!(err, ClassifierError::InvalidPattern { ref rule, .. } if rule == "broken"));
    }

    #[test]
    fn blank_labels_are_rejected() {
        let mut set = custom_set();
        set.default_label = "  ".to_string();
        assert!(matches!(
            TopicClassifier::from_rule_set(set),
            Err(ClassifierError::InvalidRule(_))
        ));
    }

    #[test]
    fn labels_are_deduplicated_in_order() {
        let mut set = custom_set();
        set.rules.push(TopicRule::new("other_kefir", "Kéfir", &["yogur"]));
        set.default_label = "Ruido".to_string();
        let c = TopicClassifier::from_rule_set(set).unwrap();
        assert_eq!(c.labels(), vec!["Kéfir", "Ruido"]);
    }

    #[test]
    fn builtin_labels_match_topics() {
        let expected: Vec<_> = Topic::all().iter().map(|t| t.label()).collect();
        assert_eq!(classifier().labels(), expected);
        assert_eq!(classifier().default_label(), Topic::Other.label());
    }

    #[test]
    fn loads_rule_set_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        std::fs::write(&path, custom_set().to_json().unwrap()).unwrap();

        let c = TopicClassifier::from_file(&path).unwrap();
        assert_eq!(c.classify("kéfir de la casa"), "Kéfir");
        assert!(matches!(
            TopicClassifier::from_file(dir.path().join("missing.json")),
            Err(ClassifierError::Io(_))
        ));
    }

    #[test]
    fn tally_counts_batch() {
        let tally = classifier().tally(["jajajaja", "", "El arequipe estaba muy rico"]);
        assert_eq!(tally.total(), 3);
        assert_eq!(tally.count(Topic::OffTopic.label()), 2);
        assert_eq!(tally.count(Topic::PositiveProduct.label()), 1);
        assert_eq!(tally.count(Topic::Other.label()), 0);
    }

    #[test]
    fn classifier_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TopicClassifier>();
    }
}
