//! Topics Core - Rule-based topic classification for campaign comments.
//!
//! This crate tags short social-media comments with one topic label using
//! an ordered list of regex rules, and exposes the static campaign metadata
//! used by reporting tooling.
//!
//! ## Example
//!
//! ```
//! use topics_core::TopicClassifier;
//!
//! let classifier = TopicClassifier::new();
//! assert_eq!(
//!     classifier.classify("El arequipe estaba muy rico en mi vuelo"),
//!     "Opinión Positiva - Arequipe/Alpina"
//! );
//! ```

pub mod classifier;
pub mod error;
pub mod metadata;

pub use classifier::{RuleSet, Topic, TopicClassifier, TopicMatch, TopicTally};
pub use error::{ClassifierError, Result};
pub use metadata::{campaign_metadata, CampaignMetadata};
