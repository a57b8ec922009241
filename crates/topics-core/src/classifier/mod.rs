//! Topic classification for campaign comments.
//!
//! Comments are lower-cased and tested against an ordered list of regex
//! rules; the first rule that matches decides the topic. Comments that match
//! nothing fall through to a no-content check and then to a default label.

mod pattern;
mod rules;
mod tally;
mod text;
mod topic;

pub use pattern::{TopicClassifier, TopicMatch, NO_CONTENT_RULE};
pub use rules::{NoContentRule, RuleSet, TopicRule, DEFAULT_MIN_TOKENS};
pub use tally::{TopicCount, TopicTally};
pub use text::{comment_text, normalize, token_count};
pub use topic::Topic;
